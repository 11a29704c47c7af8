use time::OffsetDateTime;
use uuid::Uuid;

use artmart_config::Postgres;
use artmart_search::personalize;
use artmart_storage::{db::Db, models::UserRow, users};

async fn connect_catalog(dsn: &str) -> Db {
	let db = Db::connect(&Postgres { dsn: dsn.to_string(), pool_max_conns: 2 })
		.await
		.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to bootstrap schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ARTMART_PG_DSN to run."]
async fn an_unknown_viewer_derives_an_empty_profile() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping an_unknown_viewer_derives_an_empty_profile; set ARTMART_PG_DSN to run this test."
		);

		return;
	};
	let db = connect_catalog(test_db.dsn()).await;
	let profile = personalize::derive(&db, Uuid::new_v4()).await;

	assert!(profile.recent_buyer_ids.is_empty());
	assert!(profile.bookmarked_by_user_ids.is_empty());
	assert!(profile.viewer_ids.is_empty());
	assert!(profile.favored_tag_ids.is_empty());
	assert!(profile.favored_creator_ids.is_empty());
	assert!(profile.favored_collection_ids.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ARTMART_PG_DSN to run."]
async fn the_social_signal_excludes_the_viewer_themselves() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping the_social_signal_excludes_the_viewer_themselves; set ARTMART_PG_DSN to run this test."
		);

		return;
	};
	let db = connect_catalog(test_db.dsn()).await;
	let viewer = Uuid::new_v4();
	let friend = Uuid::new_v4();

	for user_id in [viewer, friend] {
		let row = UserRow {
			user_id,
			nickname: "collector".to_string(),
			tag_ids: Vec::new(),
			created_at: OffsetDateTime::now_utc(),
		};

		users::insert(&db, &row).await.expect("Failed to insert user.");
	}

	users::follow(&db, viewer, friend).await.expect("Failed to follow.");

	let profile = personalize::derive(&db, viewer).await;

	assert_eq!(profile.recent_buyer_ids, vec![friend]);
	assert_eq!(profile.bookmarked_by_user_ids, vec![friend]);
	assert_eq!(profile.viewer_ids, vec![friend]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
