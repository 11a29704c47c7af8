use time::OffsetDateTime;
use uuid::Uuid;

use artmart_domain::SearchCriteria;
use artmart_storage::users;

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn profile_tags_lift_matching_nfts() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping profile_tags_lift_matching_nfts; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping profile_tags_lift_matching_nfts; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	let favored_tag = Uuid::new_v4();
	let created_at = super::days_ago(5);
	let mut tagged = super::nft_named("Tagged Piece", created_at);

	tagged.tag_ids = vec![favored_tag];

	let untagged = super::nft_named("Untagged Piece", created_at);

	super::seed_nfts(&service, &[tagged.clone(), untagged.clone()]).await;

	let viewer = super::seed_user(&service, vec![favored_tag]).await;

	service.reindex().await.expect("Reindex failed.");

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), Some(viewer)).await;

	assert_eq!(ranked, vec![tagged.nft_id, untagged.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn bookmarked_creators_lift_their_other_work() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping bookmarked_creators_lift_their_other_work; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping bookmarked_creators_lift_their_other_work; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	let creator = Uuid::new_v4();
	let created_at = super::days_ago(5);
	let mut bookmarked_work = super::nft_named("Bookmarked Work", created_at);

	bookmarked_work.creator_id = creator;

	let mut other_work = super::nft_named("Other Work", created_at);

	other_work.creator_id = creator;

	let stranger_work = super::nft_named("Stranger Work", created_at);

	super::seed_nfts(&service, &[bookmarked_work.clone(), other_work.clone(), stranger_work.clone()])
		.await;

	let viewer = super::seed_user(&service, Vec::new()).await;

	users::bookmark(&service.db, viewer, bookmarked_work.nft_id, OffsetDateTime::now_utc())
		.await
		.expect("Failed to bookmark.");

	service.reindex().await.expect("Reindex failed.");

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), Some(viewer)).await;

	// Both of the creator's pieces carry the favored-creator term, so they
	// outrank the stranger's in either order between themselves.
	assert_eq!(ranked.len(), 3);
	assert!(ranked[..2].contains(&bookmarked_work.nft_id));
	assert!(ranked[..2].contains(&other_work.nft_id));
	assert_eq!(ranked.get(2), Some(&stranger_work.nft_id));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn a_followed_collectors_bookmark_counts_as_the_viewers_own() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping a_followed_collectors_bookmark_counts_as_the_viewers_own; set ARTMART_PG_DSN to run this test."
		);

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!(
			"Skipping a_followed_collectors_bookmark_counts_as_the_viewers_own; set ARTMART_ES_URL to run this test."
		);

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	let created_at = super::days_ago(5);
	let circle_pick = super::nft_named("Circle Pick", created_at);
	let outside_pick = super::nft_named("Outside Pick", created_at);

	super::seed_nfts(&service, &[circle_pick.clone(), outside_pick.clone()]).await;

	let viewer = super::seed_user(&service, Vec::new()).await;
	let friend = super::seed_user(&service, Vec::new()).await;

	users::follow(&service.db, viewer, friend).await.expect("Failed to follow.");
	users::bookmark(&service.db, friend, circle_pick.nft_id, OffsetDateTime::now_utc())
		.await
		.expect("Failed to bookmark.");

	service.reindex().await.expect("Reindex failed.");

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), Some(viewer)).await;

	assert_eq!(ranked, vec![circle_pick.nft_id, outside_pick.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
