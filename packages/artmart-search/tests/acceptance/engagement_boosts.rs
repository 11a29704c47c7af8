use time::OffsetDateTime;
use uuid::Uuid;

use artmart_domain::{HistoryDetail, HistoryRecord, LamportAmount, SearchCriteria};
use artmart_storage::{history, users};

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn purchases_outrank_bookmarks_outrank_the_rest() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping purchases_outrank_bookmarks_outrank_the_rest; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping purchases_outrank_bookmarks_outrank_the_rest; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	// Same age, so the boost weights alone decide the order.
	let created_at = super::days_ago(10);
	let bought = super::nft_named("Bought Piece", created_at);
	let bookmarked = super::nft_named("Bookmarked Piece", created_at);
	let plain = super::nft_named("Plain Piece", created_at);

	super::seed_nfts(&service, &[bought.clone(), bookmarked.clone(), plain.clone()]).await;

	let viewer = super::seed_user(&service, Vec::new()).await;

	history::insert(
		&service.db,
		&HistoryRecord {
			record_id: Uuid::new_v4(),
			nft_id: bought.nft_id,
			detail: HistoryDetail::Sold {
				buyer_id: viewer,
				seller_id: None,
				price: LamportAmount::from(1_000),
			},
			created_at: OffsetDateTime::now_utc(),
		},
	)
	.await
	.expect("Failed to record sale.");
	users::bookmark(&service.db, viewer, bookmarked.nft_id, OffsetDateTime::now_utc())
		.await
		.expect("Failed to bookmark.");

	service.reindex().await.expect("Reindex failed.");

	let criteria = SearchCriteria {
		recent_buyer_ids: Some(vec![viewer]),
		bookmarked_by_user_ids: Some(vec![viewer]),
		..SearchCriteria::default()
	};
	let ranked = super::ranked_ids(&service, criteria, None).await;

	assert_eq!(ranked, vec![bought.nft_id, bookmarked.nft_id, plain.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn a_purchase_outranks_a_slightly_newer_stranger() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping a_purchase_outranks_a_slightly_newer_stranger; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping a_purchase_outranks_a_slightly_newer_stranger; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	let bought = super::nft_named("Bought Piece", super::hours_ago(4));
	let stranger = super::nft_named("Stranger Piece", super::hours_ago(2));

	super::seed_nfts(&service, &[bought.clone(), stranger.clone()]).await;

	let viewer = super::seed_user(&service, Vec::new()).await;

	history::insert(
		&service.db,
		&HistoryRecord {
			record_id: Uuid::new_v4(),
			nft_id: bought.nft_id,
			detail: HistoryDetail::Sold {
				buyer_id: viewer,
				seller_id: None,
				price: LamportAmount::from(1_000),
			},
			created_at: OffsetDateTime::now_utc(),
		},
	)
	.await
	.expect("Failed to record sale.");

	service.reindex().await.expect("Reindex failed.");

	let criteria =
		SearchCriteria { recent_buyer_ids: Some(vec![viewer]), ..SearchCriteria::default() };
	let ranked = super::ranked_ids(&service, criteria, None).await;

	assert_eq!(ranked, vec![bought.nft_id, stranger.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
