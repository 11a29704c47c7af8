use std::collections::HashSet;

use artmart_domain::SearchCriteria;
use artmart_storage::nfts;

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn reindex_covers_every_nft_exactly_once_across_batches() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping reindex_covers_every_nft_exactly_once_across_batches; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping reindex_covers_every_nft_exactly_once_across_batches; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let mut cfg = super::test_config(test_db.dsn().to_string(), es_url, index);

	// Force several batches over identical updated_at values so the paging
	// tiebreak is actually exercised.
	cfg.search.reindex_batch_size = 2;

	let service = super::build_service(cfg).await;
	let created_at = super::days_ago(7);
	let seeded: Vec<_> = (0..5)
		.map(|n| super::nft_named(&format!("Batch Piece {n}"), created_at))
		.collect();

	super::seed_nfts(&service, &seeded).await;

	let report = service.reindex().await.expect("Reindex failed.");

	assert_eq!(report.total, 5);
	assert_eq!(report.indexed, 5);

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), None).await;
	let unique: HashSet<_> = ranked.iter().copied().collect();

	assert_eq!(ranked.len(), 5);
	assert_eq!(unique.len(), 5);

	for nft in &seeded {
		assert!(unique.contains(&nft.nft_id));
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn hits_missing_from_the_catalog_are_dropped_silently() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping hits_missing_from_the_catalog_are_dropped_silently; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping hits_missing_from_the_catalog_are_dropped_silently; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;
	let survivor = super::nft_named("Survivor", super::days_ago(3));
	let doomed = super::nft_named("Doomed", super::days_ago(2));

	super::seed_nfts(&service, &[survivor.clone(), doomed.clone()]).await;
	service.reindex().await.expect("Reindex failed.");

	// Delete from the catalog only; the index now holds a stale hit.
	assert!(nfts::delete(&service.db, doomed.nft_id).await.expect("Failed to delete NFT."));

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), None).await;

	assert_eq!(ranked, vec![survivor.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
