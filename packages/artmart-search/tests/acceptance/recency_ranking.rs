use artmart_domain::SearchCriteria;

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn unfiltered_results_rank_newest_first() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping unfiltered_results_rank_newest_first; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping unfiltered_results_rank_newest_first; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	let oldest = super::nft_named("Dune Etude", super::days_ago(90));
	let middle = super::nft_named("Tidal Study", super::days_ago(45));
	let newest = super::nft_named("Vapor Field", super::days_ago(1));

	super::seed_nfts(&service, &[oldest.clone(), middle.clone(), newest.clone()]).await;
	service.reindex().await.expect("Reindex failed.");

	let ranked = super::ranked_ids(&service, SearchCriteria::default(), None).await;

	assert_eq!(ranked, vec![newest.nft_id, middle.nft_id, oldest.nft_id]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
