use time::OffsetDateTime;
use uuid::Uuid;

use artmart_domain::{Nft, NftSale, SearchCriteria};

fn nft_with_text(title: &str, description: &str, created_at: OffsetDateTime) -> Nft {
	Nft {
		nft_id: Uuid::new_v4(),
		title: title.to_string(),
		description: description.to_string(),
		creator_id: Uuid::new_v4(),
		owner_id: None,
		collection_id: Uuid::new_v4(),
		tag_ids: Vec::new(),
		sale: NftSale::OpenToOffer,
		created_at,
		updated_at: created_at,
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres and Elasticsearch. Set ARTMART_PG_DSN and ARTMART_ES_URL to run."]
async fn title_match_outranks_newer_description_match() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping title_match_outranks_newer_description_match; set ARTMART_PG_DSN to run this test.");

		return;
	};
	let Some(es_url) = super::test_es_url() else {
		eprintln!("Skipping title_match_outranks_newer_description_match; set ARTMART_ES_URL to run this test.");

		return;
	};
	let index = test_db.index_name("artmart_acceptance");
	let cfg = super::test_config(test_db.dsn().to_string(), es_url, index);
	let service = super::build_service(cfg).await;

	// The description match is newer; the title boost still has to win.
	let title_match = nft_with_text("Cobalt Meridian", "A quiet abstract.", super::hours_ago(3));
	let description_match =
		nft_with_text("Quiet Abstract", "Meridian lines in cobalt.", super::hours_ago(1));
	let unrelated = nft_with_text("Paper Crane", "Folded studies.", super::hours_ago(2));

	super::seed_nfts(&service, &[title_match.clone(), description_match.clone(), unrelated]).await;
	service.reindex().await.expect("Reindex failed.");

	let criteria = SearchCriteria {
		title_or_description: Some("meridian".to_string()),
		..SearchCriteria::default()
	};
	let ranked = super::ranked_ids(&service, criteria, None).await;

	assert_eq!(ranked.first(), Some(&title_match.nft_id));
	assert!(ranked.contains(&description_match.nft_id));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
