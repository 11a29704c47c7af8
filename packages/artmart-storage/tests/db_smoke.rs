use artmart_config::Postgres;
use artmart_storage::db::Db;
use artmart_testkit::TestDatabase;

async fn bootstrap() -> Option<(TestDatabase, Db)> {
	let base_dsn = artmart_testkit::env_dsn()?;
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	Some((test_db, db))
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ARTMART_PG_DSN to run."]
async fn catalog_tables_exist_after_bootstrap() {
	let Some((test_db, db)) = bootstrap().await else {
		eprintln!("Skipping catalog_tables_exist_after_bootstrap; set ARTMART_PG_DSN to run this test.");

		return;
	};

	for table in ["nfts", "nft_history", "users", "user_follows", "user_bookmarks", "event_outbox"]
	{
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ARTMART_PG_DSN to run."]
async fn bootstrap_is_idempotent() {
	let Some((test_db, db)) = bootstrap().await else {
		eprintln!("Skipping bootstrap_is_idempotent; set ARTMART_PG_DSN to run this test.");

		return;
	};

	db.ensure_schema().await.expect("Second bootstrap failed.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
