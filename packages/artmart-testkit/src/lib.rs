mod error;

pub use error::{Error, Result};

use std::{collections::HashSet, env, str::FromStr, sync::Mutex, thread, time::Duration};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::{runtime::Builder, time};
use uuid::Uuid;

const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];
const INDEX_DELETE_TIMEOUT: Duration = Duration::from_secs(10);

/// A throwaway Postgres database plus any search indices a test registers,
/// both dropped on cleanup. Every test gets its own database so acceptance
/// tests can run concurrently against one shared server.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin_options: PgConnectOptions,
	cleaned: bool,
	indices: Mutex<HashSet<String>>,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base_options: PgConnectOptions = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("Failed to parse ARTMART_PG_DSN: {err}.")))?;
		let (admin_options, mut admin_conn) = connect_admin(&base_options).await?;
		let name = format!("artmart_test_{}", Uuid::new_v4().simple());

		admin_conn
			.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| Error::Message(format!("Failed to create test database: {err}.")))?;

		Ok(Self {
			dsn: base_options.clone().database(&name).to_url_lossy().to_string(),
			name,
			admin_options,
			cleaned: false,
			indices: Mutex::new(HashSet::new()),
		})
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Registers a uniquely named search index for cleanup and returns it.
	pub fn index_name(&self, prefix: &str) -> String {
		let index = format!("{prefix}_{}", self.name);

		self.tracked_indices_mut().insert(index.clone());

		index
	}

	pub async fn cleanup(mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		let db_result = drop_database(&self.name, &self.admin_options).await;
		let index_result = delete_indices(&self.snapshot_indices()).await;

		db_result?;
		index_result?;

		self.cleaned = true;

		Ok(())
	}

	fn snapshot_indices(&self) -> Vec<String> {
		self.tracked_indices_mut().iter().cloned().collect()
	}

	fn tracked_indices_mut(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
		self.indices.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let name = self.name.clone();
		let admin_options = self.admin_options.clone();
		let indices = self.snapshot_indices();
		// Drop cannot await, so cleanup runs on its own thread and runtime.
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test database cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(delete_indices(&indices)) {
				eprintln!("Test index cleanup failed: {err}.");
			}
			if let Err(err) = runtime.block_on(drop_database(&name, &admin_options)) {
				eprintln!("Test database cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var("ARTMART_PG_DSN").ok()
}

pub fn env_es_url() -> Option<String> {
	env::var("ARTMART_ES_URL").ok()
}

async fn connect_admin(
	base_options: &PgConnectOptions,
) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last_err = None;

	for database in ADMIN_DATABASES {
		let options = base_options.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => last_err = Some(err),
		}
	}

	Err(Error::Message(format!("Failed to connect to an admin database: {last_err:?}.")))
}

async fn drop_database(name: &str, admin_options: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin_options).await.map_err(|err| {
		Error::Message(format!("Failed to connect to admin database for cleanup: {err}."))
	})?;

	// Lingering pool connections would block the drop.
	let _ = sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.fetch_all(&mut conn)
	.await;

	sqlx::query(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.execute(&mut conn)
		.await
		.map_err(|err| Error::Message(format!("Failed to drop test database: {err}.")))?;

	Ok(())
}

async fn delete_indices(indices: &[String]) -> Result<()> {
	if indices.is_empty() {
		return Ok(());
	}

	let Some(es_url) = env_es_url() else {
		eprintln!("Skipping index cleanup; set ARTMART_ES_URL to delete test indices.");

		return Ok(());
	};
	let es_url = es_url.trim_end_matches('/').to_string();
	let client = reqwest::Client::new();

	for index in indices {
		let request = client.delete(format!("{es_url}/{index}?ignore_unavailable=true")).send();
		let response = time::timeout(INDEX_DELETE_TIMEOUT, request)
			.await
			.map_err(|_| Error::Message(format!("Timed out deleting test index {index:?}.")))??;

		if !response.status().is_success() && response.status().as_u16() != 404 {
			return Err(Error::Message(format!(
				"Failed to delete test index {index:?}: HTTP {}.",
				response.status().as_u16(),
			)));
		}
	}

	Ok(())
}
