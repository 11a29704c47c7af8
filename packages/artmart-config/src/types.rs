use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub elasticsearch: Elasticsearch,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Elasticsearch {
	pub url: String,
	pub index: String,
	#[serde(default = "default_es_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	#[serde(default = "default_page_size")]
	pub page_size: u32,
	#[serde(default = "default_reindex_batch_size")]
	pub reindex_batch_size: u32,
}

fn default_es_timeout_ms() -> u64 {
	30_000
}

fn default_page_size() -> u32 {
	20
}

fn default_reindex_batch_size() -> u32 {
	50
}
