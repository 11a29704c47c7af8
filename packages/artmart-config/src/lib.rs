mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Elasticsearch, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.elasticsearch.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.elasticsearch.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.elasticsearch.index.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.elasticsearch.index must be non-empty.".to_string(),
		});
	}
	if cfg.storage.elasticsearch.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.elasticsearch.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_size == 0 {
		return Err(Error::Validation {
			message: "search.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.reindex_batch_size == 0 {
		return Err(Error::Validation {
			message: "search.reindex_batch_size must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let url = cfg.storage.elasticsearch.url.trim().trim_end_matches('/').to_string();

	cfg.storage.elasticsearch.url = url;
	cfg.storage.elasticsearch.index = cfg.storage.elasticsearch.index.trim().to_string();
}
