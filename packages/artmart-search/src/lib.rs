//! Personalized NFT search: query compilation, relevance scoring, preference
//! derivation and full index rebuilds over the catalog.

mod error;
pub use error::Error;

pub mod document;
pub mod personalize;
pub mod progress;
pub mod query;
pub mod reindex;
pub mod score;
pub mod search;

pub use reindex::ReindexReport;

use artmart_config::Config;
use artmart_storage::{db::Db, es::EsIndex};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Search engine facade. Owns the catalog and index handles; the API and
/// worker share one instance.
pub struct SearchService {
	pub cfg: Config,
	pub db: Db,
	pub es: EsIndex,
}

impl SearchService {
	pub fn new(cfg: Config, db: Db, es: EsIndex) -> Self {
		Self { cfg, db, es }
	}
}
