use std::sync::Arc;

use artmart_search::SearchService;
use artmart_storage::{db::Db, es::EsIndex};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	pub async fn new(config: artmart_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let es = EsIndex::new(&config.storage.elasticsearch)?;
		let service = SearchService::new(config, db, es);

		Ok(Self { service: Arc::new(service) })
	}
}
