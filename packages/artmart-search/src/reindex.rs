use serde::Serialize;
use serde_json::Value;

use artmart_domain::{HistoryRecordKind, NftId};
use artmart_storage::{
	es::BulkFailure,
	history, nfts,
	nfts::{NftFilter, Page},
	users,
};

use crate::{
	Error, Result, SearchService,
	document::{self, NftRelations},
	progress::BatchProgress,
};

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ReindexReport {
	pub total: u64,
	pub indexed: u64,
}

impl SearchService {
	/// Rebuilds the search index from the catalog, destructively.
	///
	/// The index is dropped, recreated with the current schema, then refilled
	/// in bounded batches walking the catalog in (updated_at, nft_id) order.
	/// Per-document failures are collected rather than aborting the run; they
	/// surface as one aggregate error after the final refresh, so a handful of
	/// bad documents never leaves the index half-built.
	pub async fn reindex(&self) -> Result<ReindexReport> {
		self.es.delete_index().await?;
		self.es.create_index(&document::index_settings()).await?;

		let filter = NftFilter::default();
		let total = nfts::count(&self.db, &filter).await?;
		let batch_size = u64::from(self.cfg.search.reindex_batch_size);
		let mut progress = BatchProgress::new("Reindex", total);
		let mut failures: Vec<BulkFailure> = Vec::new();
		let mut skip = 0;

		tracing::info!("Reindexing {total} NFTs in batches of {batch_size}.");

		loop {
			let page =
				nfts::get_many(&self.db, &filter, Some(Page { skip, limit: batch_size })).await?;

			if page.is_empty() {
				break;
			}

			let docs = self.enrich(&page).await?;

			failures.extend(self.es.bulk_index(&docs).await?);
			progress.record(page.len() as u64);

			skip += batch_size;
		}

		progress.finish();
		// Refresh regardless of failures so whatever did index is searchable.
		self.es.refresh().await?;

		if !failures.is_empty() {
			return Err(Error::Reindex { failures });
		}

		Ok(ReindexReport { total, indexed: progress.processed() })
	}

	/// Joins one catalog page with its sale history and bookmarks and projects
	/// the batch into index documents.
	async fn enrich(&self, page: &[artmart_domain::Nft]) -> Result<Vec<(NftId, Value)>> {
		let ids: Vec<NftId> = page.iter().map(|nft| nft.nft_id).collect();
		let (sold, bookmarks) = tokio::join!(
			history::get_many(&self.db, &ids, &[HistoryRecordKind::Sold]),
			users::bookmarks_for_nfts(&self.db, &ids),
		);
		let mut recent_buyers = document::recent_buyers_by_nft(&sold?);
		let mut bookmarkers = document::bookmarkers_by_nft(&bookmarks?);

		page.iter()
			.map(|nft| {
				let relations = NftRelations {
					recent_buyer_ids: recent_buyers.remove(&nft.nft_id).unwrap_or_default(),
					bookmarked_by_user_ids: bookmarkers.remove(&nft.nft_id).unwrap_or_default(),
					viewer_ids: Vec::new(),
				};
				let doc = serde_json::to_value(document::document(nft, relations))?;

				Ok((nft.nft_id, doc))
			})
			.collect()
	}
}
