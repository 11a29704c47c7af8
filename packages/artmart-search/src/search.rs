use std::collections::HashMap;

use artmart_domain::{Nft, SearchCriteria, SearchOptions, UserId};
use artmart_storage::nfts;

use crate::{Result, SearchService, personalize, query};

impl SearchService {
	/// Runs one personalized catalog search.
	///
	/// The index is consulted for ranked ids only; entities are re-read from
	/// the catalog so callers never see index-staleness in display data. Hits
	/// whose id no longer resolves in the catalog are dropped silently,
	/// preserving the ranked order of the rest.
	pub async fn search(
		&self,
		mut criteria: SearchCriteria,
		viewer_user_id: Option<UserId>,
		options: SearchOptions,
		skip: u64,
		limit: u64,
	) -> Result<Vec<Nft>> {
		if let Some(user_id) = viewer_user_id {
			criteria = criteria.with_profile(personalize::derive(&self.db, user_id).await);
		}

		let compiled = query::compile(&criteria, &options)?;
		let hits = self.es.search(&compiled, skip, limit).await?;

		if options.print_scores {
			for hit in &hits {
				tracing::info!("Hit {} scored {:?}.", hit.id, hit.score);
			}
		}

		let ids: Vec<_> = hits.iter().map(|hit| hit.id).collect();
		let mut by_id: HashMap<_, _> =
			nfts::get_by_ids(&self.db, &ids).await?.into_iter().map(|n| (n.nft_id, n)).collect();
		let resolved: Vec<Nft> = hits.iter().filter_map(|hit| by_id.remove(&hit.id)).collect();

		if resolved.len() < hits.len() {
			tracing::debug!(
				"Dropped {} stale search hits missing from the catalog.",
				hits.len() - resolved.len(),
			);
		}

		Ok(resolved)
	}
}
