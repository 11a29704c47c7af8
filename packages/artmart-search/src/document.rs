use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use artmart_domain::{
	CollectionId, HistoryRecord, Nft, NftId, SaleKind, TagId, UserId, time_serde,
};
use artmart_storage::models::BookmarkRow;

/// Only the latest buyers are kept per NFT, bounding document size and
/// enrichment memory during a full reindex.
pub const RECENT_BUYER_CAP: usize = 5;

/// Denormalized write-only projection of one catalog NFT. The catalog stays
/// the source of truth; this document exists purely for filtering and
/// ranking, and is re-put whole on every index write.
#[derive(Clone, Debug, Serialize)]
pub struct IndexDocument {
	pub title_ngram: String,
	pub description_ngram: String,
	pub creator_id: UserId,
	pub owner_id: Option<UserId>,
	pub recent_buyer_ids: Vec<UserId>,
	pub bookmarked_by_user_ids: Vec<UserId>,
	pub viewer_ids: Vec<UserId>,
	pub collection_id: CollectionId,
	pub sale_kind: SaleKind,
	#[serde(with = "time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time_serde")]
	pub updated_at: OffsetDateTime,
	pub price: Option<String>,
	pub tag_ids: Vec<TagId>,
}

/// Precomputed relation lists attached to a document at index time.
#[derive(Clone, Debug, Default)]
pub struct NftRelations {
	pub recent_buyer_ids: Vec<UserId>,
	pub bookmarked_by_user_ids: Vec<UserId>,
	pub viewer_ids: Vec<UserId>,
}

pub fn document(nft: &Nft, relations: NftRelations) -> IndexDocument {
	IndexDocument {
		title_ngram: nft.title.clone(),
		description_ngram: nft.description.clone(),
		creator_id: nft.creator_id,
		owner_id: nft.owner_id,
		recent_buyer_ids: relations.recent_buyer_ids,
		bookmarked_by_user_ids: relations.bookmarked_by_user_ids,
		viewer_ids: relations.viewer_ids,
		collection_id: nft.collection_id,
		sale_kind: nft.sale.kind(),
		created_at: nft.created_at,
		updated_at: nft.updated_at,
		price: nft.sale.price().map(ToString::to_string),
		tag_ids: nft.tag_ids.clone(),
	}
}

/// Index schema: ids and enums as exact-match keywords, title/description
/// under an n-gram analyzer with a bounded gram-length window.
pub fn index_settings() -> Value {
	serde_json::json!({
		"settings": {
			"index.max_ngram_diff": 5,
			"analysis": {
				"analyzer": {
					"ngram_analyzer": {
						"type": "custom",
						"tokenizer": "ngram_tokenizer",
						"filter": ["lowercase", "asciifolding"],
					},
				},
				"tokenizer": {
					"ngram_tokenizer": {
						"type": "ngram",
						"min_gram": 3,
						"max_gram": 5,
						"token_chars": ["letter", "digit"],
					},
				},
			},
		},
		"mappings": {
			"properties": {
				"title_ngram": { "type": "text", "analyzer": "ngram_analyzer" },
				"description_ngram": { "type": "text", "analyzer": "ngram_analyzer" },
				"creator_id": { "type": "keyword" },
				"owner_id": { "type": "keyword" },
				"recent_buyer_ids": { "type": "keyword" },
				"bookmarked_by_user_ids": { "type": "keyword" },
				"viewer_ids": { "type": "keyword" },
				"collection_id": { "type": "keyword" },
				"sale_kind": { "type": "keyword" },
				"created_at": { "type": "date" },
				"updated_at": { "type": "date" },
				"price": { "type": "double" },
				"tag_ids": { "type": "keyword" },
			},
		},
	})
}

/// Groups sold records into per-NFT buyer lists, newest first, capped at
/// [`RECENT_BUYER_CAP`]. Records without a buyer (non-sold kinds) are
/// skipped.
pub fn recent_buyers_by_nft(records: &[HistoryRecord]) -> HashMap<NftId, Vec<UserId>> {
	let mut by_nft: HashMap<NftId, Vec<(OffsetDateTime, UserId)>> = HashMap::new();

	for record in records {
		let Some(buyer_id) = record.buyer_id() else {
			continue;
		};

		by_nft.entry(record.nft_id).or_default().push((record.created_at, buyer_id));
	}

	by_nft
		.into_iter()
		.map(|(nft_id, mut buyers)| {
			buyers.sort_by(|a, b| b.0.cmp(&a.0));
			buyers.truncate(RECENT_BUYER_CAP);

			(nft_id, buyers.into_iter().map(|(_, buyer_id)| buyer_id).collect())
		})
		.collect()
}

/// Groups bookmark rows into per-NFT bookmarker lists.
pub fn bookmarkers_by_nft(rows: &[BookmarkRow]) -> HashMap<NftId, Vec<UserId>> {
	let mut by_nft: HashMap<NftId, Vec<UserId>> = HashMap::new();

	for row in rows {
		let bookmarkers = by_nft.entry(row.nft_id).or_default();

		if !bookmarkers.contains(&row.user_id) {
			bookmarkers.push(row.user_id);
		}
	}

	by_nft
}
