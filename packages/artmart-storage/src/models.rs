use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use artmart_domain::{HistoryDetail, HistoryRecord, Nft, NftSale};

#[derive(Debug, sqlx::FromRow)]
pub struct NftRow {
	pub nft_id: Uuid,
	pub title: String,
	pub description: String,
	pub creator_id: Uuid,
	pub owner_id: Option<Uuid>,
	pub collection_id: Uuid,
	pub tag_ids: Vec<Uuid>,
	pub sale: Json<NftSale>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl From<NftRow> for Nft {
	fn from(row: NftRow) -> Self {
		Self {
			nft_id: row.nft_id,
			title: row.title,
			description: row.description,
			creator_id: row.creator_id,
			owner_id: row.owner_id,
			collection_id: row.collection_id,
			tag_ids: row.tag_ids,
			sale: row.sale.0,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct HistoryRow {
	pub record_id: Uuid,
	pub nft_id: Uuid,
	pub detail: Json<HistoryDetail>,
	pub created_at: OffsetDateTime,
}
impl From<HistoryRow> for HistoryRecord {
	fn from(row: HistoryRow) -> Self {
		Self {
			record_id: row.record_id,
			nft_id: row.nft_id,
			detail: row.detail.0,
			created_at: row.created_at,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
	pub user_id: Uuid,
	pub nickname: String,
	pub tag_ids: Vec<Uuid>,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct BookmarkRow {
	pub user_id: Uuid,
	pub nft_id: Uuid,
	pub added_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct OutboxEntry {
	pub outbox_id: Uuid,
	pub kind: String,
	pub payload: Json<serde_json::Value>,
	pub status: String,
	pub attempts: i32,
	pub last_error: Option<String>,
	pub available_at: OffsetDateTime,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
