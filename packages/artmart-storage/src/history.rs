use sqlx::types::Json;

use artmart_domain::{HistoryRecord, HistoryRecordKind, NftId, UserId};

use crate::{Result, db::Db, models::HistoryRow};

const HISTORY_COLUMNS: &str = "record_id, nft_id, detail, created_at";

/// Fetches history records for a set of NFTs, newest first. Kinds narrow the
/// record kinds returned; the reindex pipeline asks for Sold records only.
pub async fn get_many(
	db: &Db,
	nft_ids: &[NftId],
	kinds: &[HistoryRecordKind],
) -> Result<Vec<HistoryRecord>> {
	if nft_ids.is_empty() {
		return Ok(Vec::new());
	}

	let kinds: Vec<&str> = kinds.iter().map(HistoryRecordKind::as_str).collect();
	let rows: Vec<HistoryRow> = sqlx::query_as(&format!(
		"\
SELECT {HISTORY_COLUMNS}
FROM nft_history
WHERE nft_id = ANY($1) AND kind = ANY($2)
ORDER BY created_at DESC, record_id ASC"
	))
	.bind(nft_ids)
	.bind(kinds)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(HistoryRecord::from).collect())
}

/// NFT ids a user previously bought, from sold records.
pub async fn bought_nft_ids(db: &Db, buyer_id: UserId) -> Result<Vec<NftId>> {
	let rows: Vec<(NftId,)> = sqlx::query_as(
		"\
SELECT DISTINCT nft_id
FROM nft_history
WHERE buyer_id = $1 AND kind = 'Sold'",
	)
	.bind(buyer_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Idempotent on record_id, so event handlers may derive deterministic ids
/// and retry safely.
pub async fn insert(db: &Db, record: &HistoryRecord) -> Result<()> {
	sqlx::query(&format!(
		"\
INSERT INTO nft_history ({HISTORY_COLUMNS}, kind, buyer_id)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (record_id) DO NOTHING"
	))
	.bind(record.record_id)
	.bind(record.nft_id)
	.bind(Json(&record.detail))
	.bind(record.created_at)
	.bind(record.detail.kind().as_str())
	.bind(record.buyer_id())
	.execute(&db.pool)
	.await?;

	Ok(())
}
