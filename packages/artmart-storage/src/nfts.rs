use sqlx::{Postgres, QueryBuilder, types::Json};

use artmart_domain::{DomainEvent, Nft, NftId, UserId};

use crate::{Result, db::Db, models::NftRow, outbox};

const NFT_COLUMNS: &str = "\
nft_id, title, description, creator_id, owner_id, collection_id, tag_ids, sale, created_at, updated_at";

/// Catalog read filter. All lists are OR within the list, AND across fields.
#[derive(Clone, Debug, Default)]
pub struct NftFilter {
	pub ids: Option<Vec<NftId>>,
	pub creator_ids: Option<Vec<UserId>>,
	pub owner_ids: Option<Vec<UserId>>,
}

#[derive(Clone, Copy, Debug)]
pub struct Page {
	pub skip: u64,
	pub limit: u64,
}

/// Pages through the catalog ordered by (updated_at, nft_id) ascending. The
/// tiebreak on nft_id keeps the order total, so page boundaries never skip or
/// repeat rows even when many NFTs share an updated_at.
pub async fn get_many(db: &Db, filter: &NftFilter, page: Option<Page>) -> Result<Vec<Nft>> {
	let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {NFT_COLUMNS} FROM nfts"));

	push_filter(&mut query, filter);
	query.push(" ORDER BY updated_at ASC, nft_id ASC");

	if let Some(page) = page {
		query.push(" OFFSET ").push_bind(page.skip as i64);
		query.push(" LIMIT ").push_bind(page.limit as i64);
	}

	let rows: Vec<NftRow> = query.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows.into_iter().map(Nft::from).collect())
}

/// Batched id lookup for resolving search hits back to catalog entities. Rows
/// come back in storage order; callers re-impose their own ordering.
pub async fn get_by_ids(db: &Db, ids: &[NftId]) -> Result<Vec<Nft>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows: Vec<NftRow> =
		sqlx::query_as(&format!("SELECT {NFT_COLUMNS} FROM nfts WHERE nft_id = ANY($1)"))
			.bind(ids)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows.into_iter().map(Nft::from).collect())
}

pub async fn get_by_id(db: &Db, id: NftId) -> Result<Option<Nft>> {
	let row: Option<NftRow> =
		sqlx::query_as(&format!("SELECT {NFT_COLUMNS} FROM nfts WHERE nft_id = $1"))
			.bind(id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(row.map(Nft::from))
}

pub async fn count(db: &Db, filter: &NftFilter) -> Result<u64> {
	let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM nfts");

	push_filter(&mut query, filter);

	let (total,): (i64,) = query.build_query_as().fetch_one(&db.pool).await?;

	Ok(total.max(0) as u64)
}

pub async fn insert(db: &Db, nft: &Nft) -> Result<()> {
	insert_with(&db.pool, nft).await
}

/// Catalog create: writes the NFT row and enqueues the NftCreated domain
/// event in the same transaction, so the event cannot be lost between the
/// catalog write and the index update.
pub async fn create_with_event(db: &Db, nft: &Nft) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	insert_with(&mut *tx, nft).await?;
	outbox::enqueue(&mut *tx, &DomainEvent::NftCreated { nft_id: nft.nft_id }).await?;

	tx.commit().await?;

	Ok(())
}

async fn insert_with<'e, E>(executor: E, nft: &Nft) -> Result<()>
where
	E: sqlx::PgExecutor<'e>,
{
	sqlx::query(&format!(
		"\
INSERT INTO nfts ({NFT_COLUMNS})
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
	))
	.bind(nft.nft_id)
	.bind(&nft.title)
	.bind(&nft.description)
	.bind(nft.creator_id)
	.bind(nft.owner_id)
	.bind(nft.collection_id)
	.bind(&nft.tag_ids)
	.bind(Json(&nft.sale))
	.bind(nft.created_at)
	.bind(nft.updated_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn delete(db: &Db, id: NftId) -> Result<bool> {
	let result =
		sqlx::query("DELETE FROM nfts WHERE nft_id = $1").bind(id).execute(&db.pool).await?;

	Ok(result.rows_affected() > 0)
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &NftFilter) {
	let mut prefix = " WHERE ";
	let mut push_list = |query: &mut QueryBuilder<'_, Postgres>, column: &str, ids: &Option<Vec<uuid::Uuid>>| {
		if let Some(ids) = ids {
			query.push(prefix).push(column).push(" = ANY(").push_bind(ids.clone()).push(")");
			prefix = " AND ";
		}
	};

	push_list(query, "nft_id", &filter.ids);
	push_list(query, "creator_id", &filter.creator_ids);
	push_list(query, "owner_id", &filter.owner_ids);
}
