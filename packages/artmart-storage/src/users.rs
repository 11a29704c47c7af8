use time::OffsetDateTime;

use artmart_domain::{NftId, UserId};

use crate::{Result, db::Db, models::{BookmarkRow, UserRow}};

pub async fn get_by_id(db: &Db, user_id: UserId) -> Result<Option<UserRow>> {
	let row: Option<UserRow> =
		sqlx::query_as("SELECT user_id, nickname, tag_ids, created_at FROM users WHERE user_id = $1")
			.bind(user_id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(row)
}

pub async fn insert(db: &Db, user: &UserRow) -> Result<()> {
	sqlx::query("INSERT INTO users (user_id, nickname, tag_ids, created_at) VALUES ($1, $2, $3, $4)")
		.bind(user.user_id)
		.bind(&user.nickname)
		.bind(&user.tag_ids)
		.bind(user.created_at)
		.execute(&db.pool)
		.await?;

	Ok(())
}

/// Ids of users the given user follows.
pub async fn followed_ids(db: &Db, follower_id: UserId) -> Result<Vec<UserId>> {
	let rows: Vec<(UserId,)> =
		sqlx::query_as("SELECT followee_id FROM user_follows WHERE follower_id = $1")
			.bind(follower_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn follow(db: &Db, follower_id: UserId, followee_id: UserId) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO user_follows (follower_id, followee_id, created_at)
VALUES ($1, $2, $3)
ON CONFLICT DO NOTHING",
	)
	.bind(follower_id)
	.bind(followee_id)
	.bind(OffsetDateTime::now_utc())
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Bookmark rows touching any of the given NFTs, for index-time enrichment.
pub async fn bookmarks_for_nfts(db: &Db, nft_ids: &[NftId]) -> Result<Vec<BookmarkRow>> {
	if nft_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows: Vec<BookmarkRow> =
		sqlx::query_as("SELECT user_id, nft_id, added_at FROM user_bookmarks WHERE nft_id = ANY($1)")
			.bind(nft_ids)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows)
}

/// NFT ids the given user bookmarked.
pub async fn bookmarked_nft_ids(db: &Db, user_id: UserId) -> Result<Vec<NftId>> {
	let rows: Vec<(NftId,)> =
		sqlx::query_as("SELECT nft_id FROM user_bookmarks WHERE user_id = $1")
			.bind(user_id)
			.fetch_all(&db.pool)
			.await?;

	Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn bookmark(db: &Db, user_id: UserId, nft_id: NftId, added_at: OffsetDateTime) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO user_bookmarks (user_id, nft_id, added_at)
VALUES ($1, $2, $3)
ON CONFLICT DO NOTHING",
	)
	.bind(user_id)
	.bind(nft_id)
	.bind(added_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}
