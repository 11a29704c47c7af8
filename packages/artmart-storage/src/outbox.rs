use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use artmart_domain::DomainEvent;

use crate::{Result, db::Db, models::OutboxEntry};

const OUTBOX_COLUMNS: &str = "\
outbox_id, kind, payload, status, attempts, last_error, available_at, created_at, updated_at";

/// Enqueues a domain event. Called inside the transaction that performs the
/// catalog write, so event and write commit or roll back together.
pub async fn enqueue<'e, E>(executor: E, event: &DomainEvent) -> Result<()>
where
	E: sqlx::PgExecutor<'e>,
{
	let now = OffsetDateTime::now_utc();

	sqlx::query(
		"\
INSERT INTO event_outbox (outbox_id, kind, payload, status, available_at, created_at, updated_at)
VALUES ($1, $2, $3, 'PENDING', $4, $4, $4)",
	)
	.bind(Uuid::new_v4())
	.bind(event.kind())
	.bind(sqlx::types::Json(serde_json::to_value(event)?))
	.bind(now)
	.execute(executor)
	.await?;

	Ok(())
}

/// Claims the next due entry, leasing it by pushing available_at forward so a
/// crashed consumer releases the entry when the lease lapses.
pub async fn claim_next(db: &Db, now: OffsetDateTime, lease: Duration) -> Result<Option<OutboxEntry>> {
	let mut tx = db.pool.begin().await?;
	let row: Option<OutboxEntry> = sqlx::query_as(&format!(
		"\
SELECT {OUTBOX_COLUMNS}
FROM event_outbox
WHERE status IN ('PENDING', 'FAILED') AND available_at <= $1
ORDER BY available_at ASC
LIMIT 1
FOR UPDATE SKIP LOCKED"
	))
	.bind(now)
	.fetch_optional(&mut *tx)
	.await?;
	let entry = if let Some(mut entry) = row {
		let lease_until = now + lease;

		sqlx::query("UPDATE event_outbox SET available_at = $1, updated_at = $2 WHERE outbox_id = $3")
			.bind(lease_until)
			.bind(now)
			.bind(entry.outbox_id)
			.execute(&mut *tx)
			.await?;

		entry.available_at = lease_until;
		entry.updated_at = now;

		Some(entry)
	} else {
		None
	};

	tx.commit().await?;

	Ok(entry)
}

pub async fn mark_done(db: &Db, outbox_id: Uuid) -> Result<()> {
	sqlx::query("UPDATE event_outbox SET status = 'DONE', updated_at = $1 WHERE outbox_id = $2")
		.bind(OffsetDateTime::now_utc())
		.bind(outbox_id)
		.execute(&db.pool)
		.await?;

	Ok(())
}

pub async fn mark_failed(
	db: &Db,
	outbox_id: Uuid,
	attempts: i32,
	error_text: &str,
	retry_at: OffsetDateTime,
) -> Result<()> {
	sqlx::query(
		"\
UPDATE event_outbox
SET status = 'FAILED',
	attempts = $1,
	last_error = $2,
	available_at = $3,
	updated_at = $4
WHERE outbox_id = $5",
	)
	.bind(attempts)
	.bind(error_text)
	.bind(retry_at)
	.bind(OffsetDateTime::now_utc())
	.bind(outbox_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}
