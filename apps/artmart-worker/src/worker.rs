use std::time::Duration as StdDuration;

use color_eyre::Result;
use time::{Duration, OffsetDateTime};
use tokio::time as tokio_time;
use uuid::Uuid;

use artmart_domain::{DomainEvent, HistoryDetail, HistoryRecord, NftId};
use artmart_search::document::{self, NftRelations};
use artmart_storage::{db::Db, es::EsIndex, history, models::OutboxEntry, nfts, outbox, users};

const POLL_INTERVAL_MS: i64 = 500;
const CLAIM_LEASE_SECONDS: i64 = 30;
const BASE_BACKOFF_MS: i64 = 500;
const MAX_BACKOFF_MS: i64 = 30_000;
const MAX_OUTBOX_ERROR_CHARS: usize = 1_024;

pub struct WorkerState {
	pub db: Db,
	pub es: EsIndex,
}

pub async fn run_worker(state: WorkerState) -> Result<()> {
	loop {
		if let Err(err) = process_outbox_once(&state).await {
			tracing::error!(error = %err, "Event outbox processing failed.");
		}

		tokio_time::sleep(to_std_duration(Duration::milliseconds(POLL_INTERVAL_MS))).await;
	}
}

async fn process_outbox_once(state: &WorkerState) -> Result<()> {
	let now = OffsetDateTime::now_utc();
	let entry = outbox::claim_next(&state.db, now, Duration::seconds(CLAIM_LEASE_SECONDS)).await?;
	let Some(entry) = entry else {
		return Ok(());
	};
	let result = handle_entry(state, &entry).await;

	match result {
		Ok(()) => {
			outbox::mark_done(&state.db, entry.outbox_id).await?;
		},
		Err(err) => {
			let next_attempts = entry.attempts.saturating_add(1);
			let retry_at = OffsetDateTime::now_utc() + backoff_for_attempt(next_attempts);
			let error_text = truncate_error(&err.to_string());

			outbox::mark_failed(&state.db, entry.outbox_id, next_attempts, &error_text, retry_at)
				.await?;
			tracing::error!(error = %err, outbox_id = %entry.outbox_id, "Outbox entry failed.");
		},
	}

	Ok(())
}

async fn handle_entry(state: &WorkerState, entry: &OutboxEntry) -> Result<()> {
	let event: DomainEvent = serde_json::from_value(entry.payload.0.clone())?;

	match event {
		DomainEvent::NftCreated { nft_id } => index_created_nft(state, entry, nft_id).await,
		DomainEvent::NftSold { nft_id, buyer_id, seller_id, price } => {
			record_history(
				state,
				entry,
				nft_id,
				HistoryDetail::Sold { buyer_id, seller_id, price },
			)
			.await?;

			refresh_document(state, nft_id).await
		},
		DomainEvent::NftPriceUpdated { nft_id, price } => {
			record_history(state, entry, nft_id, HistoryDetail::PriceUpdated { price }).await?;

			refresh_document(state, nft_id).await
		},
		DomainEvent::NftSaleKindUpdated { nft_id, sale_kind } => {
			record_history(state, entry, nft_id, HistoryDetail::SaleKindUpdated { sale_kind })
				.await?;

			refresh_document(state, nft_id).await
		},
	}
}

/// First index write for a freshly created NFT. The owner seeds the recent
/// buyer list; bookmarks and views cannot exist yet.
async fn index_created_nft(state: &WorkerState, entry: &OutboxEntry, nft_id: NftId) -> Result<()> {
	let Some(nft) = nfts::get_by_id(&state.db, nft_id).await? else {
		tracing::info!(nft_id = %nft_id, "NFT missing for created event. Marking done.");

		return Ok(());
	};

	record_history(state, entry, nft_id, HistoryDetail::Created).await?;

	let relations = NftRelations {
		recent_buyer_ids: nft.owner_id.into_iter().collect(),
		..NftRelations::default()
	};
	let doc = serde_json::to_value(document::document(&nft, relations))?;

	state.es.index_doc(nft_id, &doc).await?;

	Ok(())
}

async fn record_history(
	state: &WorkerState,
	entry: &OutboxEntry,
	nft_id: NftId,
	detail: HistoryDetail,
) -> Result<()> {
	let record = HistoryRecord {
		// Deterministic per outbox entry, so redelivery cannot duplicate the
		// audit trail.
		record_id: Uuid::new_v5(&Uuid::NAMESPACE_OID, entry.outbox_id.as_bytes()),
		nft_id,
		detail,
		created_at: entry.created_at,
	};

	history::insert(&state.db, &record).await?;

	Ok(())
}

/// Re-projects one NFT into the index from current catalog state, sale
/// history and bookmarks.
async fn refresh_document(state: &WorkerState, nft_id: NftId) -> Result<()> {
	let Some(nft) = nfts::get_by_id(&state.db, nft_id).await? else {
		tracing::info!(nft_id = %nft_id, "NFT missing during document refresh. Skipping.");

		return Ok(());
	};
	let ids = [nft_id];
	let (sold, bookmarks) = tokio::join!(
		history::get_many(&state.db, &ids, &[artmart_domain::HistoryRecordKind::Sold]),
		users::bookmarks_for_nfts(&state.db, &ids),
	);
	let mut recent_buyers = document::recent_buyers_by_nft(&sold?);
	let mut bookmarkers = document::bookmarkers_by_nft(&bookmarks?);
	let relations = NftRelations {
		recent_buyer_ids: recent_buyers.remove(&nft_id).unwrap_or_default(),
		bookmarked_by_user_ids: bookmarkers.remove(&nft_id).unwrap_or_default(),
		viewer_ids: Vec::new(),
	};
	let doc = serde_json::to_value(document::document(&nft, relations))?;

	state.es.index_doc(nft_id, &doc).await?;

	Ok(())
}

fn backoff_for_attempt(attempt: i32) -> Duration {
	let attempts = attempt.max(1) as u32;
	let exp = attempts.saturating_sub(1).min(6);
	let base = BASE_BACKOFF_MS.saturating_mul(1 << exp);
	let capped = base.min(MAX_BACKOFF_MS);

	Duration::milliseconds(capped)
}

fn truncate_error(text: &str) -> String {
	let mut out: String = text.chars().take(MAX_OUTBOX_ERROR_CHARS).collect();

	if text.chars().count() > MAX_OUTBOX_ERROR_CHARS {
		out.push_str("...");
	}

	out
}

fn to_std_duration(duration: Duration) -> StdDuration {
	let millis = duration.whole_milliseconds();

	if millis <= 0 {
		return StdDuration::from_millis(0);
	}

	StdDuration::from_millis(millis as u64)
}
