use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{LamportAmount, NftId, SaleKind, UserId, time_serde};

pub type HistoryRecordId = uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum HistoryRecordKind {
	Created,
	Sold,
	PriceUpdated,
	SaleKindUpdated,
}

impl HistoryRecordKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Created => "Created",
			Self::Sold => "Sold",
			Self::PriceUpdated => "PriceUpdated",
			Self::SaleKindUpdated => "SaleKindUpdated",
		}
	}
}

/// One event in an NFT's audit trail, discriminated by [`HistoryRecordKind`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum HistoryDetail {
	Created,
	Sold { buyer_id: UserId, seller_id: Option<UserId>, price: LamportAmount },
	PriceUpdated { price: Option<LamportAmount> },
	SaleKindUpdated { sale_kind: SaleKind },
}

impl HistoryDetail {
	pub fn kind(&self) -> HistoryRecordKind {
		match self {
			Self::Created => HistoryRecordKind::Created,
			Self::Sold { .. } => HistoryRecordKind::Sold,
			Self::PriceUpdated { .. } => HistoryRecordKind::PriceUpdated,
			Self::SaleKindUpdated { .. } => HistoryRecordKind::SaleKindUpdated,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryRecord {
	pub record_id: HistoryRecordId,
	pub nft_id: NftId,
	pub detail: HistoryDetail,
	#[serde(with = "time_serde")]
	pub created_at: OffsetDateTime,
}

impl HistoryRecord {
	/// The buyer, for sold records. Other kinds carry no buyer.
	pub fn buyer_id(&self) -> Option<UserId> {
		match &self.detail {
			HistoryDetail::Sold { buyer_id, .. } => Some(*buyer_id),
			_ => None,
		}
	}
}
