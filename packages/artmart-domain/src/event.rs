use serde::{Deserialize, Serialize};

use crate::{LamportAmount, NftId, SaleKind, UserId};

/// Domain events emitted by catalog writes and drained through the outbox.
///
/// Handlers consume events independently; ordering between handlers of
/// different kinds is not guaranteed and must not be assumed.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum DomainEvent {
	NftCreated { nft_id: NftId },
	NftSold { nft_id: NftId, buyer_id: UserId, seller_id: Option<UserId>, price: LamportAmount },
	NftPriceUpdated { nft_id: NftId, price: Option<LamportAmount> },
	NftSaleKindUpdated { nft_id: NftId, sale_kind: SaleKind },
}

impl DomainEvent {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::NftCreated { .. } => "NftCreated",
			Self::NftSold { .. } => "NftSold",
			Self::NftPriceUpdated { .. } => "NftPriceUpdated",
			Self::NftSaleKindUpdated { .. } => "NftSaleKindUpdated",
		}
	}

	pub fn nft_id(&self) -> NftId {
		match self {
			Self::NftCreated { nft_id }
			| Self::NftSold { nft_id, .. }
			| Self::NftPriceUpdated { nft_id, .. }
			| Self::NftSaleKindUpdated { nft_id, .. } => *nft_id,
		}
	}
}
