use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{CollectionId, LamportAmount, TagId, UserId, time_serde};

pub type NftId = uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SaleKind {
	Auction,
	FixedPrice,
	OpenToOffer,
}

impl SaleKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Auction => "Auction",
			Self::FixedPrice => "FixedPrice",
			Self::OpenToOffer => "OpenToOffer",
		}
	}
}

/// Sale terms of an NFT, discriminated by [`SaleKind`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum NftSale {
	Auction {
		#[serde(with = "time_serde")]
		start_date: OffsetDateTime,
		#[serde(with = "time_serde")]
		end_date: OffsetDateTime,
		starting_price: LamportAmount,
		highest_bid: Option<LamportAmount>,
	},
	FixedPrice {
		price: LamportAmount,
	},
	OpenToOffer,
}

impl NftSale {
	pub fn kind(&self) -> SaleKind {
		match self {
			Self::Auction { .. } => SaleKind::Auction,
			Self::FixedPrice { .. } => SaleKind::FixedPrice,
			Self::OpenToOffer => SaleKind::OpenToOffer,
		}
	}

	/// The amount an NFT is currently priced at, if any. Auctions are priced
	/// at their highest bid, falling back to the starting price. Open-to-offer
	/// sales carry no price.
	pub fn price(&self) -> Option<&LamportAmount> {
		match self {
			Self::Auction { starting_price, highest_bid, .. } =>
				Some(highest_bid.as_ref().unwrap_or(starting_price)),
			Self::FixedPrice { price } => Some(price),
			Self::OpenToOffer => None,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Nft {
	pub nft_id: NftId,
	pub title: String,
	pub description: String,
	pub creator_id: UserId,
	pub owner_id: Option<UserId>,
	pub collection_id: CollectionId,
	pub tag_ids: Vec<TagId>,
	pub sale: NftSale,
	#[serde(with = "time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time_serde")]
	pub updated_at: OffsetDateTime,
}
