mod amount;
mod criteria;
mod event;
mod history;
mod nft;
pub mod time_serde;

pub use amount::{AmountError, LamportAmount};
pub use criteria::{
	DateClampPolicy, PreferenceProfile, SearchCriteria, SearchOptions, clamp_date,
};
pub use event::DomainEvent;
pub use history::{HistoryDetail, HistoryRecord, HistoryRecordId, HistoryRecordKind};
pub use nft::{Nft, NftId, NftSale, SaleKind};

pub type UserId = uuid::Uuid;
pub type TagId = uuid::Uuid;
pub type CollectionId = uuid::Uuid;
