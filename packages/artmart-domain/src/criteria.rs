use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{CollectionId, LamportAmount, SaleKind, TagId, UserId};

/// Filter and boost signals for one NFT search.
///
/// Filters (text, sale kinds, price bounds, required tags) exclude documents.
/// Boost signals never exclude; they only reorder, each with its own weight.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchCriteria {
	pub title_or_description: Option<String>,
	pub sale_kinds: Option<Vec<SaleKind>>,
	pub min_price: Option<LamportAmount>,
	pub max_price: Option<LamportAmount>,
	/// AND semantics: every required tag must match.
	pub required_tag_ids: Option<Vec<TagId>>,
	pub recent_buyer_ids: Option<Vec<UserId>>,
	pub bookmarked_by_user_ids: Option<Vec<UserId>>,
	pub viewer_ids: Option<Vec<UserId>>,
	pub favored_tag_ids: Option<Vec<TagId>>,
	pub favored_creator_ids: Option<Vec<UserId>>,
	pub favored_collection_ids: Option<Vec<CollectionId>>,
}

impl SearchCriteria {
	/// Folds a derived preference profile into the boost signals. Explicit
	/// boost signals already present in the criteria win over derived ones;
	/// hard filters are never touched.
	pub fn with_profile(mut self, profile: PreferenceProfile) -> Self {
		let PreferenceProfile {
			recent_buyer_ids,
			bookmarked_by_user_ids,
			viewer_ids,
			favored_tag_ids,
			favored_creator_ids,
			favored_collection_ids,
		} = profile;

		self.recent_buyer_ids = self.recent_buyer_ids.or(non_empty(recent_buyer_ids));
		self.bookmarked_by_user_ids =
			self.bookmarked_by_user_ids.or(non_empty(bookmarked_by_user_ids));
		self.viewer_ids = self.viewer_ids.or(non_empty(viewer_ids));
		self.favored_tag_ids = self.favored_tag_ids.or(non_empty(favored_tag_ids));
		self.favored_creator_ids = self.favored_creator_ids.or(non_empty(favored_creator_ids));
		self.favored_collection_ids =
			self.favored_collection_ids.or(non_empty(favored_collection_ids));

		self
	}
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
	if values.is_empty() { None } else { Some(values) }
}

/// Implicit preference signals derived for one user, computed fresh per
/// request and never persisted.
#[derive(Clone, Debug, Default)]
pub struct PreferenceProfile {
	pub recent_buyer_ids: Vec<UserId>,
	pub bookmarked_by_user_ids: Vec<UserId>,
	pub viewer_ids: Vec<UserId>,
	pub favored_tag_ids: Vec<TagId>,
	pub favored_creator_ids: Vec<UserId>,
	pub favored_collection_ids: Vec<CollectionId>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateClampPolicy {
	None,
	/// Items scored within the same clock hour get bit-identical recency
	/// scores, so repeated identical queries keep a stable order.
	#[default]
	TruncateToHour,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchOptions {
	/// Reference date for recency scoring. Defaults to now.
	pub recency_boost_date: Option<OffsetDateTime>,
	pub clamp_policy: DateClampPolicy,
	/// Surface raw relevance scores in logs.
	pub print_scores: bool,
}

pub fn clamp_date(date: OffsetDateTime, policy: DateClampPolicy) -> OffsetDateTime {
	match policy {
		DateClampPolicy::None => date,
		DateClampPolicy::TruncateToHour =>
			date.replace_minute(0)
				.and_then(|d| d.replace_second(0))
				.and_then(|d| d.replace_nanosecond(0))
				.unwrap_or(date),
	}
}
