use artmart_domain::{Nft, PreferenceProfile, UserId};
use artmart_storage::{db::Db, history, nfts, users};

use crate::Result;

/// Derives implicit boost signals for one user from their social graph and
/// engagement history. Derivation is fail-soft: any storage error degrades to
/// an empty profile so the search itself still runs, unpersonalized.
pub async fn derive(db: &Db, user_id: UserId) -> PreferenceProfile {
	match try_derive(db, user_id).await {
		Ok(profile) => profile,
		Err(e) => {
			tracing::warn!("Failed to derive preferences for user {user_id}: {e}");

			PreferenceProfile::default()
		},
	}
}

async fn try_derive(db: &Db, user_id: UserId) -> Result<PreferenceProfile> {
	let (user, followed, bookmarked, bought) = tokio::join!(
		users::get_by_id(db, user_id),
		users::followed_ids(db, user_id),
		users::bookmarked_nft_ids(db, user_id),
		history::bought_nft_ids(db, user_id),
	);
	let Some(user) = user? else {
		// Unknown users degrade to an empty profile, not an error.
		return Ok(PreferenceProfile::default());
	};
	let social_proxy = social_proxy_user_ids(followed?);

	let mut engaged_ids = bookmarked?;

	for nft_id in bought? {
		if !engaged_ids.contains(&nft_id) {
			engaged_ids.push(nft_id);
		}
	}

	let engaged = nfts::get_by_ids(db, &engaged_ids).await?;

	let mut favored_tag_ids = user.tag_ids;
	let mut favored_creator_ids = Vec::new();
	let mut favored_collection_ids = Vec::new();

	for nft in &engaged {
		extend_favored(&mut favored_tag_ids, &mut favored_creator_ids, &mut favored_collection_ids, nft);
	}

	Ok(PreferenceProfile {
		recent_buyer_ids: social_proxy.clone(),
		bookmarked_by_user_ids: social_proxy.clone(),
		viewer_ids: social_proxy,
		favored_tag_ids,
		favored_creator_ids,
		favored_collection_ids,
	})
}

/// The followed-user-id set, deduplicated. "People I follow" is the single
/// proxy for social relevance; the same set feeds the recent-buyer,
/// bookmarked-by and viewer signals. The user's own engagement influences
/// ranking through the favored tag/creator/collection terms instead.
fn social_proxy_user_ids(followed: Vec<UserId>) -> Vec<UserId> {
	let mut proxy = Vec::with_capacity(followed.len());

	for followee_id in followed {
		if !proxy.contains(&followee_id) {
			proxy.push(followee_id);
		}
	}

	proxy
}

fn extend_favored(
	tags: &mut Vec<UserId>,
	creators: &mut Vec<UserId>,
	collections: &mut Vec<UserId>,
	nft: &Nft,
) {
	for tag_id in &nft.tag_ids {
		if !tags.contains(tag_id) {
			tags.push(*tag_id);
		}
	}
	if !creators.contains(&nft.creator_id) {
		creators.push(nft.creator_id);
	}
	if !collections.contains(&nft.collection_id) {
		collections.push(nft.collection_id);
	}
}
