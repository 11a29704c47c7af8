use serde_json::{Map, Value};
use time::OffsetDateTime;

use artmart_domain::{SearchCriteria, SearchOptions, clamp_date};

use crate::{Error, Result, score};

/// Title matches must outrank description matches at equal recency; the
/// explicit boost gap encodes that directly.
pub const TITLE_BOOST: f64 = 1.0;
pub const DESCRIPTION_BOOST: f64 = 0.5;
/// Boost-signal priority: recent buyer > bookmarked by > everything else.
/// Verified by the live regression suite; do not reorder casually.
pub const RECENT_BUYER_BOOST: f64 = 0.1;
pub const BOOKMARKED_BY_BOOST: f64 = 0.08;

/// Compiles filter and boost criteria into the engine's boolean +
/// function-score query. Pure except for the implicit "now" used when no
/// reference date is given; pass an explicit date for deterministic output.
pub fn compile(criteria: &SearchCriteria, options: &SearchOptions) -> Result<Value> {
	if let (Some(min_price), Some(max_price)) = (&criteria.min_price, &criteria.max_price)
		&& min_price > max_price
	{
		return Err(Error::InvalidRequest {
			message: format!("min_price {min_price} exceeds max_price {max_price}."),
		});
	}

	let reference_date = clamp_date(
		options.recency_boost_date.unwrap_or_else(OffsetDateTime::now_utc),
		options.clamp_policy,
	);
	let mut function_score = score::recency_function_score(reference_date)?;

	function_score
		.insert("query".to_string(), Value::Object(bool_query(criteria)));

	Ok(serde_json::json!({ "function_score": function_score }))
}

fn bool_query(criteria: &SearchCriteria) -> Map<String, Value> {
	let filter = filter_clauses(criteria);
	let must = must_clauses(criteria);
	let should = should_clauses(criteria);
	let mut bool_body = Map::new();

	if !filter.is_empty() {
		bool_body.insert("filter".to_string(), Value::Array(filter));
	} else if !must.is_empty() {
		// There is a `must` clause, so it is sufficient to give some score to
		// docs; no filter key needed.
	} else {
		// There is no `must`, so we still need to match all docs instead of
		// none.
		bool_body
			.insert("filter".to_string(), serde_json::json!([{ "match_all": {} }]));
	}
	if !should.is_empty() {
		bool_body.insert("should".to_string(), Value::Array(should));
	}
	if !must.is_empty() {
		bool_body.insert("must".to_string(), Value::Array(must));
	}

	bool_body.insert("minimum_should_match".to_string(), Value::from(0));

	let mut out = Map::new();

	out.insert("bool".to_string(), Value::Object(bool_body));

	out
}

/// Hard, score-neutral clauses. AND-combined: a document failing any of them
/// is excluded.
fn filter_clauses(criteria: &SearchCriteria) -> Vec<Value> {
	let mut must_list = Vec::new();

	if let Some(sale_kinds) = &criteria.sale_kinds {
		let kinds: Vec<&str> = sale_kinds.iter().map(|kind| kind.as_str()).collect();

		must_list.push(serde_json::json!({ "terms": { "sale_kind": kinds } }));
	}
	if criteria.min_price.is_some() || criteria.max_price.is_some() {
		let mut range = Map::new();

		// min_price excludes documents priced below it, max_price above it.
		if let Some(min_price) = &criteria.min_price {
			range.insert("gte".to_string(), Value::from(min_price.as_str()));
		}
		if let Some(max_price) = &criteria.max_price {
			range.insert("lte".to_string(), Value::from(max_price.as_str()));
		}

		must_list.push(serde_json::json!({ "range": { "price": range } }));
	}
	if let Some(required_tag_ids) = &criteria.required_tag_ids {
		// One term per tag: every required tag must match.
		must_list.extend(
			required_tag_ids
				.iter()
				.map(|tag_id| serde_json::json!({ "term": { "tag_ids": tag_id } })),
		);
	}

	if must_list.is_empty() {
		Vec::new()
	} else {
		vec![serde_json::json!({ "bool": { "must": must_list } })]
	}
}

/// Score-affecting, required clauses: the free-text match over title and
/// description.
fn must_clauses(criteria: &SearchCriteria) -> Vec<Value> {
	let Some(text) = &criteria.title_or_description else {
		return Vec::new();
	};

	vec![serde_json::json!({
		"bool": {
			"should": [
				{
					"bool": {
						"should": { "match": { "title_ngram": { "query": text } } },
						"boost": TITLE_BOOST,
					},
				},
				{
					"bool": {
						"should": { "match": { "description_ngram": { "query": text } } },
						"boost": DESCRIPTION_BOOST,
					},
				},
			],
		},
	})]
}

/// Optional clauses, additive to the score. Never excluding: a document
/// matching none of them still qualifies. Fixed priority order; the two
/// weighted signals sit materially above the unweighted rest.
fn should_clauses(criteria: &SearchCriteria) -> Vec<Value> {
	let mut should_list = Vec::new();

	if let Some(recent_buyer_ids) = &criteria.recent_buyer_ids {
		let terms: Vec<Value> = recent_buyer_ids
			.iter()
			.map(|user_id| serde_json::json!({ "term": { "recent_buyer_ids": user_id } }))
			.collect();

		should_list
			.push(serde_json::json!({ "bool": { "should": terms, "boost": RECENT_BUYER_BOOST } }));
	}
	if let Some(bookmarked_by_user_ids) = &criteria.bookmarked_by_user_ids {
		let terms: Vec<Value> = bookmarked_by_user_ids
			.iter()
			.map(|user_id| serde_json::json!({ "term": { "bookmarked_by_user_ids": user_id } }))
			.collect();

		should_list
			.push(serde_json::json!({ "bool": { "should": terms, "boost": BOOKMARKED_BY_BOOST } }));
	}
	if let Some(viewer_ids) = &criteria.viewer_ids {
		should_list.extend(
			viewer_ids
				.iter()
				.map(|user_id| serde_json::json!({ "term": { "viewer_ids": user_id } })),
		);
	}
	if let Some(favored_tag_ids) = &criteria.favored_tag_ids {
		should_list.extend(
			favored_tag_ids
				.iter()
				.map(|tag_id| serde_json::json!({ "term": { "tag_ids": tag_id } })),
		);
	}
	if let Some(favored_creator_ids) = &criteria.favored_creator_ids {
		should_list.extend(
			favored_creator_ids
				.iter()
				.map(|user_id| serde_json::json!({ "term": { "creator_id": user_id } })),
		);
	}
	if let Some(favored_collection_ids) = &criteria.favored_collection_ids {
		should_list.extend(
			favored_collection_ids
				.iter()
				.map(|collection_id| serde_json::json!({ "term": { "collection_id": collection_id } })),
		);
	}

	should_list
}
