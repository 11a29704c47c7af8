use serde_json::{Map, Value};
use time::OffsetDateTime;

use artmart_domain::time_serde;

use crate::Result;

/// Every document keeps at least weight 1.0, so the recency terms can only
/// add on top of base relevance, never erase it.
pub const BASELINE_WEIGHT: f64 = 1.0;
/// Published this month get a boost.
pub const MONTH_DECAY_WEIGHT: f64 = 0.5;
pub const MONTH_DECAY_SCALE: &str = "31d";
/// Published this year get a boost.
pub const YEAR_DECAY_WEIGHT: f64 = 0.25;
pub const YEAR_DECAY_SCALE: &str = "356d";

const GAUSS_DECAY: f64 = 0.5;

/// Recency scoring wrapper around a boolean query.
///
/// The baseline and the two Gaussian decay terms are summed, and the sum is
/// multiplied into the base relevance score. With that composition a recent
/// document can never outrank a strictly more relevant one; recency only
/// reorders within relevance bands.
pub fn recency_function_score(origin: OffsetDateTime) -> Result<Map<String, Value>> {
	let origin = time_serde::rfc3339(origin)?;
	let functions = serde_json::json!([
		{
			"weight": BASELINE_WEIGHT,
		},
		{
			"weight": MONTH_DECAY_WEIGHT,
			"gauss": {
				"created_at": { "origin": origin, "scale": MONTH_DECAY_SCALE, "decay": GAUSS_DECAY },
			},
		},
		{
			"weight": YEAR_DECAY_WEIGHT,
			"gauss": {
				"created_at": { "origin": origin, "scale": YEAR_DECAY_SCALE, "decay": GAUSS_DECAY },
			},
		},
	]);

	Ok(Map::from_iter([
		("score_mode".to_string(), Value::from("sum")),
		("boost_mode".to_string(), Value::from("multiply")),
		("functions".to_string(), functions),
	]))
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn composition_is_sum_then_multiply() {
		let score = recency_function_score(datetime!(2024-05-14 09:00:00 UTC)).expect("score");

		assert_eq!(score["score_mode"], "sum");
		assert_eq!(score["boost_mode"], "multiply");
	}

	#[test]
	fn baseline_and_decay_terms_are_ordered_and_weighted() {
		let score = recency_function_score(datetime!(2024-05-14 09:00:00 UTC)).expect("score");
		let functions = score["functions"].as_array().expect("functions");

		assert_eq!(functions.len(), 3);
		assert_eq!(functions[0], serde_json::json!({ "weight": 1.0 }));
		assert_eq!(functions[1]["weight"], 0.5);
		assert_eq!(functions[1]["gauss"]["created_at"]["scale"], "31d");
		assert_eq!(functions[2]["weight"], 0.25);
		assert_eq!(functions[2]["gauss"]["created_at"]["scale"], "356d");
	}

	#[test]
	fn origin_is_the_given_reference_date() {
		let score = recency_function_score(datetime!(2024-05-14 09:00:00 UTC)).expect("score");

		assert_eq!(
			score["functions"][1]["gauss"]["created_at"]["origin"],
			"2024-05-14T09:00:00Z",
		);
	}
}
