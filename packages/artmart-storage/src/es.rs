use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use artmart_domain::NftId;

use crate::{Error, Result};

/// Thin gateway over the Elasticsearch HTTP API. No business logic lives
/// here; it isolates the rest of the system from the engine's wire protocol.
pub struct EsIndex {
	http: Client,
	url: String,
	pub index: String,
}

#[derive(Clone, Debug)]
pub struct SearchHit {
	pub id: NftId,
	pub score: Option<f64>,
}

/// One document that failed inside a bulk write.
#[derive(Clone, Debug)]
pub struct BulkFailure {
	pub id: String,
	pub status: u16,
	pub reason: Option<String>,
}

impl EsIndex {
	pub fn new(cfg: &artmart_config::Elasticsearch) -> Result<Self> {
		let http = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { http, url: cfg.url.trim_end_matches('/').to_string(), index: cfg.index.clone() })
	}

	pub async fn create_index(&self, settings: &Value) -> Result<()> {
		let res =
			self.http.put(format!("{}/{}", self.url, self.index)).json(settings).send().await?;

		if res.status().is_success() {
			return Ok(());
		}

		let status = res.status().as_u16();
		let body = res.text().await.unwrap_or_default();

		// Recreating an existing index is a no-op, which keeps schema
		// definition idempotent.
		if status == 400 && body.contains("resource_already_exists_exception") {
			return Ok(());
		}

		Err(Error::Engine { status, body })
	}

	/// Deletes the index. A missing index is not an error.
	pub async fn delete_index(&self) -> Result<()> {
		let res = self
			.http
			.delete(format!("{}/{}?ignore_unavailable=true", self.url, self.index))
			.send()
			.await?;

		if res.status().is_success() || res.status().as_u16() == 404 {
			return Ok(());
		}

		Err(engine_error(res).await)
	}

	// If you need the data available immediately, you can trigger a refresh.
	// It is usually not necessary, as the engine periodically refreshes on
	// its own.
	pub async fn refresh(&self) -> Result<()> {
		let res =
			self.http.post(format!("{}/{}/_refresh", self.url, self.index)).send().await?;

		if res.status().is_success() {
			return Ok(());
		}

		Err(engine_error(res).await)
	}

	pub async fn index_doc(&self, id: NftId, doc: &Value) -> Result<()> {
		let res = self
			.http
			.put(format!("{}/{}/_doc/{}", self.url, self.index, id))
			.json(doc)
			.send()
			.await?;

		if res.status().is_success() {
			return Ok(());
		}

		Err(engine_error(res).await)
	}

	/// Bulk-upserts documents keyed by catalog id. Per-item failures come
	/// back in the result; they do not fail the call.
	pub async fn bulk_index(&self, docs: &[(NftId, Value)]) -> Result<Vec<BulkFailure>> {
		if docs.is_empty() {
			return Ok(Vec::new());
		}

		let mut body = String::new();

		for (id, doc) in docs {
			let action =
				serde_json::json!({ "index": { "_index": self.index, "_id": id.to_string() } });

			body.push_str(&serde_json::to_string(&action)?);
			body.push('\n');
			body.push_str(&serde_json::to_string(doc)?);
			body.push('\n');
		}

		let res = self
			.http
			.post(format!("{}/_bulk", self.url))
			.header("content-type", "application/x-ndjson")
			.body(body)
			.send()
			.await?;

		if !res.status().is_success() {
			return Err(engine_error(res).await);
		}

		let json: Value = res.json().await?;

		Ok(parse_bulk_failures(&json))
	}

	/// Runs a compiled query and returns ranked catalog ids with scores.
	/// Only ids are trusted from the index; display data is re-read from the
	/// catalog by the caller.
	pub async fn search(&self, query: &Value, skip: u64, limit: u64) -> Result<Vec<SearchHit>> {
		let body = serde_json::json!({
			"query": query,
			"from": skip,
			"size": limit,
			"_source": false,
		});
		let res = self
			.http
			.post(format!("{}/{}/_search", self.url, self.index))
			.json(&body)
			.send()
			.await?;

		if !res.status().is_success() {
			return Err(engine_error(res).await);
		}

		let json: Value = res.json().await?;

		parse_search_hits(&json)
	}
}

async fn engine_error(res: reqwest::Response) -> Error {
	let status = res.status().as_u16();
	let body = res.text().await.unwrap_or_default();

	Error::Engine { status, body }
}

fn parse_bulk_failures(json: &Value) -> Vec<BulkFailure> {
	if !json.get("errors").and_then(Value::as_bool).unwrap_or(false) {
		return Vec::new();
	}

	let Some(items) = json.get("items").and_then(Value::as_array) else {
		return Vec::new();
	};

	items
		.iter()
		.filter_map(|item| item.get("index"))
		.filter_map(|index| {
			let status = index.get("status").and_then(Value::as_u64).unwrap_or(0) as u16;

			if (200..300).contains(&status) {
				return None;
			}

			Some(BulkFailure {
				id: index.get("_id").and_then(Value::as_str).unwrap_or_default().to_string(),
				status,
				reason: index
					.pointer("/error/reason")
					.and_then(Value::as_str)
					.map(ToString::to_string),
			})
		})
		.collect()
}

fn parse_search_hits(json: &Value) -> Result<Vec<SearchHit>> {
	let hits = json
		.pointer("/hits/hits")
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search response is missing hits.hits.".to_string(),
		})?;
	let mut out = Vec::with_capacity(hits.len());

	for hit in hits {
		let raw_id =
			hit.get("_id").and_then(Value::as_str).ok_or_else(|| Error::InvalidResponse {
				message: "Search hit is missing _id.".to_string(),
			})?;
		let id = raw_id.parse().map_err(|_| Error::InvalidResponse {
			message: format!("Search hit id {raw_id:?} is not a catalog id."),
		})?;

		out.push(SearchHit { id, score: hit.get("_score").and_then(Value::as_f64) });
	}

	Ok(out)
}
