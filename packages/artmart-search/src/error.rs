use artmart_storage::es::BulkFailure;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error(transparent)]
	Storage(#[from] artmart_storage::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	TimeFormat(#[from] time::error::Format),
	#[error("Some NFT documents failed to index ({}): {}", failures.len(), failed_ids(failures))]
	Reindex { failures: Vec<BulkFailure> },
}

fn failed_ids(failures: &[BulkFailure]) -> String {
	failures.iter().map(|failure| failure.id.as_str()).collect::<Vec<_>>().join(", ")
}
