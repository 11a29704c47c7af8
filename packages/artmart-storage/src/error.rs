pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Search engine returned {status}: {body}")]
	Engine { status: u16, body: String },
	#[error("Unexpected search engine response: {message}")]
	InvalidResponse { message: String },
}
