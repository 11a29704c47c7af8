use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use artmart_domain::{Nft, SearchCriteria, SearchOptions, UserId};
use artmart_search::{Error as SearchError, ReindexReport};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/nfts/search", post(search))
        .with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/admin/reindex", post(reindex))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: SearchCriteria,
    /// When set, results are personalized for this user.
    pub viewer_user_id: Option<UserId>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub print_scores: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub nfts: Vec<Nft>,
}

async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let options = SearchOptions { print_scores: payload.print_scores, ..SearchOptions::default() };
    let limit = u64::from(state.service.cfg.search.page_size);
    let nfts = state
        .service
        .search(payload.criteria, payload.viewer_user_id, options, payload.skip, limit)
        .await?;
    Ok(Json(SearchResponse { nfts }))
}

async fn reindex(State(state): State<AppState>) -> Result<Json<ReindexReport>, ApiError> {
    let report = state.service.reindex().await?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error_code: String,
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error_code: String,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match &err {
            SearchError::InvalidRequest { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", err.to_string())
            }
            SearchError::Reindex { .. } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "reindex_failed", err.to_string())
            }
            _ => {
                tracing::error!("Request failed: {err}.");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error.",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_code: self.error_code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
