//! Tokenview API Server — merged token profiles for a Farcaster viewer.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{any::Any, net::SocketAddr, sync::Arc};
use tokenview_core::{AppError, Credentials, Settings, telemetry};
use tokenview_profile::{Aggregator, Providers, TokenProfile, TokenQuery};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Shared application state.
struct AppState {
    credentials: Credentials,
    aggregator: Aggregator,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init();
    let settings = Settings::from_env()?;

    tracing::info!(
        timeout_ms = settings.upstream_timeout_ms,
        "Starting Tokenview API Server"
    );

    if let Err(e) = settings.credentials.require() {
        tracing::warn!(error = %e, "token routes will answer 500 until configured");
    }

    let providers = Providers::http(&settings.endpoints)?;
    let state = Arc::new(AppState {
        credentials: settings.credentials.clone(),
        aggregator: Aggregator::new(providers, settings.upstream_timeout()),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api_port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped.");
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/view-token", get(view_token_query).post(view_token_body))
        .route("/api/fetch-token", get(view_token_query).post(view_token_body))
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully…");
}

// ─── Request Params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenParams {
    fid: Option<String>,
    #[serde(rename = "tokenAddress")]
    token_address: Option<String>,
}

/// Pull the two identifiers out of a JSON body.
///
/// Only unparseable JSON is its own error. Any other shape just lacks the
/// parameters; numeric values are accepted as text.
fn params_from_body(body: &[u8]) -> Result<TokenParams, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::InvalidInput("Invalid JSON in request body".to_string()))?;

    let text = |key: &str| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    Ok(TokenParams {
        fid: text("fid"),
        token_address: text("tokenAddress"),
    })
}

// ─── Response Types ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileResponse {
    success: bool,
    token: TokenProfile,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// [`AppError`] rendered as `{ error, details? }` with its own status.
struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);

        if err.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
        } else {
            tracing::error!(status = status.as_u16(), error = ?err, "request failed");
        }

        let body = ErrorBody {
            error: err.public_message(),
            details: err.details(),
        };
        (status, Json(body)).into_response()
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };
    tracing::error!(%details, "handler panicked");

    let body = ErrorBody {
        error: "Internal server error".to_string(),
        details: Some(details),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

// ─── Handlers ───────────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok"
}

/// GET /api/view-token?fid=&tokenAddress= — profile from query parameters.
async fn view_token_query(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TokenParams>, QueryRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Query(params) = params.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    view_token(&state, params).await
}

/// POST /api/view-token — profile from a JSON body with the same keys.
async fn view_token_body(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ProfileResponse>, ApiError> {
    let params = params_from_body(&body)?;
    view_token(&state, params).await
}

/// Input first, then credentials, then the upstream fan-out.
async fn view_token(
    state: &AppState,
    params: TokenParams,
) -> Result<Json<ProfileResponse>, ApiError> {
    let query = TokenQuery::new(params.fid, params.token_address)?;
    let keys = state.credentials.require()?;

    tracing::info!(fid = %query.fid, token = %query.token_address, "view token");

    let token = state.aggregator.build_profile(&query, &keys).await?;
    Ok(Json(ProfileResponse {
        success: true,
        token,
    }))
}
