//! REST API server for the digital banking demo
//!
//! Exposes the banking service via HTTP endpoints
//! Integrates with the web front-end

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::banking::{BankingService, TransferForm};
use crate::error::BankingError;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub query: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn ok<T: Serialize>(data: T) -> ApiResult {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn fail(error: BankingError) -> ApiResult {
    let status = match &error {
        BankingError::InvalidCredentials | BankingError::NotAuthenticated => {
            StatusCode::UNAUTHORIZED
        }
        BankingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        BankingError::AssistantBusy => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(error.to_string())))
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<BankingService>,
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn login(State(state): State<ApiState>, Json(req): Json<LoginRequest>) -> ApiResult {
    match state.service.login(&req.email, &req.password).await {
        Ok(profile) => ok(profile),
        Err(e) => fail(e),
    }
}

async fn logout(State(state): State<ApiState>) -> ApiResult {
    state.service.sign_out().await;
    ok(serde_json::json!({ "signed_out": true }))
}

async fn dashboard(State(state): State<ApiState>) -> ApiResult {
    match state.service.dashboard().await {
        Ok(summary) => ok(summary),
        Err(e) => fail(e),
    }
}

async fn transfer(State(state): State<ApiState>, Json(form): Json<TransferForm>) -> ApiResult {
    info!("Received transfer request");

    match state.service.execute_transfer(&form).await {
        Ok(transaction) => ok(transaction),
        Err(e) => fail(e),
    }
}

async fn ask_assistant(
    State(state): State<ApiState>,
    Json(req): Json<AssistantRequest>,
) -> ApiResult {
    match state.service.ask_assistant(&req.query).await {
        Ok(exchange) => ok(exchange),
        Err(e) => fail(e),
    }
}

async fn assistant_messages(State(state): State<ApiState>) -> ApiResult {
    match state.service.assistant_messages().await {
        Ok(messages) => ok(serde_json::json!({
            "messages": messages,
            "state": state.service.exchange_state(),
        })),
        Err(e) => fail(e),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(service: Arc<BankingService>) -> Router {
    let state = ApiState { service };

    Router::new()
        .route("/health", get(health))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/dashboard", get(dashboard))
        .route("/api/transfer", post(transfer))
        .route("/api/assistant", post(ask_assistant))
        .route("/api/assistant/messages", get(assistant_messages))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    service: Arc<BankingService>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
