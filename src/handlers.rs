// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the Chirpy service.
//!
//! Every handler returns [`crate::error::Result`], so failures are written
//! by a single `IntoResponse` implementation instead of in each handler.

use crate::config::Config;
use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::metrics::HitCounter;
use crate::models::{Chirp, User};
use crate::validator::ChirpValidator;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub hits: HitCounter,
    pub validator: ChirpValidator,
    pub config: Config,
}

impl AppState {
    /// Assemble the state from a loaded configuration and an open database.
    pub fn new(config: Config, db: Database) -> anyhow::Result<Self> {
        Ok(Self {
            db,
            hits: HitCounter::new()?,
            validator: ChirpValidator::new(&config.validation),
            config,
        })
    }
}

/// Create user request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
}

/// Create chirp request.
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub user_id: String,
}

/// Validate-only request.
#[derive(Debug, Deserialize)]
pub struct ValidateChirpRequest {
    #[serde(default)]
    pub body: String,
}

/// Validate-only response carrying the sanitized body.
#[derive(Debug, Serialize)]
pub struct CleanedBodyResponse {
    pub cleaned_body: String,
}

/// Legacy validate-only response.
#[derive(Debug, Serialize)]
pub struct ValidResponse {
    pub valid: bool,
}

/// Request body, with extraction failures left for [`ApiError`] to write.
type RawBody = std::result::Result<Bytes, BytesRejection>;

fn parse_json<T: DeserializeOwned>(body: RawBody) -> Result<T> {
    Ok(serde_json::from_slice(&body?)?)
}

/// Count every request routed through the asset server, whatever its outcome.
pub async fn count_hits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.increment();
    next.run(request).await
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "OK",
    )
}

/// Operator page showing the current hit count.
pub async fn metrics_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.hits.read()
    ))
}

/// Prometheus text exposition of the hit counter.
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let body = state.hits.render()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

/// Zero the hit counter and delete every user.
///
/// The counter is reset first, so it stays at zero even when the delete
/// fails and a 500 is returned.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.hits.reset();

    let deleted = state.db.delete_all_users().await?;

    info!(deleted, "Metrics and users reset");
    Ok(StatusCode::OK)
}

/// Register a user.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<(StatusCode, Json<User>)> {
    let req: CreateUserRequest = parse_json(body)?;

    let user = state.db.create_user(&req.email).await?;
    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Validate, sanitize and store a chirp.
pub async fn create_chirp(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<(StatusCode, Json<Chirp>)> {
    let req: CreateChirpRequest = parse_json(body)?;

    let cleaned = state.validator.validate(&req.body)?;
    let user_id: Uuid = req.user_id.parse().map_err(ApiError::InvalidUserId)?;

    let chirp = state.db.create_chirp(&cleaned, user_id).await?;
    info!(chirp_id = %chirp.id, user_id = %user_id, "Chirp created");

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// List all chirps, oldest first.
pub async fn list_chirps(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Chirp>>> {
    let chirps = state.db.list_chirps().await?;
    debug!(count = chirps.len(), "Listing chirps");
    Ok(Json(chirps))
}

/// Fetch a single chirp.
pub async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(chirp_id): Path<String>,
) -> Result<Json<Chirp>> {
    let id: Uuid = chirp_id.parse().map_err(ApiError::InvalidChirpId)?;

    state
        .db
        .get_chirp(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("chirp"))
}

/// Validate a chirp body without storing it.
pub async fn validate_chirp(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<Json<CleanedBodyResponse>> {
    let req: ValidateChirpRequest = parse_json(body)?;
    let cleaned_body = state.validator.validate(&req.body)?;
    Ok(Json(CleanedBodyResponse { cleaned_body }))
}

/// Validate a chirp body, answering with the legacy `{"valid": true}` shape.
pub async fn validate_chirp_v1(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<Json<ValidResponse>> {
    let req: ValidateChirpRequest = parse_json(body)?;
    state.validator.validate(&req.body)?;
    Ok(Json(ValidResponse { valid: true }))
}
