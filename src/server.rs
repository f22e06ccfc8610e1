// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Route table for the Chirpy service.

use crate::handlers::{
    count_hits, create_chirp, create_user, get_chirp, health, list_chirps, metrics_page,
    prometheus_metrics, reset, validate_chirp, validate_chirp_v1, AppState,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the full router.
///
/// Only the `/app` asset routes pass through the hit counter.
pub fn router(state: Arc<AppState>) -> Router {
    let assets = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.assets.root))
        .route_layer(middleware::from_fn_with_state(state.clone(), count_hits));

    let mut app = Router::new()
        .route("/api/healthz", get(health))
        .route("/api/users", post(create_user))
        .route("/api/chirps", post(create_chirp).get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/api/validate_chirp", post(validate_chirp))
        .route("/api/v1/validate_chirp", post(validate_chirp_v1))
        .route("/admin/metrics", get(metrics_page))
        .route("/admin/reset", post(reset));

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(prometheus_metrics));
    }

    app.merge(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
