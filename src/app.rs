// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::models::search::{ErrorResponse, SearchResponse, SuggestionsResponse};
use crate::models::version::VersionResponse;
use crate::services::matcher::MIN_QUERY_LEN;
use crate::services::search::{
    SearchOptions, SearchService, DEFAULT_LOCALE, DEFAULT_SUGGESTION_LIMIT,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Application version embedded by `build.rs`; the patch segment can be
/// overridden at build time via `GIDA_PATCH_VERSION`.
pub const VERSION: &str = env!("GIDA_VERSION");

/// Shared application state injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
}

/// Query string of `GET /api/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub locale: Option<String>,
    pub group_by_type: Option<bool>,
    pub limit: Option<usize>,
}

/// Query string of `GET /api/search/suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestionsParams {
    pub q: Option<String>,
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(err: &anyhow::Error) -> ApiError {
    tracing::error!(error = %err, "search pipeline failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
}

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "gida-search".to_string(),
        version: VERSION.to_string(),
    })
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query must be at least 2 characters long".to_string(),
            }),
        ));
    }

    let opts = SearchOptions {
        locale: params.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        group_by_type: params.group_by_type.unwrap_or(false),
        limit: params.limit,
    };

    let started = Instant::now();
    let (results, cached) = state
        .search_service
        .search(&query, &opts)
        .await
        .map_err(|e| internal_error(&e))?;
    let search_time = (!cached).then(|| started.elapsed().as_millis() as u64);

    Ok(Json(SearchResponse {
        results,
        query,
        search_time,
        cached,
    }))
}

pub async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestionsParams>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    // Short queries are a defined empty-suggestions contract, never an error.
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Ok(Json(SuggestionsResponse {
            suggestions: Vec::new(),
            cached: None,
        }));
    }

    let locale = params.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let limit = params
        .limit
        .filter(|&l| l > 0)
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let (suggestions, cached) = state
        .search_service
        .suggestions(&query, &locale, limit)
        .await
        .map_err(|e| internal_error(&e))?;

    Ok(Json(SuggestionsResponse {
        suggestions,
        cached: Some(cached),
    }))
}

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/api/search", get(search_handler))
        .route("/api/search/suggestions", get(suggestions_handler))
        .with_state(state)
}
