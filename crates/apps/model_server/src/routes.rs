use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use catalog::{Catalog, MatchResult, SearchEngine, SearchPolicy, SearchQuery, TileUrlBuilder};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::config::{DetailLevel, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    engines: Arc<Engines>,
}

struct Engines {
    high: SearchEngine,
    low: SearchEngine,
    default_detail: DetailLevel,
}

impl AppState {
    pub fn new(catalog: Catalog, config: &ServerConfig) -> Self {
        let engines = Engines {
            high: SearchEngine::new(
                SearchPolicy::CornerContainment,
                TileUrlBuilder::new(config.base_url.as_str(), config.high_tier.as_str()),
            ),
            low: SearchEngine::new(
                SearchPolicy::CentroidDistance,
                TileUrlBuilder::new(config.base_url.as_str(), config.low_tier.as_str()),
            ),
            default_detail: config.default_detail,
        };
        Self {
            catalog: Arc::new(catalog),
            engines: Arc::new(engines),
        }
    }

    fn engine(&self, detail: Option<DetailLevel>) -> &SearchEngine {
        match detail.unwrap_or(self.engines.default_detail) {
            DetailLevel::High => &self.engines.high,
            DetailLevel::Low => &self.engines.low,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    longitude: f64,
    latitude: f64,
    alt: f64,
    radius: f64,
    #[serde(default)]
    detail: Option<DetailLevel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    status: &'static str,
    error_message: String,
    items: Option<Vec<MatchResult>>,
}

pub fn router(state: AppState, public_root: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/search-city-model", get(search_city_model))
        .nest_service("/public", ServeDir::new(public_root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn search_city_model(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(err) => {
            warn!("search request rejected: {err}");
            let body = SearchResponse {
                status: "error",
                error_message: "bad request".to_string(),
                items: None,
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let query = SearchQuery {
        longitude: params.longitude,
        latitude: params.latitude,
        altitude: params.alt,
        radius: params.radius,
    };
    let engine = state.engine(params.detail);
    let items = engine.search(&state.catalog, &query);
    debug!(
        "search lat={} lon={} alt={} r={} tier={} -> {} matches",
        query.latitude,
        query.longitude,
        query.altitude,
        query.radius,
        engine.urls().tier(),
        items.len()
    );

    let body = SearchResponse {
        status: "ok",
        error_message: String::new(),
        items: Some(items),
    };
    (StatusCode::OK, Json(body)).into_response()
}
