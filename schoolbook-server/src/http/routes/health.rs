//! Liveness and readiness report
//!
//! `GET /health` never opens the database pool; it only reports whether a
//! request has opened it yet.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::PoolProvider;
use crate::http::server::AppState;
use crate::images::ImageDirState;

/// Pool lifecycle as seen by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolState {
    Open,
    /// Opened lazily by the first request that needs it
    NotYetOpened,
    /// Store is not backed by a pool (in-memory)
    NoPool,
}

impl PoolState {
    fn of(pools: Option<&PoolProvider>) -> Self {
        match pools {
            Some(p) if p.is_initialized() => Self::Open,
            Some(_) => Self::NotYetOpened,
            None => Self::NoPool,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when uploads would fail
    pub status: &'static str,
    pub version: &'static str,
    pub database: PoolState,
    pub image_dir: ImageDirState,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let image_dir = state.images.dir_state().await;

    Json(HealthResponse {
        status: if image_dir.accepts_uploads() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: PoolState::of(state.pools.as_deref()),
        image_dir,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn pool_state_reflects_provider() {
        assert_eq!(PoolState::of(None), PoolState::NoPool);

        let provider = PoolProvider::new(DatabaseConfig::default());
        assert_eq!(PoolState::of(Some(&provider)), PoolState::NotYetOpened);
    }

    #[test]
    fn pool_state_serializes_snake_case() {
        let json = serde_json::to_value(PoolState::NotYetOpened).unwrap();
        assert_eq!(json, "not_yet_opened");
    }
}
