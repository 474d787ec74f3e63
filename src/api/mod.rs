//! HTTP routes served by the `serve` binary.

pub mod error;
pub mod health;
pub mod leaderboards;

pub use error::{ApiError, ApiResult};

use crate::core::refresh::RefreshService;
use actix_web::web;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub refresh: RefreshService,
}

impl AppState {
    pub fn new(refresh: RefreshService) -> Self {
        Self { refresh }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(leaderboards::latest_snapshot)
        .service(leaderboards::refresh_snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback;
    use crate::core::{LeaderboardBoards, LeaderboardSnapshot, PageFetcher};
    use crate::storage::{DocumentSnapshotStore, MemoryDocumentStore};
    use crate::utils::error::{EtlError, Result};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    struct OfflineFetcher;

    #[async_trait]
    impl PageFetcher for OfflineFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            Err(EtlError::FetchError {
                url: url.to_string(),
                status: 502,
            })
        }
    }

    fn state(seed: bool) -> web::Data<AppState> {
        let store = DocumentSnapshotStore::new(Arc::new(MemoryDocumentStore::new()));
        let refresh =
            RefreshService::new(Arc::new(OfflineFetcher), Arc::new(store)).with_seeding(seed);
        web::Data::new(AppState::new(refresh))
    }

    #[actix_web::test]
    async fn get_before_refresh_is_not_found() {
        let app = test::init_service(App::new().app_data(state(false)).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/arena").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], error::DATA_NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_seeds_board_with_fallback_when_hosted() {
        let app = test::init_service(App::new().app_data(state(true)).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/performance").to_request();
        let snapshot: LeaderboardSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            snapshot.boards,
            LeaderboardBoards::Performance {
                models: fallback::performance().rows
            }
        );
    }

    #[actix_web::test]
    async fn post_offline_swe_bench_returns_fallback_then_get_reads_it() {
        let app = test::init_service(App::new().app_data(state(false)).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/swe-bench").to_request();
        let posted: LeaderboardSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posted.boards.row_count(), 14);

        let req = test::TestRequest::get().uri("/api/swe-bench").to_request();
        let stored: LeaderboardSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stored, posted);
    }

    #[actix_web::test]
    async fn post_offline_arena_is_server_error() {
        let app = test::init_service(App::new().app_data(state(false)).configure(configure)).await;
        let req = test::TestRequest::post().uri("/api/arena").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], error::SCRAPE_FAILED);
        assert!(body["details"].as_str().unwrap().contains("502"));
    }

    #[actix_web::test]
    async fn unknown_board_is_not_found() {
        let app = test::init_service(App::new().app_data(state(false)).configure(configure)).await;
        let req = test::TestRequest::post().uri("/api/chess").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
