//! `GET/POST /api/{board}`: read the stored snapshot or run a refresh.

use crate::api::error::{ApiError, ApiResult, DATA_NOT_FOUND};
use crate::api::AppState;
use crate::domain::model::{LeaderboardKind, LeaderboardSnapshot};
use actix_web::{get, post, web};

fn board_kind(name: &str) -> ApiResult<LeaderboardKind> {
    name.parse::<LeaderboardKind>()
        .map_err(|e| ApiError::not_found(e.to_string()))
}

#[get("/api/{board}")]
pub async fn latest_snapshot(
    state: web::Data<AppState>,
    board: web::Path<String>,
) -> ApiResult<web::Json<LeaderboardSnapshot>> {
    let kind = board_kind(&board)?;
    match state.refresh.latest(kind).await {
        Ok(Some(snapshot)) => Ok(web::Json(snapshot)),
        Ok(None) => Err(ApiError::not_found(DATA_NOT_FOUND)),
        Err(e) => Err(ApiError::from_read(e)),
    }
}

#[post("/api/{board}")]
pub async fn refresh_snapshot(
    state: web::Data<AppState>,
    board: web::Path<String>,
) -> ApiResult<web::Json<LeaderboardSnapshot>> {
    let kind = board_kind(&board)?;
    tracing::info!("Refresh requested for {}", kind);
    state
        .refresh
        .refresh(kind)
        .await
        .map(web::Json)
        .map_err(ApiError::from_refresh)
}
