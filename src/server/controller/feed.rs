use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, feed::FeedEventDto},
    server::{
        controller::param::FeedParam,
        error::AppError,
        middleware::auth::AuthGuard,
        service::feed::{FeedService, DEFAULT_PAGE_SIZE},
        state::AppState,
    },
};

/// Tag for grouping feed endpoints in OpenAPI documentation
pub static FEED_TAG: &str = "feed";

/// Get the caller's activity feed, newest first.
///
/// Always contains the caller's own events. With `friends=true` events of accepted
/// friends are mixed in.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - One page of feed events
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/feed",
    tag = FEED_TAG,
    params(
        ("friends" = Option<bool>, Query, description = "Include friends' events (default: false)"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("page_size" = Option<u64>, Query, description = "Events per page (default: 20, max: 100)")
    ),
    responses(
        (status = 200, description = "Feed page", body = Vec<FeedEventDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FeedParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let events = FeedService::new(&state.db)
        .get_feed(
            user.id,
            params.friends,
            params.page.unwrap_or(0),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
    let dtos: Vec<FeedEventDto> = events.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
