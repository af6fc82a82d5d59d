use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        ai::{InsightsResponseDto, UserAnalyticsDto},
        api::{ErrorDto, MessageDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::ai::AiService, state::AppState,
    },
};

/// Tag for grouping AI insight endpoints in OpenAPI documentation
pub static AI_TAG: &str = "ai";

/// Get the caller's active insight messages.
///
/// Regenerates messages first when none exist yet, when the last batch is a day old,
/// or when something important happened since. Otherwise the stored batch is served.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Up to five unread messages plus headline stats
/// - `401 Unauthorized` - Missing or invalid token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/ai/insights",
    tag = AI_TAG,
    responses(
        (status = 200, description = "Active insight messages", body = InsightsResponseDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_insights(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let insights = AiService::new(&state.db, state.generator.as_ref())
        .get_insights(user.id)
        .await?;

    Ok((StatusCode::OK, Json(insights.into_dto())))
}

/// Get the analytics snapshot insight messages are derived from.
#[utoipa::path(
    get,
    path = "/api/ai/analytics",
    tag = AI_TAG,
    responses(
        (status = 200, description = "Analytics snapshot", body = UserAnalyticsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let analytics = AiService::new(&state.db, state.generator.as_ref())
        .analytics(user.id)
        .await?;

    Ok((StatusCode::OK, Json(analytics.into_dto())))
}

/// Dismiss one of the caller's messages.
///
/// # Returns
/// - `200 OK` - Message dismissed
/// - `404 Not Found` - No such message among the caller's
#[utoipa::path(
    post,
    path = "/api/ai/messages/{message_id}/dismiss",
    tag = AI_TAG,
    params(
        ("message_id" = i32, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message dismissed", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Message not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dismiss_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    AiService::new(&state.db, state.generator.as_ref())
        .dismiss(user.id, message_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Message dismissed"))))
}

/// Mark one of the caller's messages as shown so it drops out of the active list.
#[utoipa::path(
    post,
    path = "/api/ai/messages/{message_id}/shown",
    tag = AI_TAG,
    params(
        ("message_id" = i32, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Message marked as shown", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Message not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_message_shown(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    AiService::new(&state.db, state.generator.as_ref())
        .mark_shown(user.id, message_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Message marked as shown"))))
}
