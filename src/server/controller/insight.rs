use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        insight::{BalanceDto, CalendarDayDto},
    },
    server::{
        controller::param::{CalendarParam, WindowParam},
        error::AppError,
        middleware::auth::AuthGuard,
        service::insight::InsightService,
        state::AppState,
    },
};

/// Tag for grouping life balance endpoints in OpenAPI documentation
pub static INSIGHT_TAG: &str = "insight";

/// Get the caller's life balance report.
///
/// Built from goal, step and subtask activity in the window: per-sphere shares, an
/// entropy based balance score, the active-day streak and adherence.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Balance report, all zeros when there was no activity
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/insights/balance",
    tag = INSIGHT_TAG,
    params(
        ("window" = Option<String>, Query, description = "Window in days, 14 or 30 (default: 14)")
    ),
    responses(
        (status = 200, description = "Balance report", body = BalanceDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_balance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<WindowParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let balance = InsightService::new(&state.db)
        .balance(user.id, params.window.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(balance.into_dto())))
}

/// Days with activity in the last `days` days, oldest first.
#[utoipa::path(
    get,
    path = "/api/insights/calendar",
    tag = INSIGHT_TAG,
    params(
        ("days" = Option<u32>, Query, description = "Days to look back, 1 to 365 (default: 90)")
    ),
    responses(
        (status = 200, description = "Active days", body = Vec<CalendarDayDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CalendarParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let days = InsightService::new(&state.db)
        .calendar(user.id, params.days)
        .await?;
    let dtos: Vec<CalendarDayDto> = days.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
