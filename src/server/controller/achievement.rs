use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        achievement::{
            AchievementCatalogDto, AchievementProgressDto, AchievementStatsDto,
            UserAchievementDto,
        },
        api::ErrorDto,
    },
    server::{
        controller::param::LimitParam, error::AppError, middleware::auth::AuthGuard,
        model::achievement::UserAchievement, service::achievement::AchievementService,
        state::AppState,
    },
};

/// Tag for grouping achievement endpoints in OpenAPI documentation
pub static ACHIEVEMENT_TAG: &str = "achievement";

const DEFAULT_RECENT_LIMIT: u64 = 5;

fn to_dtos(achievements: Vec<UserAchievement>) -> Vec<UserAchievementDto> {
    achievements
        .into_iter()
        .map(UserAchievement::into_dto)
        .collect()
}

/// List the achievements the caller holds, most recently unlocked first.
#[utoipa::path(
    get,
    path = "/api/achievements",
    tag = ACHIEVEMENT_TAG,
    responses(
        (status = 200, description = "Held achievements", body = Vec<UserAchievementDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_achievements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let achievements = AchievementService::new(&state.db)
        .get_user_achievements(user.id, None)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(achievements))))
}

/// Get the full catalogue split into unlocked and locked achievements.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - `{unlocked, locked}` for the caller
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/achievements/all",
    tag = ACHIEVEMENT_TAG,
    responses(
        (status = 200, description = "Achievement catalogue", body = AchievementCatalogDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let catalog = AchievementService::new(&state.db)
        .get_catalog(user.id)
        .await?;

    Ok((StatusCode::OK, Json(catalog.into_dto())))
}

/// List another user's achievements.
#[utoipa::path(
    get,
    path = "/api/achievements/user/{user_id}",
    tag = ACHIEVEMENT_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Achievements held by the user", body = Vec<UserAchievementDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_achievements(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let achievements = AchievementService::new(&state.db)
        .get_user_achievements(user_id, None)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(achievements))))
}

/// Count unlocked and locked achievements for the caller.
///
/// `progress` is the unlocked share of the catalogue in percent.
#[utoipa::path(
    get,
    path = "/api/achievements/stats",
    tag = ACHIEVEMENT_TAG,
    responses(
        (status = 200, description = "Achievement counts", body = AchievementStatsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let stats = AchievementService::new(&state.db).get_stats(user.id).await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/achievements/recent",
    tag = ACHIEVEMENT_TAG,
    params(
        ("limit" = Option<u64>, Query, description = "Number of achievements (default: 5)")
    ),
    responses(
        (status = 200, description = "Most recently unlocked achievements", body = Vec<UserAchievementDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LimitParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let achievements = AchievementService::new(&state.db)
        .get_user_achievements(user.id, Some(limit))
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(achievements))))
}

/// Progress towards one achievement in percent.
///
/// Counting rules report how far the caller is from the requirement. Special,
/// holiday and leaderboard rules, as well as unknown IDs, report 0.
///
/// # Returns
/// - `200 OK` - Progress between 0 and 100
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/achievements/{achievement_id}/progress",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    responses(
        (status = 200, description = "Progress towards the achievement", body = AchievementProgressDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let progress = AchievementService::new(&state.db)
        .progress(user.id, achievement_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(AchievementProgressDto {
            achievement_id,
            progress: progress as u32,
        }),
    ))
}
