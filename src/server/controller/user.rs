use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        user::{PublicProfileDto, UserSummaryDto},
    },
    server::{
        controller::param::SearchParam, error::AppError, middleware::auth::AuthGuard,
        service::user::UserService, state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Search for people to befriend.
///
/// Matches name or email case-insensitively. Queries shorter than two characters
/// return an empty list. The caller and anyone already sharing a friendship or a
/// pending request with the caller are left out.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Matching users
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = USER_TAG,
    params(
        ("query" = Option<String>, Query, description = "Text to look for in name or email")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserSummaryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let users = UserService::new(&state.db)
        .search(user.id, &params.query)
        .await?;
    let dtos: Vec<UserSummaryDto> = users.iter().map(|u| u.to_summary_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get another user's public profile.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Public profile
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No such user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let user = UserService::new(&state.db).get_public(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_public_dto())))
}
