use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        group::{CreateGroupDto, GroupDto, GroupMemberDto, GroupMembershipDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::group::GroupService,
        state::AppState,
    },
};

/// Tag for grouping group endpoints in OpenAPI documentation
pub static GROUP_TAG: &str = "group";

/// Create a group owned by the caller.
#[utoipa::path(
    post,
    path = "/api/groups",
    tag = GROUP_TAG,
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 400, description = "Invalid group data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGroupDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let group = GroupService::new(&state.db).create(user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(group.into_dto())))
}

/// Join a group.
///
/// Joining twice returns the existing membership.
///
/// # Returns
/// - `200 OK` - The caller's membership
/// - `404 Not Found` - No such group
#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/join",
    tag = GROUP_TAG,
    params(
        ("group_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Membership", body = GroupMembershipDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let membership = GroupService::new(&state.db).join(user.id, group_id).await?;

    Ok((StatusCode::OK, Json(membership.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    tag = GROUP_TAG,
    responses(
        (status = 200, description = "Caller's memberships with their groups", body = Vec<GroupMembershipDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let memberships = GroupService::new(&state.db).mine(user.id).await?;
    let dtos: Vec<GroupMembershipDto> = memberships.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/members",
    tag = GROUP_TAG,
    params(
        ("group_id" = i32, Path, description = "Group ID")
    ),
    responses(
        (status = 200, description = "Group members", body = Vec<GroupMemberDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_group_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let members = GroupService::new(&state.db).members(group_id).await?;
    let dtos: Vec<GroupMemberDto> = members.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
