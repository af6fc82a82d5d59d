use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        workspace::{
            CreateWorkspaceDto, UpdateWorkspaceDto, WorkspaceDetailDto, WorkspaceDto,
            WorkspaceSummaryDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::workspace::WorkspaceService,
        state::AppState,
    },
};

/// Tag for grouping workspace endpoints in OpenAPI documentation
pub static WORKSPACE_TAG: &str = "workspace";

/// Create a workspace.
///
/// The caller becomes its owner.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `headers` - Request headers carrying the bearer token
/// - `payload` - Name (3 to 50 chars), slug (3 to 50 chars of `a-z`, `0-9`, `-`) and
///   an optional description of at most 500 chars
///
/// # Returns
/// - `201 Created` - The workspace as seen by its new owner
/// - `400 Bad Request` - Name, slug or description out of bounds
/// - `409 Conflict` - Slug already taken
#[utoipa::path(
    post,
    path = "/api/workspaces",
    tag = WORKSPACE_TAG,
    request_body = CreateWorkspaceDto,
    responses(
        (status = 201, description = "Workspace created", body = WorkspaceSummaryDto),
        (status = 400, description = "Invalid workspace data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "Slug already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateWorkspaceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let workspace = WorkspaceService::new(&state.db)
        .create(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(workspace.into_dto())))
}

/// List the workspaces the caller belongs to, with role and counts.
#[utoipa::path(
    get,
    path = "/api/workspaces",
    tag = WORKSPACE_TAG,
    responses(
        (status = 200, description = "Caller's workspaces", body = Vec<WorkspaceSummaryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_workspaces(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let workspaces = WorkspaceService::new(&state.db).list(user.id).await?;
    let dtos: Vec<WorkspaceSummaryDto> = workspaces.into_iter().map(|w| w.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a workspace with its members.
///
/// # Returns
/// - `200 OK` - Workspace, members and team goal count
/// - `404 Not Found` - No such workspace, or the caller is not a member
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}",
    tag = WORKSPACE_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Workspace details", body = WorkspaceDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Workspace not found or access denied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let detail = WorkspaceService::new(&state.db)
        .get(user.id, workspace_id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Update a workspace's name, description or settings.
///
/// # Access Control
/// - `Admin` - Workspace admins and the owner
///
/// # Returns
/// - `200 OK` - Updated workspace
/// - `400 Bad Request` - Name or description out of bounds
/// - `403 Forbidden` - Caller is not an admin of the workspace
#[utoipa::path(
    patch,
    path = "/api/workspaces/{workspace_id}",
    tag = WORKSPACE_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    request_body = UpdateWorkspaceDto,
    responses(
        (status = 200, description = "Updated workspace", body = WorkspaceDto),
        (status = 400, description = "Invalid workspace data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
    Json(payload): Json<UpdateWorkspaceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let workspace = WorkspaceService::new(&state.db)
        .update(user.id, workspace_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(workspace.into_dto())))
}

/// Delete a workspace with its members, invitations and team goals.
///
/// # Access Control
/// - `Owner` - Only the workspace owner
#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}",
    tag = WORKSPACE_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    responses(
        (status = 204, description = "Workspace deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    WorkspaceService::new(&state.db)
        .delete(user.id, workspace_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
