use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        team_goal::{
            AddTeamGoalStepDto, CreateTeamGoalDto, TeamGoalDetailDto, TeamGoalDto,
            TeamGoalFilterDto, TeamGoalStepDto, UpdateTeamGoalDto,
        },
    },
    server::{
        data::team_goal::TeamGoalFilter, error::AppError, middleware::auth::AuthGuard,
        service::team_goal::TeamGoalService, state::AppState,
    },
};

/// Tag for grouping team goal endpoints in OpenAPI documentation
pub static TEAM_GOAL_TAG: &str = "team_goal";

/// List a workspace's team goals with progress and top contributors.
///
/// # Access Control
/// - `Member` - Any member of the workspace
///
/// # Returns
/// - `200 OK` - Team goals matching the filters, newest first
/// - `403 Forbidden` - Caller is not a member
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/goals",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        TeamGoalFilterDto
    ),
    responses(
        (status = 200, description = "Team goals", body = Vec<TeamGoalDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team_goals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
    Query(params): Query<TeamGoalFilterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let filter = TeamGoalFilter {
        status: params.status,
        category: params.category,
        owner_id: params.owner_id,
    };
    let goals = TeamGoalService::new(&state.db)
        .list(user.id, workspace_id, filter)
        .await?;
    let dtos: Vec<TeamGoalDto> = goals.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a team goal.
///
/// The owner defaults to the caller and must be a member of the workspace when given.
/// Visibility defaults to `workspace`.
///
/// # Access Control
/// - `Manager` - Managers, admins and the owner
///
/// # Returns
/// - `201 Created` - The new team goal
/// - `400 Bad Request` - Invalid fields, or the owner is not a member
/// - `403 Forbidden` - Caller is below manager
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/goals",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    request_body = CreateTeamGoalDto,
    responses(
        (status = 201, description = "Team goal created", body = TeamGoalDto),
        (status = 400, description = "Invalid team goal data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_team_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
    Json(payload): Json<CreateTeamGoalDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let goal = TeamGoalService::new(&state.db)
        .create(user.id, workspace_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(goal.into_dto())))
}

/// Get a team goal with its latest steps and every contributor.
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/goals/{goal_id}",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("goal_id" = i32, Path, description = "Team goal ID")
    ),
    responses(
        (status = 200, description = "Team goal details", body = TeamGoalDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Team goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_team_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, goal_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let detail = TeamGoalService::new(&state.db)
        .get(user.id, workspace_id, goal_id)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Contribute progress to a team goal.
///
/// The goal is marked completed once the contributions reach its target.
///
/// # Access Control
/// - `Member` - Any member of the workspace
///
/// # Returns
/// - `201 Created` - The stored step
/// - `400 Bad Request` - Value below 1 or note longer than 500 chars
/// - `403 Forbidden` - Caller is not a member, or the goal is already completed
/// - `404 Not Found` - No such team goal in this workspace
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/goals/{goal_id}/steps",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("goal_id" = i32, Path, description = "Team goal ID")
    ),
    request_body = AddTeamGoalStepDto,
    responses(
        (status = 201, description = "Step added", body = TeamGoalStepDto),
        (status = 400, description = "Invalid step data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a member or goal completed", body = ErrorDto),
        (status = 404, description = "Team goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_team_goal_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, goal_id)): Path<(i32, i32)>,
    Json(payload): Json<AddTeamGoalStepDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let step = TeamGoalService::new(&state.db)
        .add_step(user.id, workspace_id, goal_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(step.into_dto())))
}

/// Update a team goal.
///
/// # Access Control
/// - `Owner` - The goal's owner, or a workspace admin or owner
#[utoipa::path(
    patch,
    path = "/api/workspaces/{workspace_id}/goals/{goal_id}",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("goal_id" = i32, Path, description = "Team goal ID")
    ),
    request_body = UpdateTeamGoalDto,
    responses(
        (status = 200, description = "Updated team goal", body = TeamGoalDto),
        (status = 400, description = "Invalid team goal data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Team goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_team_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, goal_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateTeamGoalDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let goal = TeamGoalService::new(&state.db)
        .update(user.id, workspace_id, goal_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(goal.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}/goals/{goal_id}",
    tag = TEAM_GOAL_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("goal_id" = i32, Path, description = "Team goal ID")
    ),
    responses(
        (status = 204, description = "Team goal deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Team goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_team_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, goal_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    TeamGoalService::new(&state.db)
        .delete(user.id, workspace_id, goal_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
