use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        goal::{
            CreateGoalDto, CreateStepDto, CreateSubtaskDto, GoalDto, StepDto, SubtaskDto,
            UpdateGoalDto, UpdateSubtaskDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::ai::GenerationTrigger,
        service::{
            ai::spawn_generation, goal::GoalService, step::StepService, subtask::SubtaskService,
        },
        state::AppState,
    },
};

/// Tag for grouping goal, subtask and step endpoints in OpenAPI documentation
pub static GOAL_TAG: &str = "goal";

/// Create a goal.
///
/// Title and description are moderated. On success the goal shows up in the caller's
/// feed and achievements are re-evaluated.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `state` - Application state containing the database connection and moderation list
/// - `headers` - Request headers carrying the bearer token
/// - `payload` - Goal fields; privacy defaults to private and progress type to quantity
///
/// # Returns
/// - `201 Created` - The new goal
/// - `400 Bad Request` - Unknown sphere, privacy or progress type
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - Text rejected by moderation
#[utoipa::path(
    post,
    path = "/api/goals",
    tag = GOAL_TAG,
    request_body = CreateGoalDto,
    responses(
        (status = 201, description = "Goal created", body = GoalDto),
        (status = 400, description = "Invalid goal data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Text rejected by moderation", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGoalDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let goal = GoalService::new(&state.db)
        .create(&state.moderation, user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(goal.into_dto())))
}

/// List the caller's goals, newest first.
#[utoipa::path(
    get,
    path = "/api/goals",
    tag = GOAL_TAG,
    responses(
        (status = 200, description = "Caller's goals", body = Vec<GoalDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_goals(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let goals = GoalService::new(&state.db).list(user.id).await?;
    let dtos: Vec<GoalDto> = goals.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get one of the caller's goals.
///
/// # Returns
/// - `200 OK` - The goal
/// - `403 Forbidden` - Goal belongs to someone else
/// - `404 Not Found` - No such goal
#[utoipa::path(
    get,
    path = "/api/goals/{goal_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "The goal", body = GoalDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let goal = GoalService::new(&state.db).get_owned(user.id, goal_id).await?;

    Ok((StatusCode::OK, Json(goal.into_dto())))
}

/// Update one of the caller's goals.
///
/// A partial update. Sending `completed_at` for an open goal completes it, which
/// re-evaluates achievements and schedules fresh insight messages in the background.
/// Sending `completed_at: null` reopens it.
///
/// # Access Control
/// - `Owner` - Only the goal's owner can update it
///
/// # Returns
/// - `200 OK` - Updated goal
/// - `400 Bad Request` - Unknown sphere, privacy or progress type
/// - `403 Forbidden` - Goal belongs to someone else, or text rejected by moderation
/// - `404 Not Found` - No such goal
#[utoipa::path(
    patch,
    path = "/api/goals/{goal_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    request_body = UpdateGoalDto,
    responses(
        (status = 200, description = "Updated goal", body = GoalDto),
        (status = 400, description = "Invalid goal data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner or text rejected", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
    Json(payload): Json<UpdateGoalDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let updated = GoalService::new(&state.db)
        .update(&state.moderation, user.id, goal_id, payload)
        .await?;

    if updated.newly_completed {
        spawn_generation(
            state.db.clone(),
            state.generator.clone(),
            user.id,
            GenerationTrigger::GoalCompleted,
        );
    }

    Ok((StatusCode::OK, Json(updated.goal.into_dto())))
}

/// Delete one of the caller's goals together with its steps and subtasks.
#[utoipa::path(
    delete,
    path = "/api/goals/{goal_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    GoalService::new(&state.db).delete(user.id, goal_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/goals/{goal_id}/subtasks",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "Subtasks of the goal", body = Vec<SubtaskDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_subtasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let subtasks = SubtaskService::new(&state.db).list(user.id, goal_id).await?;
    let dtos: Vec<SubtaskDto> = subtasks.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Add a checklist item to one of the caller's goals.
///
/// # Returns
/// - `201 Created` - The new subtask
/// - `400 Bad Request` - Empty title
/// - `403 Forbidden` - Goal belongs to someone else
/// - `404 Not Found` - No such goal
#[utoipa::path(
    post,
    path = "/api/goals/{goal_id}/subtasks",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    request_body = CreateSubtaskDto,
    responses(
        (status = 201, description = "Subtask created", body = SubtaskDto),
        (status = 400, description = "Invalid subtask data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_subtask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
    Json(payload): Json<CreateSubtaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let subtask = SubtaskService::new(&state.db)
        .add(user.id, goal_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(subtask.into_dto())))
}

/// Rename a subtask or tick it off.
///
/// # Returns
/// - `200 OK` - Updated subtask
/// - `403 Forbidden` - Goal belongs to someone else
/// - `404 Not Found` - No such goal, or the subtask is not part of it
#[utoipa::path(
    patch,
    path = "/api/goals/{goal_id}/subtasks/{subtask_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID"),
        ("subtask_id" = i32, Path, description = "Subtask ID")
    ),
    request_body = UpdateSubtaskDto,
    responses(
        (status = 200, description = "Updated subtask", body = SubtaskDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal or subtask not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_subtask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((goal_id, subtask_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateSubtaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let subtask = SubtaskService::new(&state.db)
        .update(user.id, goal_id, subtask_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(subtask.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{goal_id}/subtasks/{subtask_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID"),
        ("subtask_id" = i32, Path, description = "Subtask ID")
    ),
    responses(
        (status = 204, description = "Subtask deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal or subtask not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_subtask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((goal_id, subtask_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    SubtaskService::new(&state.db)
        .delete(user.id, goal_id, subtask_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List progress steps of one of the caller's goals, newest first.
#[utoipa::path(
    get,
    path = "/api/goals/{goal_id}/steps",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "Steps of the goal", body = Vec<StepDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_steps(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let steps = StepService::new(&state.db).list(user.id, goal_id).await?;
    let dtos: Vec<StepDto> = steps.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Log progress on one of the caller's goals.
///
/// Advances the caller's streak, re-evaluates achievements and schedules insight
/// generation in the background.
///
/// # Access Control
/// - `Owner` - Only the goal's owner can log steps
///
/// # Returns
/// - `201 Created` - The stored step
/// - `403 Forbidden` - Goal belongs to someone else, or note rejected by moderation
/// - `404 Not Found` - No such goal
#[utoipa::path(
    post,
    path = "/api/goals/{goal_id}/steps",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID")
    ),
    request_body = CreateStepDto,
    responses(
        (status = 201, description = "Step logged", body = StepDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner or note rejected", body = ErrorDto),
        (status = 404, description = "Goal not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(goal_id): Path<i32>,
    Json(payload): Json<CreateStepDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let added = StepService::new(&state.db)
        .add(&state.moderation, &user, goal_id, payload)
        .await?;

    spawn_generation(
        state.db.clone(),
        state.generator.clone(),
        user.id,
        added.trigger,
    );

    Ok((StatusCode::CREATED, Json(added.step.into_dto())))
}

/// Remove a logged step.
///
/// # Returns
/// - `204 No Content` - Step removed
/// - `403 Forbidden` - The step's goal belongs to someone else
/// - `404 Not Found` - No such step on this goal
#[utoipa::path(
    delete,
    path = "/api/goals/{goal_id}/steps/{step_id}",
    tag = GOAL_TAG,
    params(
        ("goal_id" = i32, Path, description = "Goal ID"),
        ("step_id" = i32, Path, description = "Step ID")
    ),
    responses(
        (status = 204, description = "Step deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Goal belongs to another user", body = ErrorDto),
        (status = 404, description = "Step not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((goal_id, step_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    StepService::new(&state.db)
        .delete(user.id, goal_id, step_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
