use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        friend::{FriendRequestDto, FriendshipDto},
        user::UserSummaryDto,
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::friend::FriendRequest,
        service::friend::FriendService, state::AppState,
    },
};

/// Tag for grouping friendship endpoints in OpenAPI documentation
pub static FRIEND_TAG: &str = "friend";

/// Send a friend request.
///
/// The addressee gets a `friend_request_received` entry in their feed.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `headers` - Request headers carrying the bearer token
/// - `user_id` - User to befriend
///
/// # Returns
/// - `201 Created` - Pending friendship
/// - `403 Forbidden` - Request addressed to the caller
/// - `404 Not Found` - No such user
/// - `409 Conflict` - The two users already share a request or friendship
#[utoipa::path(
    post,
    path = "/api/friends/request/{user_id}",
    tag = FRIEND_TAG,
    params(
        ("user_id" = i32, Path, description = "User to send the request to")
    ),
    responses(
        (status = 201, description = "Request sent", body = FriendshipDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Cannot befriend yourself", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Friendship already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let friendship = FriendService::new(&state.db)
        .send_request(&user, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(friendship.into_dto())))
}

/// Accept a pending request addressed to the caller.
///
/// # Returns
/// - `200 OK` - Accepted friendship
/// - `403 Forbidden` - Caller is not the addressee
/// - `404 Not Found` - No such request
#[utoipa::path(
    post,
    path = "/api/friends/accept/{friendship_id}",
    tag = FRIEND_TAG,
    params(
        ("friendship_id" = i32, Path, description = "Friendship ID")
    ),
    responses(
        (status = 200, description = "Request accepted", body = FriendshipDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the addressee", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(friendship_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let friendship = FriendService::new(&state.db)
        .accept(user.id, friendship_id)
        .await?;

    Ok((StatusCode::OK, Json(friendship.into_dto())))
}

/// Remove a friend, or withdraw or decline a pending request.
#[utoipa::path(
    delete,
    path = "/api/friends/{friendship_id}",
    tag = FRIEND_TAG,
    params(
        ("friendship_id" = i32, Path, description = "Friendship ID")
    ),
    responses(
        (status = 204, description = "Friendship removed"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not part of the friendship", body = ErrorDto),
        (status = 404, description = "Friendship not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_friend(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(friendship_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    FriendService::new(&state.db)
        .remove(user.id, friendship_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/friends",
    tag = FRIEND_TAG,
    responses(
        (status = 200, description = "Accepted friends", body = Vec<UserSummaryDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_friends(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let friends = FriendService::new(&state.db).list_friends(user.id).await?;
    let dtos: Vec<UserSummaryDto> = friends.iter().map(|f| f.to_summary_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Pending requests the caller sent or received.
#[utoipa::path(
    get,
    path = "/api/friends/requests",
    tag = FRIEND_TAG,
    responses(
        (status = 200, description = "Pending requests", body = Vec<FriendRequestDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let requests = FriendService::new(&state.db)
        .list_requests(user.id)
        .await?;
    let dtos: Vec<FriendRequestDto> = requests
        .into_iter()
        .map(FriendRequest::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}
