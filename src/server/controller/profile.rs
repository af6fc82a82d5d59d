use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        user::{AvatarDto, AvatarUploadDto, ProfileDto, UpdateProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::UpdateProfileParam,
        service::{avatar::AvatarService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping profile endpoints in OpenAPI documentation
pub static PROFILE_TAG: &str = "profile";

/// Multipart part carrying the avatar image.
const AVATAR_FIELD: &str = "file";

/// Get the caller's own profile.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Profile including email and streaks
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = PROFILE_TAG,
    responses(
        (status = 200, description = "Caller's profile", body = ProfileDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    Ok((StatusCode::OK, Json(user.into_profile_dto())))
}

/// Update the caller's name and/or bio.
///
/// Both fields pass through moderation before anything is written.
///
/// # Access Control
/// - `Authenticated`
///
/// # Arguments
/// - `state` - Application state containing the database connection and moderation list
/// - `headers` - Request headers carrying the bearer token
/// - `payload` - Fields to change; omitted fields stay as they are
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Empty name
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - Text rejected by moderation
#[utoipa::path(
    patch,
    path = "/api/profile/me",
    tag = PROFILE_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Text rejected by moderation", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let param = UpdateProfileParam {
        name: payload.name,
        bio: payload.bio,
    };
    let updated = UserService::new(&state.db)
        .update_profile(&state.moderation, user.id, param)
        .await?;

    Ok((StatusCode::OK, Json(updated.into_profile_dto())))
}

/// Upload a new avatar image.
///
/// Expects a multipart form with one image part named `file`. Other parts are ignored.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `200 OK` - Public URL of the stored avatar
/// - `400 Bad Request` - Missing part, unsupported type, empty or oversized file
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/api/profile/avatar",
    tag = PROFILE_TAG,
    request_body(content = AvatarUploadDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let avatar_url = AvatarService::new(&state.db, &state.upload_dir)
            .store(user.id, content_type.as_deref(), &bytes)
            .await?;

        return Ok((StatusCode::OK, Json(AvatarDto { avatar_url })));
    }

    Err(AppError::BadRequest(format!(
        "Multipart field '{}' is required",
        AVATAR_FIELD
    )))
}
