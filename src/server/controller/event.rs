use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        event::{CreateEventDto, CreatedEventDto, EventDto, EventQueryDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::event::EventFilter,
        service::event::EventService, state::AppState,
    },
};

/// Tag for grouping analytics event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

/// Record a client-side analytics event.
///
/// Sending the same `client_event_id` twice stores the event once. The second call
/// returns the stored ID with `duplicate: true`. An `occurred_at` more than five
/// minutes in the future is clamped to now.
///
/// # Access Control
/// - `Authenticated`
///
/// # Returns
/// - `201 Created` - ID of the stored event
/// - `400 Bad Request` - Unknown event type, sphere or source, or client ID too long
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event recorded", body = CreatedEventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let recorded = EventService::new(&state.db).add(user.id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedEventDto {
            id: recorded.id,
            duplicate: recorded.duplicate,
        }),
    ))
}

/// List the caller's analytics events, newest first.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(EventQueryDto),
    responses(
        (status = 200, description = "Matching events", body = Vec<EventDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<EventQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let events = EventService::new(&state.db)
        .list(user.id, EventFilter::from_dto(params))
        .await?;
    let dtos: Vec<EventDto> = events.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
