//! HTTP routing and the generated OpenAPI document.
//!
//! Every handler is registered through `utoipa-axum` so the document served at
//! `/api/openapi.json` always matches the mounted routes.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{self, HeaderValue},
        Method,
    },
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{
        achievement::{self, ACHIEVEMENT_TAG},
        ai::{self, AI_TAG},
        auth::{self, AUTH_TAG},
        event::{self, EVENT_TAG},
        feed::{self, FEED_TAG},
        friend::{self, FRIEND_TAG},
        goal::{self, GOAL_TAG},
        group::{self, GROUP_TAG},
        insight::{self, INSIGHT_TAG},
        member::{self, MEMBER_TAG},
        profile::{self, PROFILE_TAG},
        team_goal::{self, TEAM_GOAL_TAG},
        user::{self, USER_TAG},
        workspace::{self, WORKSPACE_TAG},
    },
    service::avatar::{MAX_AVATAR_BYTES, UPLOADS_URL_PREFIX},
    state::AppState,
};

/// Room for multipart framing around the largest accepted avatar.
const BODY_LIMIT_BYTES: usize = MAX_AVATAR_BYTES + 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "LevelUp API", description = "Goal tracking with streaks, achievements and team workspaces"),
    modifiers(&BearerAuth),
    tags(
        (name = AUTH_TAG, description = "Registration and sign in"),
        (name = PROFILE_TAG, description = "The caller's own profile"),
        (name = USER_TAG, description = "Public profiles and user search"),
        (name = GOAL_TAG, description = "Personal goals, subtasks and progress steps"),
        (name = ACHIEVEMENT_TAG, description = "Achievement catalogue and progress"),
        (name = FRIEND_TAG, description = "Friend requests and friendships"),
        (name = FEED_TAG, description = "Activity feed"),
        (name = EVENT_TAG, description = "Analytics event log"),
        (name = INSIGHT_TAG, description = "Life balance report and activity calendar"),
        (name = AI_TAG, description = "Generated insight messages"),
        (name = GROUP_TAG, description = "Interest groups"),
        (name = WORKSPACE_TAG, description = "Team workspaces"),
        (name = MEMBER_TAG, description = "Workspace members and invitations"),
        (name = TEAM_GOAL_TAG, description = "Shared workspace goals"),
    )
)]
struct ApiDoc;

/// Declares the bearer token scheme every protected route expects.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::new);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API routes plus the OpenAPI document, without state or outer layers.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        // profile & users
        .routes(routes!(profile::get_me, profile::update_me))
        .routes(routes!(profile::upload_avatar))
        .routes(routes!(user::search_users))
        .routes(routes!(user::get_user))
        // goals
        .routes(routes!(goal::get_goals, goal::create_goal))
        .routes(routes!(goal::get_goal, goal::update_goal, goal::delete_goal))
        .routes(routes!(goal::get_subtasks, goal::create_subtask))
        .routes(routes!(goal::update_subtask, goal::delete_subtask))
        .routes(routes!(goal::get_steps, goal::create_step))
        .routes(routes!(goal::delete_step))
        // achievements
        .routes(routes!(achievement::get_achievements))
        .routes(routes!(achievement::get_catalog))
        .routes(routes!(achievement::get_user_achievements))
        .routes(routes!(achievement::get_stats))
        .routes(routes!(achievement::get_recent))
        .routes(routes!(achievement::get_progress))
        // social
        .routes(routes!(friend::send_request))
        .routes(routes!(friend::accept_request))
        .routes(routes!(friend::remove_friend))
        .routes(routes!(friend::get_friends))
        .routes(routes!(friend::get_requests))
        .routes(routes!(feed::get_feed))
        .routes(routes!(group::get_my_groups, group::create_group))
        .routes(routes!(group::join_group))
        .routes(routes!(group::get_group_members))
        // analytics
        .routes(routes!(event::get_events, event::create_event))
        .routes(routes!(insight::get_balance))
        .routes(routes!(insight::get_calendar))
        .routes(routes!(ai::get_insights))
        .routes(routes!(ai::get_analytics))
        .routes(routes!(ai::dismiss_message))
        .routes(routes!(ai::mark_message_shown))
        // workspaces
        .routes(routes!(workspace::get_workspaces, workspace::create_workspace))
        .routes(routes!(
            workspace::get_workspace,
            workspace::update_workspace,
            workspace::delete_workspace
        ))
        .routes(routes!(member::get_members))
        .routes(routes!(member::invite_member))
        .routes(routes!(member::accept_invite))
        .routes(routes!(member::get_my_invites))
        .routes(routes!(member::update_member_role))
        .routes(routes!(member::remove_member))
        .routes(routes!(member::leave_workspace))
        .routes(routes!(
            team_goal::get_team_goals,
            team_goal::create_team_goal
        ))
        .routes(routes!(
            team_goal::get_team_goal,
            team_goal::update_team_goal,
            team_goal::delete_team_goal
        ))
        .routes(routes!(team_goal::add_team_goal_step))
        .split_for_parts();

    router
        .route("/api/openapi.json", get(move || async move { Json(api) }))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Builds the CORS policy. An empty list or `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Credentials cannot be combined with a wildcard origin.
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(values))
        .allow_credentials(true)
}

/// The complete application: API routes, uploaded files, CORS and request tracing.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    router()
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
