use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        workspace::{
            AcceptedInviteDto, InviteDto, InviteMemberDto, UpdateMemberRoleDto,
            WorkspaceMemberDto, WorkspaceMemberUserDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::workspace::InviteWithDetails,
        service::member::MemberService, state::AppState,
    },
};

/// Tag for grouping workspace membership endpoints in OpenAPI documentation
pub static MEMBER_TAG: &str = "member";

/// List the members of a workspace with their team goal contributions.
///
/// Ordered by role, owner first, then by join time.
///
/// # Access Control
/// - `Member` - Any member of the workspace
///
/// # Returns
/// - `200 OK` - Members with contribution totals and step counts
/// - `403 Forbidden` - Caller is not a member
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/members",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Workspace members", body = Vec<WorkspaceMemberDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let members = MemberService::new(&state.db)
        .list(user.id, workspace_id)
        .await?;
    let dtos: Vec<WorkspaceMemberDto> = members
        .into_iter()
        .map(|(member, stats)| member.into_member_dto(stats))
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Invite a registered user to the workspace by email.
///
/// The invitation carries a random 64 character token and expires after seven days.
///
/// # Access Control
/// - `Manager` - Managers, admins and the owner
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `headers` - Request headers carrying the bearer token
/// - `workspace_id` - Workspace to invite into
/// - `payload` - Invitee email and the role to grant (member, manager or admin)
///
/// # Returns
/// - `201 Created` - The invitation
/// - `400 Bad Request` - Unknown or non-invitable role
/// - `403 Forbidden` - Caller is below manager
/// - `404 Not Found` - No user with that email
/// - `409 Conflict` - Already a member, or an active invitation exists
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/members/invite",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    request_body = InviteMemberDto,
    responses(
        (status = 201, description = "Invitation created", body = InviteDto),
        (status = 400, description = "Invalid role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Already a member or already invited", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn invite_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
    Json(payload): Json<InviteMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let invite = MemberService::new(&state.db)
        .invite(user.id, workspace_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(invite.into_dto())))
}

/// Accept an invitation addressed to the caller's email.
///
/// The workspace in the path is informational; the token alone identifies the
/// invitation.
///
/// # Returns
/// - `200 OK` - The joined workspace and granted role
/// - `400 Bad Request` - Invitation already accepted or expired
/// - `403 Forbidden` - Invitation was sent to another email
/// - `404 Not Found` - Unknown token
/// - `409 Conflict` - Caller is already a member
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/members/accept/{token}",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("token" = String, Path, description = "Invitation token")
    ),
    responses(
        (status = 200, description = "Invitation accepted", body = AcceptedInviteDto),
        (status = 400, description = "Invitation accepted or expired", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Invitation addressed to another email", body = ErrorDto),
        (status = 404, description = "Invitation not found", body = ErrorDto),
        (status = 409, description = "Already a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_invite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((_workspace_id, token)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let accepted = MemberService::new(&state.db).accept(user.id, &token).await?;

    Ok((StatusCode::OK, Json(accepted.into_dto())))
}

/// Pending, unexpired invitations for the caller's email across all workspaces.
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/members/invites/my",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID, unused")
    ),
    responses(
        (status = 200, description = "Caller's pending invitations", body = Vec<InviteDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_invites(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(_workspace_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let invites = MemberService::new(&state.db).my_invites(user.id).await?;
    let dtos: Vec<InviteDto> = invites
        .into_iter()
        .map(InviteWithDetails::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Change a member's role.
///
/// The owner's role cannot be changed. Admins may hand out member and manager only;
/// the owner may grant any role.
///
/// # Access Control
/// - `Admin` - Workspace admins and the owner
///
/// # Returns
/// - `200 OK` - Member with the new role
/// - `400 Bad Request` - Unknown role
/// - `403 Forbidden` - Caller below admin, owner targeted, or role too high to grant
/// - `404 Not Found` - Member does not belong to this workspace
#[utoipa::path(
    patch,
    path = "/api/workspaces/{workspace_id}/members/{member_id}/role",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("member_id" = i32, Path, description = "Membership ID")
    ),
    request_body = UpdateMemberRoleDto,
    responses(
        (status = 200, description = "Role updated", body = WorkspaceMemberUserDto),
        (status = 400, description = "Invalid role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_member_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, member_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateMemberRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let member = MemberService::new(&state.db)
        .update_role(user.id, workspace_id, member_id, &payload.role)
        .await?;

    Ok((StatusCode::OK, Json(member.into_user_dto())))
}

/// Remove a member from the workspace.
///
/// # Access Control
/// - `Admin` - Workspace admins and the owner; the owner cannot be removed and callers
///   leave through the leave endpoint instead of removing themselves
#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}/members/{member_id}",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("member_id" = i32, Path, description = "Membership ID")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Cannot remove yourself", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((workspace_id, member_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    MemberService::new(&state.db)
        .remove(user.id, workspace_id, member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Leave a workspace. The owner cannot leave.
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/members/leave",
    tag = MEMBER_TAG,
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Left the workspace", body = MessageDto),
        (status = 400, description = "Owner cannot leave", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Not a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_workspace(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(workspace_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    MemberService::new(&state.db)
        .leave(user.id, workspace_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Left the workspace"))))
}
