//! Workspace, membership and invitation factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating workspaces.
///
/// # Example
///
/// ```rust,ignore
/// let workspace = WorkspaceFactory::new(&db).slug("acme").build().await?;
/// ```
pub struct WorkspaceFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
}

impl<'a> WorkspaceFactory<'a> {
    /// Creates a new WorkspaceFactory named `"Workspace {id}"` with slug `"workspace-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Workspace {}", id),
            slug: format!("workspace-{}", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builds and inserts the workspace entity into the database.
    pub async fn build(self) -> Result<entity::workspace::Model, DbErr> {
        entity::workspace::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(None),
            plan: ActiveValue::Set("free".to_string()),
            settings: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a workspace with default values.
pub async fn create_workspace(db: &DatabaseConnection) -> Result<entity::workspace::Model, DbErr> {
    WorkspaceFactory::new(db).build().await
}

/// Adds a user to a workspace with the given role, joined now.
pub async fn create_member(
    db: &DatabaseConnection,
    workspace_id: i32,
    user_id: i32,
    role: &str,
) -> Result<entity::workspace_member::Model, DbErr> {
    entity::workspace_member::ActiveModel {
        workspace_id: ActiveValue::Set(workspace_id),
        user_id: ActiveValue::Set(user_id),
        role: ActiveValue::Set(role.to_string()),
        position: ActiveValue::Set(None),
        joined_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a pending invitation that expires at the given instant.
pub async fn create_invite(
    db: &DatabaseConnection,
    workspace_id: i32,
    invited_by: i32,
    email: &str,
    expires_at: DateTime<Utc>,
) -> Result<entity::workspace_invite::Model, DbErr> {
    entity::workspace_invite::ActiveModel {
        workspace_id: ActiveValue::Set(workspace_id),
        email: ActiveValue::Set(email.to_string()),
        role: ActiveValue::Set("member".to_string()),
        token: ActiveValue::Set(format!("token-{:060}", next_id())),
        invited_by: ActiveValue::Set(invited_by),
        expires_at: ActiveValue::Set(expires_at),
        accepted_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a pending invitation valid for seven days.
pub async fn create_pending_invite(
    db: &DatabaseConnection,
    workspace_id: i32,
    invited_by: i32,
    email: &str,
) -> Result<entity::workspace_invite::Model, DbErr> {
    create_invite(db, workspace_id, invited_by, email, Utc::now() + Duration::days(7)).await
}
