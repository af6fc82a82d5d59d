//! Workspace invitation repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::workspace::{WorkspaceInvite, WorkspaceRole};

/// Fields of a new invitation.
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub workspace_id: i32,
    pub email: String,
    pub role: WorkspaceRole,
    pub token: String,
    pub invited_by: i32,
    pub expires_at: DateTime<Utc>,
}

pub struct WorkspaceInviteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkspaceInviteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, invite: NewInvite) -> Result<WorkspaceInvite, DbErr> {
        let entity = entity::workspace_invite::ActiveModel {
            workspace_id: ActiveValue::Set(invite.workspace_id),
            email: ActiveValue::Set(invite.email),
            role: ActiveValue::Set(invite.role.to_string()),
            token: ActiveValue::Set(invite.token),
            invited_by: ActiveValue::Set(invite.invited_by),
            expires_at: ActiveValue::Set(invite.expires_at),
            accepted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(WorkspaceInvite::from_entity(entity))
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<WorkspaceInvite>, DbErr> {
        let entity = entity::prelude::WorkspaceInvite::find()
            .filter(entity::workspace_invite::Column::Token.eq(token))
            .one(self.db)
            .await?;

        Ok(entity.map(WorkspaceInvite::from_entity))
    }

    /// Finds an unaccepted, unexpired invitation for `email` into a workspace.
    pub async fn find_active(
        &self,
        workspace_id: i32,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<WorkspaceInvite>, DbErr> {
        let entity = entity::prelude::WorkspaceInvite::find()
            .filter(entity::workspace_invite::Column::WorkspaceId.eq(workspace_id))
            .filter(entity::workspace_invite::Column::Email.eq(email))
            .filter(entity::workspace_invite::Column::AcceptedAt.is_null())
            .filter(entity::workspace_invite::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        Ok(entity.map(WorkspaceInvite::from_entity))
    }

    /// Gets unaccepted, unexpired invitations addressed to `email`, newest first.
    pub async fn get_pending_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<WorkspaceInvite>, DbErr> {
        let entities = entity::prelude::WorkspaceInvite::find()
            .filter(entity::workspace_invite::Column::Email.eq(email))
            .filter(entity::workspace_invite::Column::AcceptedAt.is_null())
            .filter(entity::workspace_invite::Column::ExpiresAt.gt(now))
            .order_by_desc(entity::workspace_invite::Column::CreatedAt)
            .order_by_desc(entity::workspace_invite::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(WorkspaceInvite::from_entity)
            .collect())
    }

    pub async fn mark_accepted(&self, invite_id: i32, accepted_at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::WorkspaceInvite::update_many()
            .col_expr(
                entity::workspace_invite::Column::AcceptedAt,
                sea_orm::sea_query::Expr::value(accepted_at),
            )
            .filter(entity::workspace_invite::Column::Id.eq(invite_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
