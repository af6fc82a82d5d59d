use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workspace")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub plan: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub settings: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workspace_member::Entity")]
    WorkspaceMember,
    #[sea_orm(has_many = "super::workspace_invite::Entity")]
    WorkspaceInvite,
    #[sea_orm(has_many = "super::team_goal::Entity")]
    TeamGoal,
}

impl Related<super::workspace_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkspaceMember.def()
    }
}

impl Related<super::workspace_invite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkspaceInvite.def()
    }
}

impl Related<super::team_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamGoal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
