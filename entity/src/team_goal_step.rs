use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "team_goal_step")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_goal_id: i32,
    pub user_id: i32,
    pub value: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_goal::Entity",
        from = "Column::TeamGoalId",
        to = "super::team_goal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TeamGoal,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::team_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamGoal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
