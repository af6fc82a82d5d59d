use sea_orm::entity::prelude::*;

/// Analytics event row. `goal_id`, `step_id` and `subtask_id` are plain references
/// so the log survives deletion of the objects it describes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub event_type: String,
    pub occurred_at: DateTimeUtc,
    #[sea_orm(column_type = "Json", nullable)]
    pub payload: Option<Json>,
    pub client_event_id: Option<String>,
    pub source: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub step_id: Option<i32>,
    pub subtask_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
