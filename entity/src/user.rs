use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub avatar_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_active_date: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::goal::Entity")]
    Goal,
    #[sea_orm(has_many = "super::achievement_on_user::Entity")]
    AchievementOnUser,
    #[sea_orm(has_many = "super::ai_message::Entity")]
    AiMessage,
}

impl Related<super::goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goal.def()
    }
}

impl Related<super::achievement_on_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AchievementOnUser.def()
    }
}

impl Related<super::ai_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiMessage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
