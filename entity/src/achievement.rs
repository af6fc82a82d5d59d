use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "achievement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub icon: Option<String>,
    pub kind: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub requirement: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::achievement_on_user::Entity")]
    AchievementOnUser,
}

impl Related<super::achievement_on_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AchievementOnUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
