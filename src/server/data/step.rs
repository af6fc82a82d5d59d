//! Step data repository.
//!
//! Steps belong to goals; queries by user join through the owning goal.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::server::model::goal::{CreateStepParam, Step};

pub struct StepRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StepRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Logs a step against a goal at `created_at`.
    pub async fn create(&self, param: CreateStepParam, created_at: DateTime<Utc>) -> Result<Step, DbErr> {
        let entity = entity::step::ActiveModel {
            goal_id: ActiveValue::Set(param.goal_id),
            value: ActiveValue::Set(param.value),
            note: ActiveValue::Set(param.note),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Step::from_entity(entity))
    }

    pub async fn find_by_id(&self, step_id: i32) -> Result<Option<Step>, DbErr> {
        let entity = entity::prelude::Step::find_by_id(step_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Step::from_entity))
    }

    /// Gets the steps of a goal, newest first.
    pub async fn get_by_goal(&self, goal_id: i32) -> Result<Vec<Step>, DbErr> {
        let entities = entity::prelude::Step::find()
            .filter(entity::step::Column::GoalId.eq(goal_id))
            .order_by_desc(entity::step::Column::CreatedAt)
            .order_by_desc(entity::step::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Step::from_entity).collect())
    }

    /// Gets every step logged on any of the user's goals, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Step>, DbErr> {
        let entities = entity::prelude::Step::find()
            .join(JoinType::InnerJoin, entity::step::Relation::Goal.def())
            .filter(entity::goal::Column::UserId.eq(user_id))
            .order_by_desc(entity::step::Column::CreatedAt)
            .order_by_desc(entity::step::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Step::from_entity).collect())
    }

    /// Counts steps logged on the user's goals at or after `since`.
    pub async fn count_by_user_since(
        &self,
        user_id: i32,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::Step::find()
            .join(JoinType::InnerJoin, entity::step::Relation::Goal.def())
            .filter(entity::goal::Column::UserId.eq(user_id))
            .filter(entity::step::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }

    pub async fn delete(&self, step_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Step::delete_by_id(step_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
