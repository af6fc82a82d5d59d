//! Achievement catalogue and grant repository.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::achievement::{Achievement, UserAchievement};

pub struct AchievementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AchievementRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the whole catalogue ordered by ID.
    pub async fn get_all(&self) -> Result<Vec<Achievement>, DbErr> {
        let entities = entity::prelude::Achievement::find()
            .order_by_asc(entity::achievement::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Achievement::from_entity).collect())
    }

    pub async fn find_by_id(&self, achievement_id: i32) -> Result<Option<Achievement>, DbErr> {
        let entity = entity::prelude::Achievement::find_by_id(achievement_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Achievement::from_entity))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Achievement>, DbErr> {
        let entity = entity::prelude::Achievement::find()
            .filter(entity::achievement::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(Achievement::from_entity))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Achievement::find().count(self.db).await
    }

    /// Gets the achievements a user holds, most recently unlocked first.
    ///
    /// # Arguments
    /// - `user_id` - Holder of the achievements
    /// - `limit` - Maximum number of rows, `None` for all
    pub async fn get_user_achievements(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<UserAchievement>, DbErr> {
        let rows = entity::prelude::AchievementOnUser::find()
            .find_also_related(entity::prelude::Achievement)
            .filter(entity::achievement_on_user::Column::UserId.eq(user_id))
            .order_by_desc(entity::achievement_on_user::Column::AchievedAt)
            .order_by_desc(entity::achievement_on_user::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(grant, achievement)| {
                achievement.map(|a| UserAchievement {
                    achievement: Achievement::from_entity(a),
                    achieved_at: grant.achieved_at,
                })
            })
            .collect())
    }

    /// IDs of the achievements a user holds.
    pub async fn get_held_ids(&self, user_id: i32) -> Result<HashSet<i32>, DbErr> {
        let ids: Vec<i32> = entity::prelude::AchievementOnUser::find()
            .select_only()
            .column(entity::achievement_on_user::Column::AchievementId)
            .filter(entity::achievement_on_user::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn is_held(&self, user_id: i32, achievement_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::AchievementOnUser::find()
            .filter(entity::achievement_on_user::Column::UserId.eq(user_id))
            .filter(entity::achievement_on_user::Column::AchievementId.eq(achievement_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Grants an achievement unless the user already holds it.
    ///
    /// # Returns
    /// - `Ok(true)` - A new grant row was inserted
    /// - `Ok(false)` - The user already held the achievement
    /// - `Err(DbErr)` - Database error during insert
    pub async fn grant(
        &self,
        user_id: i32,
        achievement_id: i32,
        achieved_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        if self.is_held(user_id, achievement_id).await? {
            return Ok(false);
        }

        entity::achievement_on_user::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            achievement_id: ActiveValue::Set(achievement_id),
            achieved_at: ActiveValue::Set(achieved_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }
}
