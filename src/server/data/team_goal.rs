//! Team goal repository.
//!
//! Covers team goals, the steps members log against them and the per-member contribution
//! totals kept in `team_goal_contributor`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::model::team_goal::{
    CreateTeamGoalParam, TeamGoal, UpdateTeamGoalParam, STATUS_ACTIVE, STATUS_COMPLETED,
};

/// Filters for listing a workspace's team goals.
#[derive(Debug, Clone, Default)]
pub struct TeamGoalFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
}

pub struct TeamGoalRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamGoalRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateTeamGoalParam) -> Result<TeamGoal, DbErr> {
        let entity = entity::team_goal::ActiveModel {
            workspace_id: ActiveValue::Set(param.workspace_id),
            owner_id: ActiveValue::Set(param.owner_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            target_value: ActiveValue::Set(param.target_value),
            category: ActiveValue::Set(param.category),
            visibility: ActiveValue::Set(param.visibility),
            status: ActiveValue::Set(STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(TeamGoal::from_entity(entity))
    }

    pub async fn find_by_id(&self, goal_id: i32) -> Result<Option<TeamGoal>, DbErr> {
        let entity = entity::prelude::TeamGoal::find_by_id(goal_id)
            .one(self.db)
            .await?;

        Ok(entity.map(TeamGoal::from_entity))
    }

    /// Lists a workspace's team goals matching the filter, newest first.
    pub async fn get_by_workspace(
        &self,
        workspace_id: i32,
        filter: TeamGoalFilter,
    ) -> Result<Vec<TeamGoal>, DbErr> {
        let mut query = entity::prelude::TeamGoal::find()
            .filter(entity::team_goal::Column::WorkspaceId.eq(workspace_id));

        if let Some(status) = filter.status {
            query = query.filter(entity::team_goal::Column::Status.eq(status));
        }
        if let Some(category) = filter.category {
            query = query.filter(entity::team_goal::Column::Category.eq(category));
        }
        if let Some(owner_id) = filter.owner_id {
            query = query.filter(entity::team_goal::Column::OwnerId.eq(owner_id));
        }

        let entities = query
            .order_by_desc(entity::team_goal::Column::CreatedAt)
            .order_by_desc(entity::team_goal::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(TeamGoal::from_entity).collect())
    }

    pub async fn count_by_workspace(&self, workspace_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TeamGoal::find()
            .filter(entity::team_goal::Column::WorkspaceId.eq(workspace_id))
            .count(self.db)
            .await
    }

    pub async fn update(
        &self,
        goal_id: i32,
        param: UpdateTeamGoalParam,
    ) -> Result<Option<TeamGoal>, DbErr> {
        let Some(entity) = entity::prelude::TeamGoal::find_by_id(goal_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(title) = param.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(target_value) = param.target_value {
            active.target_value = ActiveValue::Set(target_value);
        }
        if let Some(category) = param.category {
            active.category = ActiveValue::Set(Some(category));
        }
        if let Some(owner_id) = param.owner_id {
            active.owner_id = ActiveValue::Set(owner_id);
        }
        if let Some(visibility) = param.visibility {
            active.visibility = ActiveValue::Set(visibility);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(TeamGoal::from_entity(updated)))
    }

    /// Marks a goal completed at `completed_at`.
    pub async fn mark_completed(&self, goal_id: i32, completed_at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::prelude::TeamGoal::update_many()
            .col_expr(
                entity::team_goal::Column::Status,
                sea_orm::sea_query::Expr::value(STATUS_COMPLETED),
            )
            .col_expr(
                entity::team_goal::Column::CompletedAt,
                sea_orm::sea_query::Expr::value(completed_at),
            )
            .filter(entity::team_goal::Column::Id.eq(goal_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a team goal with its steps and contributor totals.
    pub async fn delete(&self, goal_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::TeamGoalStep::delete_many()
            .filter(entity::team_goal_step::Column::TeamGoalId.eq(goal_id))
            .exec(&txn)
            .await?;
        entity::prelude::TeamGoalContributor::delete_many()
            .filter(entity::team_goal_contributor::Column::TeamGoalId.eq(goal_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::TeamGoal::delete_by_id(goal_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a member's step and adds its value to their contribution total.
    ///
    /// Both writes happen in one transaction so the total always matches the steps.
    ///
    /// # Returns
    /// - `Ok(Some(entity::team_goal_step::Model))` - The stored step
    /// - `Ok(None)` - The member's total would exceed `i32::MAX`, nothing is written
    /// - `Err(DbErr)` - Database error, nothing is written
    pub async fn add_step(
        &self,
        goal_id: i32,
        user_id: i32,
        value: i32,
        note: Option<String>,
    ) -> Result<Option<entity::team_goal_step::Model>, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let existing = entity::prelude::TeamGoalContributor::find()
            .filter(entity::team_goal_contributor::Column::TeamGoalId.eq(goal_id))
            .filter(entity::team_goal_contributor::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let total = match &existing {
            Some(contributor) => match contributor.contribution.checked_add(value) {
                Some(total) => total,
                None => return Ok(None),
            },
            None => value,
        };

        let step = entity::team_goal_step::ActiveModel {
            team_goal_id: ActiveValue::Set(goal_id),
            user_id: ActiveValue::Set(user_id),
            value: ActiveValue::Set(value),
            note: ActiveValue::Set(note),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        match existing {
            Some(contributor) => {
                let mut active = contributor.into_active_model();
                active.contribution = ActiveValue::Set(total);
                active.update(&txn).await?;
            }
            None => {
                entity::team_goal_contributor::ActiveModel {
                    team_goal_id: ActiveValue::Set(goal_id),
                    user_id: ActiveValue::Set(user_id),
                    contribution: ActiveValue::Set(total),
                    joined_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        Ok(Some(step))
    }

    /// Sum of all step values logged against a goal.
    pub async fn sum_steps(&self, goal_id: i32) -> Result<i64, DbErr> {
        let values: Vec<i32> = entity::prelude::TeamGoalStep::find()
            .select_only()
            .column(entity::team_goal_step::Column::Value)
            .filter(entity::team_goal_step::Column::TeamGoalId.eq(goal_id))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(values.into_iter().map(i64::from).sum())
    }

    pub async fn count_steps(&self, goal_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TeamGoalStep::find()
            .filter(entity::team_goal_step::Column::TeamGoalId.eq(goal_id))
            .count(self.db)
            .await
    }

    /// Gets the latest steps of a goal, newest first.
    pub async fn get_steps(
        &self,
        goal_id: i32,
        limit: u64,
    ) -> Result<Vec<entity::team_goal_step::Model>, DbErr> {
        entity::prelude::TeamGoalStep::find()
            .filter(entity::team_goal_step::Column::TeamGoalId.eq(goal_id))
            .order_by_desc(entity::team_goal_step::Column::CreatedAt)
            .order_by_desc(entity::team_goal_step::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Gets contributor totals of a goal, largest contribution first.
    pub async fn get_contributors(
        &self,
        goal_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<entity::team_goal_contributor::Model>, DbErr> {
        entity::prelude::TeamGoalContributor::find()
            .filter(entity::team_goal_contributor::Column::TeamGoalId.eq(goal_id))
            .order_by_desc(entity::team_goal_contributor::Column::Contribution)
            .order_by_asc(entity::team_goal_contributor::Column::JoinedAt)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn count_contributors(&self, goal_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TeamGoalContributor::find()
            .filter(entity::team_goal_contributor::Column::TeamGoalId.eq(goal_id))
            .count(self.db)
            .await
    }

    /// Per-user contribution totals and step counts across a workspace's team goals.
    ///
    /// # Returns
    /// - `Ok(HashMap<user_id, (total_contribution, steps_count)>)` - Users without any
    ///   contribution are absent
    pub async fn get_member_stats(
        &self,
        workspace_id: i32,
    ) -> Result<HashMap<i32, (i64, u64)>, DbErr> {
        let goal_ids: Vec<i32> = entity::prelude::TeamGoal::find()
            .select_only()
            .column(entity::team_goal::Column::Id)
            .filter(entity::team_goal::Column::WorkspaceId.eq(workspace_id))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut stats: HashMap<i32, (i64, u64)> = HashMap::new();
        if goal_ids.is_empty() {
            return Ok(stats);
        }

        let contributions: Vec<(i32, i32)> = entity::prelude::TeamGoalContributor::find()
            .select_only()
            .column(entity::team_goal_contributor::Column::UserId)
            .column(entity::team_goal_contributor::Column::Contribution)
            .filter(entity::team_goal_contributor::Column::TeamGoalId.is_in(goal_ids.clone()))
            .into_tuple()
            .all(self.db)
            .await?;
        for (user_id, contribution) in contributions {
            stats.entry(user_id).or_default().0 += i64::from(contribution);
        }

        let step_users: Vec<i32> = entity::prelude::TeamGoalStep::find()
            .select_only()
            .column(entity::team_goal_step::Column::UserId)
            .filter(entity::team_goal_step::Column::TeamGoalId.is_in(goal_ids))
            .into_tuple()
            .all(self.db)
            .await?;
        for user_id in step_users {
            stats.entry(user_id).or_default().1 += 1;
        }

        Ok(stats)
    }
}
