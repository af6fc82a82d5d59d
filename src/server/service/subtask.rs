use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::goal::{CreateSubtaskDto, UpdateSubtaskDto},
    server::{
        data::subtask::SubtaskRepository,
        error::AppError,
        model::{
            event::{CreateEventParam, COMPLETE_SUBTASK, CREATE_SUBTASK, DELETE_SUBTASK},
            goal::{Goal, Subtask},
        },
        service::{achievement::AchievementService, event::EventService, goal::GoalService},
    },
};

pub struct SubtaskService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubtaskService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a subtask of an owned goal.
    async fn get_owned(
        &self,
        user_id: i32,
        goal_id: i32,
        subtask_id: i32,
    ) -> Result<(Goal, Subtask), AppError> {
        let goal = GoalService::new(self.db).get_owned(user_id, goal_id).await?;

        match SubtaskRepository::new(self.db).find_by_id(subtask_id).await? {
            Some(subtask) if subtask.goal_id == goal.id => Ok((goal, subtask)),
            _ => Err(AppError::NotFound("Subtask not found".to_string())),
        }
    }

    async fn after_change(&self, user_id: i32, goal: &Goal, subtask_id: i32, event_type: &str) {
        let mut event = CreateEventParam::new(user_id, event_type, Utc::now())
            .goal_id(goal.id)
            .sphere(goal.sphere.clone());
        if event_type != DELETE_SUBTASK {
            event = event.subtask_id(subtask_id);
        }

        EventService::new(self.db).track(event).await;
        AchievementService::new(self.db)
            .check_and_grant_all(user_id)
            .await;
    }

    pub async fn list(&self, user_id: i32, goal_id: i32) -> Result<Vec<Subtask>, AppError> {
        let goal = GoalService::new(self.db).get_owned(user_id, goal_id).await?;
        let subtasks = SubtaskRepository::new(self.db).get_by_goal(goal.id).await?;

        Ok(subtasks)
    }

    pub async fn add(
        &self,
        user_id: i32,
        goal_id: i32,
        dto: CreateSubtaskDto,
    ) -> Result<Subtask, AppError> {
        let goal = GoalService::new(self.db).get_owned(user_id, goal_id).await?;

        let title = dto.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Subtask title is required".to_string()));
        }

        let subtask = SubtaskRepository::new(self.db)
            .create(goal.id, title.to_string(), dto.completed)
            .await?;

        self.after_change(user_id, &goal, subtask.id, CREATE_SUBTASK)
            .await;

        Ok(subtask)
    }

    /// Updates title and/or completion. Flipping `completed` to true records
    /// `complete_subtask`.
    pub async fn update(
        &self,
        user_id: i32,
        goal_id: i32,
        subtask_id: i32,
        dto: UpdateSubtaskDto,
    ) -> Result<Subtask, AppError> {
        let (goal, existing) = self.get_owned(user_id, goal_id, subtask_id).await?;

        let updated = SubtaskRepository::new(self.db)
            .update(subtask_id, dto.title, dto.completed)
            .await?
            .ok_or_else(|| AppError::NotFound("Subtask not found".to_string()))?;

        if !existing.completed && updated.completed {
            self.after_change(user_id, &goal, updated.id, COMPLETE_SUBTASK)
                .await;
        }

        Ok(updated)
    }

    pub async fn delete(&self, user_id: i32, goal_id: i32, subtask_id: i32) -> Result<(), AppError> {
        let (goal, _) = self.get_owned(user_id, goal_id, subtask_id).await?;

        SubtaskRepository::new(self.db).delete(subtask_id).await?;

        self.after_change(user_id, &goal, subtask_id, DELETE_SUBTASK)
            .await;

        Ok(())
    }
}
