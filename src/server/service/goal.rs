use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    model::goal::{CreateGoalDto, UpdateGoalDto},
    server::{
        data::goal::GoalRepository,
        error::AppError,
        model::{
            event::{CreateEventParam, COMPLETE_GOAL, CREATE_GOAL, DELETE_GOAL, UPDATE_GOAL},
            feed::GOAL_CREATED,
            goal::{CreateGoalParam, Goal, UpdateGoalParam, UpdatedGoal},
        },
        service::{
            achievement::AchievementService, event::EventService, feed::FeedService,
            moderation::ModerationService,
        },
    },
};

pub struct GoalService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GoalService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a goal the caller owns.
    ///
    /// # Returns
    /// - `Ok(Goal)` - The goal
    /// - `Err(AppError::NotFound)` - No goal with that ID
    /// - `Err(AppError::Forbidden)` - The goal belongs to someone else
    pub async fn get_owned(&self, user_id: i32, goal_id: i32) -> Result<Goal, AppError> {
        let Some(goal) = GoalRepository::new(self.db).find_by_id(goal_id).await? else {
            return Err(AppError::NotFound("Goal not found".to_string()));
        };
        if goal.user_id != user_id {
            return Err(AppError::Forbidden("No access to this goal".to_string()));
        }

        Ok(goal)
    }

    /// Creates a goal and runs the follow-up side effects.
    ///
    /// Title and description are moderated first. After the insert a `goal_created`
    /// feed event and a `create_goal` analytics event are recorded and achievements
    /// are re-evaluated.
    pub async fn create(
        &self,
        moderation: &ModerationService,
        user_id: i32,
        dto: CreateGoalDto,
    ) -> Result<Goal, AppError> {
        moderation.check("goal title", Some(&dto.title))?;
        moderation.check("goal description", dto.description.as_deref())?;

        let param = CreateGoalParam::from_dto(user_id, dto)?;
        let goal = GoalRepository::new(self.db).create(param).await?;

        FeedService::new(self.db)
            .add_event_logged(
                user_id,
                GOAL_CREATED,
                json!({ "goal_id": goal.id, "title": goal.title }),
            )
            .await;
        EventService::new(self.db)
            .track(
                CreateEventParam::new(user_id, CREATE_GOAL, Utc::now())
                    .goal_id(goal.id)
                    .sphere(goal.sphere.clone()),
            )
            .await;
        AchievementService::new(self.db)
            .check_and_grant_all(user_id)
            .await;

        Ok(goal)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<Goal>, AppError> {
        let goals = GoalRepository::new(self.db).get_by_user(user_id).await?;

        Ok(goals)
    }

    /// Applies a partial update to an owned goal.
    ///
    /// Setting `completed_at` on an open goal records `complete_goal` and re-evaluates
    /// achievements; any other change records `update_goal`.
    pub async fn update(
        &self,
        moderation: &ModerationService,
        user_id: i32,
        goal_id: i32,
        dto: UpdateGoalDto,
    ) -> Result<UpdatedGoal, AppError> {
        let existing = self.get_owned(user_id, goal_id).await?;

        moderation.check("goal title", dto.title.as_deref())?;
        moderation.check("goal description", dto.description.as_deref())?;
        let param = UpdateGoalParam::from_dto(dto)?;

        let goal = GoalRepository::new(self.db)
            .update(goal_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Goal not found".to_string()))?;

        let newly_completed = !existing.is_completed() && goal.is_completed();
        let event_type = if newly_completed {
            COMPLETE_GOAL
        } else {
            UPDATE_GOAL
        };
        EventService::new(self.db)
            .track(
                CreateEventParam::new(user_id, event_type, Utc::now())
                    .goal_id(goal.id)
                    .sphere(goal.sphere.clone()),
            )
            .await;

        if newly_completed {
            AchievementService::new(self.db)
                .check_and_grant_all(user_id)
                .await;
        }

        Ok(UpdatedGoal {
            goal,
            newly_completed,
        })
    }

    /// Deletes an owned goal with its steps and subtasks.
    pub async fn delete(&self, user_id: i32, goal_id: i32) -> Result<(), AppError> {
        let goal = self.get_owned(user_id, goal_id).await?;

        GoalRepository::new(self.db).delete(goal_id).await?;

        EventService::new(self.db)
            .track(
                CreateEventParam::new(user_id, DELETE_GOAL, Utc::now())
                    .sphere(goal.sphere)
                    .payload(json!({ "goal_id": goal_id, "title": goal.title })),
            )
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::event::EventQueryDto,
        server::{
            data::{event::EventRepository, feed_event::FeedEventRepository},
            model::event::EventFilter,
        },
    };
    use test_utils::{builder::TestBuilder, factory};

    fn create_dto(title: &str) -> CreateGoalDto {
        CreateGoalDto {
            title: title.to_string(),
            description: None,
            sphere: Some("health".to_string()),
            privacy: None,
            progress_type: None,
            target_value: Some(10.0),
        }
    }

    /// Tests goal creation side effects.
    ///
    /// Expected: goal_created feed event and create_goal analytics event
    #[tokio::test]
    async fn create_records_feed_and_event() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;

        let goal = GoalService::new(db)
            .create(&ModerationService::default(), user.id, create_dto("Run 10k"))
            .await?;
        assert_eq!(goal.privacy, "private");

        let feed = FeedEventRepository::new(db)
            .get_for_users(&[user.id], 0, 20)
            .await?;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, GOAL_CREATED);

        let events = EventRepository::new(db)
            .list(user.id, EventFilter::from_dto(EventQueryDto::default()))
            .await?;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, CREATE_GOAL);
        assert_eq!(events[0].goal_id, Some(goal.id));

        Ok(())
    }

    /// Tests that moderation rejects a goal before anything is stored.
    ///
    /// Expected: Err(Forbidden) and no goals
    #[tokio::test]
    async fn create_rejects_blocked_title() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;

        let moderation = ModerationService::new(vec!["badword".to_string()]);
        let service = GoalService::new(db);
        let result = service
            .create(&moderation, user.id, create_dto("My BADWORD goal"))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(service.list(user.id).await?.is_empty());

        Ok(())
    }

    /// Tests ownership checks on another user's goal.
    ///
    /// Expected: Forbidden for foreign goals, NotFound for unknown IDs
    #[tokio::test]
    async fn get_owned_checks_owner() -> Result<(), AppError> {
        let test = TestBuilder::new().with_goal_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = factory::create_user(db).await?;
        let other = factory::create_user(db).await?;
        let goal = factory::create_goal(db, owner.id).await?;

        let service = GoalService::new(db);
        assert!(service.get_owned(owner.id, goal.id).await.is_ok());
        assert!(matches!(
            service.get_owned(other.id, goal.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.get_owned(owner.id, goal.id + 100).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    /// Tests completion detection on update.
    ///
    /// Expected: first completing update is flagged, a repeated one is not
    #[tokio::test]
    async fn update_detects_completion_transition() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;
        let goal = factory::create_goal(db, user.id).await?;

        let complete = UpdateGoalDto {
            completed_at: Some(Some(Utc::now())),
            ..Default::default()
        };

        let service = GoalService::new(db);
        let moderation = ModerationService::default();
        let first = service
            .update(&moderation, user.id, goal.id, complete.clone())
            .await?;
        assert!(first.newly_completed);
        assert!(first.goal.is_completed());

        let second = service.update(&moderation, user.id, goal.id, complete).await?;
        assert!(!second.newly_completed);

        let completions = EventRepository::new(db)
            .list(
                user.id,
                EventFilter::from_dto(EventQueryDto {
                    event_type: Some(COMPLETE_GOAL.to_string()),
                    ..Default::default()
                }),
            )
            .await?;
        assert_eq!(completions.len(), 1);

        Ok(())
    }
}
