use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    model::goal::CreateStepDto,
    server::{
        data::{goal::GoalRepository, step::StepRepository},
        error::AppError,
        model::{
            ai::GenerationTrigger,
            event::{CreateEventParam, CREATE_STEP, DELETE_STEP},
            goal::{CreateStepParam, Step},
            user::{StreakUpdate, User},
        },
        service::{
            achievement::AchievementService, ai::analytics::DEFAULT_TARGET,
            event::EventService, goal::GoalService, moderation::ModerationService,
            streak::StreakService,
        },
    },
};

/// Progress percentages that count as a milestone when a step crosses them.
const MILESTONES: [f64; 3] = [50.0, 75.0, 100.0];
/// Smallest streak announced as a new record.
const STREAK_RECORD_MIN: i32 = 3;

/// A stored step with the streak it produced and the insight trigger it warrants.
#[derive(Debug, Clone)]
pub struct AddedStep {
    pub step: Step,
    pub streak: StreakUpdate,
    pub trigger: GenerationTrigger,
}

/// Whether progress moved from below a milestone to at or above it.
pub fn crossed_milestone(before: f64, after: f64, target: f64) -> bool {
    if target <= 0.0 {
        return false;
    }
    let before = before / target * 100.0;
    let after = after / target * 100.0;

    MILESTONES.iter().any(|m| before < *m && after >= *m)
}

/// Picks the insight trigger for a step: a new streak record first, then a milestone.
pub fn step_trigger(
    previous_streak: i32,
    streak: &StreakUpdate,
    milestone: bool,
) -> GenerationTrigger {
    let record = streak.current_streak >= STREAK_RECORD_MIN
        && streak.current_streak == streak.longest_streak
        && streak.current_streak > previous_streak;

    if record {
        GenerationTrigger::NewStreakRecord
    } else if milestone {
        GenerationTrigger::MilestoneReached
    } else {
        GenerationTrigger::StepAdded
    }
}

pub struct StepService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StepService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Logs progress on an owned goal.
    ///
    /// Moderates the note, stores the step, advances the caller's streak, re-evaluates
    /// achievements and records a `create_step` event carrying the goal's sphere.
    ///
    /// # Returns
    /// - `Ok(AddedStep)` - The stored step, the caller's streak and the insight trigger
    /// - `Err(AppError::Forbidden)` - Note rejected or goal belongs to someone else
    /// - `Err(AppError::NotFound)` - Unknown goal
    pub async fn add(
        &self,
        moderation: &ModerationService,
        user: &User,
        goal_id: i32,
        dto: CreateStepDto,
    ) -> Result<AddedStep, AppError> {
        moderation.check("step note", dto.note.as_deref())?;

        let goal = GoalService::new(self.db).get_owned(user.id, goal_id).await?;

        let now = Utc::now();
        let repo = StepRepository::new(self.db);
        let step = repo
            .create(CreateStepParam::from_dto(goal.id, dto), now)
            .await?;

        let total: f64 = repo
            .get_by_goal(goal.id)
            .await?
            .iter()
            .filter_map(|s| s.value)
            .sum();
        let before = total - step.value.unwrap_or(0.0);
        let milestone = crossed_milestone(
            before,
            total,
            goal.target_value.unwrap_or(DEFAULT_TARGET),
        );

        let streak = StreakService::new(self.db)
            .record_activity(user, now.date_naive())
            .await?;
        AchievementService::new(self.db)
            .check_and_grant_all(user.id)
            .await;
        EventService::new(self.db)
            .track(
                CreateEventParam::new(user.id, CREATE_STEP, now)
                    .goal_id(goal.id)
                    .step_id(step.id)
                    .sphere(goal.sphere)
                    .payload(json!({ "value": step.value, "note": step.note })),
            )
            .await;

        let trigger = step_trigger(user.current_streak, &streak, milestone);

        Ok(AddedStep {
            step,
            streak,
            trigger,
        })
    }

    /// Steps of an owned goal, newest first.
    pub async fn list(&self, user_id: i32, goal_id: i32) -> Result<Vec<Step>, AppError> {
        let goal = GoalService::new(self.db).get_owned(user_id, goal_id).await?;
        let steps = StepRepository::new(self.db).get_by_goal(goal.id).await?;

        Ok(steps)
    }

    pub async fn delete(&self, user_id: i32, goal_id: i32, step_id: i32) -> Result<(), AppError> {
        let repo = StepRepository::new(self.db);

        let step = match repo.find_by_id(step_id).await? {
            Some(step) if step.goal_id == goal_id => step,
            _ => return Err(AppError::NotFound("Step not found".to_string())),
        };

        let goal = GoalRepository::new(self.db).find_by_id(step.goal_id).await?;
        let Some(goal) = goal.filter(|g| g.user_id == user_id) else {
            return Err(AppError::Forbidden("No access to this step".to_string()));
        };

        repo.delete(step_id).await?;

        EventService::new(self.db)
            .track(
                CreateEventParam::new(user_id, DELETE_STEP, Utc::now())
                    .goal_id(goal.id)
                    .sphere(goal.sphere)
                    .payload(json!({ "value": step.value, "note": step.note })),
            )
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data::user::UserRepository;
    use chrono::Duration;
    use test_utils::{
        builder::TestBuilder,
        factory,
        factory::{goal::GoalFactory, step::StepFactory, user::UserFactory},
    };

    fn streak(current: i32, longest: i32) -> StreakUpdate {
        StreakUpdate {
            current_streak: current,
            longest_streak: longest,
            last_active_date: Utc::now().date_naive(),
        }
    }

    #[test]
    fn milestones_fire_once_when_crossed() {
        assert!(crossed_milestone(40.0, 50.0, 100.0));
        assert!(crossed_milestone(10.0, 80.0, 100.0));
        assert!(crossed_milestone(9.0, 10.0, 10.0));
        assert!(!crossed_milestone(50.0, 60.0, 100.0));
        assert!(!crossed_milestone(10.0, 40.0, 100.0));
        assert!(!crossed_milestone(0.0, 5.0, 0.0));
    }

    #[test]
    fn streak_record_outranks_milestone() {
        assert_eq!(
            step_trigger(2, &streak(3, 3), true),
            GenerationTrigger::NewStreakRecord
        );
        // Same-day step: the record was already announced.
        assert_eq!(
            step_trigger(3, &streak(3, 3), false),
            GenerationTrigger::StepAdded
        );
        assert_eq!(
            step_trigger(1, &streak(2, 2), true),
            GenerationTrigger::MilestoneReached
        );
        assert_eq!(
            step_trigger(4, &streak(5, 9), false),
            GenerationTrigger::StepAdded
        );
    }

    /// Tests that logging a step continues yesterday's streak.
    ///
    /// Expected: streak goes from 2 to 3 and the longest streak follows
    #[tokio::test]
    async fn add_advances_streak() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let created = UserFactory::new(db)
            .current_streak(2)
            .last_active_date(yesterday)
            .build()
            .await?;
        let goal = factory::create_goal(db, created.id).await?;
        let user = UserRepository::new(db).find_by_id(created.id).await?.unwrap();

        let added = StepService::new(db)
            .add(
                &ModerationService::default(),
                &user,
                goal.id,
                CreateStepDto {
                    value: Some(2.0),
                    note: Some("morning run".to_string()),
                },
            )
            .await?;
        assert_eq!(added.step.goal_id, goal.id);
        assert_eq!(added.streak.current_streak, 3);
        assert_eq!(added.trigger, GenerationTrigger::NewStreakRecord);

        let user = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
        assert_eq!(user.current_streak, 3);
        assert_eq!(user.longest_streak, 3);
        assert_eq!(user.last_active_date, Some(Utc::now().date_naive()));

        Ok(())
    }

    /// Tests a step that takes a goal past half of its target.
    ///
    /// Expected: the milestone trigger, and a plain step trigger for the next small step
    #[tokio::test]
    async fn add_reports_milestone() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let created = factory::create_user(db).await?;
        let goal = GoalFactory::new(db, created.id)
            .target_value(10.0)
            .build()
            .await?;
        StepFactory::new(db, goal.id).value(4.0).build().await?;
        let user = UserRepository::new(db).find_by_id(created.id).await?.unwrap();

        let service = StepService::new(db);
        let dto = |value: f64| CreateStepDto {
            value: Some(value),
            note: None,
        };

        let added = service
            .add(&ModerationService::default(), &user, goal.id, dto(2.0))
            .await?;
        assert_eq!(added.trigger, GenerationTrigger::MilestoneReached);

        let user = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
        let added = service
            .add(&ModerationService::default(), &user, goal.id, dto(0.5))
            .await?;
        assert_eq!(added.trigger, GenerationTrigger::StepAdded);

        Ok(())
    }

    /// Tests logging a step on someone else's goal.
    ///
    /// Expected: Err(Forbidden) and no step stored
    #[tokio::test]
    async fn add_rejects_foreign_goal() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = factory::create_user(db).await?;
        let intruder = factory::create_user(db).await?;
        let goal = factory::create_goal(db, owner.id).await?;
        let intruder = UserRepository::new(db).find_by_id(intruder.id).await?.unwrap();

        let result = StepService::new(db)
            .add(
                &ModerationService::default(),
                &intruder,
                goal.id,
                CreateStepDto::default(),
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(StepRepository::new(db).get_by_goal(goal.id).await?.is_empty());

        Ok(())
    }

    /// Tests step deletion checks.
    ///
    /// Expected: Forbidden for a foreign caller, NotFound for an unknown step, Ok for the owner
    #[tokio::test]
    async fn delete_checks_owner() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = factory::create_user(db).await?;
        let other = factory::create_user(db).await?;
        let goal = factory::create_goal(db, owner.id).await?;
        let step = factory::create_step(db, goal.id).await?;

        let service = StepService::new(db);
        assert!(matches!(
            service.delete(other.id, goal.id, step.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(owner.id, goal.id, step.id + 100).await,
            Err(AppError::NotFound(_))
        ));
        service.delete(owner.id, goal.id, step.id).await?;
        assert!(StepRepository::new(db).find_by_id(step.id).await?.is_none());

        Ok(())
    }
}
