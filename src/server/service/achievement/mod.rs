//! Achievement catalogue, grants and the unlock rule engine.
//!
//! [`AchievementService::check_and_grant_all`] runs after every goal, subtask and step
//! change. It evaluates each rule the user has not yet satisfied against a single
//! snapshot of their activity and grants the ones that pass.

pub mod rules;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{
        achievement::AchievementRepository, goal::GoalRepository, step::StepRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        achievement::{Achievement, AchievementCatalog, AchievementStats, UserAchievement},
        feed::ACHIEVEMENT_UNLOCKED,
    },
    service::{
        achievement::rules::{ActivitySnapshot, Rule},
        feed::FeedService,
    },
};

pub const DEFAULT_RECENT_LIMIT: u64 = 5;

pub struct AchievementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AchievementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn snapshot(&self, user_id: i32) -> Result<ActivitySnapshot, AppError> {
        let goals = GoalRepository::new(self.db).get_by_user(user_id).await?;
        let steps = StepRepository::new(self.db).get_by_user(user_id).await?;
        let current_streak = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.current_streak)
            .unwrap_or(0);
        let held = AchievementRepository::new(self.db)
            .get_held_ids(user_id)
            .await?
            .len();

        Ok(ActivitySnapshot {
            goals,
            steps,
            current_streak,
            held,
        })
    }

    /// Grants every achievement whose rule the user now satisfies.
    ///
    /// Failures are logged and yield an empty list so the triggering operation still
    /// succeeds.
    ///
    /// # Returns
    /// Codes of the newly granted achievements in catalogue order
    pub async fn check_and_grant_all(&self, user_id: i32) -> Vec<String> {
        match self.try_grant_all(user_id).await {
            Ok(codes) => codes,
            Err(e) => {
                tracing::error!("Failed to evaluate achievements for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn try_grant_all(&self, user_id: i32) -> Result<Vec<String>, AppError> {
        let repo = AchievementRepository::new(self.db);
        let held = repo.get_held_ids(user_id).await?;
        let mut snapshot = self.snapshot(user_id).await?;

        let mut granted = Vec::new();
        for achievement in repo.get_all().await? {
            if held.contains(&achievement.id) {
                continue;
            }

            let rule = Rule::parse(&achievement.kind, achievement.requirement.as_ref());
            if !rule.is_satisfied(&snapshot) {
                continue;
            }

            if self.grant(user_id, &achievement).await? {
                // Later meta rules see grants made earlier in this pass
                snapshot.held += 1;
                granted.push(achievement.code);
            }
        }

        if !granted.is_empty() {
            tracing::info!("User {} unlocked achievements: {:?}", user_id, granted);
        }

        Ok(granted)
    }

    async fn grant(&self, user_id: i32, achievement: &Achievement) -> Result<bool, AppError> {
        let inserted = AchievementRepository::new(self.db)
            .grant(user_id, achievement.id, Utc::now())
            .await?;

        if inserted {
            FeedService::new(self.db)
                .add_event_logged(
                    user_id,
                    ACHIEVEMENT_UNLOCKED,
                    json!({
                        "achievement_id": achievement.id,
                        "code": achievement.code,
                        "title": achievement.title,
                        "icon": achievement.icon,
                    }),
                )
                .await;
        }

        Ok(inserted)
    }

    /// Evaluates and grants a single achievement.
    ///
    /// # Returns
    /// - `Ok(true)` - The achievement was granted now
    /// - `Ok(false)` - Unknown code, already held, or rule not satisfied
    pub async fn check_and_grant_by_code(&self, user_id: i32, code: &str) -> Result<bool, AppError> {
        let repo = AchievementRepository::new(self.db);

        let Some(achievement) = repo.find_by_code(code).await? else {
            tracing::warn!("Unknown achievement code {}", code);
            return Ok(false);
        };
        if repo.is_held(user_id, achievement.id).await? {
            return Ok(false);
        }

        let snapshot = self.snapshot(user_id).await?;
        let rule = Rule::parse(&achievement.kind, achievement.requirement.as_ref());
        if !rule.is_satisfied(&snapshot) {
            return Ok(false);
        }

        self.grant(user_id, &achievement).await
    }

    /// Progress towards an achievement in percent, 0 for unknown IDs.
    pub async fn progress(&self, user_id: i32, achievement_id: i32) -> Result<u8, AppError> {
        let Some(achievement) = AchievementRepository::new(self.db)
            .find_by_id(achievement_id)
            .await?
        else {
            return Ok(0);
        };

        let rule = Rule::parse(&achievement.kind, achievement.requirement.as_ref());
        if rule == Rule::Never {
            return Ok(0);
        }
        let snapshot = self.snapshot(user_id).await?;

        Ok(rule.progress(&snapshot))
    }

    /// Achievements the user holds, most recent first.
    pub async fn get_user_achievements(
        &self,
        user_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<UserAchievement>, AppError> {
        let achievements = AchievementRepository::new(self.db)
            .get_user_achievements(user_id, limit)
            .await?;

        Ok(achievements)
    }

    pub async fn get_catalog(&self, user_id: i32) -> Result<AchievementCatalog, AppError> {
        let repo = AchievementRepository::new(self.db);
        let unlocked = repo.get_user_achievements(user_id, None).await?;
        let held = repo.get_held_ids(user_id).await?;
        let locked = repo
            .get_all()
            .await?
            .into_iter()
            .filter(|a| !held.contains(&a.id))
            .collect();

        Ok(AchievementCatalog { unlocked, locked })
    }

    pub async fn get_stats(&self, user_id: i32) -> Result<AchievementStats, AppError> {
        let repo = AchievementRepository::new(self.db);
        let total = repo.count().await?;
        let unlocked = repo.get_held_ids(user_id).await?.len() as u64;

        Ok(AchievementStats { total, unlocked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::data::feed_event::FeedEventRepository;
    use serde_json::json;
    use test_utils::{
        builder::TestBuilder,
        factory::{self, achievement::AchievementFactory, user::UserFactory},
    };

    /// Tests granting in one pass, including a meta rule fed by earlier grants.
    ///
    /// Verifies that satisfied rules are granted once with a feed event each and that a
    /// second run grants nothing.
    ///
    /// Expected: first run grants goal_count and meta, second run is empty
    #[tokio::test]
    async fn grants_satisfied_rules_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_achievement_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_user(db).await?;
        factory::create_goal(db, user.id).await?;

        AchievementFactory::new(db).code("first_goal").build().await?;
        AchievementFactory::new(db)
            .code("streak_3")
            .kind("streak")
            .requirement(json!({ "days": 3 }))
            .build()
            .await?;
        AchievementFactory::new(db)
            .code("hunter")
            .kind("meta")
            .requirement(json!({ "achievements": 1 }))
            .build()
            .await?;

        let service = AchievementService::new(db);
        let granted = service.check_and_grant_all(user.id).await;
        assert_eq!(granted, vec!["first_goal".to_string(), "hunter".to_string()]);

        let again = service.check_and_grant_all(user.id).await;
        assert!(again.is_empty());

        let feed = FeedEventRepository::new(db)
            .get_for_users(&[user.id], 0, 20)
            .await?;
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|e| e.kind == ACHIEVEMENT_UNLOCKED));

        Ok(())
    }

    /// Tests grant by code for unknown, unsatisfied and satisfied achievements.
    ///
    /// Expected: false, false, then true
    #[tokio::test]
    async fn grants_by_code() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_achievement_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db).current_streak(7).build().await?;
        AchievementFactory::new(db)
            .code("streak_14")
            .kind("streak")
            .requirement(json!({ "days": 14 }))
            .build()
            .await?;
        AchievementFactory::new(db)
            .code("streak_7")
            .kind("streak")
            .requirement(json!({ "days": 7 }))
            .build()
            .await?;

        let service = AchievementService::new(db);
        assert!(!service.check_and_grant_by_code(user.id, "nope").await?);
        assert!(!service.check_and_grant_by_code(user.id, "streak_14").await?);
        assert!(service.check_and_grant_by_code(user.id, "streak_7").await?);
        assert!(!service.check_and_grant_by_code(user.id, "streak_7").await?);

        Ok(())
    }

    /// Tests catalogue split, stats and progress.
    ///
    /// Expected: one unlocked, one locked, 50% overall, 50% progress on the locked rule
    #[tokio::test]
    async fn reports_catalog_stats_and_progress() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_achievement_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::create_user(db).await?;
        factory::create_goal(db, user.id).await?;
        let held = AchievementFactory::new(db).build().await?;
        let locked = AchievementFactory::new(db)
            .requirement(json!({ "count": 2 }))
            .build()
            .await?;
        factory::grant_achievement(db, user.id, held.id).await?;

        let service = AchievementService::new(db);
        let catalog = service.get_catalog(user.id).await?;
        assert_eq!(catalog.unlocked.len(), 1);
        assert_eq!(catalog.locked.len(), 1);
        assert_eq!(catalog.locked[0].id, locked.id);

        let stats = service.get_stats(user.id).await?;
        assert_eq!(stats.progress(), 50);

        assert_eq!(service.progress(user.id, locked.id).await?, 50);
        assert_eq!(service.progress(user.id, 9999).await?, 0);

        Ok(())
    }
}
