//! AI insight messages.
//!
//! Messages are produced in three stages: [`analytics::build`] summarises the user's
//! goals and steps, [`templates::build`] picks what is worth saying, and a
//! [`MessageGenerator`] phrases each template. Generated messages are stored and served
//! until they are shown, dismissed or expire.

pub mod analytics;
pub mod llm;
pub mod templates;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        ai_message::AiMessageRepository, goal::GoalRepository, step::StepRepository,
        user::UserRepository,
    },
    error::AppError,
    model::ai::{GenerationTrigger, Insights, NewAiMessage, UserAnalytics},
    service::ai::llm::MessageGenerator,
};

/// Messages returned by a single insights fetch.
pub const ACTIVE_MESSAGE_LIMIT: u64 = 5;
const REGENERATE_AFTER_HOURS: i64 = 24;
const TRIGGER_COOLDOWN_HOURS: i64 = 6;
const STEP_BURST: u64 = 5;
const MIN_RECORD_STREAK: i32 = 3;
/// Messages whose first characters match an undismissed one of the same kind are skipped.
const DEDUPE_PREFIX_CHARS: usize = 30;

fn same_prefix(a: &str, b: &str) -> bool {
    a.chars()
        .take(DEDUPE_PREFIX_CHARS)
        .eq(b.chars().take(DEDUPE_PREFIX_CHARS))
}

pub struct AiService<'a> {
    db: &'a DatabaseConnection,
    generator: &'a dyn MessageGenerator,
}

impl<'a> AiService<'a> {
    pub fn new(db: &'a DatabaseConnection, generator: &'a dyn MessageGenerator) -> Self {
        Self { db, generator }
    }

    /// Builds the analytics snapshot for a user.
    ///
    /// # Returns
    /// - `Ok(UserAnalytics)` - The snapshot
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn analytics(&self, user_id: i32) -> Result<UserAnalytics, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };
        let goals = GoalRepository::new(self.db).get_by_user(user_id).await?;
        let steps = StepRepository::new(self.db).get_by_user(user_id).await?;

        Ok(analytics::build(&user, &goals, &steps, Utc::now()))
    }

    /// Returns the user's active messages, generating fresh ones first when due.
    ///
    /// Generation runs when the user never had a message, the newest one is a day old,
    /// or something important happened since it was created: a goal was completed, the
    /// streak is a record of at least three days, or five or more steps were logged.
    pub async fn get_insights(&self, user_id: i32) -> Result<Insights, AppError> {
        let analytics = self.analytics(user_id).await?;
        let now = Utc::now();

        let last = AiMessageRepository::new(self.db)
            .last_created_at(user_id)
            .await?;
        let due = match last {
            None => true,
            Some(at) => {
                now - at >= Duration::hours(REGENERATE_AFTER_HOURS)
                    || self.important_since(&analytics, at).await?
            }
        };
        if due {
            self.store_messages(&analytics, now).await?;
        }

        let messages = AiMessageRepository::new(self.db)
            .get_active(user_id, now, ACTIVE_MESSAGE_LIMIT)
            .await?;

        Ok(Insights {
            messages,
            stats: analytics.stats(),
        })
    }

    async fn important_since(
        &self,
        analytics: &UserAnalytics,
        since: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let user_id = analytics.user.id;

        let completed = GoalRepository::new(self.db)
            .count_completed_since(user_id, since)
            .await?;
        if completed > 0 {
            return Ok(true);
        }

        let activity = &analytics.activity;
        if activity.streak >= MIN_RECORD_STREAK && activity.streak == activity.longest_streak {
            return Ok(true);
        }

        let steps = StepRepository::new(self.db)
            .count_by_user_since(user_id, since)
            .await?;

        Ok(steps >= STEP_BURST)
    }

    /// Generates messages after an activity when the cooldown has passed or the
    /// trigger is important.
    ///
    /// # Returns
    /// - `Ok(true)` - Messages were generated
    /// - `Ok(false)` - Skipped, the last generation is too recent
    pub async fn generate_if_needed(
        &self,
        user_id: i32,
        trigger: GenerationTrigger,
    ) -> Result<bool, AppError> {
        let now = Utc::now();
        let last = AiMessageRepository::new(self.db)
            .last_created_at(user_id)
            .await?;

        let cooled_down = last
            .map(|at| now - at > Duration::hours(TRIGGER_COOLDOWN_HOURS))
            .unwrap_or(true);
        if !cooled_down && !trigger.is_important() {
            return Ok(false);
        }

        tracing::debug!(
            "Generating insights for user {} after {}",
            user_id,
            trigger.as_str()
        );

        let analytics = self.analytics(user_id).await?;
        self.store_messages(&analytics, now).await?;

        Ok(true)
    }

    /// Purges stale messages, phrases the current templates and stores the ones that
    /// do not repeat an undismissed message.
    async fn store_messages(
        &self,
        analytics: &UserAnalytics,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let user_id = analytics.user.id;
        let repo = AiMessageRepository::new(self.db);

        repo.purge(Some(user_id), now).await?;
        let mut known = repo.get_undismissed_texts(user_id).await?;

        let mut messages = Vec::new();
        for template in templates::build(analytics, now) {
            let text = match self.generator.generate(template.kind, &template.context).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "Falling back to canned {} message for user {}: {}",
                        template.kind.as_str(),
                        user_id,
                        e
                    );
                    template.kind.fallback_text().to_string()
                }
            };

            let kind = template.kind.as_str();
            if known
                .iter()
                .any(|(k, message)| k == kind && same_prefix(message, &text))
            {
                continue;
            }

            known.push((kind.to_string(), text.clone()));
            messages.push(NewAiMessage::from_template(user_id, &template, text, now));
        }

        let count = messages.len();
        repo.create_many(messages, now).await?;

        Ok(count)
    }

    /// Hides a message for good.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No message with that ID belongs to the user
    pub async fn dismiss(&self, user_id: i32, message_id: i32) -> Result<(), AppError> {
        if !AiMessageRepository::new(self.db)
            .dismiss(user_id, message_id)
            .await?
        {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        Ok(())
    }

    pub async fn mark_shown(&self, user_id: i32, message_id: i32) -> Result<(), AppError> {
        if !AiMessageRepository::new(self.db)
            .mark_shown(user_id, message_id)
            .await?
        {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        Ok(())
    }
}

/// Runs [`AiService::generate_if_needed`] in the background, logging failures.
pub fn spawn_generation(
    db: DatabaseConnection,
    generator: Arc<dyn MessageGenerator>,
    user_id: i32,
    trigger: GenerationTrigger,
) {
    tokio::spawn(async move {
        let service = AiService::new(&db, generator.as_ref());
        if let Err(e) = service.generate_if_needed(user_id, trigger).await {
            tracing::error!(
                "Background insight generation failed for user {}: {}",
                user_id,
                e
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{error::llm::LlmError, model::ai::MessageKind};
    use async_trait::async_trait;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use test_utils::{
        builder::TestBuilder,
        factory::{ai_message::AiMessageFactory, create_goal, create_user},
    };

    struct EchoGenerator;

    #[async_trait]
    impl MessageGenerator for EchoGenerator {
        async fn generate(&self, kind: MessageKind, context: &str) -> Result<String, LlmError> {
            Ok(format!("[{}] {}", kind.as_str(), context))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl MessageGenerator for FailingGenerator {
        async fn generate(&self, _kind: MessageKind, _context: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }
    }

    async fn stored(db: &DatabaseConnection) -> u64 {
        entity::prelude::AiMessage::find().count(db).await.unwrap()
    }

    /// Tests the first fetch for a user with a goal and no steps.
    ///
    /// Expected: one newcomer motivation message is generated and returned with stats
    #[tokio::test]
    async fn first_fetch_generates_newcomer_message() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        create_goal(db, user.id).await?;

        let insights = AiService::new(db, &EchoGenerator).get_insights(user.id).await?;

        assert_eq!(insights.messages.len(), 1);
        assert_eq!(insights.messages[0].kind, "motivation");
        assert_eq!(insights.messages[0].priority, 5);
        assert!(insights.messages[0].message.starts_with("[motivation]"));
        assert_eq!(insights.stats.active_goals, 1);
        assert_eq!(insights.stats.streak, 0);

        Ok(())
    }

    /// Tests a second fetch right after the first with nothing new going on.
    ///
    /// Expected: nothing is regenerated
    #[tokio::test]
    async fn repeated_fetch_does_not_regenerate() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        create_goal(db, user.id).await?;
        let service = AiService::new(db, &EchoGenerator);

        service.get_insights(user.id).await?;
        let after_first = stored(db).await;
        service.get_insights(user.id).await?;

        assert_eq!(after_first, 1);
        assert_eq!(stored(db).await, after_first);

        Ok(())
    }

    /// Tests generation when the language model fails.
    ///
    /// Expected: the canned text of the kind is stored instead
    #[tokio::test]
    async fn failed_generation_stores_fallback_text() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        create_goal(db, user.id).await?;

        let insights = AiService::new(db, &FailingGenerator)
            .get_insights(user.id)
            .await?;

        assert_eq!(
            insights.messages[0].message,
            MessageKind::Motivation.fallback_text()
        );

        Ok(())
    }

    /// Tests that a template repeating an undismissed message of the same kind is skipped.
    ///
    /// Expected: no new message is stored
    #[tokio::test]
    async fn skips_duplicate_of_undismissed_message() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        create_goal(db, user.id).await?;
        AiMessageFactory::new(db, user.id)
            .kind("motivation")
            .message(MessageKind::Motivation.fallback_text())
            .created_at(Utc::now() - Duration::hours(30))
            .build()
            .await?;

        AiService::new(db, &FailingGenerator)
            .get_insights(user.id)
            .await?;

        assert_eq!(stored(db).await, 1);

        Ok(())
    }

    /// Tests trigger handling shortly after a generation.
    ///
    /// Expected: a step trigger is skipped, completion, milestone and streak record triggers
    /// regenerate
    #[tokio::test]
    async fn only_important_triggers_bypass_cooldown() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        create_goal(db, user.id).await?;
        AiMessageFactory::new(db, user.id).build().await?;
        let service = AiService::new(db, &EchoGenerator);

        assert!(
            !service
                .generate_if_needed(user.id, GenerationTrigger::StepAdded)
                .await?
        );
        assert!(
            service
                .generate_if_needed(user.id, GenerationTrigger::GoalCompleted)
                .await?
        );
        assert_eq!(stored(db).await, 2);

        for trigger in [
            GenerationTrigger::MilestoneReached,
            GenerationTrigger::NewStreakRecord,
        ] {
            assert!(service.generate_if_needed(user.id, trigger).await?);
        }

        Ok(())
    }

    /// Tests dismissing a message that belongs to another user.
    ///
    /// Expected: Err(NotFound) and the message stays undismissed
    #[tokio::test]
    async fn cannot_dismiss_foreign_message() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = create_user(db).await?;
        let other = create_user(db).await?;
        let message = AiMessageFactory::new(db, owner.id).build().await?;
        let service = AiService::new(db, &EchoGenerator);

        let result = service.dismiss(other.id, message.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        service.dismiss(owner.id, message.id).await?;
        let active = AiMessageRepository::new(db)
            .get_active(owner.id, Utc::now(), ACTIVE_MESSAGE_LIMIT)
            .await?;
        assert!(active.is_empty());

        Ok(())
    }
}
