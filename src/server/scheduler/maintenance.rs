use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{ai_message::AiMessageRepository, user::UserRepository},
    error::AppError,
};

/// Top of every hour.
const PURGE_SCHEDULE: &str = "0 0 * * * *";
/// Five past midnight UTC.
const STREAK_RESET_SCHEDULE: &str = "0 5 0 * * *";

/// Starts the maintenance scheduler
///
/// Runs two jobs:
/// - Hourly purge of expired insight messages and dismissed messages older than a week
/// - Daily reset of streaks whose owner was last active before yesterday
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let purge_db = db.clone();
    let purge_job = Job::new_async(PURGE_SCHEDULE, move |_uuid, _lock| {
        let db = purge_db.clone();

        Box::pin(async move {
            if let Err(e) = purge_messages(&db, Utc::now()).await {
                tracing::error!("Error purging insight messages: {}", e);
            }
        })
    })?;

    let streak_db = db.clone();
    let streak_job = Job::new_async(STREAK_RESET_SCHEDULE, move |_uuid, _lock| {
        let db = streak_db.clone();

        Box::pin(async move {
            if let Err(e) = reset_streaks(&db, Utc::now().date_naive()).await {
                tracing::error!("Error resetting streaks: {}", e);
            }
        })
    })?;

    scheduler.add(purge_job).await?;
    scheduler.add(streak_job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Deletes expired messages and week-old dismissed messages of every user.
async fn purge_messages(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<u64, AppError> {
    let deleted = AiMessageRepository::new(db).purge(None, now).await?;

    if deleted > 0 {
        tracing::info!("Purged {} insight messages", deleted);
    }

    Ok(deleted)
}

/// Zeroes the current streak of users who logged nothing yesterday or today.
async fn reset_streaks(db: &DatabaseConnection, today: NaiveDate) -> Result<u64, AppError> {
    let yesterday = today - Duration::days(1);
    let reset = UserRepository::new(db).reset_stale_streaks(yesterday).await?;

    if reset > 0 {
        tracing::info!("Reset {} lapsed streaks", reset);
    }

    Ok(reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;
    use test_utils::{
        builder::TestBuilder,
        factory::{ai_message::AiMessageFactory, create_user, user::UserFactory},
    };

    #[tokio::test]
    async fn purges_expired_and_old_dismissed_messages() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();

        let user = create_user(db).await?;
        AiMessageFactory::new(db, user.id)
            .expires_at(now - Duration::hours(1))
            .build()
            .await?;
        AiMessageFactory::new(db, user.id)
            .dismissed(true)
            .created_at(now - Duration::days(8))
            .build()
            .await?;
        let kept = AiMessageFactory::new(db, user.id)
            .dismissed(true)
            .created_at(now - Duration::days(2))
            .build()
            .await?;

        let deleted = purge_messages(db, now).await?;

        assert_eq!(deleted, 2);
        let remaining = entity::prelude::AiMessage::find().all(db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);

        Ok(())
    }

    #[tokio::test]
    async fn resets_only_lapsed_streaks() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let today = Utc::now().date_naive();

        let active = UserFactory::new(db)
            .current_streak(4)
            .last_active_date(today - Duration::days(1))
            .build()
            .await?;
        let lapsed = UserFactory::new(db)
            .current_streak(6)
            .last_active_date(today - Duration::days(2))
            .build()
            .await?;

        let reset = reset_streaks(db, today).await?;
        assert_eq!(reset, 1);

        let active = entity::prelude::User::find_by_id(active.id)
            .one(db)
            .await?
            .unwrap();
        let lapsed = entity::prelude::User::find_by_id(lapsed.id)
            .one(db)
            .await?
            .unwrap();
        assert_eq!(active.current_streak, 4);
        assert_eq!(lapsed.current_streak, 0);
        assert_eq!(lapsed.longest_streak, 6);

        Ok(())
    }
}
