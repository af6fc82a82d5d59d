use super::*;

/// Tests purging stale messages.
///
/// Verifies that expired messages and dismissed messages older than a week are
/// deleted, while recent dismissed and unexpired messages stay.
///
/// Expected: Ok(2) with two messages remaining
#[tokio::test]
async fn deletes_expired_and_old_dismissed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(AiMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();

    AiMessageFactory::new(db, user.id)
        .expires_at(now - Duration::hours(1))
        .build()
        .await?;
    AiMessageFactory::new(db, user.id)
        .dismissed(true)
        .created_at(now - Duration::days(8))
        .build()
        .await?;
    AiMessageFactory::new(db, user.id)
        .dismissed(true)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    AiMessageFactory::new(db, user.id)
        .expires_at(now + Duration::hours(1))
        .build()
        .await?;

    let repo = AiMessageRepository::new(db);
    let purged = repo.purge(Some(user.id), now).await?;

    assert_eq!(purged, 2);
    assert_eq!(AiMessage::find().count(db).await?, 2);

    Ok(())
}
