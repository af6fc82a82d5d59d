use super::*;

/// Tests selecting messages to display.
///
/// Verifies that shown, dismissed and expired messages are skipped and the rest is
/// ordered by priority.
///
/// Expected: Ok with the two visible messages, highest priority first
#[tokio::test]
async fn returns_visible_messages_by_priority() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(AiMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();

    let low = AiMessageFactory::new(db, user.id).priority(2).build().await?;
    let high = AiMessageFactory::new(db, user.id)
        .priority(5)
        .expires_at(now + Duration::hours(4))
        .build()
        .await?;
    AiMessageFactory::new(db, user.id).shown(true).build().await?;
    AiMessageFactory::new(db, user.id)
        .dismissed(true)
        .build()
        .await?;
    AiMessageFactory::new(db, user.id)
        .priority(5)
        .expires_at(now - Duration::minutes(1))
        .build()
        .await?;

    let repo = AiMessageRepository::new(db);
    let active = repo.get_active(user.id, now, 5).await?;

    let ids: Vec<i32> = active.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![high.id, low.id]);

    Ok(())
}
