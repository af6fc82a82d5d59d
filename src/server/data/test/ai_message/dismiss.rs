use super::*;

/// Tests dismissing a message.
///
/// Verifies that a user can only dismiss their own messages.
///
/// Expected: Ok(false) for another user and Ok(true) for the owner
#[tokio::test]
async fn only_owner_can_dismiss() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(AiMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let message = AiMessageFactory::new(db, owner.id).build().await?;

    let repo = AiMessageRepository::new(db);

    assert!(!repo.dismiss(stranger.id, message.id).await?);
    assert!(repo.dismiss(owner.id, message.id).await?);

    let stored = AiMessage::find_by_id(message.id).one(db).await?.unwrap();
    assert!(stored.dismissed);

    Ok(())
}

/// Tests marking a message as shown.
///
/// Expected: Ok(true) and the message no longer listed as active
#[tokio::test]
async fn shown_message_is_no_longer_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(AiMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let message = AiMessageFactory::new(db, user.id).build().await?;

    let repo = AiMessageRepository::new(db);
    assert!(repo.mark_shown(user.id, message.id).await?);
    assert!(repo.get_active(user.id, Utc::now(), 5).await?.is_empty());

    Ok(())
}
