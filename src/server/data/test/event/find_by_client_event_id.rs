use super::*;

/// Tests looking up an event by its client-side ID.
///
/// Verifies that the lookup is scoped to the owner, so another user's identical
/// client ID is not a match.
///
/// Expected: Ok(Some) for the owner and Ok(None) for the other user
#[tokio::test]
async fn scopes_client_event_id_to_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Event)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let event = factory::event::EventFactory::new(db, user.id, "open_dashboard")
        .client_event_id("client-1")
        .build()
        .await?;

    let repo = EventRepository::new(db);

    let found = repo.find_by_client_event_id(user.id, "client-1").await?;
    assert_eq!(found.map(|e| e.id), Some(event.id));
    assert!(repo
        .find_by_client_event_id(other.id, "client-1")
        .await?
        .is_none());

    Ok(())
}
