use super::*;

/// Tests accepting a pending request.
///
/// Expected: Ok(Some) with status `accepted`
#[tokio::test]
async fn marks_request_accepted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_social_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let repo = FriendshipRepository::new(db);
    let request = repo.create_request(a.id, b.id).await?.unwrap();
    let accepted = repo.accept(request.id).await?.unwrap();

    assert_eq!(accepted.status, STATUS_ACCEPTED);

    Ok(())
}

/// Tests accepting a request that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_request() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_social_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = FriendshipRepository::new(db);

    assert!(repo.accept(404).await?.is_none());

    Ok(())
}
