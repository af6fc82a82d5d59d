use super::*;

/// Tests finding a friendship regardless of direction.
///
/// Expected: Ok(Some) for both argument orders
#[tokio::test]
async fn finds_friendship_in_either_direction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_social_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;
    let c = factory::create_user(db).await?;
    let friendship = factory::create_friendship(db, a.id, b.id, "pending").await?;

    let repo = FriendshipRepository::new(db);

    assert_eq!(repo.find_between(a.id, b.id).await?.unwrap().id, friendship.id);
    assert_eq!(repo.find_between(b.id, a.id).await?.unwrap().id, friendship.id);
    assert!(repo.find_between(a.id, c.id).await?.is_none());

    Ok(())
}
