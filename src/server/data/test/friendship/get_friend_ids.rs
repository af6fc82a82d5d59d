use super::*;

/// Tests collecting the IDs of accepted friends.
///
/// Verifies that the other party is returned whichever side sent the request and
/// pending requests are ignored.
///
/// Expected: Ok with the two accepted friends
#[tokio::test]
async fn returns_other_party_of_accepted_friendships() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_social_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_user(db).await?;
    let sent = factory::create_user(db).await?;
    let received = factory::create_user(db).await?;
    let pending = factory::create_user(db).await?;

    factory::create_accepted_friendship(db, me.id, sent.id).await?;
    factory::create_accepted_friendship(db, received.id, me.id).await?;
    factory::create_friendship(db, me.id, pending.id, "pending").await?;

    let repo = FriendshipRepository::new(db);
    let mut ids = repo.get_friend_ids(me.id).await?;
    ids.sort();

    let mut expected = vec![sent.id, received.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}
