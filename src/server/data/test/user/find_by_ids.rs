use super::*;

/// Tests batch lookup of users by ID.
///
/// Verifies that every existing ID is returned keyed by itself and unknown IDs are
/// silently skipped.
///
/// Expected: Ok with a map holding the two existing users
#[tokio::test]
async fn returns_existing_users_keyed_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let users = repo.find_by_ids(&[a.id, b.id, 9999]).await?;

    assert_eq!(users.len(), 2);
    assert_eq!(users[&a.id].email, a.email);
    assert_eq!(users[&b.id].email, b.email);

    Ok(())
}

/// Tests batch lookup with no IDs.
///
/// Expected: Ok with an empty map
#[tokio::test]
async fn returns_empty_map_for_no_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let users = repo.find_by_ids(&[]).await?;

    assert!(users.is_empty());

    Ok(())
}
