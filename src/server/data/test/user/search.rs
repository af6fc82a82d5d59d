use super::*;

/// Tests searching users by name or email.
///
/// Verifies that matches on either column are returned and excluded IDs are
/// filtered out.
///
/// Expected: Ok with the matching users except the excluded one
#[tokio::test]
async fn matches_name_or_email_and_skips_excluded() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let by_name = factory::user::UserFactory::new(db)
        .name("Marathon Mike")
        .build()
        .await?;
    let by_email = factory::user::UserFactory::new(db)
        .email("mike.runner@example.com")
        .build()
        .await?;
    let caller = factory::user::UserFactory::new(db)
        .name("Mike Himself")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Someone Else")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.search("mike", &[caller.id], 20).await?;

    let ids: Vec<i32> = found.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&by_name.id));
    assert!(ids.contains(&by_email.id));

    Ok(())
}

/// Tests that search respects the result limit.
///
/// Expected: Ok with at most `limit` users
#[tokio::test]
async fn respects_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for i in 0..5 {
        factory::user::UserFactory::new(db)
            .name(format!("Runner {i}"))
            .build()
            .await?;
    }

    let repo = UserRepository::new(db);
    let found = repo.search("Runner", &[], 3).await?;

    assert_eq!(found.len(), 3);

    Ok(())
}

/// Tests case-insensitive matching of non-ASCII names.
///
/// Verifies that Cyrillic names match regardless of the case used in the query.
///
/// Expected: Ok with the single matching user for both query casings
#[tokio::test]
async fn matches_cyrillic_names_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let maria = factory::user::UserFactory::new(db)
        .name("Мария Иванова")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Пётр")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let lower = repo.search("мария", &[], 20).await?;
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].id, maria.id);

    let upper = repo.search("ИВАНОВА", &[], 20).await?;
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].id, maria.id);

    Ok(())
}
