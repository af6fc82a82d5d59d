use super::*;

/// Tests resetting streaks of users who missed a day.
///
/// Verifies that only users with a positive streak whose last active day is before
/// the cutoff are reset, and that the longest streak is preserved.
///
/// Expected: Ok(1) with only the stale user reset
#[tokio::test]
async fn resets_only_stale_streaks() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    let active = factory::user::UserFactory::new(db)
        .current_streak(4)
        .longest_streak(4)
        .last_active_date(yesterday)
        .build()
        .await?;
    let stale = factory::user::UserFactory::new(db)
        .current_streak(6)
        .longest_streak(9)
        .last_active_date(today - Duration::days(3))
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let reset = repo.reset_stale_streaks(yesterday).await?;

    assert_eq!(reset, 1);

    let active = User::find_by_id(active.id).one(db).await?.unwrap();
    assert_eq!(active.current_streak, 4);

    let stale = User::find_by_id(stale.id).one(db).await?.unwrap();
    assert_eq!(stale.current_streak, 0);
    assert_eq!(stale.longest_streak, 9);

    Ok(())
}

/// Tests that users without any streak are not counted.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_users_without_streak() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let reset = repo
        .reset_stale_streaks(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        .await?;

    assert_eq!(reset, 0);

    Ok(())
}
