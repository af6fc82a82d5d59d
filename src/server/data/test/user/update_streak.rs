use super::*;

/// Tests persisting a streak update.
///
/// Expected: Ok with all three streak columns written
#[tokio::test]
async fn writes_streak_columns() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let today = Utc::now().date_naive();

    let repo = UserRepository::new(db);
    repo.update_streak(
        user.id,
        StreakUpdate {
            current_streak: 3,
            longest_streak: 7,
            last_active_date: today,
        },
    )
    .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.current_streak, 3);
    assert_eq!(stored.longest_streak, 7);
    assert_eq!(stored.last_active_date, Some(today));

    Ok(())
}
