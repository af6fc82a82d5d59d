use super::*;

/// Tests counting goals completed after a cutoff.
///
/// Verifies that open goals, goals completed before the cutoff and goals of other
/// users are not counted.
///
/// Expected: Ok(1)
#[tokio::test]
async fn counts_recent_completions_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    factory::create_goal(db, user.id).await?;
    factory::goal::GoalFactory::new(db, user.id)
        .completed_at(now - Duration::days(3))
        .build()
        .await?;
    factory::goal::GoalFactory::new(db, user.id)
        .completed_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::create_completed_goal(db, other.id).await?;

    let repo = GoalRepository::new(db);
    let count = repo
        .count_completed_since(user.id, now - Duration::days(1))
        .await?;

    assert_eq!(count, 1);

    Ok(())
}
