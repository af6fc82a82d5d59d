use super::*;

/// Tests counting a user's steps after a cutoff.
///
/// Expected: Ok(2) counting only the steps after the cutoff
#[tokio::test]
async fn counts_steps_after_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, goal) = factory::helpers::create_goal_with_owner(db).await?;
    let now = Utc::now();

    factory::create_step_at(db, goal.id, now - Duration::days(2)).await?;
    factory::create_step_at(db, goal.id, now - Duration::hours(3)).await?;
    factory::create_step_at(db, goal.id, now - Duration::hours(1)).await?;

    let repo = StepRepository::new(db);
    let count = repo
        .count_by_user_since(user.id, now - Duration::days(1))
        .await?;

    assert_eq!(count, 2);

    Ok(())
}
