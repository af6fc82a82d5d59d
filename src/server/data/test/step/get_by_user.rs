use super::*;

/// Tests listing a user's steps across goals.
///
/// Verifies that steps of every goal the user owns are returned newest first and
/// steps on other users' goals are excluded.
///
/// Expected: Ok with the user's two steps, newest first
#[tokio::test]
async fn returns_steps_across_own_goals() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, first_goal) = factory::helpers::create_goal_with_owner(db).await?;
    let second_goal = factory::create_goal(db, user.id).await?;
    let (_other, other_goal) = factory::helpers::create_goal_with_owner(db).await?;

    let now = Utc::now();
    let older = factory::create_step_at(db, first_goal.id, now - Duration::hours(2)).await?;
    let newer = factory::create_step_at(db, second_goal.id, now - Duration::hours(1)).await?;
    factory::create_step(db, other_goal.id).await?;

    let repo = StepRepository::new(db);
    let steps = repo.get_by_user(user.id).await?;

    let ids: Vec<i32> = steps.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}

/// Tests creating a step with an explicit timestamp.
///
/// Expected: Ok with the step stored on the goal
#[tokio::test]
async fn create_stores_value_and_note() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, goal) = factory::helpers::create_goal_with_owner(db).await?;

    let repo = StepRepository::new(db);
    let step = repo
        .create(
            CreateStepParam {
                goal_id: goal.id,
                value: Some(2.5),
                note: Some("5 km".to_string()),
            },
            Utc::now(),
        )
        .await?;

    let stored = repo.get_by_goal(goal.id).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, step.id);
    assert_eq!(stored[0].value, Some(2.5));
    assert_eq!(stored[0].note.as_deref(), Some("5 km"));

    Ok(())
}
