use super::*;

/// Tests a partial update.
///
/// Verifies that provided fields change and omitted fields keep their values.
///
/// Expected: Ok(Some) with only the title and sphere changed
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let goal = factory::goal::GoalFactory::new(db, user.id)
        .description("Run every morning")
        .target_value(42.0)
        .build()
        .await?;

    let repo = GoalRepository::new(db);
    let updated = repo
        .update(
            goal.id,
            UpdateGoalParam {
                title: Some("Marathon".to_string()),
                sphere: Some("health".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.title, "Marathon");
    assert_eq!(updated.sphere.as_deref(), Some("health"));
    assert_eq!(updated.description.as_deref(), Some("Run every morning"));
    assert_eq!(updated.target_value, Some(42.0));

    Ok(())
}

/// Tests clearing the completion timestamp.
///
/// Expected: Ok(Some) with `completed_at` set back to `None`
#[tokio::test]
async fn clears_completed_at() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let goal = factory::create_completed_goal(db, user.id).await?;

    let repo = GoalRepository::new(db);
    let updated = repo
        .update(
            goal.id,
            UpdateGoalParam {
                completed_at: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(updated.completed_at.is_none());

    Ok(())
}

/// Tests updating a goal that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_goal() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GoalRepository::new(db);
    let updated = repo.update(404, UpdateGoalParam::default()).await?;

    assert!(updated.is_none());

    Ok(())
}
