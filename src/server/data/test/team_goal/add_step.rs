use super::*;

/// Tests that steps accumulate into one contributor row per user.
///
/// Verifies that a second step by the same user increments the existing total
/// instead of inserting another contributor row.
///
/// Expected: Ok with a sum of 12, two contributors and three steps
#[tokio::test]
async fn accumulates_contribution_per_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let teammate = factory::create_user(db).await?;
    let goal = factory::create_team_goal(db, workspace.id, owner.id).await?;

    let repo = TeamGoalRepository::new(db);
    repo.add_step(goal.id, owner.id, 3, None).await?;
    repo.add_step(goal.id, owner.id, 4, Some("evening run".to_string()))
        .await?;
    repo.add_step(goal.id, teammate.id, 5, None).await?;

    assert_eq!(repo.sum_steps(goal.id).await?, 12);
    assert_eq!(repo.count_steps(goal.id).await?, 3);
    assert_eq!(repo.count_contributors(goal.id).await?, 2);

    let contributors = repo.get_contributors(goal.id, None).await?;
    assert_eq!(contributors[0].user_id, owner.id);
    assert_eq!(contributors[0].contribution, 7);
    assert_eq!(contributors[1].user_id, teammate.id);
    assert_eq!(contributors[1].contribution, 5);

    Ok(())
}

/// Tests a step that would push a member's total past `i32::MAX`.
///
/// Verifies that neither the step nor the contributor total is written.
///
/// Expected: Ok(None) with the first step and total left unchanged
#[tokio::test]
async fn refuses_step_that_overflows_contribution() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let goal = factory::create_team_goal(db, workspace.id, owner.id).await?;

    let repo = TeamGoalRepository::new(db);
    let first = repo.add_step(goal.id, owner.id, i32::MAX - 5, None).await?;
    assert!(first.is_some());

    let second = repo.add_step(goal.id, owner.id, 10, None).await?;
    assert!(second.is_none());

    assert_eq!(repo.count_steps(goal.id).await?, 1);
    let contributors = repo.get_contributors(goal.id, None).await?;
    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0].contribution, i32::MAX - 5);

    Ok(())
}
