use super::*;

/// Tests per-member statistics across a workspace's team goals.
///
/// Verifies that contributions are summed over every goal of the workspace, steps
/// are counted per user and activity in other workspaces is ignored.
///
/// Expected: Ok with totals for the two active members only
#[tokio::test]
async fn sums_contributions_across_goals() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let teammate = factory::create_user(db).await?;
    let first = factory::create_team_goal(db, workspace.id, owner.id).await?;
    let second = factory::create_team_goal(db, workspace.id, owner.id).await?;

    let (outsider, elsewhere, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let foreign = factory::create_team_goal(db, elsewhere.id, outsider.id).await?;

    let repo = TeamGoalRepository::new(db);
    repo.add_step(first.id, owner.id, 2, None).await?;
    repo.add_step(second.id, owner.id, 3, None).await?;
    repo.add_step(second.id, teammate.id, 10, None).await?;
    repo.add_step(foreign.id, outsider.id, 50, None).await?;

    let stats = repo.get_member_stats(workspace.id).await?;

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[&owner.id], (5, 2));
    assert_eq!(stats[&teammate.id], (10, 1));

    Ok(())
}

/// Tests statistics of a workspace without team goals.
///
/// Expected: Ok with an empty map
#[tokio::test]
async fn returns_empty_map_without_goals() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, workspace, _) = factory::helpers::create_workspace_with_owner(db).await?;

    let repo = TeamGoalRepository::new(db);
    let stats = repo.get_member_stats(workspace.id).await?;

    assert!(stats.is_empty());

    Ok(())
}
