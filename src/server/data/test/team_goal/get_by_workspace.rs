use super::*;

/// Tests listing team goals with filters.
///
/// Verifies that goals of other workspaces are never returned and the status and
/// category filters narrow the result.
///
/// Expected: Ok with the matching goal only
#[tokio::test]
async fn filters_by_status_and_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let other_workspace = factory::create_workspace(db).await?;

    let wanted = factory::team_goal::TeamGoalFactory::new(db, workspace.id, owner.id)
        .category("sales")
        .build()
        .await?;
    factory::team_goal::TeamGoalFactory::new(db, workspace.id, owner.id)
        .category("sales")
        .status("completed")
        .build()
        .await?;
    factory::team_goal::TeamGoalFactory::new(db, workspace.id, owner.id)
        .category("hiring")
        .build()
        .await?;
    factory::team_goal::TeamGoalFactory::new(db, other_workspace.id, owner.id)
        .category("sales")
        .build()
        .await?;

    let repo = TeamGoalRepository::new(db);

    let all = repo
        .get_by_workspace(workspace.id, TeamGoalFilter::default())
        .await?;
    assert_eq!(all.len(), 3);

    let filtered = repo
        .get_by_workspace(
            workspace.id,
            TeamGoalFilter {
                status: Some("active".to_string()),
                category: Some("sales".to_string()),
                owner_id: None,
            },
        )
        .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, wanted.id);

    Ok(())
}
