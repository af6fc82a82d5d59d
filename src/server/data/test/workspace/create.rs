use super::*;

/// Tests creating a workspace.
///
/// Verifies that the workspace starts on the free plan and its slug is reported as
/// taken afterwards.
///
/// Expected: Ok with plan `free` and `slug_exists` true
#[tokio::test]
async fn creates_on_free_plan() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WorkspaceRepository::new(db);
    assert!(!repo.slug_exists("runners-club").await?);

    let workspace = repo
        .create(CreateWorkspaceParam {
            name: "Runners Club".to_string(),
            slug: "runners-club".to_string(),
            description: None,
        })
        .await?;

    assert_eq!(workspace.plan, DEFAULT_PLAN);
    assert!(repo.slug_exists("runners-club").await?);

    Ok(())
}
