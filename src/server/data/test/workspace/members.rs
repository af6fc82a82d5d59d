use super::*;

/// Tests membership lookup and counting.
///
/// Expected: Ok with the membership found by workspace and user, and two members counted
#[tokio::test]
async fn finds_and_counts_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _membership) =
        factory::helpers::create_workspace_with_owner(db).await?;
    let member = factory::create_user(db).await?;

    let repo = WorkspaceMemberRepository::new(db);
    repo.create(workspace.id, member.id, WorkspaceRole::Member)
        .await?;

    let found = repo.find(workspace.id, owner.id).await?.unwrap();
    assert_eq!(found.role, WorkspaceRole::Owner);
    assert_eq!(repo.count_by_workspace(workspace.id).await?, 2);

    Ok(())
}

/// Tests changing a member's role.
///
/// Expected: Ok(Some) with the new role stored
#[tokio::test]
async fn updates_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, workspace, _membership) =
        factory::helpers::create_workspace_with_owner(db).await?;
    let user = factory::create_user(db).await?;
    let member = factory::create_member(db, workspace.id, user.id, "member").await?;

    let repo = WorkspaceMemberRepository::new(db);
    let updated = repo
        .update_role(member.id, WorkspaceRole::Manager)
        .await?
        .unwrap();

    assert_eq!(updated.role, WorkspaceRole::Manager);
    assert_eq!(
        repo.find_by_id(member.id).await?.unwrap().role,
        WorkspaceRole::Manager
    );

    Ok(())
}
