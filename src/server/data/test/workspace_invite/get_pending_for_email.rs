use super::*;

/// Tests listing the invitations addressed to an email.
///
/// Expected: Ok with invitations from both workspaces and none for other addresses
#[tokio::test]
async fn lists_open_invites_across_workspaces() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, first, _) = factory::helpers::create_workspace_with_owner(db).await?;
    let second = factory::create_workspace(db).await?;

    factory::workspace::create_pending_invite(db, first.id, owner.id, "guest@example.com").await?;
    factory::workspace::create_pending_invite(db, second.id, owner.id, "guest@example.com").await?;
    factory::workspace::create_pending_invite(db, second.id, owner.id, "other@example.com").await?;

    let repo = WorkspaceInviteRepository::new(db);
    let invites = repo
        .get_pending_for_email("guest@example.com", Utc::now())
        .await?;

    assert_eq!(invites.len(), 2);
    assert!(invites.iter().all(|i| i.email == "guest@example.com"));

    Ok(())
}
