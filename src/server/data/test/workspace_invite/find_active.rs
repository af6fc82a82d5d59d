use super::*;

/// Tests finding an open invitation.
///
/// Verifies that expired and accepted invitations are not considered active.
///
/// Expected: Ok(Some) only while the invitation is unaccepted and unexpired
#[tokio::test]
async fn ignores_expired_and_accepted_invites() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _membership) =
        factory::helpers::create_workspace_with_owner(db).await?;
    let now = Utc::now();

    factory::workspace::create_invite(
        db,
        workspace.id,
        owner.id,
        "late@example.com",
        now - Duration::hours(1),
    )
    .await?;
    let open = factory::workspace::create_pending_invite(
        db,
        workspace.id,
        owner.id,
        "open@example.com",
    )
    .await?;

    let repo = WorkspaceInviteRepository::new(db);

    assert!(repo
        .find_active(workspace.id, "late@example.com", now)
        .await?
        .is_none());
    assert_eq!(
        repo.find_active(workspace.id, "open@example.com", now)
            .await?
            .map(|i| i.id),
        Some(open.id)
    );

    repo.mark_accepted(open.id, now).await?;
    assert!(repo
        .find_active(workspace.id, "open@example.com", now)
        .await?
        .is_none());

    Ok(())
}
