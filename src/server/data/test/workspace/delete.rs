use super::*;

/// Tests deleting a workspace with everything it owns.
///
/// Verifies that members, invitations, team goals and their steps and contributor
/// totals are removed together with the workspace.
///
/// Expected: Ok(true) with no dependent rows left
#[tokio::test]
async fn deletes_workspace_with_dependents() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_workspace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, workspace, _membership) =
        factory::helpers::create_workspace_with_owner(db).await?;
    factory::workspace::create_pending_invite(db, workspace.id, owner.id, "friend@example.com")
        .await?;
    let goal = factory::create_team_goal(db, workspace.id, owner.id).await?;
    crate::server::data::team_goal::TeamGoalRepository::new(db)
        .add_step(goal.id, owner.id, 5, None)
        .await?;

    let repo = WorkspaceRepository::new(db);
    assert!(repo.delete(workspace.id).await?);

    assert!(repo.find_by_id(workspace.id).await?.is_none());
    let members = entity::prelude::WorkspaceMember::find()
        .filter(entity::workspace_member::Column::WorkspaceId.eq(workspace.id))
        .count(db)
        .await?;
    let invites = entity::prelude::WorkspaceInvite::find()
        .filter(entity::workspace_invite::Column::WorkspaceId.eq(workspace.id))
        .count(db)
        .await?;
    let steps = entity::prelude::TeamGoalStep::find().count(db).await?;
    let contributors = entity::prelude::TeamGoalContributor::find().count(db).await?;
    let goals = entity::prelude::TeamGoal::find().count(db).await?;

    assert_eq!(members, 0);
    assert_eq!(invites, 0);
    assert_eq!(steps, 0);
    assert_eq!(contributors, 0);
    assert_eq!(goals, 0);

    Ok(())
}
