use super::*;

/// Tests deleting a goal with its steps and subtasks.
///
/// Verifies that the goal row and every dependent step and subtask row are removed.
///
/// Expected: Ok(true) with no rows left for the goal
#[tokio::test]
async fn deletes_goal_with_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, goal) = factory::helpers::create_goal_with_owner(db).await?;
    factory::create_step(db, goal.id).await?;
    factory::create_step(db, goal.id).await?;
    factory::create_subtask(db, goal.id).await?;

    let repo = GoalRepository::new(db);
    let deleted = repo.delete(goal.id).await?;

    assert!(deleted);
    assert!(entity::prelude::Goal::find_by_id(goal.id)
        .one(db)
        .await?
        .is_none());

    let steps = entity::prelude::Step::find()
        .filter(entity::step::Column::GoalId.eq(goal.id))
        .count(db)
        .await?;
    let subtasks = entity::prelude::Subtask::find()
        .filter(entity::subtask::Column::GoalId.eq(goal.id))
        .count(db)
        .await?;
    assert_eq!(steps, 0);
    assert_eq!(subtasks, 0);

    Ok(())
}

/// Tests deleting a goal that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_goal() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_goal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GoalRepository::new(db);
    let deleted = repo.delete(404).await?;

    assert!(!deleted);

    Ok(())
}
