use super::*;

/// Tests listing held achievements.
///
/// Verifies that grants are returned most recent first with their catalogue data and
/// that the limit is applied.
///
/// Expected: Ok with the newest grant only
#[tokio::test]
async fn returns_newest_first_with_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_achievement(db, "goal_count", json!({ "count": 1 })).await?;
    let second = factory::create_achievement(db, "step_count", json!({ "count": 10 })).await?;

    let repo = AchievementRepository::new(db);
    let now = Utc::now();
    repo.grant(user.id, first.id, now - Duration::days(1)).await?;
    repo.grant(user.id, second.id, now).await?;

    let all = repo.get_user_achievements(user.id, None).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].achievement.id, second.id);
    assert_eq!(all[1].achievement.id, first.id);

    let latest = repo.get_user_achievements(user.id, Some(1)).await?;
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].achievement.code, second.code);

    Ok(())
}
