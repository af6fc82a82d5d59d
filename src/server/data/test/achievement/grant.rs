use super::*;

/// Tests granting an achievement for the first time.
///
/// Expected: Ok(true) and the achievement is held afterwards
#[tokio::test]
async fn grants_new_achievement() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, "goal_count", json!({ "count": 1 })).await?;

    let repo = AchievementRepository::new(db);
    let granted = repo.grant(user.id, achievement.id, Utc::now()).await?;

    assert!(granted);
    assert!(repo.is_held(user.id, achievement.id).await?);
    assert!(repo.get_held_ids(user.id).await?.contains(&achievement.id));

    Ok(())
}

/// Tests that a held achievement is never granted twice.
///
/// Expected: Ok(false) with a single grant row
#[tokio::test]
async fn does_not_grant_twice() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, "goal_count", json!({ "count": 1 })).await?;
    factory::grant_achievement(db, user.id, achievement.id).await?;

    let repo = AchievementRepository::new(db);
    let granted = repo.grant(user.id, achievement.id, Utc::now()).await?;

    assert!(!granted);
    assert_eq!(repo.get_user_achievements(user.id, None).await?.len(), 1);

    Ok(())
}
