use super::*;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, SqlErr};

/// Tests sending a request to a user who already requested the caller.
///
/// Verifies that the reversed pair counts as the same friendship and nothing is inserted.
///
/// Expected: Ok(None) for the reversed request
#[tokio::test]
async fn refuses_reversed_request() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_social_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let repo = FriendshipRepository::new(db);
    assert!(repo.create_request(a.id, b.id).await?.is_some());
    assert!(repo.create_request(b.id, a.id).await?.is_none());
    assert!(repo.create_request(a.id, b.id).await?.is_none());

    Ok(())
}

/// Tests the unordered pair index created by the migrations.
///
/// Verifies that a raw insert of the reversed pair, bypassing the repository check, is
/// rejected by the database.
///
/// Expected: unique constraint violation
#[tokio::test]
async fn migrated_schema_rejects_reversed_pair() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    let a = factory::create_user(&db).await?;
    let b = factory::create_user(&db).await?;

    factory::create_friendship(&db, a.id, b.id, "pending").await?;
    let result = factory::create_friendship(&db, b.id, a.id, "pending").await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
