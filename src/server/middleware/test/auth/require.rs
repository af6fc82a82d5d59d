use super::*;

/// Tests a valid token for an existing user.
///
/// Expected: Ok(User) for the user named in the token
#[tokio::test]
async fn accepts_valid_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let keys = JwtKeys::new("test-secret", 7);
    let token = keys.issue(user.id, &user.email)?;
    let headers = headers_with(&format!("Bearer {}", token));

    let caller = AuthGuard::new(db, &keys, &headers).require().await?;

    assert_eq!(caller.id, user.id);
    assert_eq!(caller.email, user.email);

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let keys = JwtKeys::new("test-secret", 7);
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &keys, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let token = JwtKeys::new("other-secret", 7).issue(user.id, &user.email)?;
    let headers = headers_with(&format!("Bearer {}", token));

    let keys = JwtKeys::new("test-secret", 7);
    let result = AuthGuard::new(db, &keys, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests an expired token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let keys = JwtKeys::new("test-secret", 1);
    let token = keys.issue_at(user.id, &user.email, Utc::now() - Duration::days(3))?;
    let headers = headers_with(&format!("Bearer {}", token));

    let result = AuthGuard::new(db, &keys, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token whose user was deleted.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_token_of_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let keys = JwtKeys::new("test-secret", 7);
    let token = keys.issue(9999, "ghost@example.com")?;
    let headers = headers_with(&format!("Bearer {}", token));

    let result = AuthGuard::new(db, &keys, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(9999)))
    ));

    Ok(())
}
