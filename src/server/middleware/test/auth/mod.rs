use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{bearer_token, AuthGuard},
    util::jwt::JwtKeys,
};
use test_utils::{builder::TestBuilder, factory};

mod require;

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

/// Tests bearer token extraction.
///
/// Verifies that only the `Bearer` scheme with a non-empty token is accepted.
///
/// Expected: the token for a well-formed header, `None` otherwise
#[test]
fn extracts_bearer_token() {
    assert_eq!(bearer_token(&headers_with("Bearer abc.def")), Some("abc.def"));
    assert_eq!(bearer_token(&headers_with("Basic abc")), None);
    assert_eq!(bearer_token(&headers_with("Bearer ")), None);
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}
