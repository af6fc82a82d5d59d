//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. Every field is cheap to clone: the database
//! connection is a pool, the generator sits behind an `Arc`, and the moderation
//! blocklist is reference counted.

use std::{path::PathBuf, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::{
    service::{ai::llm::MessageGenerator, moderation::ModerationService},
    util::jwt::JwtKeys,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signing and verification keys for access tokens.
    pub jwt: JwtKeys,

    /// Blocklist check applied to user-written text.
    pub moderation: ModerationService,

    /// Phrases insight messages, either through the language model or with canned text.
    pub generator: Arc<dyn MessageGenerator>,

    /// Directory uploaded avatars are written to and served from.
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `jwt` - Token keys built from the configured secret
    /// - `moderation` - Text moderation service
    /// - `generator` - Insight message generator
    /// - `upload_dir` - Avatar storage directory
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtKeys,
        moderation: ModerationService,
        generator: Arc<dyn MessageGenerator>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            jwt,
            moderation,
            generator,
            upload_dir,
        }
    }
}
