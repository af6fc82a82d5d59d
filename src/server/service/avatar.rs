//! Avatar image uploads stored on local disk.

use std::path::Path;

use sea_orm::DatabaseConnection;

use crate::server::{data::user::UserRepository, error::AppError, util::token::random_token};

/// Largest accepted avatar, 5 MiB.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
/// Public URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const FILE_NAME_LENGTH: usize = 32;

/// File extension for an accepted image content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

pub struct AvatarService<'a> {
    db: &'a DatabaseConnection,
    upload_dir: &'a Path,
}

impl<'a> AvatarService<'a> {
    pub fn new(db: &'a DatabaseConnection, upload_dir: &'a Path) -> Self {
        Self { db, upload_dir }
    }

    /// Writes the image under a random name and points the user's avatar at it.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the avatar
    /// - `content_type` - Declared content type of the uploaded part
    /// - `bytes` - File contents
    ///
    /// # Returns
    /// - `Ok(String)` - Public URL of the stored avatar
    /// - `Err(AppError::BadRequest)` - Unsupported type, empty or oversized file
    pub async fn store(
        &self,
        user_id: i32,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let Some(extension) = content_type.and_then(extension_for) else {
            return Err(AppError::BadRequest(
                "Only png, jpeg, gif and webp images are allowed".to_string(),
            ));
        };
        if bytes.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AppError::BadRequest("File exceeds 5 MiB".to_string()));
        }

        let file_name = format!("{}.{}", random_token(FILE_NAME_LENGTH), extension);
        tokio::fs::write(self.upload_dir.join(&file_name), bytes).await?;

        let url = format!("{}/{}", UPLOADS_URL_PREFIX, file_name);
        UserRepository::new(self.db)
            .set_avatar_url(user_id, &url)
            .await?;

        tracing::debug!("Stored avatar {} for user {}", file_name, user_id);

        Ok(url)
    }
}
