//! Blocklist-based moderation of user-written text.

use std::sync::Arc;

use crate::server::error::AppError;

/// Rejects text containing any configured blocklisted word or phrase.
///
/// Matching is a case-insensitive substring test. An empty blocklist allows everything.
#[derive(Clone, Default)]
pub struct ModerationService {
    blocklist: Arc<Vec<String>>,
}

impl ModerationService {
    pub fn new(words: Vec<String>) -> Self {
        let blocklist = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            blocklist: Arc::new(blocklist),
        }
    }

    pub fn is_allowed(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        !self.blocklist.iter().any(|word| text.contains(word.as_str()))
    }

    /// Checks an optional field, failing with a message naming it.
    ///
    /// # Arguments
    /// - `field` - Human readable field name used in the error, e.g. `"goal title"`
    /// - `text` - Field value; `None` always passes
    ///
    /// # Returns
    /// - `Ok(())` - Text is absent or allowed
    /// - `Err(AppError::Forbidden)` - Text contains blocklisted content
    pub fn check(&self, field: &str, text: Option<&str>) -> Result<(), AppError> {
        match text {
            Some(text) if !self.is_allowed(text) => {
                tracing::debug!("Rejected {} by moderation", field);
                Err(AppError::Forbidden(format!("Inappropriate text in {}", field)))
            }
            _ => Ok(()),
        }
    }
}
