//! Phrasing insight messages through the GigaChat chat completion API.
//!
//! [`GigaChatClient`] exchanges the configured authorization key for a short lived access
//! token, caches it until shortly before it expires and retries a completion once when the
//! token is rejected. [`FallbackGenerator`] is used when no credentials are configured.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::server::{config::LlmConfig, error::llm::LlmError, model::ai::MessageKind};

const MAX_TOKENS: u32 = 150;
const TOP_P: f32 = 0.9;
/// Tokens are refreshed this long before their reported expiry.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Turns a factual context into a short user-facing message.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, kind: MessageKind, context: &str) -> Result<String, LlmError>;
}

/// Returns the canned text of each kind without calling out.
pub struct FallbackGenerator;

#[async_trait]
impl MessageGenerator for FallbackGenerator {
    async fn generate(&self, kind: MessageKind, _context: &str) -> Result<String, LlmError> {
        Ok(kind.fallback_text().to_string())
    }
}

fn system_prompt(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Celebration => {
            "You are a friendly coach in a goal tracking app. Congratulate the user on their \
             achievement sincerely and with energy. Mention concrete numbers. Write 1-2 short \
             sentences, no more than 200 characters. Use at most one emoji."
        }
        MessageKind::Insight => {
            "You are a productivity analyst in a goal tracking app. Explain the pattern found \
             in the user's activity and why it matters. Be concrete and useful. Write 1-2 \
             short sentences, no more than 200 characters."
        }
        MessageKind::Motivation => {
            "You are a supportive mentor in a goal tracking app. Encourage the user to get \
             back to their goals without guilt or pressure. Suggest one small concrete step. \
             Write 1-2 short sentences, no more than 200 characters."
        }
        MessageKind::Recommendation => {
            "You are an experienced goal planning advisor. Give one practical piece of advice \
             based on the data. Be specific and actionable. Write 1-2 short sentences, no \
             more than 200 characters."
        }
        MessageKind::Challenge => {
            "You are a game master in a goal tracking app. Offer the user an exciting but \
             achievable challenge with a clear target. Write 1-2 short sentences, no more \
             than 200 characters."
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Unix time in milliseconds.
    expires_at: i64,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) > now
    }
}

fn build_request<'a>(model: &'a str, kind: MessageKind, context: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt(kind),
            },
            ChatMessage {
                role: "user",
                content: context,
            },
        ],
        temperature: kind.temperature(),
        max_tokens: MAX_TOKENS,
        top_p: TOP_P,
    }
}

/// First non-blank completion text, trimmed.
fn extract_text(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .map(|choice| choice.message.content.trim().to_string())
        .find(|text| !text.is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[derive(Clone)]
pub struct GigaChatClient {
    http: reqwest::Client,
    config: LlmConfig,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl GigaChatClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self {
            http,
            config,
            token: Arc::new(RwLock::new(None)),
        }
    }

    async fn access_token(&self) -> Result<String, LlmError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.token.write().await;
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("scope", &self.config.scope)
            .finish();

        let response = self
            .http
            .post(&self.config.auth_url)
            .header(header::AUTHORIZATION, format!("Basic {}", self.config.auth_key))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::ACCEPT, "application/json")
            .header("RqUID", uuid::Uuid::new_v4().to_string())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Utc
            .timestamp_millis_opt(token.expires_at)
            .single()
            .unwrap_or_else(|| Utc::now() + Duration::minutes(30));

        tracing::debug!("Obtained LLM access token valid until {}", expires_at);

        *slot = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    async fn complete(
        &self,
        token: &str,
        request: &ChatRequest<'_>,
    ) -> Result<reqwest::Response, LlmError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl MessageGenerator for GigaChatClient {
    async fn generate(&self, kind: MessageKind, context: &str) -> Result<String, LlmError> {
        let request = build_request(&self.config.model, kind, context);

        let token = self.access_token().await?;
        let mut response = self.complete(&token, &request).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("LLM access token rejected, requesting a new one");
            *self.token.write().await = None;

            let token = self.access_token().await?;
            response = self.complete(&token, &request).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        extract_text(response.json().await?)
    }
}
