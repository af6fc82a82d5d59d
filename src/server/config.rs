use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_JWT_EXPIRES_IN_DAYS: i64 = 7;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

const DEFAULT_LLM_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
const DEFAULT_LLM_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
const DEFAULT_LLM_SCOPE: &str = "GIGACHAT_API_PERS";
const DEFAULT_LLM_MODEL: &str = "GigaChat";

/// Credentials and endpoints of the chat completion API used to phrase insights.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub auth_key: String,
    pub scope: String,
    pub model: String,
    pub auth_url: String,
    pub api_url: String,
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub jwt_secret: String,
    pub jwt_expires_in_days: i64,

    pub cors_origins: Vec<String>,
    pub upload_dir: String,
    pub moderation_blocklist: Vec<String>,

    /// `None` when `LLM_AUTH_KEY` is unset; insights then use built-in texts.
    pub llm: Option<LlmConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_expires_in_days = match std::env::var("JWT_EXPIRES_IN_DAYS") {
            Ok(value) => value
                .parse::<i64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "JWT_EXPIRES_IN_DAYS".to_string(),
                    reason: e.to_string(),
                })?,
            Err(_) => DEFAULT_JWT_EXPIRES_IN_DAYS,
        };

        let llm = match std::env::var("LLM_AUTH_KEY") {
            Ok(auth_key) if !auth_key.is_empty() => Some(LlmConfig {
                auth_key,
                scope: env_or("LLM_SCOPE", DEFAULT_LLM_SCOPE),
                model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                auth_url: env_url("LLM_AUTH_URL", DEFAULT_LLM_AUTH_URL)?,
                api_url: env_url("LLM_API_URL", DEFAULT_LLM_API_URL)?,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            jwt_expires_in_days,
            cors_origins: split_list(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            upload_dir: env_or("UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            moderation_blocklist: split_list(&env_or("MODERATION_BLOCKLIST", "")),
            llm,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Reads an absolute http(s) URL, without a trailing slash.
fn env_url(name: &str, default: &str) -> Result<String, ConfigError> {
    let value = env_or(name, default);
    let parsed = Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Splits a comma separated variable, dropping blank entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            split_list(" http://a , ,http://b,"),
            vec!["http://a".to_string(), "http://b".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn env_url_rejects_non_http_schemes() {
        assert!(env_url("LEVELUP_TEST_UNSET_URL", "https://example.com/api/").is_ok());
        assert!(env_url("LEVELUP_TEST_UNSET_URL", "ftp://example.com").is_err());
        assert!(env_url("LEVELUP_TEST_UNSET_URL", "not a url").is_err());
    }

    #[test]
    fn env_url_strips_trailing_slash() {
        let url = env_url("LEVELUP_TEST_UNSET_URL", "https://example.com/api/v1/").unwrap();
        assert_eq!(url, "https://example.com/api/v1");
    }
}
