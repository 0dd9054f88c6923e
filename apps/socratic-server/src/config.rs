//! Configuration management for the SocraticStudy server

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
pub const DEFAULT_COMPLETION_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TTS_BASE: &str = "https://translate.google.com/translate_tts";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub completion: CompletionConfig,
    pub speech: SpeechConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upload body limit in bytes, `None` for unbounded
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub media_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer`
    pub referer: String,
    /// Sent as `X-Title`
    pub title: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub base_url: String,
    pub language: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed browser origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_bytes: None,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("backend/uploads"),
                media_dir: PathBuf::from("backend/media"),
            },
            completion: CompletionConfig {
                api_key: None,
                base_url: DEFAULT_COMPLETION_BASE.to_string(),
                model: DEFAULT_MODEL.to_string(),
                referer: "http://localhost:3000".to_string(),
                title: "SocraticStudy".to_string(),
                timeout_secs: 60,
            },
            speech: SpeechConfig {
                base_url: DEFAULT_TTS_BASE.to_string(),
                language: "en".to_string(),
                timeout_secs: 30,
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset or empty variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        let origins = get("FRONTEND_ORIGINS")
            .or_else(|| get("FRONTEND_ORIGIN"))
            .map(|raw| parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors.allowed_origins);

        Ok(Config {
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", get("SERVER_PORT"))?
                    .unwrap_or(defaults.server.port),
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", get("MAX_UPLOAD_BYTES"))?,
            },
            storage: StorageConfig {
                upload_dir: get("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.upload_dir),
                media_dir: get("MEDIA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.media_dir),
            },
            completion: CompletionConfig {
                api_key: get("OPENROUTER_API_KEY"),
                base_url: get("OPENROUTER_BASE")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.completion.base_url),
                model: get("OPENROUTER_MODEL").unwrap_or(defaults.completion.model),
                referer: get("HTTP_REFERER").unwrap_or(defaults.completion.referer),
                title: get("X_TITLE").unwrap_or(defaults.completion.title),
                timeout_secs: parse_var("COMPLETION_TIMEOUT_SECS", get("COMPLETION_TIMEOUT_SECS"))?
                    .unwrap_or(defaults.completion.timeout_secs),
            },
            speech: SpeechConfig {
                base_url: get("TTS_BASE_URL").unwrap_or(defaults.speech.base_url),
                language: get("TTS_LANGUAGE").unwrap_or(defaults.speech.language),
                timeout_secs: parse_var("TTS_TIMEOUT_SECS", get("TTS_TIMEOUT_SECS"))?
                    .unwrap_or(defaults.speech.timeout_secs),
            },
            cors: CorsConfig {
                allowed_origins: origins,
            },
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value: raw.clone() })
        })
        .transpose()
}

/// Split a comma-separated origin list, dropping blanks and duplicates
fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for origin in raw.split(',').map(|o| o.trim().trim_end_matches('/')) {
        if !origin.is_empty() && !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }
    origins
}
