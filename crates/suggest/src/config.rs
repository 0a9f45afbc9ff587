//! Configuration for the suggestion client.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SuggestError};

/// Together's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.together.xyz/v1/chat/completions";

/// Configuration for the [`SuggestionClient`](crate::SuggestionClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Chat completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model override. Each strategy has its own default.
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Timeout for requests.
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,

    /// Which prompt strategy the editor uses.
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout: default_timeout(),
            strategy: StrategyKind::default(),
        }
    }
}

impl SuggestionConfig {
    /// Create a config pointing at a different endpoint.
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the strategy.
    #[must_use]
    pub const fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MINDMAP_AI_URL") {
            if Url::parse(&url).is_ok() {
                config.api_url = url;
            }
        }

        if let Ok(key) = std::env::var("MINDMAP_AI_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("MINDMAP_AI_MODEL") {
            config.model = Some(model);
        }

        if let Ok(strategy) = std::env::var("MINDMAP_AI_STRATEGY") {
            if let Ok(parsed) = strategy.parse() {
                config.strategy = parsed;
            }
        }

        if let Ok(secs) = std::env::var("MINDMAP_AI_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// The endpoint as a parsed URL.
    ///
    /// # Errors
    ///
    /// Returns a config error if `api_url` is not an absolute URL.
    pub fn endpoint(&self) -> Result<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| SuggestError::config_error(format!("Invalid API URL '{}': {e}", self.api_url)))
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .map_err(|e| SuggestError::config_error(format!("Failed to parse config: {e}")))
        } else {
            toml::from_str(&content)
                .map_err(|e| SuggestError::config_error(format!("Failed to parse config: {e}")))
        }
    }
}

/// Prompt strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Parents, siblings and children of the target.
    #[default]
    Contextual,
    /// Every label in the graph plus the target label.
    TopicList,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contextual => write!(f, "contextual"),
            Self::TopicList => write!(f, "topic-list"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "contextual" => Ok(Self::Contextual),
            "topic-list" | "topic_list" | "topics" => Ok(Self::TopicList),
            other => Err(SuggestError::config_error(format!(
                "unknown strategy '{other}', expected contextual or topic-list"
            ))),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_max_tokens() -> u32 {
    50
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Serialization helper for Duration as seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
