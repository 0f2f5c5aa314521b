//! Settings read once at startup and passed down explicitly.
use crate::search::SearchDepth;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Upper bound on articles requested per query.
pub const MAX_RESULTS_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub tavily_api_key: String,
    pub model: String,
    pub anthropic_base_url: String,
    pub tavily_base_url: String,
    pub max_tokens: u32,
    pub max_results: u32,
    pub search_depth: SearchDepth,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{name} is not set (environment or .env)"),
            ConfigError::Invalid {
                name,
                value,
                reason,
            } => write!(f, "{name}={value:?} is invalid: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!("ignoring unreadable .env: {e}");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let anthropic_api_key = required("ANTHROPIC_API_KEY")?;
        let tavily_api_key = required("TAVILY_API_KEY")?;

        let max_tokens = match get("RESEARCH_MAX_TOKENS") {
            None => DEFAULT_MAX_TOKENS,
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RESEARCH_MAX_TOKENS",
                        value,
                        reason: "expected a positive integer",
                    });
                }
            },
        };

        let max_results = match get("RESEARCH_MAX_RESULTS") {
            None => MAX_RESULTS_LIMIT,
            Some(value) => match value.parse::<u32>() {
                Ok(n) if (1..=MAX_RESULTS_LIMIT).contains(&n) => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RESEARCH_MAX_RESULTS",
                        value,
                        reason: "expected an integer from 1 to 5",
                    });
                }
            },
        };

        let search_depth = match get("RESEARCH_DEPTH") {
            None => SearchDepth::Shallow,
            Some(value) => SearchDepth::parse(&value).ok_or(ConfigError::Invalid {
                name: "RESEARCH_DEPTH",
                value,
                reason: "expected `shallow` or `deep`",
            })?,
        };

        Ok(Config {
            anthropic_api_key,
            tavily_api_key,
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            anthropic_base_url: get("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            tavily_base_url: get("TAVILY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string()),
            max_tokens,
            max_results,
            search_depth,
        })
    }
}
