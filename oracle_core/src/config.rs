use std::{env, fmt, fs, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

pub const DEFAULT_GROK_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_GROK_MODEL: &str = "grok-3";
pub const ONE_HOUR_MS: i64 = 3_600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoastLevel {
    Mild,
    Medium,
    #[default]
    Fire,
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoastLevel::Mild => write!(f, "mild"),
            RoastLevel::Medium => write!(f, "medium"),
            RoastLevel::Fire => write!(f, "fire"),
        }
    }
}

impl FromStr for RoastLevel {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(RoastLevel::Mild),
            "medium" => Ok(RoastLevel::Medium),
            "fire" => Ok(RoastLevel::Fire),
            other => Err(OracleError::Config(format!("Unknown roast level: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub helius_api_key: Option<String>,
    /// QuickNode endpoint subdomain (`https://{key}.solana-mainnet.quiknode.pro/`).
    pub quicknode_endpoint: Option<String>,
    pub grok_api_key: Option<String>,
    pub grok_base_url: String,
    pub grok_model: String,
    pub openai_api_key: Option<String>,
    pub roast_level: RoastLevel,
    pub history_timeout_ms: u64,
    pub generation_timeout_ms: u64,
    pub sentiment_timeout_ms: u64,
    pub analysis_ttl_ms: i64,
    pub intro_history_cap: usize,
    pub intro_recent_window_ms: i64,
    pub max_intro_attempts: u32,
    pub exit_registration_ttl_ms: i64,
    pub synthetic_history: bool,
    pub intro_db_path: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            helius_api_key: None,
            quicknode_endpoint: None,
            grok_api_key: None,
            grok_base_url: DEFAULT_GROK_BASE_URL.to_string(),
            grok_model: DEFAULT_GROK_MODEL.to_string(),
            openai_api_key: None,
            roast_level: RoastLevel::Fire,
            history_timeout_ms: 5_000,
            generation_timeout_ms: 10_000,
            sentiment_timeout_ms: 5_000,
            analysis_ttl_ms: ONE_HOUR_MS,
            intro_history_cap: 5,
            intro_recent_window_ms: ONE_HOUR_MS,
            max_intro_attempts: 3,
            exit_registration_ttl_ms: 6 * ONE_HOUR_MS,
            synthetic_history: true,
            intro_db_path: "oracle_db".to_string(),
        }
    }
}

impl OracleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            helius_api_key: optional_var("HELIUS_API_KEY"),
            quicknode_endpoint: optional_var("QUICKNODE_API_KEY"),
            grok_api_key: optional_var("GROK_API_KEY"),
            grok_base_url: env::var("GROK_BASE_URL").unwrap_or(defaults.grok_base_url),
            grok_model: env::var("GROK_MODEL").unwrap_or(defaults.grok_model),
            openai_api_key: optional_var("OPENAI_API_KEY"),
            roast_level: parsed_var("ROAST_LEVEL", defaults.roast_level),
            history_timeout_ms: parsed_var("HISTORY_TIMEOUT_MS", defaults.history_timeout_ms),
            generation_timeout_ms: parsed_var(
                "GENERATION_TIMEOUT_MS",
                defaults.generation_timeout_ms,
            ),
            sentiment_timeout_ms: parsed_var("SENTIMENT_TIMEOUT_MS", defaults.sentiment_timeout_ms),
            analysis_ttl_ms: parsed_var("ANALYSIS_TTL_MS", defaults.analysis_ttl_ms),
            intro_history_cap: parsed_var("INTRO_HISTORY_CAP", defaults.intro_history_cap),
            intro_recent_window_ms: parsed_var(
                "INTRO_RECENT_WINDOW_MS",
                defaults.intro_recent_window_ms,
            ),
            max_intro_attempts: parsed_var("MAX_INTRO_ATTEMPTS", defaults.max_intro_attempts),
            exit_registration_ttl_ms: parsed_var(
                "EXIT_REGISTRATION_TTL_MS",
                defaults.exit_registration_ttl_ms,
            ),
            synthetic_history: parsed_var("SYNTHETIC_HISTORY", defaults.synthetic_history),
            intro_db_path: env::var("INTRO_DB_PATH").unwrap_or(defaults.intro_db_path),
        }
    }

    pub fn from_ron_file(path: &str) -> OracleResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| OracleError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> OracleResult<Self> {
        ron::de::from_str(contents)
            .map_err(|e| OracleError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn history_timeout(&self) -> Duration {
        Duration::from_millis(self.history_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    pub fn sentiment_timeout(&self) -> Duration {
        Duration::from_millis(self.sentiment_timeout_ms)
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring unparseable {}={:?}, using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}
