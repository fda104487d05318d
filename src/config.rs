use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
    /// Candidates loaded per requested match
    pub candidate_pool_factor: Option<usize>,
}

impl MatchingSettings {
    pub fn default_limit(&self) -> u16 {
        self.default_limit.unwrap_or(20)
    }

    pub fn max_limit(&self) -> u16 {
        self.max_limit.unwrap_or(100)
    }

    pub fn candidate_pool_factor(&self) -> usize {
        self.candidate_pool_factor.unwrap_or(5).max(1)
    }

    /// Rows to load from the store for a page of `limit` matches
    pub fn candidate_pool_size(&self, limit: usize) -> usize {
        limit.saturating_mul(self.candidate_pool_factor())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_traits_weight")]
    pub traits: f64,
    #[serde(default = "default_goals_weight")]
    pub goals: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            traits: default_traits_weight(),
            goals: default_goals_weight(),
            location: default_location_weight(),
            age: default_age_weight(),
            lifestyle: default_lifestyle_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            interests: config.interests,
            traits: config.traits,
            goals: config.goals,
            location: config.location,
            age: config.age,
            lifestyle: config.lifestyle,
        }
    }
}

fn default_interests_weight() -> f64 { 0.25 }
fn default_traits_weight() -> f64 { 0.20 }
fn default_goals_weight() -> f64 { 0.20 }
fn default_location_weight() -> f64 { 0.15 }
fn default_age_weight() -> f64 { 0.10 }
fn default_lifestyle_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CHARMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CHARMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CHARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CHARMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Apply the conventional `DATABASE_URL` / `REDIS_URL` variables on top of
/// whatever the files and prefixed variables produced
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.interests, 0.25);
        assert_eq!(weights.traits, 0.20);
        assert_eq!(weights.goals, 0.20);
        assert_eq!(weights.location, 0.15);
        assert_eq!(weights.age, 0.10);
        assert_eq!(weights.lifestyle, 0.10);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_matching_defaults() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_limit(), 20);
        assert_eq!(matching.max_limit(), 100);
        assert_eq!(matching.candidate_pool_factor(), 5);
    }

    #[test]
    fn test_candidate_pool_size_saturates() {
        let matching = MatchingSettings {
            candidate_pool_factor: Some(usize::MAX),
            ..MatchingSettings::default()
        };
        assert_eq!(matching.candidate_pool_size(20), usize::MAX);
        assert_eq!(MatchingSettings::default().candidate_pool_size(20), 100);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/test"

            [cache]
            redis_url = "redis://localhost"

            [scoring.weights]
            interests = 0.30
            lifestyle = 0.05
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.scoring.weights.interests, 0.30);
        assert_eq!(settings.scoring.weights.traits, 0.20);
        assert!(settings.scoring_weights().validate().is_ok());
        assert_eq!(settings.logging.format, "json");
    }
}
