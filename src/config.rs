use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_DEPLOY_COMMAND: &str =
    "cd /opt/bitnami/projects/instancias && git pull && pm2 restart instancias";

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub webhook_secret: Option<String>,
    pub deploy_ref: String,
    pub deploy_command: String,
    pub metric_retries: u32,
    pub metric_retry_delay_ms: u64,
    pub metric_window_secs: i64,
    pub metric_concurrency: usize,
    pub mappings_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".to_string(),
            webhook_secret: None,
            deploy_ref: "refs/heads/main".to_string(),
            deploy_command: DEFAULT_DEPLOY_COMMAND.to_string(),
            metric_retries: 3,
            metric_retry_delay_ms: 1000,
            metric_window_secs: 300,
            metric_concurrency: 16,
            mappings_path: None,
        }
    }
}

impl Config {
    fn new() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Self {
            aws_region: get("AWS_REGION").unwrap_or(defaults.aws_region),
            webhook_secret: get("WEBHOOK_SECRET"),
            deploy_ref: get("DEPLOY_REF").unwrap_or(defaults.deploy_ref),
            deploy_command: get("DEPLOY_COMMAND").unwrap_or(defaults.deploy_command),
            metric_retries: parse_or(
                "METRIC_RETRIES",
                get("METRIC_RETRIES"),
                defaults.metric_retries,
            ),
            metric_retry_delay_ms: parse_or(
                "METRIC_RETRY_DELAY_MS",
                get("METRIC_RETRY_DELAY_MS"),
                defaults.metric_retry_delay_ms,
            ),
            metric_window_secs: parse_valid_or(
                "METRIC_WINDOW_SECS",
                get("METRIC_WINDOW_SECS"),
                defaults.metric_window_secs,
                |secs| *secs > 0,
            ),
            metric_concurrency: parse_or(
                "METRIC_CONCURRENCY",
                get("METRIC_CONCURRENCY"),
                defaults.metric_concurrency,
            )
            .max(1),
            mappings_path: get("SAILWATCH_MAPPINGS"),
        }
    }

    pub fn metric_retry_delay(&self) -> Duration {
        Duration::from_millis(self.metric_retry_delay_ms)
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    parse_valid_or(key, raw, default, |_| true)
}

/// Parse `raw`, falling back to `default` when it does not parse or fails `valid`.
fn parse_valid_or<T, F>(key: &str, raw: Option<String>, default: T, valid: F) -> T
where
    T: FromStr + Copy,
    F: Fn(&T) -> bool,
{
    let Some(value) = raw else {
        return default;
    };
    match value.trim().parse::<T>() {
        Ok(parsed) if valid(&parsed) => parsed,
        _ => {
            warn!("Ignoring invalid value {:?} for {}", value, key);
            default
        }
    }
}

// Global static CONFIG instance
pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);
