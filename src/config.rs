//! Library configuration loading from environment variables.
//!
//! Embedders that run inside a managed shell (mobile bridge, test
//! harness) can use [`GovernanceConfig::default`] instead; `from_env`
//! exists for server-side previews and CI.
//!
//! # Environment Variables
//! - `THROTTLE_WINDOW_MINUTES`: sliding-window length for the submission
//!   throttle (default: 10)
//! - `THROTTLE_MAX_PER_KIND`: accepted submissions per kind inside the
//!   window (default: 5)
//! - `EXTRA_BLOCKED_KEYWORDS`: comma-separated keywords appended to the
//!   built-in screening list (default: empty)

use serde::Deserialize;

/// Tunable knobs for the governance pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct GovernanceConfig {
    /// Sliding-window length for the submission throttle, in minutes
    pub throttle_window_minutes: i64,

    /// Accepted submissions per kind inside one window
    pub throttle_max_per_kind: usize,

    /// Keywords appended to the built-in screening list
    pub extra_blocked_keywords: Vec<String>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            throttle_window_minutes: 10,
            throttle_max_per_kind: 5,
            extra_blocked_keywords: vec![],
        }
    }
}

impl GovernanceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the
    /// expected type. Unset variables fall back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            throttle_window_minutes: env_or("THROTTLE_WINDOW_MINUTES", 10)?,
            throttle_max_per_kind: env_or("THROTTLE_MAX_PER_KIND", 5)?,
            extra_blocked_keywords: std::env::var("EXTRA_BLOCKED_KEYWORDS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_lowercase)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
