// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the Chirpy service.
//!
//! Every field carries a serde default so a partial configuration (or none
//! at all) still produces a runnable service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hard ceiling on chirp length in characters. Configuration may lower the
/// limit but never raise it past this.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Configuration for the Chirpy service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Persistence configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Static asset configuration
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Chirp validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (default: sqlite://chirpy.db)
    #[serde(default = "default_database_url")]
    pub url: String,
}

/// Static asset serving under `/app`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory served under `/app` (default: static)
    #[serde(default = "default_assets_root")]
    pub root: PathBuf,
}

/// Validation rules applied to chirp bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum body length in characters (default: 140)
    #[serde(default = "default_max_chirp_length")]
    pub max_chirp_length: usize,

    /// Words masked when they appear as a whole token
    #[serde(default = "default_banned_words")]
    pub banned_words: Vec<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://chirpy.db".to_string()
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_max_chirp_length() -> usize {
    MAX_CHIRP_LENGTH
}

fn default_banned_words() -> Vec<String> {
    vec![
        "kerfuffle".to_string(),
        "sharbert".to_string(),
        "fornax".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database: DatabaseConfig::default(),
            assets: AssetsConfig::default(),
            validation: ValidationConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_chirp_length: default_max_chirp_length(),
            banned_words: default_banned_words(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl Config {
    /// Build a configuration from environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    ///
    /// - `BIND_ADDR`
    /// - `DATABASE_URL`
    /// - `FILESERVER_ROOT`
    /// - `MAX_CHIRP_LENGTH`
    /// - `BANNED_WORDS` (comma-separated)
    /// - `METRICS_ENABLED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or(defaults.database.url),
            },
            assets: AssetsConfig {
                root: lookup("FILESERVER_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.assets.root),
            },
            validation: ValidationConfig {
                max_chirp_length: lookup("MAX_CHIRP_LENGTH")
                    .and_then(|v| v.parse().ok())
                    .filter(|n| *n <= MAX_CHIRP_LENGTH)
                    .unwrap_or(defaults.validation.max_chirp_length),
                banned_words: lookup("BANNED_WORDS")
                    .map(|v| parse_word_list(&v))
                    .unwrap_or(defaults.validation.banned_words),
            },
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.metrics.enabled),
                ..defaults.metrics
            },
        }
    }
}

fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
