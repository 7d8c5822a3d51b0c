//! Storefront configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::channel::DEFAULT_CHANNEL_URL;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront shell configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the catalog, fill a cart and send the order", long_about = None)]
pub struct StorefrontConfig {
    /// Catalog YAML file; the bundled catalog is used when omitted.
    #[arg(short, long, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Base deep link orders are sent through; the message goes in its `text` parameter.
    #[arg(long, env = "STOREFRONT_CHANNEL_URL", default_value = DEFAULT_CHANNEL_URL)]
    pub channel_url: String,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
