//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through the environment,
//! which is how provider credentials are normally injected.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BIND_ADDRESS, DEFAULT_USER_AGENT, MEMORY_CACHE_CAPACITY,
    MEMORY_CACHE_TTL_SECS, NOMINATIM_REVERSE_URL, NOMINATIM_SEARCH_URL, PROVIDER_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Response language requested from providers that localise their output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl Language {
    /// ISO 639-1 code, as sent in `accept-language`/`lang` parameters.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// BCP 47 tag for providers that expect a region (HERE).
    pub fn locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-ES",
        }
    }
}

/// Provider credentials and endpoints.
///
/// A provider whose configuration is incomplete (missing key, unparsable URL)
/// is left out of the registry entirely.
#[derive(Debug, Clone, Args)]
pub struct ProvidersConfig {
    /// User-Agent sent to Nominatim instances
    #[arg(long, env = "NOMINATIM_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub nominatim_user_agent: String,

    /// Primary Nominatim search endpoint
    #[arg(long, env = "NOMINATIM_GEOCODER_URL", default_value = NOMINATIM_SEARCH_URL)]
    pub nominatim_geocoder_url: String,

    /// Primary Nominatim reverse endpoint
    #[arg(long, env = "NOMINATIM_REVERSER_URL", default_value = NOMINATIM_REVERSE_URL)]
    pub nominatim_reverser_url: String,

    /// Additional Nominatim search endpoints, tried after the primary
    #[arg(long, env = "NOMINATIM_GEOCODER_REPLICA_URLS", value_delimiter = ',')]
    pub nominatim_geocoder_replicas: Vec<String>,

    /// Additional Nominatim reverse endpoints, tried after the primary
    #[arg(long, env = "NOMINATIM_REVERSER_REPLICA_URLS", value_delimiter = ',')]
    pub nominatim_reverser_replicas: Vec<String>,

    /// Geoapify API key (enables the GEOAPIFY reverse geocoder)
    #[arg(long, env = "GEOAPIFY_API_KEY")]
    pub geoapify_api_key: Option<String>,

    /// HERE API key (enables the HERE reverse geocoder)
    #[arg(long, env = "HERE_API_KEY")]
    pub here_api_key: Option<String>,

    /// Language requested from providers
    #[arg(long, env = "GEOCODER_LANGUAGE", value_enum, default_value_t = Language::En)]
    pub language: Language,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            nominatim_user_agent: DEFAULT_USER_AGENT.to_string(),
            nominatim_geocoder_url: NOMINATIM_SEARCH_URL.to_string(),
            nominatim_reverser_url: NOMINATIM_REVERSE_URL.to_string(),
            nominatim_geocoder_replicas: Vec::new(),
            nominatim_reverser_replicas: Vec::new(),
            geoapify_api_key: None,
            here_api_key: None,
            language: Language::En,
        }
    }
}

/// Service configuration.
///
/// Parsed from the command line (and environment) by the binary, or built
/// programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use geo_gateway::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/geo_gateway/cache.db"),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geo_gateway",
    version,
    about = "Geocoding gateway with provider failover and two-tier response caching"
)]
pub struct Config {
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Address the HTTP server listens on
    #[arg(long, env = "GEO_GATEWAY_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: SocketAddr,

    /// Database path (SQLite file backing the durable cache tier)
    #[arg(long, env = "SQLITE_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Maximum number of entries kept in the in-memory cache tier
    #[arg(long, default_value_t = MEMORY_CACHE_CAPACITY)]
    pub memory_cache_capacity: u64,

    /// Time-to-live of in-memory cache entries, in seconds
    #[arg(long, default_value_t = MEMORY_CACHE_TTL_SECS)]
    pub memory_cache_ttl_secs: u64,

    /// Per-provider request timeout in seconds
    #[arg(long, default_value_t = PROVIDER_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    #[command(flatten)]
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            bind: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000))),
            db_path: PathBuf::from(DB_PATH),
            memory_cache_capacity: MEMORY_CACHE_CAPACITY,
            memory_cache_ttl_secs: MEMORY_CACHE_TTL_SECS,
            timeout_seconds: PROVIDER_TIMEOUT_SECS,
            providers: ProvidersConfig::default(),
        }
    }
}
