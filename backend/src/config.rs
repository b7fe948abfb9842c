//! Runtime configuration, read once from the environment at startup.
//!
//! | Variable            | Default     |
//! |---------------------|-------------|
//! | `BLOG_HOST`         | `127.0.0.1` |
//! | `BLOG_PORT`         | `8080`      |
//! | `BLOG_DATABASE`     | `blog.db`   |
//! | `BLOG_OPEN_BROWSER` | `true`      |
//! | `BLOG_JSON_LIMIT`   | 10 MB       |

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE: &str = "blog.db";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file; created with its schema on first start.
    pub database: PathBuf,
    pub open_browser: bool,
    /// Upper bound for JSON request bodies, in bytes.
    pub json_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            open_browser: true,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Self {
            host: lookup("BLOG_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "BLOG_PORT")?.unwrap_or(defaults.port),
            database: lookup("BLOG_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            open_browser: match lookup("BLOG_OPEN_BROWSER") {
                Some(raw) => parse_flag("BLOG_OPEN_BROWSER", &raw)?,
                None => defaults.open_browser,
            },
            json_limit: parse_var(&lookup, "BLOG_JSON_LIMIT")?.unwrap_or(defaults.json_limit),
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(None),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
}
