use std::{env, fs, path::Path, path::PathBuf};

use crate::{domain::ChannelId, errors::Error, Result};

/// Typed configuration, read from the environment (and an optional `.env`).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub log_ansi: bool,

    /// JSON array of channels used to seed in-memory services.
    pub seed_file: Option<PathBuf>,
    pub default_channel: Option<ChannelId>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_ansi: true,
            seed_file: None,
            default_channel: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    /// Builds a config from an arbitrary key lookup instead of the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_filter = lookup("RESTCHAN_LOG")
            .and_then(non_empty)
            .unwrap_or(defaults.log_filter);
        let log_ansi = match lookup("RESTCHAN_LOG_ANSI").and_then(non_empty) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!("RESTCHAN_LOG_ANSI is not a boolean: {raw}"))
            })?,
            None => defaults.log_ansi,
        };

        let seed_file = lookup("RESTCHAN_SEED_FILE")
            .and_then(non_empty)
            .map(PathBuf::from);

        let default_channel = match lookup("RESTCHAN_DEFAULT_CHANNEL").and_then(non_empty) {
            Some(raw) => Some(raw.parse::<ChannelId>().map_err(|e| {
                Error::Config(format!("RESTCHAN_DEFAULT_CHANNEL is not a snowflake ({raw}): {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            log_filter,
            log_ansi,
            seed_file,
            default_channel,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
