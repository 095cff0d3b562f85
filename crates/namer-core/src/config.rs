use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

const DEFAULT_COMMAND_PREFIX: &str = "/namer";
const DEFAULT_MESSAGE_LIMIT: usize = 4000;
const DEFAULT_GLOBAL_MIN_INTERVAL_MS: u64 = 40;
const DEFAULT_ROOM_MIN_INTERVAL_MS: u64 = 1050;

/// Typed configuration for the namer plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Every command starts with this (e.g. `/namer-peek`).
    pub command_prefix: String,
    /// Render peeks from the bonus array instead of the base.
    pub use_bonus: bool,

    // Outbound limits
    pub message_limit: usize,
    pub global_min_interval: Duration,
    pub room_min_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            use_bonus: false,
            message_limit: DEFAULT_MESSAGE_LIMIT,
            global_min_interval: Duration::from_millis(DEFAULT_GLOBAL_MIN_INTERVAL_MS),
            room_min_interval: Duration::from_millis(DEFAULT_ROOM_MIN_INTERVAL_MS),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let command_prefix = lookup("NAMER_COMMAND_PREFIX")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
        if !command_prefix.starts_with('/') {
            return Err(Error::Config(format!(
                "NAMER_COMMAND_PREFIX must start with '/': {command_prefix}"
            )));
        }

        let use_bonus = lookup("NAMER_USE_BONUS")
            .map(|s| parse_bool(&s))
            .unwrap_or(false);

        let message_limit = lookup("NAMER_MESSAGE_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MESSAGE_LIMIT);
        if message_limit == 0 {
            return Err(Error::Config(
                "NAMER_MESSAGE_LIMIT must be greater than zero".to_string(),
            ));
        }

        let global_min_interval = Duration::from_millis(
            lookup("NAMER_GLOBAL_MIN_INTERVAL_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_GLOBAL_MIN_INTERVAL_MS),
        );
        let room_min_interval = Duration::from_millis(
            lookup("NAMER_ROOM_MIN_INTERVAL_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_ROOM_MIN_INTERVAL_MS),
        );

        Ok(Self {
            command_prefix,
            use_bonus,
            message_limit,
            global_min_interval,
            room_min_interval,
        })
    }
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

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage_numbers() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("NAMER_COMMAND_PREFIX", " /nr "),
            ("NAMER_USE_BONUS", "yes"),
            ("NAMER_MESSAGE_LIMIT", "500"),
            ("NAMER_ROOM_MIN_INTERVAL_MS", "not-a-number"),
        ]))
        .unwrap();
        assert_eq!(cfg.command_prefix, "/nr");
        assert!(cfg.use_bonus);
        assert_eq!(cfg.message_limit, 500);
        assert_eq!(cfg.room_min_interval, Duration::from_millis(1050));
    }

    #[test]
    fn rejects_bad_prefix_and_zero_limit() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("NAMER_COMMAND_PREFIX", "namer")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("NAMER_MESSAGE_LIMIT", "0")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn dotenv_parsing_skips_comments_and_strips_quotes() {
        let parsed = parse_dotenv("# comment\nA=1\nB = \"two words\"\n=x\nC='3'\nnoeq\n");
        assert_eq!(
            parsed,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two words".to_string()),
                ("C".to_string(), "3".to_string()),
            ]
        );
    }
}
