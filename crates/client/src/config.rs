//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rapsim_runtime::SessionConfig;

/// Configuration required to bootstrap a session and the terminal loop.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_id: String,
    pub save_slot: u32,
    /// Seed for a new career; `None` picks one from the clock.
    pub seed: Option<u64>,
    pub save_dir: PathBuf,
    pub auto_save: bool,
    pub auto_save_interval: Duration,
    /// Directory with `config.toml`, `events.ron`, and `rappers.ron`.
    pub content_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            save_slot: 0,
            seed: None,
            save_dir: SessionConfig::default_save_dir(),
            auto_save: true,
            auto_save_interval: Duration::from_secs(60),
            content_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAPSIM_USER` - Save owner (default: local)
    /// - `RAPSIM_SLOT` - Save slot (default: 0)
    /// - `RAPSIM_SEED` - Seed for a new career (default: clock)
    /// - `RAPSIM_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `RAPSIM_AUTOSAVE` - Enable periodic auto-save (default: true)
    /// - `RAPSIM_AUTOSAVE_SECS` - Auto-save interval in seconds (default: 60)
    /// - `RAPSIM_CONTENT_DIR` - Content directory (default: bundled data)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();

        if let Some(user) = read("RAPSIM_USER") {
            config.user_id = user;
        }
        if let Some(slot) = read("RAPSIM_SLOT").and_then(|value| parse_value::<u32>(&value)) {
            config.save_slot = slot;
        }
        config.seed = read("RAPSIM_SEED").and_then(|value| parse_value::<u64>(&value));
        if let Some(dir) = read("RAPSIM_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(enabled) = read("RAPSIM_AUTOSAVE").and_then(|value| parse_flag(&value)) {
            config.auto_save = enabled;
        }
        if let Some(secs) =
            read("RAPSIM_AUTOSAVE_SECS").and_then(|value| parse_value::<u64>(&value))
        {
            config.auto_save_interval = Duration::from_secs(secs.max(1));
        }
        config.content_dir = read("RAPSIM_CONTENT_DIR").map(PathBuf::from);

        config
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            auto_save_enabled: self.auto_save,
            auto_save_interval: self.auto_save_interval,
            user_id: self.user_id.clone(),
            save_slot: self.save_slot,
            save_dir: self.save_dir.clone(),
            ..SessionConfig::default()
        }
    }

    /// Local snapshot directory used when the primary save fails.
    pub fn fallback_dir(&self) -> PathBuf {
        self.save_dir.join("local")
    }
}

fn parse_value<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    value.trim().parse().ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.user_id, "local");
        assert_eq!(config.save_slot, 0);
        assert_eq!(config.seed, None);
        assert!(config.auto_save);
        assert_eq!(config.auto_save_interval, Duration::from_secs(60));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("RAPSIM_USER", "ada"),
            ("RAPSIM_SLOT", "3"),
            ("RAPSIM_SEED", "42"),
            ("RAPSIM_SAVE_DIR", "/tmp/rapsim"),
            ("RAPSIM_AUTOSAVE", "off"),
            ("RAPSIM_AUTOSAVE_SECS", "0"),
            ("RAPSIM_CONTENT_DIR", "/opt/content"),
        ]);
        assert_eq!(config.user_id, "ada");
        assert_eq!(config.save_slot, 3);
        assert_eq!(config.seed, Some(42));
        assert!(!config.auto_save);
        assert_eq!(config.auto_save_interval, Duration::from_secs(1));
        assert_eq!(config.content_dir, Some(PathBuf::from("/opt/content")));

        let session = config.session_config();
        assert_eq!(session.save_key().to_string(), "ada/slot_3");
        assert_eq!(config.fallback_dir(), PathBuf::from("/tmp/rapsim/local"));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = config_from(&[("RAPSIM_SLOT", "first"), ("RAPSIM_AUTOSAVE", "maybe")]);
        assert_eq!(config.save_slot, 0);
        assert!(config.auto_save);
    }
}
