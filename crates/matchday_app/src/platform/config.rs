use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use matchday_core::{Match, Player};
use matchday_engine::{MemoryStoreSettings, PipelineSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "matchday.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_destination: LogDestination,
    pub verbose: bool,
    /// Simulated store round-trip time in milliseconds.
    pub latency_ms: u64,
    pub cancel_superseded: bool,
    /// Matches the in-memory store starts with.
    pub fixtures: Vec<Match>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_destination: LogDestination::default(),
            verbose: false,
            latency_ms: 300,
            cancel_superseded: PipelineSettings::default().cancel_superseded,
            fixtures: default_fixtures(),
        }
    }
}

impl AppConfig {
    pub fn store_settings(&self) -> MemoryStoreSettings {
        MemoryStoreSettings {
            latency: Duration::from_millis(self.latency_ms),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            cancel_superseded: self.cancel_superseded,
            ..PipelineSettings::default()
        }
    }
}

/// Loads the configuration at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {:?}", path));
        }
    };

    ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))
}

fn default_fixtures() -> Vec<Match> {
    vec![
        Match::new("m1")
            .with_players(
                vec![Player::new("alice", "Alice"), Player::new("bob", "Bob")],
                vec![Player::new("carol", "Carol"), Player::new("dave", "Dave")],
            )
            .with_score(3, 2),
        Match::new("m2")
            .with_players(
                vec![Player::new("erin", "Erin")],
                vec![Player::new("frank", "Frank")],
            )
            .with_score(1, 1),
    ]
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{load, AppConfig, LogDestination, CONFIG_FILENAME};

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join(CONFIG_FILENAME)).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.fixtures.len(), 2);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                log_destination: Terminal,
                latency_ms: 0,
                fixtures: [
                    (id: "x1", home_players: [(id: "p1", name: "Ann")], home_goals: 2),
                ],
            )"#,
        )
        .unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.latency_ms, 0);
        assert!(config.cancel_superseded);
        assert_eq!(config.fixtures.len(), 1);
        assert_eq!(config.fixtures[0].home_players[0].name, "Ann");
        assert_eq!(config.fixtures[0].home_goals, 2);
        assert!(config.fixtures[0].away_players.is_empty());
        assert!(config.store_settings().latency.is_zero());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(latency_ms: \"soon\")").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn pipeline_settings_follow_config() {
        let config = AppConfig {
            cancel_superseded: false,
            ..AppConfig::default()
        };

        assert!(!config.pipeline_settings().cancel_superseded);
    }
}
