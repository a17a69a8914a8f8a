use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::ThemeKind;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

/// Longest delay any simulated step may take. The timer wheel rejects
/// deadlines far in the future.
pub const MAX_DELAY_MS: u64 = 60 * 60 * 1000;

const DEFAULT_REPLIES: [&str; 5] = [
    "That sounds good!",
    "Sure, I'm available tomorrow.",
    "Haha, that's funny!",
    "Let me think about that and get back to you.",
    "Interesting! Tell me more about it.",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Explicit theme choice; `None` follows the system scheme.
    #[serde(default)]
    pub theme: Option<ThemeKind>,
    #[serde(default)]
    pub system_dark: bool,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: None,
            system_dark: false,
            simulation: SimulationConfig::default(),
        }
    }
}

/// Timings and reply behaviour of the simulated peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub deliver_after_ms: u64,
    pub read_after_ms: u64,
    pub typing_after_ms: u64,
    pub reply_after_ms: u64,
    /// Chance in `[0, 1]` that the peer answers a read message.
    pub reply_probability: f64,
    pub replies: Vec<String>,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            deliver_after_ms: 500,
            read_after_ms: 1000,
            typing_after_ms: 1000,
            reply_after_ms: 2000,
            reply_probability: 0.7,
            replies: DEFAULT_REPLIES.iter().map(|reply| reply.to_string()).collect(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn deliver_after(&self) -> Duration {
        capped(self.deliver_after_ms)
    }

    pub fn read_after(&self) -> Duration {
        capped(self.read_after_ms)
    }

    pub fn typing_after(&self) -> Duration {
        capped(self.typing_after_ms)
    }

    pub fn reply_after(&self) -> Duration {
        capped(self.reply_after_ms)
    }

    /// Probability clamped into the range `rand` accepts.
    pub fn reply_chance(&self) -> f64 {
        if self.reply_probability.is_nan() {
            return 0.0;
        }
        self.reply_probability.clamp(0.0, 1.0)
    }
}

fn capped(ms: u64) -> Duration {
    Duration::from_millis(ms.min(MAX_DELAY_MS))
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

/// Stores the theme choice, keeping every other field of the file as is.
pub fn persist_theme(path: &str, theme: ThemeKind) {
    let mut config = load_config(path);
    config.theme = Some(theme);

    if let Err(err) = save_config(path, &config) {
        log::error!("Failed to write config {}: {err}", path);
    } else {
        log::info!("Persisted theme {:?} to {}", theme, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(path.to_str().unwrap());

        assert_eq!(config.theme, None);
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.simulation.deliver_after_ms, 500);
    }

    #[test]
    fn partial_simulation_section_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "simulation": { "reply_probability": 1.0 } }"#).unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.simulation.reply_probability, 1.0);
        assert_eq!(config.simulation.read_after_ms, 1000);
        assert_eq!(config.simulation.replies.len(), 5);
    }

    #[test]
    fn theme_round_trips_through_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.json");
        let path = path.to_str().unwrap();

        persist_theme(path, ThemeKind::Neon);
        assert_eq!(load_config(path).theme, Some(ThemeKind::Neon));

        persist_theme(path, ThemeKind::Retro);
        assert_eq!(load_config(path).theme, Some(ThemeKind::Retro));
    }

    #[test]
    fn delays_are_capped() {
        let simulation = SimulationConfig {
            deliver_after_ms: u64::MAX,
            read_after_ms: MAX_DELAY_MS + 1,
            typing_after_ms: 0,
            ..SimulationConfig::default()
        };
        let cap = Duration::from_millis(MAX_DELAY_MS);

        assert_eq!(simulation.deliver_after(), cap);
        assert_eq!(simulation.read_after(), cap);
        assert_eq!(simulation.typing_after(), Duration::ZERO);
        assert_eq!(simulation.reply_after(), Duration::from_millis(2000));
    }

    #[test]
    fn reply_chance_is_clamped() {
        let mut simulation = SimulationConfig::default();
        simulation.reply_probability = 3.0;
        assert_eq!(simulation.reply_chance(), 1.0);
        simulation.reply_probability = -1.0;
        assert_eq!(simulation.reply_chance(), 0.0);
        simulation.reply_probability = f64::NAN;
        assert_eq!(simulation.reply_chance(), 0.0);
    }
}
