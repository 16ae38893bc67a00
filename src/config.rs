//! Application configuration.
//!
//! Loaded from `--config` or the platform config dir; every field has a
//! default so an empty file and no file behave identically.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::anim::effects::particles::{CircuitParams, FloatParams, RainParams};
use crate::anim::effects::{EffectFamily, GlitchIntensity};
use crate::anim::state::ReplayPolicy;
use crate::services::mail_relay::RelayConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared clock period in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default)]
    pub scroll: ScrollConfig,

    #[serde(default)]
    pub effects: EffectsConfig,

    #[serde(default)]
    pub boot: BootConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    /// Extra decorative elements, parsed one by one so a malformed entry is
    /// skipped without taking the rest of the page down.
    #[serde(default)]
    pub decor: Vec<serde_json::Value>,
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            scroll: ScrollConfig::default(),
            effects: EffectsConfig::default(),
            boot: BootConfig::default(),
            relay: RelayConfig::default(),
            decor: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Easing factor per tick toward the scroll target.
    #[serde(default = "default_scroll_speed")]
    pub speed: f64,

    /// Rows per arrow-key step.
    #[serde(default = "default_scroll_step")]
    pub step: i32,
}

fn default_scroll_speed() -> f64 {
    0.3
}

fn default_scroll_step() -> i32 {
    3
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed: default_scroll_speed(),
            step: default_scroll_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Base seed for all per-element random streams. Fixed by default so a
    /// given build of the page always animates the same way.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Fraction of a section that must be on screen to trigger its reveal.
    #[serde(default = "default_section_threshold")]
    pub section_threshold: f32,

    #[serde(default = "default_reveal_ticks")]
    pub reveal_ticks: u64,

    #[serde(default = "default_reveal_exit_ticks")]
    pub reveal_exit_ticks: u64,

    #[serde(default)]
    pub reveal_policy: ReplayPolicy,

    #[serde(default = "default_glitch_intensity")]
    pub glitch_intensity: GlitchIntensity,

    #[serde(default)]
    pub rain: RainParams,

    #[serde(default)]
    pub float: FloatParams,

    #[serde(default)]
    pub circuit: CircuitParams,

    #[serde(default = "default_parallax_magnitude")]
    pub parallax_magnitude: f32,
}

fn default_seed() -> u64 {
    0x5eed_f011
}

fn default_section_threshold() -> f32 {
    0.2
}

fn default_reveal_ticks() -> u64 {
    10
}

fn default_reveal_exit_ticks() -> u64 {
    6
}

fn default_glitch_intensity() -> GlitchIntensity {
    GlitchIntensity::Medium
}

fn default_parallax_magnitude() -> f32 {
    2.0
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            section_threshold: default_section_threshold(),
            reveal_ticks: default_reveal_ticks(),
            reveal_exit_ticks: default_reveal_exit_ticks(),
            reveal_policy: ReplayPolicy::Replay,
            glitch_intensity: default_glitch_intensity(),
            rain: RainParams::default(),
            float: FloatParams::default(),
            circuit: CircuitParams::default(),
            parallax_magnitude: default_parallax_magnitude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootConfig {
    /// Ticks the boot gauge runs before completing.
    #[serde(default = "default_boot_hold")]
    pub hold_ticks: u64,

    /// Skip the boot sequence entirely.
    #[serde(default)]
    pub skip: bool,
}

fn default_boot_hold() -> u64 {
    40
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            hold_ticks: default_boot_hold(),
            skip: false,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location, or defaults when
    /// no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termfolio").join("config.json"))
    }

    pub fn dump_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing config")
    }

    /// Parse the extra decor entries. A malformed entry (unknown family tag,
    /// bad field types) is logged and skipped; it never affects its siblings.
    pub fn parse_decor(&self) -> Vec<EffectFamily> {
        self.decor
            .iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value.clone()) {
                Ok(family) => Some(family),
                Err(err) => {
                    tracing::warn!("skipping decor element {}: {}", i, err);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.effects.reveal_ticks, 10);
        assert!(!config.relay.is_configured());
    }

    #[test]
    fn test_dump_roundtrips() {
        let config = Config::default();
        let json = config.dump_json().unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tick_ms, config.tick_ms);
    }

    #[test]
    fn test_bad_decor_entry_is_skipped_not_fatal() {
        let config: Config = serde_json::from_str(
            r#"{
                "decor": [
                    {"family": "parallax", "direction": "down", "magnitude": 4.0},
                    {"family": "plasma-storm"},
                    {"family": "glitch", "text": "EXTRA"}
                ]
            }"#,
        )
        .unwrap();
        let parsed = config.parse_decor();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name(), "parallax");
        assert_eq!(parsed[1].name(), "glitch");
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Config::load(Some(&missing)).is_err(), "explicit path must exist");
        // No explicit path and no default file: defaults.
        let config = Config::load(None).unwrap();
        assert_eq!(config.tick_ms, 50);
    }
}
