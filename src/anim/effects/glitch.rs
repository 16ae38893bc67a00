//! Glitch text: bounded-probability character substitution that reverts
//! after a fixed number of ticks.
//!
//! Time is divided into windows; each window independently rolls whether it
//! carries a burst. During a burst's first `duration_ticks` the text shows a
//! fixed set of substituted characters, then reverts. Everything derives from
//! (seed, window), so a burst looks the same however often it is recomputed.

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anim::effects::EffectCtx;
use crate::anim::params::{Content, Offset, RenderParams};
use crate::anim::rng::EffectRng;
use crate::anim::state::AnimState;

static GLITCH_CHARS: Lazy<Vec<char>> = Lazy::new(|| {
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-={}[]|;:,.<>?/"
        .chars()
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlitchIntensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlitchConfig {
    /// The untouched source text.
    pub text: String,

    /// Chance that any given window carries a burst.
    #[serde(default = "default_probability")]
    pub probability: f32,

    /// Upper bound on simultaneously substituted characters.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Ticks a burst's substitution stays on screen before reverting.
    #[serde(default = "default_duration")]
    pub duration_ticks: u64,

    /// Window length in ticks.
    #[serde(default = "default_window")]
    pub window_ticks: u64,
}

fn default_probability() -> f32 {
    0.05
}

fn default_max_chars() -> usize {
    3
}

fn default_duration() -> u64 {
    2
}

fn default_window() -> u64 {
    4
}

impl GlitchConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            probability: default_probability(),
            max_chars: default_max_chars(),
            duration_ticks: default_duration(),
            window_ticks: default_window(),
        }
    }

    /// Presets matching the low/medium/high intensities of the page design.
    pub fn with_intensity(text: impl Into<String>, intensity: GlitchIntensity) -> Self {
        let (probability, max_chars, duration_ticks, window_ticks) = match intensity {
            GlitchIntensity::Low => (0.03, 2, 1, 6),
            GlitchIntensity::Medium => (0.05, 3, 2, 4),
            GlitchIntensity::High => (0.1, 5, 3, 3),
        };
        Self {
            text: text.into(),
            probability,
            max_chars,
            duration_ticks,
            window_ticks,
        }
    }

    /// The text as shown at `tick`: either the source or a burst variant.
    pub fn text_at(&self, tick: u64, rng: &EffectRng) -> String {
        let window_ticks = self.window_ticks.max(1);
        let window = tick / window_ticks;
        let mut roll = rng.at_tick(window.wrapping_mul(131).wrapping_add(7));

        let burst = roll.random::<f32>() < self.probability;
        let showing = tick % window_ticks < self.duration_ticks;
        if !burst || !showing || self.max_chars == 0 {
            return self.text.clone();
        }

        let mut chars: Vec<char> = self.text.chars().collect();
        let glitchable: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .collect();
        if glitchable.is_empty() {
            return self.text.clone();
        }

        let count = roll.random_range(1..=self.max_chars).min(glitchable.len());
        let mut picked = std::collections::BTreeSet::new();
        while picked.len() < count {
            picked.insert(glitchable[roll.random_range(0..glitchable.len())]);
        }
        for pos in picked {
            chars[pos] = GLITCH_CHARS[roll.random_range(0..GLITCH_CHARS.len())];
        }
        chars.into_iter().collect()
    }
}

pub fn render(cfg: &GlitchConfig, ctx: &EffectCtx, rng: &EffectRng) -> RenderParams {
    if ctx.state == AnimState::Idle {
        return RenderParams {
            opacity: 0.0,
            offset: Offset::default(),
            content: Content::Text(cfg.text.clone()),
        };
    }
    RenderParams {
        opacity: 1.0,
        offset: Offset::default(),
        content: Content::Text(cfg.text_at(ctx.tick, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_probability_never_alters_text() {
        let cfg = GlitchConfig {
            probability: 0.0,
            ..GlitchConfig::new("SKILLS // EXPERTISE")
        };
        let rng = EffectRng::new(99);
        for tick in 0..10_000 {
            assert_eq!(cfg.text_at(tick, &rng), "SKILLS // EXPERTISE");
        }
    }

    #[test]
    fn test_whitespace_is_never_substituted() {
        let cfg = GlitchConfig {
            probability: 1.0,
            max_chars: 5,
            duration_ticks: 4,
            window_ticks: 4,
            ..GlitchConfig::new("a b c d e")
        };
        let rng = EffectRng::new(5);
        for tick in 0..500 {
            let shown = cfg.text_at(tick, &rng);
            for (orig, got) in "a b c d e".chars().zip(shown.chars()) {
                if orig == ' ' {
                    assert_eq!(got, ' ');
                }
            }
        }
    }

    #[test]
    fn test_burst_reverts_after_duration() {
        let cfg = GlitchConfig {
            probability: 1.0,
            max_chars: 3,
            duration_ticks: 2,
            window_ticks: 6,
            ..GlitchConfig::new("abcdef")
        };
        let rng = EffectRng::new(5);
        // Ticks 2..6 of every window are past the burst duration.
        for window in 0..50u64 {
            for offset in 2..6 {
                assert_eq!(cfg.text_at(window * 6 + offset, &rng), "abcdef");
            }
        }
    }

    #[test]
    fn test_substitution_preserves_length() {
        let cfg = GlitchConfig {
            probability: 1.0,
            ..GlitchConfig::new("PROJECT ARCHIVE")
        };
        let rng = EffectRng::new(17);
        for tick in 0..500 {
            assert_eq!(cfg.text_at(tick, &rng).chars().count(), 15);
        }
    }

    #[test]
    fn test_same_tick_same_output() {
        let cfg = GlitchConfig {
            probability: 1.0,
            ..GlitchConfig::new("deterministic")
        };
        let rng = EffectRng::new(23);
        for tick in 0..200 {
            assert_eq!(cfg.text_at(tick, &rng), cfg.text_at(tick, &rng));
        }
    }
}
