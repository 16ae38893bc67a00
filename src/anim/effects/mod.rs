//! Effect generators: pure per-tick parameter functions, one per family.
//!
//! Every generator is a total function of `(tick, state, config, seeded rng)`
//! with no wall-clock reads, so an identical tick sequence always reproduces
//! an identical visual sequence.

pub mod glitch;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod typer;

use serde::{Deserialize, Serialize};

use crate::anim::params::RenderParams;
use crate::anim::rng::EffectRng;
use crate::anim::state::{AnimState, ReplayPolicy};
use crate::clock::Tick;

pub use glitch::{GlitchConfig, GlitchIntensity};
pub use parallax::{Direction, ParallaxConfig};
pub use particles::{ParticleConfig, ParticleKind};
pub use reveal::{RevealConfig, RevealKind};
pub use typer::TypeConfig;

/// Closed set of effect families. Adding a family is a compile-time change;
/// an unrecognized tag in a config file fails deserialization of that one
/// element and is reported at the registration boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum EffectFamily {
    Reveal(RevealConfig),
    Parallax(ParallaxConfig),
    ParticleLoop(ParticleConfig),
    Glitch(GlitchConfig),
    TerminalType(TypeConfig),
}

impl EffectFamily {
    pub fn name(&self) -> &'static str {
        match self {
            EffectFamily::Reveal(_) => "reveal",
            EffectFamily::Parallax(_) => "parallax",
            EffectFamily::ParticleLoop(_) => "particle-loop",
            EffectFamily::Glitch(_) => "glitch",
            EffectFamily::TerminalType(_) => "terminal-type",
        }
    }

    /// Entrance/exit durations and replay policy for the state machine.
    /// Only the reveal family carries its own transitions; the looping
    /// families appear and disappear with a short fixed fade.
    pub fn timings(&self) -> (u64, u64, ReplayPolicy) {
        match self {
            EffectFamily::Reveal(cfg) => (cfg.enter_ticks, cfg.exit_ticks, cfg.policy),
            EffectFamily::Parallax(_) => (0, 0, ReplayPolicy::Replay),
            EffectFamily::ParticleLoop(cfg) => (cfg.fade_ticks, cfg.fade_ticks, ReplayPolicy::Replay),
            EffectFamily::Glitch(_) => (0, 0, ReplayPolicy::Replay),
            EffectFamily::TerminalType(_) => (0, 0, ReplayPolicy::Replay),
        }
    }
}

/// Inputs shared by every generator at one tick.
#[derive(Debug, Clone, Copy)]
pub struct EffectCtx {
    pub tick: Tick,
    pub state: AnimState,
    /// Ticks since the current state was entered.
    pub ticks_in_state: u64,
    /// Document scroll fraction in [0, 1], already clamped.
    pub scroll_progress: f32,
}

/// Dispatch to the family generator. Exhaustive by construction.
pub fn render(family: &EffectFamily, ctx: &EffectCtx, rng: &EffectRng) -> RenderParams {
    match family {
        EffectFamily::Reveal(cfg) => reveal::render(cfg, ctx),
        EffectFamily::Parallax(cfg) => parallax::render(cfg, ctx),
        EffectFamily::ParticleLoop(cfg) => particles::render(cfg, ctx, rng),
        EffectFamily::Glitch(cfg) => glitch::render(cfg, ctx, rng),
        EffectFamily::TerminalType(cfg) => typer::render(cfg, ctx),
    }
}

/// Entrance/exit ramp in [0, 1] for families that fade as a whole.
pub(crate) fn state_fade(ctx: &EffectCtx, fade_ticks: u64) -> f32 {
    match ctx.state {
        AnimState::Idle => 0.0,
        AnimState::Active => 1.0,
        AnimState::Entering => phase(ctx.ticks_in_state, fade_ticks),
        AnimState::Exiting => 1.0 - phase(ctx.ticks_in_state, fade_ticks),
    }
}

/// Linear phase of `elapsed` within `duration`, total on all inputs.
pub(crate) fn phase(elapsed: u64, duration: u64) -> f32 {
    if duration == 0 {
        1.0
    } else {
        (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
    }
}

pub(crate) fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_tag_roundtrip() {
        let json = r#"{"family":"parallax","direction":"up","magnitude":3.0}"#;
        let family: EffectFamily = serde_json::from_str(json).unwrap();
        assert_eq!(family.name(), "parallax");
    }

    #[test]
    fn test_unknown_family_tag_is_rejected() {
        let json = r#"{"family":"lens-flare","magnitude":3.0}"#;
        assert!(serde_json::from_str::<EffectFamily>(json).is_err());
    }

    #[test]
    fn test_phase_handles_zero_duration() {
        assert_eq!(phase(0, 0), 1.0);
        assert_eq!(phase(5, 10), 0.5);
        assert_eq!(phase(20, 10), 1.0);
    }
}
