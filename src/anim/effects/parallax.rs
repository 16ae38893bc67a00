//! Parallax drift: displacement as a linear function of scroll progress.

use serde::{Deserialize, Serialize};

use crate::anim::effects::EffectCtx;
use crate::anim::params::{Content, Offset, RenderParams};
use crate::anim::state::AnimState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default)]
    pub direction: Direction,

    /// Displacement magnitude in cells at either scroll extreme.
    #[serde(default = "default_magnitude")]
    pub magnitude: f32,
}

fn default_magnitude() -> f32 {
    2.0
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
            magnitude: default_magnitude(),
        }
    }
}

/// Pure displacement for a given scroll fraction: `+magnitude` at progress 0,
/// zero at the midpoint, `-magnitude` at progress 1 (mirrored for the
/// opposite directions). Out-of-range progress is clamped.
pub fn displacement(direction: Direction, magnitude: f32, progress: f32) -> (f32, f32) {
    let drift = magnitude * (1.0 - 2.0 * progress.clamp(0.0, 1.0));
    match direction {
        Direction::Up => (0.0, drift),
        Direction::Down => (0.0, -drift),
        Direction::Left => (drift, 0.0),
        Direction::Right => (-drift, 0.0),
    }
}

pub fn render(cfg: &ParallaxConfig, ctx: &EffectCtx) -> RenderParams {
    if ctx.state == AnimState::Idle {
        return RenderParams::hidden();
    }
    let (dx, dy) = displacement(cfg.direction, cfg.magnitude, ctx.scroll_progress);
    RenderParams {
        opacity: 1.0,
        offset: Offset::new(dx.round() as i16, dy.round() as i16),
        content: Content::None,
    }
}
