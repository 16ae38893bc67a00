//! Scroll-triggered reveal: opacity/offset interpolation with an optional
//! stagger across word tokens.

use serde::{Deserialize, Serialize};

use crate::anim::effects::{ease_out_cubic, phase, EffectCtx};
use crate::anim::params::{Content, Offset, RenderParams};
use crate::anim::state::{AnimState, ReplayPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    #[default]
    FadeIn,
    SlideUp,
    SlideLeft,
    SlideRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub kind: RevealKind,

    /// Entrance duration in ticks.
    #[serde(default = "default_enter_ticks")]
    pub enter_ticks: u64,

    /// Exit duration in ticks. Zero snaps straight back to hidden.
    #[serde(default = "default_exit_ticks")]
    pub exit_ticks: u64,

    /// Ticks between successive word tokens becoming visible. Zero reveals
    /// the whole block at once.
    #[serde(default)]
    pub stagger_ticks: u64,

    /// Number of word tokens the stagger runs across.
    #[serde(default)]
    pub tokens: usize,

    /// Rows (or columns, for horizontal kinds) the content slides in from.
    #[serde(default = "default_slide_rows")]
    pub slide_rows: i16,

    #[serde(default = "default_target_opacity")]
    pub target_opacity: f32,

    #[serde(default)]
    pub policy: ReplayPolicy,
}

fn default_enter_ticks() -> u64 {
    10
}

fn default_exit_ticks() -> u64 {
    6
}

fn default_slide_rows() -> i16 {
    3
}

fn default_target_opacity() -> f32 {
    1.0
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            kind: RevealKind::FadeIn,
            enter_ticks: default_enter_ticks(),
            exit_ticks: default_exit_ticks(),
            stagger_ticks: 0,
            tokens: 0,
            slide_rows: default_slide_rows(),
            target_opacity: default_target_opacity(),
            policy: ReplayPolicy::Replay,
        }
    }
}

impl RevealConfig {
    /// Starting displacement while fully hidden.
    fn initial_offset(&self) -> Offset {
        match self.kind {
            RevealKind::FadeIn => Offset::default(),
            RevealKind::SlideUp => Offset::new(0, self.slide_rows),
            // Horizontal slides cover more cells than rows, terminal cells
            // being roughly twice as tall as they are wide.
            RevealKind::SlideLeft => Offset::new(-(self.slide_rows * 2), 0),
            RevealKind::SlideRight => Offset::new(self.slide_rows * 2, 0),
        }
    }

    fn offset_at(&self, visible_fraction: f32) -> Offset {
        let start = self.initial_offset();
        let remaining = 1.0 - visible_fraction;
        Offset::new(
            (start.dx as f32 * remaining).round() as i16,
            (start.dy as f32 * remaining).round() as i16,
        )
    }

    fn words(&self, visible: usize) -> Content {
        if self.tokens == 0 {
            Content::None
        } else {
            Content::Words {
                visible: visible.min(self.tokens),
            }
        }
    }
}

pub fn render(cfg: &RevealConfig, ctx: &EffectCtx) -> RenderParams {
    match ctx.state {
        AnimState::Idle => RenderParams {
            opacity: 0.0,
            offset: cfg.initial_offset(),
            content: cfg.words(0),
        },
        AnimState::Active => RenderParams {
            opacity: cfg.target_opacity,
            offset: Offset::default(),
            content: cfg.words(cfg.tokens),
        },
        AnimState::Entering => {
            let eased = ease_out_cubic(phase(ctx.ticks_in_state, cfg.enter_ticks));
            let visible = if cfg.stagger_ticks == 0 {
                cfg.tokens
            } else {
                ((ctx.ticks_in_state / cfg.stagger_ticks) as usize + 1).min(cfg.tokens)
            };
            RenderParams {
                opacity: cfg.target_opacity * eased,
                offset: cfg.offset_at(eased),
                content: cfg.words(visible),
            }
        }
        AnimState::Exiting => {
            let gone = ease_out_cubic(phase(ctx.ticks_in_state, cfg.exit_ticks));
            RenderParams {
                opacity: cfg.target_opacity * (1.0 - gone),
                offset: cfg.offset_at(1.0 - gone),
                content: cfg.words(cfg.tokens),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::effects::EffectCtx;

    fn ctx(state: AnimState, ticks_in_state: u64) -> EffectCtx {
        EffectCtx {
            tick: ticks_in_state,
            state,
            ticks_in_state,
            scroll_progress: 0.0,
        }
    }

    #[test]
    fn test_idle_is_hidden_at_initial_offset() {
        let cfg = RevealConfig {
            kind: RevealKind::SlideUp,
            slide_rows: 4,
            ..Default::default()
        };
        let params = render(&cfg, &ctx(AnimState::Idle, 0));
        assert_eq!(params.opacity, 0.0);
        assert_eq!(params.offset, Offset::new(0, 4));
    }

    #[test]
    fn test_active_reaches_target_opacity() {
        let cfg = RevealConfig::default();
        let params = render(&cfg, &ctx(AnimState::Active, 0));
        assert_eq!(params.opacity, 1.0);
        assert_eq!(params.offset, Offset::default());
    }

    #[test]
    fn test_entrance_opacity_is_monotone() {
        let cfg = RevealConfig {
            enter_ticks: 8,
            ..Default::default()
        };
        let mut last = -1.0f32;
        for t in 0..=8 {
            let params = render(&cfg, &ctx(AnimState::Entering, t));
            assert!(params.opacity >= last, "opacity must not regress");
            last = params.opacity;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_stagger_reveals_tokens_progressively() {
        let cfg = RevealConfig {
            enter_ticks: 12,
            stagger_ticks: 2,
            tokens: 4,
            ..Default::default()
        };
        let at = |t| match render(&cfg, &ctx(AnimState::Entering, t)).content {
            Content::Words { visible } => visible,
            other => panic!("expected word content, got {:?}", other),
        };
        assert_eq!(at(0), 1);
        assert_eq!(at(2), 2);
        assert_eq!(at(5), 3);
        assert_eq!(at(11), 4, "stagger never exceeds the token count");
    }
}
