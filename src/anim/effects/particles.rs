//! Looping particle fields: binary rain columns, a floating glyph field, and
//! circuit pulses. Every particle's position is a closed-form function of the
//! tick and the element's layout stream, so the field never accumulates
//! state between frames.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anim::effects::{lerp, state_fade, EffectCtx};
use crate::anim::params::{Content, Offset, Particle, RenderParams};
use crate::anim::rng::EffectRng;
use crate::anim::state::AnimState;

/// Code-shaped flotsam for the floating field.
const SNIPPETS: &[&str] = &[
    "fn main() { }",
    "cargo build --release",
    "let mut state = State::new();",
    "impl Display for Page",
    "git commit -m \"fix: update\"",
    "match event { _ => {} }",
    "#[derive(Debug, Clone)]",
    "Ok(())",
    "git push origin main",
    ".iter().map(|x| x.id)",
    "async fn serve() -> Result<()>",
    "404 Not Found",
];

const SHAPES: &[&str] = &["○", "□", "△"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainParams {
    /// Columns between adjacent rain streams.
    #[serde(default = "default_spacing")]
    pub spacing: u16,
    /// Rows of fading tail behind each stream head.
    #[serde(default = "default_trail")]
    pub trail: u16,
}

fn default_spacing() -> u16 {
    3
}

fn default_trail() -> u16 {
    6
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            trail: default_trail(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatParams {
    #[serde(default = "default_float_count")]
    pub count: u16,
}

fn default_float_count() -> u16 {
    18
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            count: default_float_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParams {
    #[serde(default = "default_nodes")]
    pub nodes: u16,
    #[serde(default = "default_links")]
    pub links: u16,
}

fn default_nodes() -> u16 {
    10
}

fn default_links() -> u16 {
    12
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            links: default_links(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParticleKind {
    Rain(RainParams),
    Float(FloatParams),
    Circuit(CircuitParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    #[serde(flatten)]
    pub kind: ParticleKind,

    /// Field area in cells. Rebuilt on terminal resize.
    pub cols: u16,
    pub rows: u16,

    /// Whole-field fade in/out duration in ticks.
    #[serde(default = "default_fade_ticks")]
    pub fade_ticks: u64,
}

fn default_fade_ticks() -> u64 {
    8
}

pub fn render(cfg: &ParticleConfig, ctx: &EffectCtx, rng: &EffectRng) -> RenderParams {
    if ctx.state == AnimState::Idle || cfg.cols == 0 || cfg.rows == 0 {
        return RenderParams::hidden();
    }
    let fade = state_fade(ctx, cfg.fade_ticks);
    let particles = match cfg.kind {
        ParticleKind::Rain(rain) => rain_field(cfg, &rain, ctx.tick, rng, fade),
        ParticleKind::Float(float) => float_field(cfg, &float, ctx.tick, rng, fade),
        ParticleKind::Circuit(circuit) => circuit_field(cfg, &circuit, ctx.tick, rng, fade),
    };
    RenderParams {
        opacity: fade,
        offset: Offset::default(),
        content: Content::Particles(particles),
    }
}

/// Streams of binary digits falling at per-column speeds, with a fading tail.
fn rain_field(
    cfg: &ParticleConfig,
    rain: &RainParams,
    tick: u64,
    rng: &EffectRng,
    fade: f32,
) -> Vec<Particle> {
    let spacing = rain.spacing.max(1);
    let trail = rain.trail.max(1);
    let columns = cfg.cols / spacing;
    let cycle = (cfg.rows + trail) as f32;
    let mut particles = Vec::new();
    let mut glyphs = rng.at_tick(tick);

    for i in 0..columns {
        let mut lay = rng.layout(i as u64);
        let speed: f32 = lay.random_range(0.5..1.7);
        let start: f32 = lay.random_range(0.0..cycle);
        let head = (start + speed * tick as f32) % cycle;

        for k in 0..trail {
            let row = head - k as f32;
            if row < 0.0 || row >= cfg.rows as f32 {
                continue;
            }
            let strength = 1.0 - k as f32 / trail as f32;
            particles.push(Particle {
                col: i * spacing,
                row: row as u16,
                glyph: if glyphs.random_bool(0.5) { "1" } else { "0" }.to_string(),
                opacity: fade * strength * 0.9,
            });
        }
    }
    particles
}

/// Slow drifting field of code snippets, binary strings and outline shapes.
fn float_field(
    cfg: &ParticleConfig,
    float: &FloatParams,
    tick: u64,
    rng: &EffectRng,
    fade: f32,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(float.count as usize);
    for i in 0..float.count {
        let mut lay = rng.layout(0x100 + i as u64);
        let base_col: f32 = lay.random_range(0.0..cfg.cols as f32);
        let base_row: f32 = lay.random_range(0.0..cfg.rows as f32);
        // 30-90s of drift per loop at the default 50ms tick.
        let period: f32 = lay.random_range(600.0..1800.0);
        let phase_offset: f32 = lay.random_range(0.0..1.0);
        let row_amp: f32 = lay.random_range(1.5..5.0);
        let col_amp: f32 = lay.random_range(0.5..3.0);
        let base_opacity: f32 = lay.random_range(0.05..0.3);

        let glyph = match lay.random_range(0u8..10) {
            0..=2 => SNIPPETS[lay.random_range(0..SNIPPETS.len())].to_string(),
            3..=6 => {
                let len = lay.random_range(5..15);
                (0..len)
                    .map(|_| if lay.random_bool(0.5) { '1' } else { '0' })
                    .collect()
            }
            _ => SHAPES[lay.random_range(0..SHAPES.len())].to_string(),
        };

        let angle = TAU * (tick as f32 / period + phase_offset);
        let row = base_row + row_amp * angle.sin();
        let col = base_col + col_amp * angle.cos();
        if row < 0.0 || row >= cfg.rows as f32 || col < 0.0 || col >= cfg.cols as f32 {
            continue;
        }
        particles.push(Particle {
            col: col as u16,
            row: row as u16,
            glyph,
            opacity: fade * base_opacity * (1.0 + 0.3 * angle.sin().abs()),
        });
    }
    particles
}

/// Dim node markers plus bright pulses travelling along node-to-node links.
fn circuit_field(
    cfg: &ParticleConfig,
    circuit: &CircuitParams,
    tick: u64,
    rng: &EffectRng,
    fade: f32,
) -> Vec<Particle> {
    let node_count = circuit.nodes.max(2);
    let mut nodes = Vec::with_capacity(node_count as usize);
    for i in 0..node_count {
        let mut lay = rng.layout(0x1000 + i as u64);
        nodes.push((
            lay.random_range(0.0..cfg.cols as f32),
            lay.random_range(0.0..cfg.rows as f32),
            lay.random_range(0.0..1.0f32),
        ));
    }

    let mut particles = Vec::new();
    for (col, row, node_phase) in &nodes {
        let breath = (TAU * (tick as f32 / 120.0 + node_phase)).sin() * 0.5 + 0.5;
        particles.push(Particle {
            col: *col as u16,
            row: *row as u16,
            glyph: "◦".to_string(),
            opacity: fade * (0.1 + 0.2 * breath),
        });
    }

    for j in 0..circuit.links {
        let mut lay = rng.layout(0x2000 + j as u64);
        let a = lay.random_range(0..nodes.len());
        let b = lay.random_range(0..nodes.len());
        if a == b {
            continue;
        }
        let travel: u64 = 80;
        let rest: u64 = lay.random_range(140..280);
        let delay: u64 = lay.random_range(0..100);
        let at = (tick + delay) % (travel + rest);
        if at >= travel {
            continue;
        }
        let f = at as f32 / travel as f32;
        let col = lerp(nodes[a].0, nodes[b].0, f);
        let row = lerp(nodes[a].1, nodes[b].1, f);
        particles.push(Particle {
            col: col as u16,
            row: row as u16,
            glyph: "•".to_string(),
            opacity: fade * (std::f32::consts::PI * f).sin() * 0.8,
        });
    }
    particles
}
