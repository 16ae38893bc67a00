//! Typewriter effect: cycles through a fixed list of strings, typing and
//! deleting characters at fixed rates, looping forever. The shown prefix is
//! a closed-form function of the tick.

use serde::{Deserialize, Serialize};

use crate::anim::effects::EffectCtx;
use crate::anim::params::{Content, Offset, RenderParams};
use crate::anim::state::AnimState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    pub strings: Vec<String>,

    /// Ticks per typed character.
    #[serde(default = "default_type_ticks")]
    pub type_ticks: u64,

    /// Ticks per deleted character.
    #[serde(default = "default_delete_ticks")]
    pub delete_ticks: u64,

    /// Ticks the completed string is held before deletion starts.
    #[serde(default = "default_hold_ticks")]
    pub hold_ticks: u64,

    /// Ticks of empty prompt between strings.
    #[serde(default = "default_gap_ticks")]
    pub gap_ticks: u64,
}

fn default_type_ticks() -> u64 {
    2
}

fn default_delete_ticks() -> u64 {
    1
}

fn default_hold_ticks() -> u64 {
    40
}

fn default_gap_ticks() -> u64 {
    10
}

impl TypeConfig {
    pub fn new(strings: Vec<String>) -> Self {
        Self {
            strings,
            type_ticks: default_type_ticks(),
            delete_ticks: default_delete_ticks(),
            hold_ticks: default_hold_ticks(),
            gap_ticks: default_gap_ticks(),
        }
    }

    fn segment_len(&self, chars: u64) -> u64 {
        chars * self.type_ticks.max(1) + self.hold_ticks + chars * self.delete_ticks.max(1) + self.gap_ticks
    }

    /// The prefix shown at `tick`, looping over all strings.
    pub fn text_at(&self, tick: u64) -> String {
        let total: u64 = self
            .strings
            .iter()
            .map(|s| self.segment_len(s.chars().count() as u64))
            .sum();
        if total == 0 {
            return String::new();
        }

        let mut t = tick % total;
        for s in &self.strings {
            let chars: Vec<char> = s.chars().collect();
            let n = chars.len() as u64;
            let type_ticks = self.type_ticks.max(1);
            let delete_ticks = self.delete_ticks.max(1);

            let typing = n * type_ticks;
            if t < typing {
                let shown = (t / type_ticks + 1).min(n) as usize;
                return chars[..shown].iter().collect();
            }
            t -= typing;

            if t < self.hold_ticks {
                return s.clone();
            }
            t -= self.hold_ticks;

            let deleting = n * delete_ticks;
            if t < deleting {
                let gone = (t / delete_ticks + 1).min(n) as usize;
                return chars[..chars.len() - gone].iter().collect();
            }
            t -= deleting;

            if t < self.gap_ticks {
                return String::new();
            }
            t -= self.gap_ticks;
        }
        String::new()
    }
}

pub fn render(cfg: &TypeConfig, ctx: &EffectCtx) -> RenderParams {
    if ctx.state == AnimState::Idle {
        return RenderParams::hidden();
    }
    RenderParams {
        opacity: 1.0,
        offset: Offset::default(),
        content: Content::Text(cfg.text_at(ctx.tick)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TypeConfig {
        TypeConfig {
            strings: vec!["abc".to_string(), "de".to_string()],
            type_ticks: 2,
            delete_ticks: 1,
            hold_ticks: 4,
            gap_ticks: 2,
        }
    }

    #[test]
    fn test_types_one_character_at_a_time() {
        let cfg = config();
        assert_eq!(cfg.text_at(0), "a");
        assert_eq!(cfg.text_at(1), "a");
        assert_eq!(cfg.text_at(2), "ab");
        assert_eq!(cfg.text_at(4), "abc");
    }

    #[test]
    fn test_holds_then_deletes() {
        let cfg = config();
        // Typing "abc" spans ticks 0..6, hold spans 6..10.
        assert_eq!(cfg.text_at(6), "abc");
        assert_eq!(cfg.text_at(9), "abc");
        assert_eq!(cfg.text_at(10), "ab");
        assert_eq!(cfg.text_at(11), "a");
        assert_eq!(cfg.text_at(12), "");
    }

    #[test]
    fn test_advances_to_next_string_after_gap() {
        let cfg = config();
        // Segment for "abc": 6 + 4 + 3 + 2 = 15; "de" starts at tick 15.
        assert_eq!(cfg.text_at(15), "d");
        assert_eq!(cfg.text_at(17), "de");
    }

    #[test]
    fn test_loops_forever() {
        let cfg = config();
        // Total cycle: 15 + (4 + 4 + 2 + 2) = 27.
        assert_eq!(cfg.text_at(27), cfg.text_at(0));
        assert_eq!(cfg.text_at(27 * 100 + 5), cfg.text_at(5));
    }

    #[test]
    fn test_empty_string_list_is_total() {
        let cfg = TypeConfig::new(Vec::new());
        assert_eq!(cfg.text_at(12345), "");
    }
}
