//! Visibility-driven animation controller.
//!
//! One record per mounted decorative element. Visibility crossings from the
//! observer are noted on the element's state machine between ticks; on every
//! shared clock tick each machine advances and the family's generator
//! computes fresh render parameters. Elements never share mutable state, so
//! a malformed element can be skipped without disturbing the rest.

pub mod effects;
pub mod params;
pub mod rng;
pub mod state;

use std::collections::BTreeMap;

use anyhow::{bail, Result};

pub use effects::{EffectCtx, EffectFamily};
pub use params::{Content, Offset, Particle, RenderParams};
pub use rng::EffectRng;
pub use state::{AnimState, ReplayPolicy, StateMachine};

use crate::clock::Tick;
use crate::visibility::VisibilityEvent;

/// Identifies one animated element for the controller and the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// The controller's record for one effect instance.
#[derive(Debug, Clone)]
pub struct AnimationElement {
    family: EffectFamily,
    machine: StateMachine,
    rng: EffectRng,
    params: RenderParams,
}

impl AnimationElement {
    fn new(family: EffectFamily, seed: u64) -> Self {
        let (enter, exit, policy) = family.timings();
        Self {
            family,
            machine: StateMachine::new(enter, exit, policy),
            rng: EffectRng::new(seed),
            params: RenderParams::hidden(),
        }
    }

    pub fn state(&self) -> AnimState {
        self.machine.state()
    }

    pub fn family(&self) -> &EffectFamily {
        &self.family
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }
}

/// Registry of all animated elements, advanced once per shared clock tick.
#[derive(Debug, Default)]
pub struct AnimationController {
    elements: BTreeMap<ElementId, AnimationElement>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an element. Duplicate ids are a configuration error and are
    /// rejected so the original element keeps animating untouched.
    pub fn register(&mut self, id: ElementId, family: EffectFamily, seed: u64) -> Result<()> {
        if self.elements.contains_key(&id) {
            bail!("animation element {:?} is already registered", id);
        }
        tracing::debug!("registering {} element {:?}", family.name(), id);
        self.elements.insert(id, AnimationElement::new(family, seed));
        Ok(())
    }

    /// Unmount an element. In-flight transitions are discarded; output is
    /// purely derived, so there is nothing to settle.
    pub fn unregister(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    /// Swap an element's family configuration in place (field geometry after
    /// a resize). The state machine and random stream are kept, so this does
    /// not replay transitions. Unknown ids are ignored.
    pub fn reconfigure(&mut self, id: ElementId, family: EffectFamily) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.family = family;
        }
    }

    /// Route a threshold crossing to its element. Events for elements that
    /// are not (or no longer) registered are ignored, never an error.
    pub fn apply_visibility(&mut self, event: VisibilityEvent) {
        let (id, visible) = match event {
            VisibilityEvent::Enter(id) => (id, true),
            VisibilityEvent::Leave(id) => (id, false),
        };
        match self.elements.get_mut(&id) {
            Some(element) => element.machine.note_visibility(visible),
            None => tracing::trace!("visibility event for unknown element {:?} dropped", id),
        }
    }

    /// Advance every element one tick and recompute its parameters.
    /// Out-of-range scroll values are clamped, never propagated.
    pub fn advance(&mut self, tick: Tick, scroll_progress: f32) {
        let scroll_progress = if scroll_progress.is_finite() {
            scroll_progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        for element in self.elements.values_mut() {
            element.machine.advance(tick);
            let ctx = EffectCtx {
                tick,
                state: element.machine.state(),
                ticks_in_state: element.machine.ticks_in_state(tick),
                scroll_progress,
            };
            element.params = effects::render(&element.family, &ctx, &element.rng);
        }
    }

    pub fn params(&self, id: ElementId) -> Option<&RenderParams> {
        self.elements.get(&id).map(AnimationElement::params)
    }

    pub fn state(&self, id: ElementId) -> Option<AnimState> {
        self.elements.get(&id).map(AnimationElement::state)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::effects::reveal::RevealConfig;

    fn reveal_family() -> EffectFamily {
        EffectFamily::Reveal(RevealConfig {
            enter_ticks: 5,
            exit_ticks: 3,
            ..Default::default()
        })
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut controller = AnimationController::new();
        controller
            .register(ElementId(1), reveal_family(), 0)
            .unwrap();
        assert!(controller.register(ElementId(1), reveal_family(), 0).is_err());
        assert_eq!(controller.len(), 1);
    }

    #[test]
    fn test_event_for_unknown_element_is_ignored() {
        let mut controller = AnimationController::new();
        controller.apply_visibility(VisibilityEvent::Enter(ElementId(9)));
        controller.advance(0, 0.0);
        assert!(controller.is_empty());
    }

    #[test]
    fn test_entering_then_active_at_duration() {
        let mut controller = AnimationController::new();
        controller
            .register(ElementId(1), reveal_family(), 0)
            .unwrap();
        controller.apply_visibility(VisibilityEvent::Enter(ElementId(1)));
        for tick in 0..5 {
            controller.advance(tick, 0.0);
            assert_eq!(controller.state(ElementId(1)), Some(AnimState::Entering));
        }
        controller.advance(5, 0.0);
        assert_eq!(controller.state(ElementId(1)), Some(AnimState::Active));
        assert_eq!(controller.params(ElementId(1)).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_unregistered_element_discards_transition() {
        let mut controller = AnimationController::new();
        controller
            .register(ElementId(1), reveal_family(), 0)
            .unwrap();
        controller.apply_visibility(VisibilityEvent::Enter(ElementId(1)));
        controller.advance(0, 0.0);
        controller.unregister(ElementId(1));
        assert_eq!(controller.params(ElementId(1)), None);
        // A late leave for the removed element is dropped.
        controller.apply_visibility(VisibilityEvent::Leave(ElementId(1)));
        controller.advance(1, 0.0);
    }

    #[test]
    fn test_non_finite_scroll_is_clamped() {
        let mut controller = AnimationController::new();
        controller
            .register(
                ElementId(1),
                EffectFamily::Parallax(effects::ParallaxConfig::default()),
                0,
            )
            .unwrap();
        controller.apply_visibility(VisibilityEvent::Enter(ElementId(1)));
        controller.advance(0, f32::NAN);
        let params = controller.params(ElementId(1)).unwrap();
        assert!(params.offset.dy.abs() <= 2);
    }
}
