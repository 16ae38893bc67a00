//! Per-element animation state machine.
//!
//! Every decorative element cycles `Idle -> Entering -> Active -> Exiting ->
//! Idle`, replaying its entrance each time it re-enters the viewport. The
//! machine consumes visibility notes between ticks with last-write-wins
//! semantics: when enter and leave both land in the same tick, only the most
//! recent one is applied.

use crate::clock::Tick;

/// Lifecycle of one animated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    /// Not visible, nothing running. The initial and reset state.
    Idle,
    /// Visible, entrance transition in progress.
    Entering,
    /// Visible, steady state or looping.
    Active,
    /// No longer visible, exit transition in progress.
    Exiting,
}

/// Whether an element replays its entrance on every viewport re-entry or
/// stays revealed after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplayPolicy {
    /// Re-run the entrance each time the element scrolls back into view.
    #[default]
    Replay,
    /// Once triggered, the entrance completes and the element never exits.
    Once,
}

/// Drives the state transitions for one element.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: AnimState,
    /// Tick at which the current state was entered.
    entered_at: Tick,
    /// Most recent visibility note, applied at the next tick boundary.
    pending: Option<bool>,
    triggered_once: bool,
    enter_ticks: u64,
    exit_ticks: u64,
    policy: ReplayPolicy,
}

impl StateMachine {
    pub fn new(enter_ticks: u64, exit_ticks: u64, policy: ReplayPolicy) -> Self {
        Self {
            state: AnimState::Idle,
            entered_at: 0,
            pending: None,
            triggered_once: false,
            enter_ticks,
            exit_ticks,
            policy,
        }
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    /// Ticks elapsed since the current state was entered.
    pub fn ticks_in_state(&self, tick: Tick) -> u64 {
        tick.saturating_sub(self.entered_at)
    }

    /// Record a visibility crossing. Overwrites any note from earlier in the
    /// same tick; the last writer wins.
    pub fn note_visibility(&mut self, visible: bool) {
        self.pending = Some(visible);
    }

    fn transition(&mut self, state: AnimState, tick: Tick) {
        self.state = state;
        self.entered_at = tick;
    }

    /// Apply the pending visibility note, then timer expirations. Call once
    /// per tick before computing render parameters.
    pub fn advance(&mut self, tick: Tick) {
        if let Some(visible) = self.pending.take() {
            self.apply_visibility(visible, tick);
        }
        match self.state {
            AnimState::Entering if self.ticks_in_state(tick) >= self.enter_ticks => {
                self.triggered_once = true;
                self.transition(AnimState::Active, tick);
            }
            AnimState::Exiting if self.ticks_in_state(tick) >= self.exit_ticks => {
                self.transition(AnimState::Idle, tick);
            }
            _ => {}
        }
    }

    fn apply_visibility(&mut self, visible: bool, tick: Tick) {
        match (self.state, visible) {
            (AnimState::Idle, true) => self.transition(AnimState::Entering, tick),
            // Re-entry while still exiting restarts the entrance from the top.
            (AnimState::Exiting, true) => self.transition(AnimState::Entering, tick),
            (AnimState::Entering, false) | (AnimState::Active, false) => {
                // A one-shot element completes its entrance and stays put.
                if self.policy == ReplayPolicy::Once && (self.triggered_once || self.state == AnimState::Entering) {
                    return;
                }
                self.transition(AnimState::Exiting, tick);
            }
            // enter while Entering/Active, leave while Idle/Exiting: no-ops.
            _ => {}
        }
    }
}
