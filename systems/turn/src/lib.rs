#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that keeps confirmed routes moving across turn boundaries.
//!
//! The world advances the turn counter and restores allowance when it applies
//! [`Command::EndTurn`]. This system closes the loop: every confirmation and
//! every turn that starts with a pending route schedules exactly one
//! [`Command::AdvanceStep`], so multi-turn routes continue without further
//! player input.

use wayfarer_core::{Command, Event, RouteStateSnapshot};

/// Pure system that reacts to route and turn events with advance commands.
#[derive(Debug, Default)]
pub struct TurnController {
    turns_observed: u32,
}

impl TurnController {
    /// Consumes world events and emits the advance commands they call for.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::RouteConfirmed { .. } => out.push(Command::AdvanceStep),
                Event::TurnStarted { route_pending, .. } => {
                    self.turns_observed = self.turns_observed.saturating_add(1);
                    if *route_pending {
                        out.push(Command::AdvanceStep);
                    }
                }
                _ => {}
            }
        }
    }

    /// Number of turn starts this controller has reacted to.
    #[must_use]
    pub fn turns_observed(&self) -> u32 {
        self.turns_observed
    }

    /// Advisory flag for the HUD's end-turn control.
    ///
    /// Ending a turn while the allowance is still full gains nothing, so the
    /// control is suggested only after the unit spent some movement. The world
    /// accepts [`Command::EndTurn`] regardless.
    #[must_use]
    pub fn end_turn_suggested(&self, snapshot: &RouteStateSnapshot) -> bool {
        snapshot.end_turn_suggested()
    }
}
