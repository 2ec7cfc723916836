//! Fixed phase table of the traffic light cycle
//!
//! ```text
//! RedStop ──4s──► RedYellow ──2s──► Go ──6s──► Caution ──3s──► Clear ──0s──┐
//!    ▲                                                                    │
//!    └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each phase lists the lamp changes applied on entry, in the order they
//! are driven and reported.

use std::time::Duration;

use super::lamp::{FixtureState, Lamp, LampState};

use super::lamp::LampState::{Off, On};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Red only
    #[default]
    RedStop,
    /// Red and yellow, about to go
    RedYellow,
    /// Green only
    Go,
    /// Yellow only, about to stop
    Caution,
    /// Yellow released, everything dark for an instant
    Clear,
}

impl Phase {
    pub const CYCLE: [Phase; 5] = [
        Phase::RedStop,
        Phase::RedYellow,
        Phase::Go,
        Phase::Caution,
        Phase::Clear,
    ];

    /// 1-based position in the cycle
    pub fn number(&self) -> u8 {
        match self {
            Phase::RedStop => 1,
            Phase::RedYellow => 2,
            Phase::Go => 3,
            Phase::Caution => 4,
            Phase::Clear => 5,
        }
    }

    pub fn next(&self) -> Phase {
        match self {
            Phase::RedStop => Phase::RedYellow,
            Phase::RedYellow => Phase::Go,
            Phase::Go => Phase::Caution,
            Phase::Caution => Phase::Clear,
            Phase::Clear => Phase::RedStop,
        }
    }

    pub fn hold(&self) -> Duration {
        match self {
            Phase::RedStop => Duration::from_secs(4),
            Phase::RedYellow => Duration::from_secs(2),
            Phase::Go => Duration::from_secs(6),
            Phase::Caution => Duration::from_secs(3),
            Phase::Clear => Duration::ZERO,
        }
    }

    /// Lamp changes driven on entry, in report order
    pub fn changes(&self) -> &'static [(Lamp, LampState)] {
        match self {
            Phase::RedStop => &[(Lamp::Red, On)],
            Phase::RedYellow => &[(Lamp::Yellow, On)],
            Phase::Go => &[(Lamp::Red, Off), (Lamp::Yellow, Off), (Lamp::Green, On)],
            Phase::Caution => &[(Lamp::Green, Off), (Lamp::Yellow, On)],
            Phase::Clear => &[(Lamp::Yellow, Off)],
        }
    }

    /// Fixture state once the phase has been entered
    pub fn fixture(&self) -> FixtureState {
        match self {
            Phase::RedStop => FixtureState::new(On, Off, Off),
            Phase::RedYellow => FixtureState::new(On, On, Off),
            Phase::Go => FixtureState::new(Off, Off, On),
            Phase::Caution => FixtureState::new(Off, On, Off),
            Phase::Clear => FixtureState::new(Off, Off, Off),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order_wraps_to_first_phase() {
        let mut phase = Phase::default();
        for expected in Phase::CYCLE.iter().skip(1) {
            phase = phase.next();
            assert_eq!(phase, *expected);
        }
        assert_eq!(phase.next(), Phase::RedStop);
    }

    #[test]
    fn test_changes_produce_phase_fixture() {
        // Startup leaves every lamp dark, which is also the state after Clear
        let mut fixture = FixtureState::default();
        for _ in 0..2 {
            for phase in Phase::CYCLE {
                for (lamp, state) in phase.changes() {
                    fixture.set(*lamp, *state);
                }
                assert_eq!(fixture, phase.fixture(), "phase {}", phase.number());
            }
        }
    }

    #[test]
    fn test_changes_are_never_redundant() {
        let mut previous = Phase::Clear.fixture();
        for phase in Phase::CYCLE {
            for (lamp, state) in phase.changes() {
                assert_ne!(
                    previous.get(*lamp),
                    *state,
                    "phase {} re-drives {}",
                    phase.number(),
                    lamp
                );
            }
            let changed = Lamp::ALL
                .iter()
                .filter(|lamp| previous.get(**lamp) != phase.fixture().get(**lamp))
                .count();
            assert_eq!(changed, phase.changes().len());
            previous = phase.fixture();
        }
    }

    #[test]
    fn test_hold_durations() {
        let holds: Vec<u64> = Phase::CYCLE.iter().map(|p| p.hold().as_secs()).collect();
        assert_eq!(holds, vec![4, 2, 6, 3, 0]);
    }
}
