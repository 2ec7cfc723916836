//! Traffic light fixture model and sequencing
//!
//! 1. [`lamp`] - Lamps, lamp states and the fixture state
//! 2. [`phase`] - The fixed five-phase cycle
//! 3. [`sequencer`] - Drives the pins and reports changes
//!
//! ```text
//! Phase table ──► Sequencer ──► GpioPort
//!                     │
//!                     └──► Reporter ──► TwinPublisher
//! ```

pub mod lamp;
pub mod phase;
pub mod sequencer;

pub use lamp::{FixtureState, Lamp, LampState};
pub use phase::Phase;
pub use sequencer::{Cycling, Initializing, Sequencer, SequencerState, Stopped};
