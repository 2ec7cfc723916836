//! Traffic light sequencer with statum lifecycle
//!
//! # State Machine
//!
//! ```text
//! Initializing ──initialize()──► Cycling ──stop() / shutdown──► Stopped ──close()
//! ```
//!
//! While `Cycling`, every [`Sequencer::advance`] enters the next [`Phase`],
//! drives the pins that change, reports each change and then holds the
//! phase for its duration. Holds are plain sleeps, so drift across cycles
//! is expected.

use statum::{machine, state};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::lamp::{FixtureState, Lamp, LampState};
use super::phase::Phase;
use crate::config::PinConfig;
use crate::gpio::{GpioPort, Level, PortError};
use crate::twin::Reporter;

#[state]
#[derive(Debug, Clone)]
pub enum SequencerState {
    Initializing, // Port opened, pins not yet claimed
    Cycling,      // Running the phase table
    Stopped,      // Outputs cleared, port still held
}

#[machine]
pub struct Sequencer<S: SequencerState> {
    port: Box<dyn GpioPort>,
    pins: PinConfig,
    reporter: Reporter,
    next_phase: Phase,
    current_phase: Option<Phase>,
    fixture: FixtureState,
    outputs_cleared: bool,
}

impl<S: SequencerState> Sequencer<S> {
    pub fn fixture(&self) -> FixtureState {
        self.fixture
    }

    /// Phase most recently entered, `None` before the first advance
    pub fn current_phase(&self) -> Option<Phase> {
        self.current_phase
    }

    // Drives every lamp low once; later calls are no-ops
    fn clear_outputs(&mut self) {
        if self.outputs_cleared {
            debug!("Outputs already cleared");
            return;
        }
        for lamp in Lamp::ALL {
            self.port.set_level(self.pins.pin(lamp), Level::Low);
            self.fixture.set(lamp, LampState::Off);
        }
        self.outputs_cleared = true;
        info!("All lamps switched off");
    }
}

impl Sequencer<Initializing> {
    pub fn create(port: Box<dyn GpioPort>, pins: PinConfig, reporter: Reporter) -> Self {
        info!("Creating sequencer with pins {:?}", pins);
        Self::new(
            port,
            pins,
            reporter,
            Phase::default(),        // next_phase
            None,                    // current_phase
            FixtureState::default(), // fixture
            false,                   // outputs_cleared
        )
    }

    /// Claims the lamp pins as outputs and switches every lamp off
    pub fn initialize(mut self) -> Result<Sequencer<Cycling>, PortError> {
        for lamp in Lamp::ALL {
            self.port.set_direction_output(self.pins.pin(lamp))?;
        }
        for lamp in Lamp::ALL {
            self.port.set_level(self.pins.pin(lamp), Level::Low);
        }
        info!("Sequencer initialized, lamps dark");
        Ok(self.transition())
    }
}

impl Sequencer<Cycling> {
    /// Enters the next phase without holding it
    ///
    /// Only lamps whose state differs from the current fixture are driven
    /// and reported, in the phase's listed order.
    pub fn enter_next_phase(&mut self) -> Phase {
        let phase = self.next_phase;
        debug!("Entering phase {} ({:?})", phase.number(), phase);

        for (lamp, state) in phase.changes() {
            if self.fixture.get(*lamp) == *state {
                continue;
            }
            self.port.set_level(self.pins.pin(*lamp), state.level());
            self.fixture.set(*lamp, *state);
            self.reporter.report(lamp.name(), state.as_str());
        }

        self.current_phase = Some(phase);
        self.next_phase = phase.next();
        phase
    }

    /// Enters the next phase and holds it for its duration
    pub async fn advance(&mut self) {
        let phase = self.enter_next_phase();
        tokio::time::sleep(phase.hold()).await;
    }

    /// Cycles until `shutdown` fires, then switches every lamp off
    ///
    /// A phase is always entered completely; cancellation is observed
    /// between phases and during holds.
    pub async fn run_until_shutdown(mut self, shutdown: CancellationToken) -> Sequencer<Stopped> {
        info!("Starting traffic light cycle");

        while !shutdown.is_cancelled() {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }

                _ = self.advance() => {}
            }
        }

        self.stop()
    }

    pub fn stop(mut self) -> Sequencer<Stopped> {
        self.clear_outputs();
        self.transition()
    }
}

impl Sequencer<Stopped> {
    /// Releases the GPIO port
    pub fn close(mut self) {
        self.clear_outputs();
        self.port.close();
        info!("Sequencer closed");
    }
}
