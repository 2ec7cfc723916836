//! GPIO output access for the lamp pins
//!
//! The sequencer only ever talks to [`GpioPort`]. On the Raspberry Pi the
//! port is backed by `rppal` ([`RppalPort`]); tests use an in-memory port.
//!
//! ```text
//! Sequencer ──set_level(pin, High|Low)──► GpioPort ──► /dev/gpiomem
//! ```

pub mod rppal_port;

pub use rppal_port::RppalPort;

use thiserror::Error;

/// Output level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    High,
    Low,
}

#[derive(Debug, Error)]
pub enum PortError {
    /// The GPIO controller could not be opened
    #[error("Failed to open GPIO controller: {0}")]
    OpenError(String),

    /// A pin is unavailable or already claimed
    #[error("Failed to acquire pin {pin}: {reason}")]
    PinError { pin: u8, reason: String },
}

/// Write-only access to the fixture's output pins
///
/// Levels are idempotent: writing the level a pin already has is harmless.
/// `set_level` is infallible; a hardware fault at that point is fatal to the
/// process and not something the caller can recover from.
pub trait GpioPort: Send {
    /// Claims `pin` and configures it as an output
    fn set_direction_output(&mut self, pin: u8) -> Result<(), PortError>;

    /// Drives an output pin to `level`
    fn set_level(&mut self, pin: u8, level: Level);

    /// Releases every claimed pin
    fn close(&mut self);
}
