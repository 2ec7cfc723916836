use std::collections::HashMap;

use rppal::gpio::{Gpio, OutputPin};
use tracing::{debug, error, info};

use super::{GpioPort, Level, PortError};

/// Raspberry Pi GPIO port backed by `rppal`
pub struct RppalPort {
    gpio: Gpio,
    outputs: HashMap<u8, OutputPin>,
}

impl RppalPort {
    /// Opens the GPIO controller
    pub fn open() -> Result<Self, PortError> {
        info!("Opening GPIO controller");
        let gpio = match Gpio::new() {
            Ok(g) => g,
            Err(e) => {
                error!("Failed to open GPIO controller: {}", e);
                return Err(PortError::OpenError(e.to_string()));
            }
        };
        Ok(Self {
            gpio,
            outputs: HashMap::new(),
        })
    }
}

impl GpioPort for RppalPort {
    fn set_direction_output(&mut self, pin: u8) -> Result<(), PortError> {
        if self.outputs.contains_key(&pin) {
            debug!("Pin {} already configured as output", pin);
            return Ok(());
        }

        let mut output = self
            .gpio
            .get(pin)
            .map_err(|e| PortError::PinError {
                pin,
                reason: e.to_string(),
            })?
            .into_output();
        // Outputs are cleared explicitly on shutdown; keep the level on drop
        output.set_reset_on_drop(false);

        debug!("Pin {} configured as output", pin);
        self.outputs.insert(pin, output);
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: Level) {
        match self.outputs.get_mut(&pin) {
            Some(output) => match level {
                Level::High => output.set_high(),
                Level::Low => output.set_low(),
            },
            None => error!("Pin {} written before it was configured as output", pin),
        }
    }

    fn close(&mut self) {
        info!("Releasing {} GPIO pins", self.outputs.len());
        self.outputs.clear();
    }
}
