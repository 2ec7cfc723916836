use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gpio::Level;

/// The three lamps of the fixture, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lamp {
    Red,
    Yellow,
    Green,
}

impl Lamp {
    pub const ALL: [Lamp; 3] = [Lamp::Red, Lamp::Yellow, Lamp::Green];

    /// Property name used as the twin key
    pub fn name(&self) -> &'static str {
        match self {
            Lamp::Red => "red",
            Lamp::Yellow => "yellow",
            Lamp::Green => "green",
        }
    }
}

impl fmt::Display for Lamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LampState {
    On,
    #[default]
    Off,
}

impl LampState {
    /// Actual value as reported to the twin
    pub fn as_str(&self) -> &'static str {
        match self {
            LampState::On => "ON",
            LampState::Off => "OFF",
        }
    }

    pub fn level(&self) -> Level {
        match self {
            LampState::On => Level::High,
            LampState::Off => Level::Low,
        }
    }
}

impl fmt::Display for LampState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical state of all three lamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureState {
    pub red: LampState,
    pub yellow: LampState,
    pub green: LampState,
}

impl FixtureState {
    pub const fn new(red: LampState, yellow: LampState, green: LampState) -> Self {
        Self { red, yellow, green }
    }

    pub fn get(&self, lamp: Lamp) -> LampState {
        match lamp {
            Lamp::Red => self.red,
            Lamp::Yellow => self.yellow,
            Lamp::Green => self.green,
        }
    }

    pub fn set(&mut self, lamp: Lamp, state: LampState) {
        match lamp {
            Lamp::Red => self.red = state,
            Lamp::Yellow => self.yellow = state,
            Lamp::Green => self.green = state,
        }
    }

    pub fn all_off(&self) -> bool {
        Lamp::ALL.iter().all(|lamp| self.get(*lamp) == LampState::Off)
    }
}

impl fmt::Display for FixtureState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "red={} yellow={} green={}",
            self.red, self.yellow, self.green
        )
    }
}
