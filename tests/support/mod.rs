//! In-memory GPIO port and twin publishers shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tl_mapper::config::PinConfig;
use tl_mapper::gpio::{GpioPort, Level, PortError};
use tl_mapper::light::{Cycling, Sequencer};
use tl_mapper::mqtt::{PublishError, TwinPublisher};
use tl_mapper::twin::Reporter;

// ============================================================================
// Mock GPIO port
// ============================================================================

#[derive(Default)]
pub struct PortLog {
    pub outputs: Vec<u8>,
    pub writes: Vec<(u8, Level)>,
    pub closed: bool,
    pub fail_pin: Option<u8>,
}

impl PortLog {
    /// Most recent level written to `pin`
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
    }
}

#[derive(Clone, Default)]
pub struct MockPort {
    pub log: Arc<Mutex<PortLog>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pin: u8) -> Self {
        let port = Self::default();
        port.log.lock().unwrap().fail_pin = Some(pin);
        port
    }

    pub fn writes(&self) -> Vec<(u8, Level)> {
        self.log.lock().unwrap().writes.clone()
    }

    pub fn level(&self, pin: u8) -> Option<Level> {
        self.log.lock().unwrap().level(pin)
    }
}

impl GpioPort for MockPort {
    fn set_direction_output(&mut self, pin: u8) -> Result<(), PortError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_pin == Some(pin) {
            return Err(PortError::PinError {
                pin,
                reason: "pin busy".to_string(),
            });
        }
        log.outputs.push(pin);
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: Level) {
        let mut log = self.log.lock().unwrap();
        assert!(log.outputs.contains(&pin), "pin {} is not an output", pin);
        log.writes.push((pin, level));
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closed = true;
    }
}

// ============================================================================
// Mock publishers
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingPublisher {
    pub published: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| serde_json::from_slice(payload).unwrap())
            .collect()
    }

    /// (property, actual value) of every published update, in order
    pub fn reports(&self) -> Vec<(String, String)> {
        self.payloads()
            .iter()
            .map(|payload| {
                let twin = payload["twin"].as_object().unwrap();
                assert_eq!(twin.len(), 1, "update must carry exactly one property");
                let (property, record) = twin.iter().next().unwrap();
                let value = record["actual"]["value"].as_str().unwrap().to_string();
                (property.clone(), value)
            })
            .collect()
    }
}

impl TwinPublisher for RecordingPublisher {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FailingPublisher {
    pub attempts: Arc<AtomicUsize>,
}

impl FailingPublisher {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl TwinPublisher for FailingPublisher {
    fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), PublishError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PublishError::Failed("broker unreachable".to_string()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub const RED: u8 = 9;
pub const YELLOW: u8 = 10;
pub const GREEN: u8 = 11;

pub fn cycling_sequencer(
    port: MockPort,
    publisher: Arc<dyn TwinPublisher>,
) -> Sequencer<Cycling> {
    Sequencer::create(Box::new(port), PinConfig::default(), Reporter::new(publisher))
        .initialize()
        .unwrap()
}

pub fn report(property: &str, value: &str) -> (String, String) {
    (property.to_string(), value.to_string())
}
