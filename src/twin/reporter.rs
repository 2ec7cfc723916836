use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use super::message::{BaseMessage, DeviceTwinUpdate};
use crate::mqtt::publisher::TwinPublisher;

/// Instance id of the fixture as registered with the twin service
pub const DEVICE_ID: &str = "traffic-light-instance-01";

pub fn twin_update_topic(device_id: &str) -> String {
    format!("$hw/events/device/{}/twin/update", device_id)
}

/// Publishes one twin update per lamp change
///
/// Publish and encoding failures end here: they are logged and the report
/// is dropped, so the light cycle never stalls on the broker.
pub struct Reporter {
    publisher: Arc<dyn TwinPublisher>,
    topic: String,
    last_timestamp: AtomicI64,
}

impl Reporter {
    pub fn new(publisher: Arc<dyn TwinPublisher>) -> Self {
        let topic = twin_update_topic(DEVICE_ID);
        debug!("Reporter publishing to {}", topic);
        Self {
            publisher,
            topic,
            last_timestamp: AtomicI64::new(0),
        }
    }

    pub fn report(&self, property: &str, value: &str) {
        let message = DeviceTwinUpdate::actual(self.next_base(), property, value);

        let payload = match message.to_payload() {
            Ok(p) => p,
            Err(e) => {
                error!("Failed to encode twin update for {}: {}", property, e);
                return;
            }
        };

        match self.publisher.publish(&self.topic, payload) {
            Ok(_) => debug!("Reported {}={}", property, value),
            Err(e) => warn!("Dropping twin update {}={}: {}", property, value, e),
        }
    }

    // Wall clock in milliseconds, never behind a previously issued stamp
    fn next_base(&self) -> BaseMessage {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self.last_timestamp.fetch_max(now, Ordering::SeqCst);
        BaseMessage {
            event_id: Uuid::new_v4().to_string(),
            timestamp: previous.max(now),
        }
    }
}
