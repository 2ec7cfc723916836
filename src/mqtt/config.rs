use serde::{Deserialize, Serialize};

/// Broker connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive_secs: u64,
    /// Time allowed for the broker to acknowledge the connection at startup
    pub connect_timeout_secs: u64,
    /// Capacity of the outgoing request queue; publishes beyond it are dropped
    pub request_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1883,
            client_id: "receive-client".to_string(),
            keep_alive_secs: 5,
            connect_timeout_secs: 5,
            request_capacity: 100,
        }
    }
}
