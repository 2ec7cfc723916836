//! # MQTT Integration Module
//!
//! Broker side of the twin reporting path. The module is split in three:
//!
//! ```text
//! mqtt/
//! ├── config.rs        - Broker address and client settings
//! ├── publisher.rs     - TwinPublisher capability used by the reporter
//! └── mqtt_handler.rs  - Connection handshake, event loop task, rumqttc publisher
//! ```
//!
//! Publishing is QoS 0 and never waits on the network: messages go onto the
//! client's bounded request queue and the event loop task drains it. A full
//! queue or a dead event loop turns into a [`PublishError`] for the caller
//! to log and forget.
//!
//! The connection itself is a startup requirement. [`MqttHandler::connect`]
//! fails if the broker does not acknowledge within the configured timeout;
//! after that, transport errors are logged and the event loop keeps
//! reconnecting on its own.

pub mod config;
pub mod mqtt_handler;
pub mod publisher;

pub use config::MqttConfig;
pub use mqtt_handler::{MqttConnection, MqttError, MqttHandler, MqttPublisher};
pub use publisher::{PublishError, TwinPublisher};
