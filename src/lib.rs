//! Traffic light twin mapper
//!
//! Cycles a three-lamp traffic light on Raspberry Pi GPIO pins and mirrors
//! every lamp change to its device twin over MQTT.
//!
//! ```text
//! Sequencer ──► GpioPort (rppal)
//!     │
//!     └──► Reporter ──► TwinPublisher (rumqttc) ──► $hw/events/device/<id>/twin/update
//!
//! Signal watcher ──cancel──► Sequencer ──► all lamps off
//! ```

pub mod config;
pub mod gpio;
pub mod light;
pub mod logging;
pub mod mqtt;
pub mod shutdown;
pub mod twin;
