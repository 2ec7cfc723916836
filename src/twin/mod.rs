//! Device twin reporting
//!
//! Turns lamp changes into twin update documents and hands them to a
//! [`TwinPublisher`](crate::mqtt::publisher::TwinPublisher).

pub mod message;
pub mod reporter;

pub use message::{DeviceTwinUpdate, MsgTwin};
pub use reporter::{twin_update_topic, Reporter, DEVICE_ID};
