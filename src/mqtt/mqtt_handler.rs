use std::time::Duration;

use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::config::MqttConfig;
use super::publisher::{PublishError, TwinPublisher};

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum MqttError {
    #[error("Connection to {address} failed: {reason}")]
    ConnectionError { address: String, reason: String },

    #[error("Broker refused connection: {0}")]
    Refused(String),

    #[error("No acknowledgement from {address} within {timeout:?}")]
    Timeout { address: String, timeout: Duration },
}

/// Broker client before the connection has been acknowledged
pub struct MqttHandler {
    client: AsyncClient,
    eventloop: EventLoop,
    config: MqttConfig,
}

impl MqttHandler {
    pub fn new(config: MqttConfig) -> Self {
        let mut mqtt_options =
            MqttOptions::new(config.client_id.clone(), config.host.clone(), config.port);
        mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));

        let (client, eventloop) = AsyncClient::new(mqtt_options, config.request_capacity);

        MqttHandler {
            client,
            eventloop,
            config,
        }
    }

    fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Waits for the broker's ConnAck, then moves the event loop into a
    /// background task that keeps the session alive until
    /// [`MqttConnection::disconnect`].
    pub async fn connect(mut self) -> Result<MqttConnection, MqttError> {
        let address = self.address();
        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        info!("Connecting to MQTT broker at {}", address);

        let handshake = async {
            loop {
                match self.eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                        return if ack.code == ConnectReturnCode::Success {
                            Ok(())
                        } else {
                            Err(MqttError::Refused(format!("{:?}", ack.code)))
                        };
                    }
                    Ok(event) => debug!("Event before ConnAck: {:?}", event),
                    Err(e) => {
                        return Err(MqttError::ConnectionError {
                            address: address.clone(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
        };

        match tokio::time::timeout(timeout, handshake).await {
            Ok(Ok(())) => info!("Connected to MQTT broker at {}", address),
            Ok(Err(e)) => {
                error!("{}", e);
                return Err(e);
            }
            Err(_) => {
                error!("MQTT broker at {} did not acknowledge in time", address);
                return Err(MqttError::Timeout { address, timeout });
            }
        }

        // Owned by the connection; the process shutdown token must not stop
        // the loop before DISCONNECT has been written
        let stop = CancellationToken::new();
        let task = tokio::spawn(drive_event_loop(self.eventloop, stop.clone()));

        Ok(MqttConnection {
            client: self.client,
            stop,
            task,
        })
    }
}

// Runs until DISCONNECT has gone out or `stop` fires
async fn drive_event_loop(mut eventloop: EventLoop, stop: CancellationToken) {
    loop {
        tokio::select! {
            _ = stop.cancelled() => {
                warn!("MQTT event loop stopped without sending DISCONNECT");
                break;
            }

            event = eventloop.poll() => match event {
                Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                    debug!("DISCONNECT sent");
                    break;
                }
                Ok(Event::Incoming(Packet::ConnAck(_))) => info!("MQTT session re-established"),
                Ok(event) => debug!("MQTT event: {:?}", event),
                Err(e) => {
                    warn!("MQTT connection error: {}", e);
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }
}

/// Live broker session
pub struct MqttConnection {
    client: AsyncClient,
    stop: CancellationToken,
    task: JoinHandle<()>,
}

impl MqttConnection {
    pub fn publisher(&self) -> MqttPublisher {
        MqttPublisher::from(self.client.clone())
    }

    /// Queues a DISCONNECT and lets the event loop flush it
    ///
    /// If the loop has not sent it within a second it is stopped anyway and
    /// the broker only sees the socket close.
    pub async fn disconnect(self) {
        let mut task = self.task;
        if let Err(e) = self.client.try_disconnect() {
            warn!("Disconnect not queued: {}", e);
            self.stop.cancel();
        }

        let finished = match tokio::time::timeout(RECONNECT_DELAY, &mut task).await {
            Ok(finished) => finished,
            Err(_) => {
                self.stop.cancel();
                task.await
            }
        };
        if let Err(e) = finished {
            warn!("MQTT event loop task ended abnormally: {}", e);
        }
        info!("MQTT connection closed");
    }
}

/// [`TwinPublisher`] over a `rumqttc` client, QoS 0 and not retained
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
}

impl From<AsyncClient> for MqttPublisher {
    fn from(client: AsyncClient) -> Self {
        Self { client }
    }
}

impl TwinPublisher for MqttPublisher {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, payload)
            .map_err(|e| PublishError::Rejected(e.to_string()))
    }
}
