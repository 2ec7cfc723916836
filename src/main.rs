use std::sync::Arc;

use color_eyre::{eyre::WrapErr, Result};
use tl_mapper::config::AppConfig;
use tl_mapper::gpio::RppalPort;
use tl_mapper::light::Sequencer;
use tl_mapper::logging;
use tl_mapper::mqtt::MqttHandler;
use tl_mapper::shutdown;
use tl_mapper::twin::Reporter;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup()?;

    let (config, source) = AppConfig::load().await?;
    let _log = logging::init(&config.logging)?;
    info!("{}", source);
    debug!("{:?}", config);

    let port = RppalPort::open().wrap_err("Failed to open GPIO controller")?;

    let connection = MqttHandler::new(config.mqtt.clone())
        .connect()
        .await
        .wrap_err("Failed to connect to MQTT broker")?;

    let reporter = Reporter::new(Arc::new(connection.publisher()));
    let sequencer = Sequencer::create(Box::new(port), config.pins, reporter)
        .initialize()
        .wrap_err("Failed to configure lamp pins")?;

    let shutdown_token = CancellationToken::new();
    let _watcher = shutdown::spawn_signal_watcher(shutdown_token.clone());

    let stopped = sequencer.run_until_shutdown(shutdown_token).await;
    stopped.close();
    connection.disconnect().await;

    info!("exited");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}
