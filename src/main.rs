use clap::Parser;
use hap_climate_sensor::accessory::{App, STATE_DOMAIN};
use hap_climate_sensor::config::{Config, load_dotenv};
use hap_climate_sensor::hap::server::{LogEventRaiser, ServerState, handle_server_state_update};
use hap_climate_sensor::sensor::{ClimateSensor, LogFaultIndicator, SimulatedClimateSensor};
use hap_climate_sensor::store::{FileKeyValueStore, KeyValueStore};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(name = "hap-climate-sensor")]
#[command(about = "HomeKit temperature and humidity sensor accessory")]
struct Args {
    /// Directory holding the persistent key-value store
    #[arg(long, env = "HAP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Seconds between sensor samples
    #[arg(long, default_value_t = 30, env = "HAP_SAMPLE_INTERVAL_SECS")]
    sample_interval_secs: u64,

    /// Start without a climate sensor (exercises the fault path)
    #[arg(long)]
    no_sensor: bool,

    /// Purge the stored accessory state and exit
    #[arg(long)]
    factory_reset: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn store_path(args: &Args) -> PathBuf {
    args.data_dir
        .clone()
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hap-climate-sensor")
        })
        .join("store.json")
}

#[tokio::main]
async fn main() {
    init_logger();
    info!("Starting HomeKit climate sensor accessory");

    load_dotenv();
    let args = Args::parse();
    let config = Config::from_env();
    info!("Configuration loaded:");
    info!("  Accessory Name: {}", config.accessory.name);
    info!("  Model: {}", config.accessory.model);
    info!("  Serial Number: {}", config.accessory.serial_number);
    info!("  Firmware Version: {}", config.accessory.firmware_version);

    let store = match FileKeyValueStore::open(store_path(&args)) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to open key-value store: {}", e);
            std::process::exit(1);
        }
    };

    if args.factory_reset {
        if let Err(e) = store.purge_domain(STATE_DOMAIN) {
            log::error!("Factory reset failed: {}", e);
            std::process::exit(1);
        }
        info!("Factory reset: purged stored accessory state");
        return;
    }

    // Probing happens once at startup; --no-sensor simulates absent
    // hardware and exercises the fault-indicator path.
    let simulated = (!args.no_sensor).then(|| Arc::new(SimulatedClimateSensor::new(21.0, 45.0)));
    let sensor = simulated
        .clone()
        .map(|s| s as Arc<dyn ClimateSensor>);
    let fault = LogFaultIndicator::new(config.sensor.fault_pin);

    let app = match App::new(&config, store, sensor, &fault) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            log::error!("Failed to initialize accessory: {}", e);
            std::process::exit(1);
        }
    };

    handle_server_state_update(ServerState::Running);
    info!("Accessory is running");
    info!("  - Press Ctrl+C to exit");

    // Periodically sample both characteristics the way the server's poll
    // path would; the read callbacks log each value and raise events.
    let app_clone = app.clone();
    let sample_task = tokio::spawn(async move {
        let server = LogEventRaiser;
        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_secs(args.sample_interval_secs));
        let mut tick: u32 = 0;
        loop {
            interval.tick().await;
            if let Some(sensor) = &simulated {
                // Deterministic drift keeps the log output alive
                sensor.set_celsius(21.0 + (tick % 8) as f32 * 0.25);
                sensor.set_percent(45.0 + (tick % 10) as f32 * 0.5);
            }
            tick = tick.wrapping_add(1);

            if let Err(e) = app_clone.read_temperature(&server) {
                log::error!("Temperature read failed: {}", e);
            }
            if let Err(e) = app_clone.read_humidity(&server) {
                log::error!("Humidity read failed: {}", e);
            }
        }
    });

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal");
        }
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
    }

    handle_server_state_update(ServerState::Stopping);
    sample_task.abort();
    handle_server_state_update(ServerState::Idle);

    info!("Accessory stopped");
}
