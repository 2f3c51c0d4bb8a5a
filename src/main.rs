//! Flood Warning Service - Standalone Daemon
//!
//! A host process that continuously:
//! 1. Polls the EA flood-monitoring API for the configured location
//! 2. Merges flood areas and active warnings into one risk table
//! 3. Publishes each cycle's snapshot to per-area entities
//! 4. Logs entity state transitions for downstream consumption
//!
//! Usage:
//!   cargo run --release                        # Poll forever with floodwarn.toml
//!   cargo run --release -- --config other.toml # Alternate configuration file
//!   cargo run --release -- --once              # One refresh cycle, then exit
//!
//! Environment:
//!   FLOODWARN_CONFIG - configuration file path (overridden by --config)
//!   RUST_LOG         - tracing filter, e.g. floodwarn_service=debug

use floodwarn_service::config;
use floodwarn_service::coordinator::UpdateCoordinator;
use floodwarn_service::entity;
use floodwarn_service::ingest::ea::EaClient;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🌊 Flood Warning Service");
    println!("========================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<String> = None;
    let mut run_once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
            }
            "--once" => {
                run_once = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--config PATH] [--once]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let service_config = match config_path {
        Some(path) => config::load_config_from(&path),
        None => config::load_config(),
    };

    let session = &service_config.session;
    info!(
        "session filter: lat {}, long {}, dist {} km",
        session.latitude, session.longitude, session.distance
    );

    let client = EaClient::new(&session.latitude, &session.longitude, &session.distance);
    let coordinator = UpdateCoordinator::new(client, service_config.poll_config());

    // One full cycle before registering entities; without data there is
    // nothing to expose.
    if let Err(e) = coordinator.first_refresh().await {
        eprintln!("\n❌ Initial refresh failed: {}\n", e);
        eprintln!("Check the geographic filter in the configuration file and network access.\n");
        std::process::exit(1);
    }

    let entities = entity::entities_for(&coordinator.subscribe());
    println!("✓ Monitoring {} flood areas\n", entities.len());
    for area in &entities {
        info!(
            "{} ({}) - {}",
            area.unique_id(),
            area.friendly_name().unwrap_or_default(),
            area.state()
        );
    }

    if run_once {
        return;
    }

    // Log every area's state after each published cycle.
    let mut updates = coordinator.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let active = snapshot.values().filter(|r| r.risk_level > 0).count();
            info!("cycle published: {} areas, {} with active warnings", snapshot.len(), active);
            for record in snapshot.values().filter(|r| r.risk_level > 0) {
                info!(
                    "  {} ({}) risk {} - {} warning(s)",
                    record.name,
                    record.friendly_name,
                    record.risk_level,
                    record.current_warnings.len()
                );
            }
        }
    });

    if let Err(e) = coordinator.run().await {
        eprintln!("\n❌ Daemon error: {}\n", e);
        std::process::exit(1);
    }
}
