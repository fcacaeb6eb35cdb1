use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread};
use controller::events::UiEvent;
use ui::{CatalogApp, PersistedCatalogSettings, StartupConfig, SETTINGS_STORAGE_KEY};

#[derive(Debug, Parser)]
#[command(name = "catalog-admin", about = "Desktop admin for the vehicle catalog")]
struct Args {
    /// Base URL of the catalog REST backend.
    #[arg(
        long,
        env = "CATALOG_SERVER_URL",
        default_value = "http://127.0.0.1:4000/api"
    )]
    server_url: String,

    /// Tracing filter, e.g. `info` or `desktop_gui=debug`.
    #[arg(long, env = "CATALOG_LOG", default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_filter))
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(args.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Vehicle Catalog Admin")
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Vehicle Catalog Admin",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedCatalogSettings>(&text).ok())
            });
            Ok(Box::new(CatalogApp::bootstrap(
                cmd_tx,
                ui_rx,
                persisted,
                StartupConfig {
                    server_url: args.server_url,
                },
            )))
        }),
    )
}
