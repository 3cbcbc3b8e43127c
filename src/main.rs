//! Controle de Presença - desktop admin panel for classes, students,
//! attendance and mentor roll-calls.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use controle_presenca::client::ApiClient;
use controle_presenca::config::{AppConfig, ConfigLoadResult};
use controle_presenca::ui::App;

/// Desktop admin panel for the attendance backend.
#[derive(Parser)]
#[command(name = "controle-presenca")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Backend base URL for this session, overriding the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let (mut config, load_note) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, None),
        ConfigLoadResult::Missing => {
            let config = AppConfig::default();
            let note = match config.save(&config_path) {
                Ok(()) => format!("Config missing, wrote defaults to {}", config_path.display()),
                Err(e) => format!("Config missing and defaults could not be written: {e}"),
            };
            (config, Some(note))
        }
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), Some(format!("Config invalid, using defaults: {e}"))),
    };

    let _log_guard = init_logging(&config);

    tracing::info!("Controle de Presença starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);
    if let Some(note) = load_note {
        tracing::warn!("{note}");
    }

    if let Some(url) = cli.api_url {
        tracing::info!("Backend URL overridden from command line: {url}");
        config.api.base_url = url;
    }

    let client = ApiClient::new(&config.api.base_url).context("Invalid backend URL")?;
    tracing::info!("Backend: {}", client.base_url());

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Controle de Presença")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Controle de Presença",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(config, config_path, client, rt)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

/// Console logging plus an optional daily rolling file.
///
/// `RUST_LOG` wins over the configured level. The returned guard flushes the
/// file writer and must live until exit.
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if config.log.file_enabled {
        let appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "controle-presenca.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
