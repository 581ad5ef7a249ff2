// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod component;
mod config;
mod constants;
mod error;
mod ui;
mod util;

use api::ApiClient;
use crate::config::Config;
use eframe::egui;
use std::sync::Arc;
use tracing::info;

fn main() -> error::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    info!(
        config = %config.config_path.display(),
        api = %config.api.base_url,
        "Starting"
    );

    let client = ApiClient::with_timeout(&config.api.base_url, config.api.timeout())?;
    let runtime = tokio::runtime::Runtime::new()?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.app.width, config.app.height])
         // Wayland user can use app-id to customize window's behavior
        .with_app_id(constants::APP_ID);

    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        ::config::constants::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, config, runtime, Arc::new(client))))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
