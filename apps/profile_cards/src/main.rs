mod backend_bridge;
mod controller;
mod media;
mod startup;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use client_core::ProfileClient;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::start_backend_bridge};
use crate::controller::events::UiEvent;
use crate::startup::{resolve_settings, Args};
use crate::ui::ProfileCardsApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing::info!(
        users_url = %settings.users_url,
        avatar_base_url = %settings.avatar_base_url,
        profile_limit = settings.profile_limit,
        load_delay_ms = settings.load_delay.as_millis() as u64,
        "starting profile cards"
    );
    let load_delay = settings.load_delay;
    let client = ProfileClient::new(settings).context("failed to build profile client")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    start_backend_bridge(cmd_rx, ui_tx, Arc::new(client));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Profile Cards")
            .with_inner_size([1040.0, 760.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Profile Cards",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ProfileCardsApp::bootstrap(
                cmd_tx, ui_rx, load_delay,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
