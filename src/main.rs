mod app;
mod bindings;
mod callbacks;
mod chart;
mod color;
mod config;
mod data;
mod layout;
mod state;
mod ui;
mod web;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use log::{error, info};

use app::LaunchDashApp;
use config::Cli;
use data::model::LaunchTable;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    // The table is loaded once; any problem with it aborts startup.
    let table = match data::loader::load_file(&cli.data) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load launch data: {e:#}");
            return Err(e);
        }
    };
    info!(
        "Loaded {} launch records from {} sites {:?}, payload {}–{} kg",
        table.len(),
        table.sites().len(),
        table.sites(),
        table.min_payload(),
        table.max_payload()
    );
    let table = Arc::new(table);

    if cli.native {
        run_native(table)
    } else {
        run_server(table, &cli)
    }
}

fn run_server(table: Arc<LaunchTable>, cli: &Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(web::serve(table, cli.bind_addr(), cli.debug))
}

fn run_native(table: Arc<LaunchTable>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table)))),
    )
    .map_err(|e| anyhow!("native window failed: {e}"))
}
