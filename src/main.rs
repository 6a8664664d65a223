use std::process::ExitCode;

use anyhow::{Context, Result};

use ecommerce_dashboard::config::Config;
use ecommerce_dashboard::dashboard::Dashboard;
use ecommerce_dashboard::data::{clean::clean, loader};
use ecommerce_dashboard::server::{self, AppState};

fn main() -> ExitCode {
    env_logger::init();

    match run(Config::from_args(std::env::args().skip(1))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    let dataset = loader::load_file(&config.data_path)?;
    let cleaned = clean(dataset);
    log::info!(
        "{} records after cleaning ({} dropped)",
        cleaned.len(),
        cleaned.dropped
    );

    let dashboard = Dashboard::build(&cleaned, &config);
    let router = server::build_router(AppState::new(&dashboard)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;
    runtime.block_on(server::serve(router, config.bind_addr))
}
