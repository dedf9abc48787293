#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod adapters;
mod api;
mod config;
mod core_logic;
mod dataset;
mod error;

use adapters::sales_dataset::load_sales_dataset;
use api::routes::{routes, AppState};
use config::Settings;

use anyhow::Context;
use log::info;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;

    info!("Fetching sales dataset from {}", settings.dataset_url);
    let now = Instant::now();
    let df = load_sales_dataset(&settings.dataset_url)
        .await
        .with_context(|| format!("could not load dataset from {}", settings.dataset_url))?;
    info!(
        "Loaded {} records in {} ms",
        df.height(),
        now.elapsed().as_millis()
    );

    let state = Arc::new(AppState::new(df)?);

    // Start the webserver
    let addr = settings.socket_addr();
    info!("Starting web server on http://{}", addr);
    warp::serve(routes(state)).run(addr).await;

    Ok(())
}
