mod config;
mod dispatch;
mod error;
mod gateway;
mod handlers;
mod lambda;
mod models;
mod routes;
mod server;
mod state;
mod store;

use config::{Config, RunMode};
use dispatch::NoteDispatcher;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.run_mode);

    tracing::info!("notes-lambda starting");
    config.log_startup();

    let store = store::from_config(&config).await?;
    let dispatcher = NoteDispatcher::new(store);

    match config.run_mode {
        RunMode::Lambda => lambda::run(dispatcher)
            .await
            .map_err(|err| anyhow::anyhow!(err))?,
        RunMode::Local => server::serve(&config, dispatcher).await?,
    }

    Ok(())
}

fn init_tracing(run_mode: RunMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match run_mode {
        // CloudWatch timestamps each line and does not render ANSI colors
        RunMode::Lambda => builder.with_ansi(false).without_time().init(),
        RunMode::Local => builder.init(),
    }
}
