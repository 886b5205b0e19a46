use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use skillboard::{
    cache::{Cache, RedisCache},
    config::Config,
    error::Error,
    processor::{queue::RefreshQueue, ProcessorService},
    scheduler, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        tracing::error!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let valkey = startup::connect_to_valkey(&config).await?;
    let esi = startup::build_esi_client(&config)?;

    let cache: Arc<dyn Cache> = Arc::new(RedisCache::new(valkey.clone()));
    let synchronizers = startup::build_synchronizers(&db, cache, &esi);
    let dispatcher = startup::build_dispatcher(&synchronizers);

    // Keep the handle alive for the life of the process.
    let _scheduler = scheduler::start_scheduler(&db, &valkey).await?;

    info!("skillboard mirror started");

    let queue = RefreshQueue::new(valkey);
    ProcessorService::new(db, queue, dispatcher).run().await
}
