use std::{error::Error, sync::Arc};

use new_users::{
    admin_server::AdminServer,
    config::Config,
    platform::{InMemoryPlatform, Seed},
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "debug-logging")]
const DEFAULT_FILTER: &str = "new_users=debug,tower_http=debug";
#[cfg(not(feature = "debug-logging"))]
const DEFAULT_FILTER: &str = "new_users=info,tower_http=info";

fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    match config.get_log_directory() {
        Some(log_directory) => {
            let (writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::daily(log_directory, "new_users.log"),
            );
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let _guard = init_tracing(&config);

    let seed = match config.get_seed() {
        Some(path) => Seed::from_file(path)?,
        None => {
            warn!("No seed configured, starting with an empty platform");
            Seed::default()
        }
    };
    info!(
        "Loaded {} users and {} organizations",
        seed.users.len(),
        seed.organizations.len()
    );

    let admin_server = AdminServer::builder()
        .platform(Arc::new(InMemoryPlatform::from_seed(seed)))
        .config(config)
        .start_server()
        .await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    admin_server.signals.stop();

    Ok(())
}
