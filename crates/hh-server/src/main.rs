mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use hh_store::{AdminRequestRepository, FileStore, MemoryStore, SessionFlags, StoreConfig};
use hh_weather::WeatherClient;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState, SharedStore},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = hh_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = hh_core::load_catalog(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;
    let default_province = hh_core::find_province(&config.default_province)
        .with_context(|| format!("unknown province '{}'", config.default_province))?;

    let store_config = StoreConfig::from_app_config(&config);
    let store: SharedStore = Arc::new(FileStore::open(&config.data_dir)?);
    let requests = AdminRequestRepository::open(Arc::clone(&store), &store_config)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        requests = requests.requests().len(),
        pending = requests.pending().len(),
        "admin requests loaded"
    );

    let weather = WeatherClient::with_base_url(
        config.weather_timeout_secs,
        &config.weather_base_url,
    )?;

    let auth = AuthState::from_env(matches!(config.env, hh_core::Environment::Development))?;
    let state = AppState {
        store,
        requests: Arc::new(Mutex::new(requests)),
        session: Arc::new(SessionFlags::new(MemoryStore::new(), &store_config)),
        catalog: Arc::new(catalog),
        weather,
        default_province,
    };
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
