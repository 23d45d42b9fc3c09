//! Pokémon memory game backend entrypoint wiring the REST routes, the PokéAPI client and storage.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poke_simon_back::{
    config::AppConfig,
    dao::{game_store::MemoryGameStore, pokedex::PokeApiClient},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let catalog = PokeApiClient::new(&config.pokeapi_base_url, config.request_timeout)
        .context("building Pokémon API client")?;
    let app_state = AppState::new(config, Arc::new(catalog));

    match env::var("GAME_STORE").as_deref() {
        Ok("memory") => {
            warn!("using in-memory game store; games are lost on restart");
            app_state
                .install_game_store(Arc::new(MemoryGameStore::new()))
                .await;
        }
        _ => spawn_storage(app_state.clone()),
    }

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3002);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

#[cfg(feature = "mongo-store")]
fn spawn_storage(state: SharedState) {
    let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let mongo_db = env::var("MONGO_DB").ok();
    tokio::spawn(mongo::run_supervisor(state, mongo_uri, mongo_db));
}

#[cfg(not(feature = "mongo-store"))]
fn spawn_storage(state: SharedState) {
    warn!("built without a database backend; falling back to the in-memory game store");
    tokio::spawn(async move {
        state
            .install_game_store(Arc::new(MemoryGameStore::new()))
            .await;
    });
}

#[cfg(feature = "mongo-store")]
mod mongo {
    use std::{sync::Arc, time::Duration};

    use tokio::time::sleep;
    use tracing::{info, warn};

    use poke_simon_back::{
        dao::game_store::mongodb::{MongoConfig, MongoGameStore},
        state::SharedState,
    };

    const INITIAL_DELAY: Duration = Duration::from_secs(1);
    const MAX_DELAY: Duration = Duration::from_secs(10);
    const HEALTHY_PING_INTERVAL: Duration = Duration::from_secs(5);

    /// Supervises the MongoDB connection by retrying in the background and toggling
    /// degraded mode when connectivity changes.
    pub async fn run_supervisor(state: SharedState, uri: String, db_name: Option<String>) {
        let mut delay = INITIAL_DELAY;

        loop {
            if let Some(store) = state.game_store().await {
                match store.health_check().await {
                    Ok(()) => {
                        // Healthy connection: reset the retry backoff and avoid
                        // hammering the database with pings.
                        delay = INITIAL_DELAY;
                        sleep(HEALTHY_PING_INTERVAL).await;
                    }
                    Err(err) => {
                        // Existing connection failed: flip to degraded mode and try
                        // to revive the same store before building a new one.
                        warn!(error = %err, "MongoDB ping failed; entering degraded mode");
                        state.clear_game_store().await;
                        match store.try_reconnect().await {
                            Ok(()) => {
                                info!("MongoDB connection re-established");
                                state.install_game_store(store).await;
                                delay = INITIAL_DELAY;
                            }
                            Err(err) => {
                                warn!(error = %err, "MongoDB reconnect failed");
                                sleep(delay).await;
                                delay = (delay * 2).min(MAX_DELAY);
                            }
                        }
                    }
                }
                continue;
            }

            let connected = match MongoConfig::from_uri(&uri, db_name.as_deref()).await {
                Ok(config) => MongoGameStore::connect(config).await,
                Err(err) => Err(err),
            };

            match connected {
                Ok(store) => {
                    info!("connected to MongoDB; leaving degraded mode");
                    state.install_game_store(Arc::new(store)).await;
                    delay = INITIAL_DELAY;
                }
                Err(err) => {
                    warn!(error = %err, "MongoDB connection attempt failed");
                    sleep(delay).await;
                    delay = (delay * 2).min(MAX_DELAY);
                }
            }
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
