/*
 * Responsibility
 * - Config -> storage + auth service -> Router
 * - Router-level layers (HTTP plumbing, security headers, CORS)
 * - axum::serve() with graceful shutdown, then close the store exactly once
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StorageBackend};
use crate::repos::{self, DocumentStore, PgDocumentStore};
use crate::services::auth::build_auth_service;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG=info,bezzelo_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly; production: default hook, keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("load config")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting bezzelo server in {:?} mode on {} ({:?} storage)",
        config.app_env,
        config.addr,
        config.storage_backend
    );

    let store = build_store(&config).await?;
    let auth = build_auth_service(&config);
    let state = AppState::new(store.clone(), auth, config.admin_emails.clone());

    let app = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // runs whether serve returned cleanly or not
    store.close().await;
    tracing::info!("server stopped");

    served.context("serve")
}

async fn build_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            // Config::from_env guarantees DATABASE_URL for the postgres backend
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for postgres storage")?;

            let store = PgDocumentStore::connect(url, config.database_max_connections)
                .await
                .context("connect to postgres")?;
            store.migrate().await.context("run migrations")?;

            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(repos::memory_store()))
        }
    }
}

/// Full application router: routes, state, and every router-level layer.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
