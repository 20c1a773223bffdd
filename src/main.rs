use std::sync::Arc;

use sports_gear_api::app::app;
use sports_gear_api::config::config;
use sports_gear_api::state::AppState;
use sports_gear_api::store::{MemoryStore, NewUser, PostgresStore, Role, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sports_gear_api=info,tower_http=info".into()),
        )
        .init();

    let config = config();
    tracing::info!("Starting Sports Gear API in {:?} mode", config.environment);

    let token_secret = config
        .security
        .token_secret
        .clone()
        .ok_or_else(|| anyhow::anyhow!("ACCESS_TOKEN_SECRET must be set"))?;

    let store: Arc<dyn Store> = match config.database.url.as_deref() {
        Some(url) => Arc::new(PostgresStore::connect(url, &config.database).await?),
        None => {
            tracing::warn!("DATABASE_URL is not set; using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    if let Some(email) = config.security.bootstrap_admin_email.as_deref() {
        bootstrap_admin(store.as_ref(), email).await?;
    }

    let app = app(AppState::new(Arc::clone(&store), token_secret));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🚀 Sports Gear API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}

/// Promote (or create) the configured bootstrap admin. Role grants are
/// admin-gated over HTTP, so the first admin has to come from config.
async fn bootstrap_admin(store: &dyn Store, email: &str) -> anyhow::Result<()> {
    let user = match store.find_user(email).await? {
        Some(user) => user,
        None => {
            store
                .insert_user(NewUser {
                    name: "Administrator".to_string(),
                    email: email.to_string(),
                })
                .await?
        }
    };

    if user.role != Role::Admin {
        store.assign_role(user.id, Role::Admin).await?;
        tracing::info!("Bootstrapped '{}' as admin", email);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
