mod advisor;
mod config;
mod db;
mod errors;
mod export;
mod models;
mod planning;
mod recommendation;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::build_advisor;
use crate::config::{Config, ExportTarget, S3Config, StoreBackend};
use crate::db::create_pool;
use crate::export::sink::{DirectorySink, ExportSink, S3Sink};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::persistence::{
    InMemoryPersistence, PgPersistence, PlanPersistence, RedisPersistence,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting advisor v{}", env!("CARGO_PKG_VERSION"));

    let advisor = build_advisor(&config)?;
    let plans = build_persistence(&config).await?;
    info!("Plan store backend: {}", plans.backend());
    let export_sink = build_export_sink(&config).await?;

    let state = AppState {
        advisor,
        plans,
        export_sink,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_persistence(config: &Config) -> Result<Arc<dyn PlanPersistence>> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryPersistence::new())),
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres plan store")?;
            let pool = create_pool(url).await?;
            Ok(Arc::new(PgPersistence::new(pool)))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis plan store")?;
            let client = redis::Client::open(url)?;
            info!("Redis client initialized");
            Ok(Arc::new(RedisPersistence::new(client)))
        }
    }
}

async fn build_export_sink(config: &Config) -> Result<Arc<dyn ExportSink>> {
    match config.export_target {
        ExportTarget::Directory => {
            info!("Exporting plans to {}", config.export_dir.display());
            Ok(Arc::new(DirectorySink::new(config.export_dir.clone())))
        }
        ExportTarget::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("S3 settings are required for the s3 export sink")?;
            let client = build_s3_client(s3).await;
            info!("Exporting plans to s3://{}", s3.bucket);
            Ok(Arc::new(S3Sink::new(client, s3.bucket.clone())))
        }
    }
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3.access_key_id,
        &s3.secret_access_key,
        None,
        None,
        "advisor-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&s3.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&sdk_config)
}
