#![allow(clippy::doc_markdown)]
//! Segmenter Server - REST API for product segment evaluation.

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, Router};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use segmenter_core::{CatalogStore, Error, InMemoryCatalog, SegmenterConfig};
use segmenter_server::{api_router, ApiDoc, AppState, WooCommerceClient};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Segmenter Server - evaluate product segments over a WooCommerce catalog
#[derive(Parser, Debug)]
#[command(name = "segmenter-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file [default: segmenter.toml]
    #[arg(short, long, env = "SEGMENTER_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (overrides server.host)
    #[arg(long, env = "SEGMENTER_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, env = "SEGMENTER_PORT")]
    port: Option<u16>,

    /// Catalog snapshot file (overrides catalog.snapshot_path)
    #[arg(short, long, env = "SEGMENTER_SNAPSHOT")]
    snapshot: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SegmenterConfig::load_from_path(path)
            .map_err(Error::from)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SegmenterConfig::load().map_err(Error::from)?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(snapshot) = args.snapshot {
        config.catalog.snapshot_path = Some(snapshot);
    }
    config.validate().map_err(Error::from)?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Segmenter server...");

    let snapshot_path = config.catalog.snapshot_path.as_ref().map(PathBuf::from);
    let catalog = load_catalog(snapshot_path.as_deref())?;
    tracing::info!("Catalog ready with {} products", catalog.len());

    let woocommerce = WooCommerceClient::from_config(&config.woocommerce);
    if woocommerce.is_none() {
        tracing::warn!("WooCommerce credentials not set, ingestion is disabled");
    }

    let state = Arc::new(AppState {
        catalog,
        woocommerce,
        snapshot_path,
    });

    // Swagger UI (stateless router)
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    // Build main app with Swagger UI
    let app = api_router(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .merge(Router::<()>::new().merge(swagger_ui))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Segmenter server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the snapshot when it exists, otherwise starts with an empty catalog.
fn load_catalog(snapshot_path: Option<&Path>) -> anyhow::Result<InMemoryCatalog> {
    match snapshot_path {
        Some(path) if path.exists() => InMemoryCatalog::from_snapshot(path)
            .with_context(|| format!("loading catalog snapshot {}", path.display())),
        Some(path) => {
            tracing::info!(
                "Snapshot {} does not exist yet, starting with an empty catalog",
                path.display()
            );
            Ok(InMemoryCatalog::new())
        }
        None => Ok(InMemoryCatalog::new()),
    }
}
