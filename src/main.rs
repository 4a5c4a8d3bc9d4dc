use clap::Parser;
use pantry_match::{
    api::{handlers::AppState, routes},
    cli::{commands, Cli, Commands},
    config::Settings,
    Error, Result,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pantry_match=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host, csv } => {
            serve(settings, port, host, csv).await?;
        }
        Commands::Suggest {
            have,
            catalog,
            csv,
            explain,
        } => {
            let registry = commands::load_registry(&settings, csv)?;
            commands::suggest(
                &registry,
                catalog.as_deref(),
                &have,
                explain,
                settings.limits.max_query_length,
            )?;
        }
        Commands::Ingredients { catalog, csv } => {
            let registry = commands::load_registry(&settings, csv)?;
            commands::ingredients(&registry, catalog.as_deref())?;
        }
        Commands::Check { path } => {
            commands::check(&path)?;
        }
    }

    Ok(())
}

async fn serve(
    mut settings: Settings,
    port: Option<u16>,
    host: Option<String>,
    csv: Option<PathBuf>,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Pantry Match server");
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Catalogs are loaded once; a bad catalog aborts startup
    let registry = commands::load_registry(&settings, csv)?;
    for summary in registry.summaries() {
        info!(
            "Serving catalog '{}': {} recipes, {} ingredients{}",
            summary.name,
            summary.recipes,
            summary.ingredients,
            if summary.default { " (default)" } else { "" }
        );
    }

    let catalog_count = registry.len();
    let default_catalog = registry.default_name().to_string();

    let state = AppState {
        registry: Arc::new(registry),
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings)?;

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Pantry Match Server");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Catalogs: {catalog_count} (default: {default_catalog})");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/suggest?have=...");
    println!("  GET  /api/ingredients");
    println!("  GET  /api/catalogs");
    println!("  GET  /api/catalogs/:name/suggest?have=...");
    println!("  GET  /api/catalogs/:name/ingredients");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
