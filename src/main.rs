use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use savings_advisor::config::Settings;
use savings_advisor::core::{Analyzer, ModelHandle};
use savings_advisor::routes::{self, AppState};
use savings_advisor::services::PostgresClient;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting savings advisor service...");

    // The model loads lazily; warm it here so a bad file shows up at startup.
    let model = Arc::new(ModelHandle::from_path(&settings.model.path));
    match model.get() {
        Ok(m) => info!("Savings model ready: {} v{}", m.name(), m.version()),
        Err(e) => warn!("Savings model not loaded ({}), predictions will fail until fixed", e),
    }

    let analyzer = Analyzer::new(model);

    let history = match &settings.database {
        Some(db) => match PostgresClient::from_settings(
            &db.url,
            db.max_connections,
            db.min_connections,
            db.acquire_timeout_secs,
            db.idle_timeout_secs,
        )
        .await
        {
            Ok(client) => {
                info!("Analysis history enabled");
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to connect to PostgreSQL ({}), running without history", e);
                None
            }
        },
        None => {
            info!("No database configured, analysis history disabled");
            None
        }
    };

    let app_state = AppState { analyzer, history };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .configure(routes::configure_app(app_state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
