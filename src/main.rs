use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triplog::config::Config;
use triplog::core::AppError;
use triplog::modules::dashboard::controllers::dashboard_controller;
use triplog::modules::dashboard::services::DashboardService;
use triplog::modules::health::controllers::health_controller;
use triplog::modules::trips::controllers::trip_controller;
use triplog::modules::trips::repositories::{MySqlTripStore, TripStore};
use triplog::modules::trips::services::TripService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triplog=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing store connection string is fatal.
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");
    let tz = config
        .report_timezone()
        .expect("Invalid report timezone offset");

    tracing::info!("Starting triplog trip logging service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Report timezone: {}", config.app.report_tz_offset);

    // Create the database connection pool, once, before serving.
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let store: Arc<dyn TripStore> = Arc::new(MySqlTripStore::new(db_pool.clone()));
    let trip_service = Arc::new(TripService::new(store.clone(), tz));
    let dashboard_service = Arc::new(DashboardService::new(store, tz));

    let allowed_origins = config.cors.allowed_origins.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(build_cors(&allowed_origins))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                // Malformed bodies are validation faults, not 500s.
                AppError::validation(format!("Invalid request body: {}", err)).into()
            }))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(trip_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .route("/api/test", web::get().to(api_test))
            // Exact dashboard paths registered ahead of the /trip scope.
            .configure(dashboard_controller::configure)
            .configure(trip_controller::configure)
            .configure(health_controller::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

/// Connectivity probe used by the frontend during development
async fn api_test() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "message": "Backend is working!"
    }))
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        // Development default: any origin.
        Cors::permissive()
    } else {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600);
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors
    }
}
