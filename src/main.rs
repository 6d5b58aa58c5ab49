use axum::Router;
use std::net::{SocketAddr, TcpListener};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoparc::{api, config, db, format::PriceFormat, seed, AppState};

/// Find an available port starting from the preferred port
fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port + 1)..(preferred_port + 100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoparc=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    // Check for seed flag
    if std::env::var("SEED_DEMO").is_ok() {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    // Build API router
    let state = AppState::new(db, PriceFormat::default(), config.upload_dir.clone());
    let api_router = api::api_router(state);

    // Swagger UI
    use autoparc::api_docs::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    let mut cors_allowed_origins = Vec::new();
    for origin in &config.cors_allowed_origins {
        match origin.parse::<axum::http::HeaderValue>() {
            Ok(v) => cors_allowed_origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let app = Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .nest_service("/", ServeDir::new("static"))
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(cors_allowed_origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Find available port
    let port = find_available_port(config.port).expect("Failed to find available port");

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("autoparc server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
