#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use jobportal::{settings::PortalSettings, AppComponents, VERSION};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = PortalSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let components = AppComponents::from_settings(settings.clone())
        .map_err(|e| std::io::Error::other(format!("Failed to initialize components: {e:#}")))?;

    start_server(components, &settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if binding or running the server fails
async fn start_server(components: AppComponents, settings: &PortalSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, settings);

    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        let components = components.clone();
        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .configure(move |cfg| components.configure(cfg))
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &PortalSettings) {
    println!("Starting job portal gateway v{VERSION} on http://{bind_address}");
    println!();
    println!("Auth endpoints:");
    println!("  GET  /auth/callback?token=...        - Store token cookie and redirect");
    println!("  GET  /auth/google/callback?token=... - Same, Google OAuth redirect target");
    println!(
        "       landing: {}  login: {}",
        settings.routes.landing, settings.routes.login
    );
    println!();
    println!("Apify endpoints:");
    println!("  POST /api/apify/webhook - Receive webhook payload");
    println!("  GET  /api/apify/test    - Apify route liveness");
    println!();
    println!("System endpoints:");
    println!("  GET  /ping - Health check");
}
