// HTTP request handlers
pub mod callback;
pub mod health;
pub mod webhook;

use actix_web::web;

pub use callback::auth_callback;
pub use health::health;
pub use webhook::{apify_method_not_allowed, apify_test, apify_webhook};

/// Register every route. Application data is registered separately, see
/// [`AppComponents`](crate::app::AppComponents).
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Identity provider callback
        .route("/auth/callback", web::get().to(auth_callback))
        .route("/auth/google/callback", web::get().to(auth_callback))
        // Apify
        .service(
            web::resource("/api/apify/webhook")
                .route(web::post().to(apify_webhook))
                .default_service(web::to(apify_method_not_allowed)),
        )
        .route("/api/apify/test", web::get().to(apify_test))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
