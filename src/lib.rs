#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the gateway
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod auth;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod settings;
pub mod utils;
pub mod webhook;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use app::AppComponents;
pub use handlers::{
    apify_method_not_allowed, apify_test, apify_webhook, auth_callback, configure_services, health,
};
pub use models::AuthCallbackResult;
pub use settings::PortalSettings;
