use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PortalSettings {
    pub application: ApplicationSettings,
    pub routes: RouteSettings,
    pub cookies: CookieSettings,
    pub webhook: WebhookSettings,
    pub i18n: I18nSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

/// Frontend routes the auth callback redirects to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// Authenticated landing route, used after a token was stored
    pub landing: String,
    /// Login route, used when the callback carried no token
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CookieSettings {
    pub secure: bool,
    /// The frontend reads the `token` cookie from script, so this stays off unless
    /// every consumer of the token runs server-side.
    pub http_only: bool,
}

/// Where accepted webhook deliveries are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Log,
    File,
    Forward,
}

impl std::str::FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "file" => Ok(Self::File),
            "forward" => Ok(Self::Forward),
            other => Err(format!("unknown webhook sink '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Shared secret for HMAC-SHA256 body signatures. Empty disables verification.
    pub secret: String,
    pub signature_header: String,
    pub sink: SinkKind,
    pub file_path: String,
    pub forward_url: String,
    pub forward_timeout_secs: u64,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nSettings {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    /// Prefix redirect routes with the resolved language (`/en/dashboard`)
    pub prefix_routes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            landing: "/dashboard".to_string(),
            login: "/login".to_string(),
        }
    }
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            signature_header: "X-Apify-Signature".to_string(),
            sink: SinkKind::Log,
            file_path: "data/apify-webhooks.jsonl".to_string(),
            forward_url: String::new(),
            forward_timeout_secs: 10,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported_languages: vec!["en".to_string()],
            prefix_routes: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PortalSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_file();

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Self::initialize_logging(&settings.logging)?;
        Ok(settings)
    }

    /// Initialize `env_logger`, seeding `RUST_LOG` from the configured level when unset
    ///
    /// # Errors
    ///
    /// Returns an error if a logger was already installed
    fn initialize_logging(logging: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
        let env = env_logger::Env::default().default_filter_or(logging.level.clone());
        env_logger::Builder::from_env(env).try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `JOBPORTAL_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be read or is not valid TOML
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_toml_file(&default_config_path)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("JOBPORTAL_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::from_toml_file(&secrets_path)?;
                println!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                println!(
                    "ℹ JOBPORTAL_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a settings file. Missing sections and keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let toml_content = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_route_env_overrides(&mut settings.routes);
        Self::apply_cookie_env_overrides(&mut settings.cookies);
        Self::apply_webhook_env_overrides(&mut settings.webhook);
        Self::apply_i18n_env_overrides(&mut settings.i18n);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        Self::apply_parsed_env_override("PORT", &mut app_settings.port);
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    fn apply_route_env_overrides(route_settings: &mut RouteSettings) {
        if let Ok(landing) = std::env::var("LANDING_ROUTE") {
            route_settings.landing = landing;
        }
        if let Ok(login) = std::env::var("LOGIN_ROUTE") {
            route_settings.login = login;
        }
    }

    fn apply_cookie_env_overrides(cookie_settings: &mut CookieSettings) {
        Self::apply_parsed_env_override("COOKIE_SECURE", &mut cookie_settings.secure);
        Self::apply_parsed_env_override("COOKIE_HTTP_ONLY", &mut cookie_settings.http_only);
    }

    /// Apply environment overrides for webhook settings
    pub fn apply_webhook_env_overrides(webhook_settings: &mut WebhookSettings) {
        if let Ok(secret) = std::env::var("APIFY_WEBHOOK_SECRET") {
            webhook_settings.secret = secret;
        }
        if let Ok(header) = std::env::var("WEBHOOK_SIGNATURE_HEADER") {
            webhook_settings.signature_header = header;
        }
        Self::apply_parsed_env_override("WEBHOOK_SINK", &mut webhook_settings.sink);
        if let Ok(file_path) = std::env::var("WEBHOOK_FILE_PATH") {
            webhook_settings.file_path = file_path;
        }
        if let Ok(forward_url) = std::env::var("WEBHOOK_FORWARD_URL") {
            webhook_settings.forward_url = forward_url;
        }
        Self::apply_parsed_env_override(
            "WEBHOOK_FORWARD_TIMEOUT_SECS",
            &mut webhook_settings.forward_timeout_secs,
        );
        Self::apply_parsed_env_override(
            "WEBHOOK_MAX_BODY_BYTES",
            &mut webhook_settings.max_body_bytes,
        );
    }

    fn apply_i18n_env_overrides(i18n_settings: &mut I18nSettings) {
        if let Ok(language) = std::env::var("DEFAULT_LANGUAGE") {
            i18n_settings.default_language = language;
        }
        if let Ok(languages) = std::env::var("SUPPORTED_LANGUAGES") {
            i18n_settings.supported_languages = split_list(&languages);
        }
        Self::apply_parsed_env_override("I18N_PREFIX_ROUTES", &mut i18n_settings.prefix_routes);
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Helper function to apply parsed environment variable overrides.
    /// Unparseable values are ignored and the current value is kept.
    fn apply_parsed_env_override<T: std::str::FromStr>(env_var: &str, target: &mut T) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.parse::<T>() {
                *target = value;
            }
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        split_list(&self.application.cors_origins)
    }

    /// Whether webhook deliveries must carry a valid signature
    #[must_use]
    pub fn webhook_signature_required(&self) -> bool {
        !self.webhook.secret.is_empty()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
