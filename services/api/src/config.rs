use serde::Deserialize;

use foodgram_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Externally visible base URL used for absolute links. Env var: `PUBLIC_URL`.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Directory holding uploaded images. Env var: `MEDIA_ROOT`.
    #[serde(default = "default_media_root")]
    pub media_root: String,
    /// Default list page size. Env var: `PAGE_SIZE`.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Apply pending migrations on startup. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_api_port() -> u16 {
    8000
}

fn default_public_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_media_root() -> String {
    "media".to_owned()
}

fn default_page_size() -> u32 {
    6
}

impl Config for ApiConfig {}
