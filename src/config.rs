use serde::Deserialize;

use crate::catalog::CatalogSource;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Product catalog settings: which source answers searches by default and how
/// the remote upstream is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    pub base_url: String,
    pub timeout_secs: u64,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::Local,
            base_url: "https://world.openfoodfacts.org".into(),
            timeout_secs: 30,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sensitivv".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sensitivv-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };

        let defaults = CatalogConfig::default();
        let source = match std::env::var("CATALOG_SOURCE") {
            Ok(v) => v.parse::<CatalogSource>()?,
            Err(_) => defaults.source,
        };
        let catalog = CatalogConfig {
            source,
            base_url: std::env::var("CATALOG_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env_parse("CATALOG_TIMEOUT_SECS", defaults.timeout_secs),
            default_page_size: env_parse("SEARCH_DEFAULT_PAGE_SIZE", defaults.default_page_size),
            max_page_size: env_parse("SEARCH_MAX_PAGE_SIZE", defaults.max_page_size),
        };

        Ok(Self {
            database_url,
            jwt,
            catalog,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
