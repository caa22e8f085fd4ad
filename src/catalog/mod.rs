//! Product search over a local sample dataset or the Open Food Facts upstream.

mod dto;
pub mod handlers;
pub mod local;
pub mod remote;
pub mod services;

use std::{str::FromStr, sync::Arc};

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub use dto::{Product, SearchPage, SearchQuery, SearchResponse};
pub use local::LocalCatalog;
pub use remote::OpenFoodFactsCatalog;
pub use services::ProductCatalog;

/// Which catalog answers a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Local,
    Remote,
}

impl FromStr for CatalogSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => anyhow::bail!("unknown catalog source: {other}"),
        }
    }
}

/// Both catalogs plus the configured default.
#[derive(Clone)]
pub struct Catalogs {
    pub local: Arc<dyn ProductCatalog>,
    pub remote: Arc<dyn ProductCatalog>,
    pub default_source: CatalogSource,
}

impl Catalogs {
    pub fn pick(&self, source: Option<CatalogSource>) -> &Arc<dyn ProductCatalog> {
        match source.unwrap_or(self.default_source) {
            CatalogSource::Local => &self.local,
            CatalogSource::Remote => &self.remote,
        }
    }
}

pub fn router() -> Router<AppState> {
    handlers::catalog_routes()
}
