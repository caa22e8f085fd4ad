use serde::{Deserialize, Deserializer, Serialize};

use super::CatalogSource;

/// Catalog product. Owned by the upstream, only ever read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_small_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

/// One page of matches as produced by a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub count: u64,
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub source: Option<CatalogSource>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub source: Option<CatalogSource>,
}

/// Search result as sent to clients. `error` is set only when the catalog
/// failed and the empty result stands in for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            count: 0,
            page,
            page_size,
            products: Vec::new(),
            error: None,
        }
    }
}

/// Upstream sends counters either as numbers or as numeric strings.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }

    match Option::<NumOrStr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumOrStr::Num(n)) => Ok(n),
        Some(NumOrStr::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
