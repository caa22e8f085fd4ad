use async_trait::async_trait;
use tracing::{debug, warn};

use super::dto::{Product, SearchPage, SearchResponse};
use crate::config::CatalogConfig;

/// A source of products that can be searched by free text and looked up by code.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// `page` is 1-based. Implementations return at most `page_size` products.
    async fn search(&self, query: &str, page: u32, page_size: u32) -> anyhow::Result<SearchPage>;

    async fn get_by_code(&self, code: &str) -> anyhow::Result<Option<Product>>;
}

/// Page and page size after defaults and clamping.
pub fn normalize_paging(page: Option<u32>, page_size: Option<u32>, cfg: &CatalogConfig) -> (u32, u32) {
    let max = cfg.max_page_size.max(1);
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(cfg.default_page_size).clamp(1, max);
    (page, page_size)
}

/// Runs a search and never fails: a blank query short-circuits to an empty
/// result, and a catalog error becomes an empty result carrying `error`.
pub async fn search_products(
    catalog: &dyn ProductCatalog,
    query: &str,
    page: u32,
    page_size: u32,
) -> SearchResponse {
    let query = query.trim();
    if query.is_empty() {
        return SearchResponse::empty(page, page_size);
    }

    match catalog.search(query, page, page_size).await {
        Ok(SearchPage { count, mut products }) => {
            products.truncate(page_size as usize);
            debug!(query, page, found = products.len(), count, "search ok");
            SearchResponse {
                count,
                page,
                page_size,
                products,
                error: None,
            }
        }
        Err(e) => {
            warn!(error = %e, query, "search failed; answering with empty result");
            SearchResponse {
                error: Some(format!("search failed: {e}")),
                ..SearchResponse::empty(page, page_size)
            }
        }
    }
}
