use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::dto::{lenient_u64, Product, SearchPage};
use super::services::ProductCatalog;

/// Open Food Facts over HTTP. Every request is aborted after the configured
/// timeout; there are no retries.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsCatalog {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UpstreamSearch {
    #[serde(default, deserialize_with = "lenient_u64")]
    count: u64,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct UpstreamProduct {
    #[serde(default, deserialize_with = "lenient_u64")]
    status: u64,
    product: Option<Product>,
}

impl OpenFoodFactsCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sensitivv/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl ProductCatalog for OpenFoodFactsCatalog {
    async fn search(&self, query: &str, page: u32, page_size: u32) -> anyhow::Result<SearchPage> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let page_param = page.to_string();
        let size_param = page_size.to_string();
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("search_terms", query),
                ("json", "1"),
                ("page", page_param.as_str()),
                ("page_size", size_param.as_str()),
            ])
            .send()
            .await
            .context("catalog search request failed")?;

        if !resp.status().is_success() {
            bail!("catalog search returned {}", resp.status());
        }

        let body: UpstreamSearch = resp.json().await.context("parse catalog search response")?;
        debug!(query, found = body.products.len(), count = body.count, "upstream search");
        Ok(SearchPage {
            count: body.count,
            products: body.products,
        })
    }

    async fn get_by_code(&self, code: &str) -> anyhow::Result<Option<Product>> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, code);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("catalog lookup request failed")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            bail!("catalog lookup returned {}", resp.status());
        }

        let body: UpstreamProduct = resp.json().await.context("parse catalog product response")?;
        if body.status != 1 {
            return Ok(None);
        }
        Ok(body.product.map(|mut p| {
            if p.code.is_empty() {
                p.code = code.to_string();
            }
            p
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves a fake upstream on an ephemeral port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fake_upstream() -> Router {
        Router::new()
            .route(
                "/cgi/search.pl",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "count": "2",
                        "page": q.get("page").cloned().unwrap_or_default(),
                        "page_size": 24,
                        "products": [
                            { "code": "1", "product_name": q.get("search_terms").cloned().unwrap_or_default() },
                            { "code": "2", "product_name": "other", "brands": "Acme" }
                        ]
                    }))
                }),
            )
            .route(
                "/api/v0/product/:file",
                get(|axum::extract::Path(file): axum::extract::Path<String>| async move {
                    let body: Value = if file == "123.json" {
                        json!({ "status": 1, "product": { "product_name": "Found" } })
                    } else {
                        json!({ "status": 0, "status_verbose": "product not found" })
                    };
                    Json(body)
                }),
            )
    }

    #[tokio::test]
    async fn search_parses_upstream_payload() {
        let base = spawn_upstream(fake_upstream()).await;
        let catalog = OpenFoodFactsCatalog::new(&base, Duration::from_secs(5)).unwrap();

        let page = catalog.search("oat milk", 1, 24).await.unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.products[0].product_name, "oat milk");
        assert_eq!(page.products[1].brands.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn lookup_fills_code_and_maps_missing_to_none() {
        let base = spawn_upstream(fake_upstream()).await;
        let catalog = OpenFoodFactsCatalog::new(&base, Duration::from_secs(5)).unwrap();

        let found = catalog.get_by_code("123").await.unwrap().unwrap();
        assert_eq!(found.code, "123");
        assert_eq!(found.product_name, "Found");
        assert!(catalog.get_by_code("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upstream_error_status_is_an_error() {
        let app = Router::new().route(
            "/cgi/search.pl",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = spawn_upstream(app).await;
        let catalog = OpenFoodFactsCatalog::new(&base, Duration::from_secs(5)).unwrap();

        let err = catalog.search("x", 1, 20).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn slow_upstream_hits_timeout() {
        let app = Router::new().route(
            "/cgi/search.pl",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = spawn_upstream(app).await;
        let catalog = OpenFoodFactsCatalog::new(&base, Duration::from_millis(200)).unwrap();

        assert!(catalog.search("x", 1, 20).await.is_err());
    }
}
