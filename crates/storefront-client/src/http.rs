//! # HTTP Product Store
//!
//! [`ProductStore`] over the public catalog REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Call                               Request                             │
//! │  ────                               ───────                             │
//! │  list_categories()              GET <base>/products/categories          │
//! │  list_products(All)             GET <base>/products                     │
//! │  list_products(Category(c))     GET <base>/products/category/<c>        │
//! │                                                                         │
//! │  <c> is percent-encoded as ONE path segment:                           │
//! │    "men's clothing"  →  /products/category/men's%20clothing             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any non-2xx status is an error regardless of body. So is a body that
//! does not decode into the expected JSON shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;
use url::Url;

use storefront_core::{Category, CategoryFilter, Product};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::ProductStore;

/// Catalog API client.
///
/// ## Usage
/// ```rust,no_run
/// use storefront_client::{ClientConfig, HttpProductStore, ProductStore};
/// use storefront_core::CategoryFilter;
///
/// # async fn demo() -> storefront_client::ClientResult<()> {
/// let store = HttpProductStore::new(&ClientConfig::default())?;
/// let categories = store.list_categories().await?;
/// let products = store.list_products(&CategoryFilter::All).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpProductStore {
    client: Client,
    base_url: Url,
}

impl HttpProductStore {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(HttpProductStore { client, base_url })
    }

    /// Appends `segments` to the base path, encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GETs `url` and decodes a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let started = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::from_transport(url.as_str(), e))?;

        let status = response.status();
        debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog API responded"
        );

        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_transport(url.as_str(), e))?;

        serde_json::from_slice(&body).map_err(|e| ClientError::DecodeFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ProductStore for HttpProductStore {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let url = self.endpoint(&["products", "categories"])?;
        self.get_json(url).await
    }

    async fn list_products(&self, category: &CategoryFilter) -> ClientResult<Vec<Product>> {
        let url = match category {
            CategoryFilter::All => self.endpoint(&["products"])?,
            CategoryFilter::Category(name) => {
                self.endpoint(&["products", "category", name.as_str()])?
            }
        };
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::net::SocketAddr;

    fn catalog() -> Value {
        json!([
            {"id": 1, "title": "Backpack", "price": 109.95, "description": "",
             "category": "men's clothing", "image": "https://img/1.jpg",
             "rating": {"rate": 3.9, "count": 120}},
            {"id": 5, "title": "Bracelet", "price": 695, "description": "",
             "category": "jewelery", "image": "https://img/5.jpg",
             "rating": {"rate": 4.6, "count": 400}},
            {"id": 9, "title": "Hard Drive", "price": 64, "description": "",
             "category": "electronics", "image": "https://img/9.jpg"}
        ])
    }

    fn catalog_routes() -> Router {
        Router::new()
            .route(
                "/products/categories",
                get(|| async { Json(json!(["electronics", "jewelery", "men's clothing"])) }),
            )
            .route("/products", get(|| async { Json(catalog()) }))
            .route(
                "/products/category/{category}",
                get(|Path(category): Path<String>| async move {
                    let filtered: Vec<Value> = catalog()
                        .as_array()
                        .into_iter()
                        .flatten()
                        .filter(|p| p["category"] == category.as_str())
                        .cloned()
                        .collect();
                    Json(Value::Array(filtered))
                }),
            )
    }

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn store_for(addr: SocketAddr) -> HttpProductStore {
        HttpProductStore::new(&ClientConfig::with_base_url(format!("http://{}", addr))).unwrap()
    }

    #[tokio::test]
    async fn test_list_categories() {
        let store = store_for(serve(catalog_routes()).await);
        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories, vec!["electronics", "jewelery", "men's clothing"]);
    }

    #[tokio::test]
    async fn test_list_all_products() {
        let store = store_for(serve(catalog_routes()).await);
        let products = store.list_products(&CategoryFilter::All).await.unwrap();

        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 5, 9]);
        // Missing rating decodes as absent, not as an error.
        assert!(products[2].rating.is_none());
    }

    #[tokio::test]
    async fn test_category_is_encoded_as_one_segment() {
        let store = store_for(serve(catalog_routes()).await);
        let products = store
            .list_products(&CategoryFilter::Category("men's clothing".into()))
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let addr = serve(Router::new().nest("/api", catalog_routes())).await;
        let store =
            HttpProductStore::new(&ClientConfig::with_base_url(format!("http://{}/api/", addr)))
                .unwrap();

        let products = store
            .list_products(&CategoryFilter::Category("jewelery".into()))
            .await
            .unwrap();
        assert_eq!(products[0].id, 5);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let router = Router::new().route(
            "/products",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(catalog())) }),
        );
        let store = store_for(serve(router).await);

        let err = store.list_products(&CategoryFilter::All).await.unwrap_err();
        assert!(matches!(err, ClientError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_error() {
        let router = Router::new().route("/products/categories", get(|| async { "<html>" }));
        let store = store_for(serve(router).await);

        let err = store.list_categories().await.unwrap_err();
        assert!(matches!(err, ClientError::DecodeFailed { .. }));
        assert!(err.is_response_error());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = store_for(addr);
        let err = store.list_products(&CategoryFilter::All).await.unwrap_err();
        assert!(err.is_network_error(), "unexpected error: {err:?}");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = HttpProductStore::new(&ClientConfig::with_base_url("mailto:shop@example.com"))
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
