//! WooCommerce REST client used to populate the catalog.
//!
//! Products are pulled page by page from `/wp-json/wc/v3/products` until the
//! store returns a page shorter than `per_page`, or until the page cap is hit.

use reqwest::Client;
use segmenter_core::config::WooCommerceConfig;
use segmenter_core::Product;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Path of the WooCommerce products endpoint.
pub const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

/// Errors raised while pulling products from WooCommerce.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Transport failure or undecodable body.
    #[error("WooCommerce request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("WooCommerce returned HTTP {status} for page {page}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Page being fetched.
        page: u32,
        /// Response body.
        body: String,
    },

    /// The store answered with something other than a product array.
    #[error("WooCommerce page {page} is not a product array")]
    UnexpectedBody {
        /// Page being fetched.
        page: u32,
    },

    /// Every page up to the cap came back full.
    #[error("WooCommerce still returned full pages after {limit} pages")]
    PageLimit {
        /// Configured page cap.
        limit: u32,
    },
}

/// Products fetched from WooCommerce.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Mapped products, in store order.
    pub products: Vec<Product>,
    /// Non-empty pages fetched.
    pub pages: u32,
    /// Records that could not be mapped to a product.
    pub skipped: usize,
}

/// Client for the WooCommerce products API.
#[derive(Debug, Clone)]
pub struct WooCommerceClient {
    http: Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    per_page: u32,
    max_pages: u32,
}

impl WooCommerceClient {
    /// Creates a client with the default page size and timeout.
    pub fn new(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        let defaults = WooCommerceConfig::default();
        Self {
            http: create_http_client(Duration::from_secs(defaults.timeout_secs)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            per_page: defaults.per_page,
            max_pages: defaults.max_pages,
        }
    }

    /// Builds a client from configuration; `None` when credentials are missing.
    #[must_use]
    pub fn from_config(config: &WooCommerceConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let (Some(base_url), Some(key), Some(secret)) = (
            &config.base_url,
            &config.consumer_key,
            &config.consumer_secret,
        ) else {
            return None;
        };

        let mut client = Self::new(base_url.as_str(), key.as_str(), secret.as_str())
            .with_per_page(config.per_page)
            .with_max_pages(config.max_pages);
        client.http = create_http_client(Duration::from_secs(config.timeout_secs));
        Some(client)
    }

    /// Sets the number of products requested per page.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Sets the maximum number of pages one ingestion may fetch.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Store base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of raw WooCommerce products (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or a body
    /// that is not a JSON array.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, IngestError> {
        let url = format!("{}{PRODUCTS_PATH}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("consumer_key", self.consumer_key.as_str()),
                ("consumer_secret", self.consumer_secret.as_str()),
            ])
            .query(&[("page", page), ("per_page", self.per_page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Status {
                status: status.as_u16(),
                page,
                body,
            });
        }

        match response.json::<Value>().await? {
            Value::Array(items) => Ok(items),
            _ => Err(IngestError::UnexpectedBody { page }),
        }
    }

    /// Fetches every product, page by page, until a page holds fewer than
    /// `per_page` records.
    ///
    /// Records that cannot be mapped (unknown stock status, missing creation
    /// date) are skipped and logged.
    ///
    /// # Errors
    ///
    /// Returns the first page error; nothing is returned for earlier pages.
    /// Returns [`IngestError::PageLimit`] when `max_pages` full pages were
    /// fetched without reaching the end, which happens with stores that
    /// ignore the `page` parameter.
    pub async fn fetch_all(&self) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();

        for page in 1..=self.max_pages {
            let items = self.fetch_page(page).await?;
            if items.is_empty() {
                return Ok(report);
            }

            let fetched = items.len();
            for item in &items {
                match Product::from_woocommerce(item) {
                    Ok(product) => report.products.push(product),
                    Err(e) => {
                        tracing::warn!(page, error = %e, "Skipping WooCommerce product");
                        report.skipped += 1;
                    }
                }
            }

            tracing::info!(page, products = fetched, "Ingested WooCommerce page");
            report.pages = page;

            if fetched < self.per_page as usize {
                return Ok(report);
            }
        }

        tracing::warn!(limit = self.max_pages, "WooCommerce page cap reached");
        Err(IngestError::PageLimit {
            limit: self.max_pages,
        })
    }
}

/// Creates an HTTP client with request and connect timeouts.
fn create_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}
