// Async HTTP client for the catalog REST API.
//
// All paths are built from segments appended to the configured base URL,
// e.g. `https://api.example.com/v1/` + ["products", "3", "skus"]. Each
// segment is percent-encoded, so an id can never address another endpoint.

use reqwest::multipart;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    Category, CategoryPayload, Product, ProductImage, ProductPayload, ProductSku, ResourceId,
    SkuPayload,
};

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the catalog API.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `segments` to the base path, one path segment each.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidPathSegment((*bad).to_owned()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &[&str],
        form: multipart::Form,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let resp = self.http.post(url).multipart(form).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &[&str]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Categories ───────────────────────────────────────────────────

    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.get(&["categories"]).await
    }

    pub async fn get_category(&self, id: &ResourceId) -> Result<Category, Error> {
        self.get(&["categories", &id.to_string()]).await
    }

    pub async fn create_category(&self, body: &CategoryPayload) -> Result<Category, Error> {
        self.post(&["categories"], body).await
    }

    pub async fn update_category(
        &self,
        id: &ResourceId,
        body: &CategoryPayload,
    ) -> Result<Category, Error> {
        self.put(&["categories", &id.to_string()], body).await
    }

    pub async fn delete_category(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&["categories", &id.to_string()]).await
    }

    // ── Products ─────────────────────────────────────────────────────

    pub async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.get(&["products"]).await
    }

    pub async fn get_product(&self, id: &ResourceId) -> Result<Product, Error> {
        self.get(&["products", &id.to_string()]).await
    }

    pub async fn create_product(&self, body: &ProductPayload) -> Result<Product, Error> {
        self.post(&["products"], body).await
    }

    pub async fn update_product(
        &self,
        id: &ResourceId,
        body: &ProductPayload,
    ) -> Result<Product, Error> {
        self.put(&["products", &id.to_string()], body).await
    }

    pub async fn delete_product(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&["products", &id.to_string()]).await
    }

    // ── SKUs ─────────────────────────────────────────────────────────

    /// Fetch a product together with its nested SKU list.
    pub async fn get_product_skus(&self, product_id: &ResourceId) -> Result<Product, Error> {
        self.get(&["products", &product_id.to_string(), "skus"])
            .await
    }

    pub async fn create_sku(
        &self,
        product_id: &ResourceId,
        body: &SkuPayload,
    ) -> Result<ProductSku, Error> {
        self.post(&["products", &product_id.to_string(), "skus"], body)
            .await
    }

    /// Replace every field of an existing SKU.
    pub async fn update_sku(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        body: &SkuPayload,
    ) -> Result<ProductSku, Error> {
        let (product, sku) = (product_id.to_string(), sku_id.to_string());
        self.put(&["products", &product, "skus", &sku], body).await
    }

    pub async fn delete_sku(&self, product_id: &ResourceId, sku_id: &ResourceId) -> Result<(), Error> {
        let (product, sku) = (product_id.to_string(), sku_id.to_string());
        self.delete(&["products", &product, "skus", &sku]).await
    }

    // ── SKU images ───────────────────────────────────────────────────

    pub async fn list_sku_images(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
    ) -> Result<Vec<ProductImage>, Error> {
        let (product, sku) = (product_id.to_string(), sku_id.to_string());
        self.get(&["products", &product, "skus", &sku, "images"])
            .await
    }

    /// Upload one image file as multipart field `image`.
    pub async fn upload_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProductImage, Error> {
        let (product, sku) = (product_id.to_string(), sku_id.to_string());
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part("image", part);
        self.post_multipart(&["products", &product, "skus", &sku, "images"], form)
            .await
    }

    pub async fn delete_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        image_id: &ResourceId,
    ) -> Result<(), Error> {
        let (product, sku, image) = (
            product_id.to_string(),
            sku_id.to_string(),
            image_id.to_string(),
        );
        self.delete(&["products", &product, "skus", &sku, "images", &image])
            .await
    }
}
