// ── Backend seam ──
//
// Editors talk to the catalog through this trait so their sequencing
// and state handling can be exercised without a network.

use std::future::Future;

use vitrine_api::{
    CatalogClient, Category, CategoryPayload, Product, ProductImage, ProductPayload, ResourceId,
    SkuPayload,
};

use crate::error::CoreError;

/// Every catalog endpoint the admin front-end calls.
pub trait CatalogBackend: Send + Sync + 'static {
    // ── Categories ───────────────────────────────────────────────────
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    fn get_category(
        &self,
        id: &ResourceId,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn create_category(
        &self,
        body: &CategoryPayload,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn update_category(
        &self,
        id: &ResourceId,
        body: &CategoryPayload,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn delete_category(&self, id: &ResourceId)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── Products ─────────────────────────────────────────────────────
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    fn get_product(&self, id: &ResourceId)
    -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn create_product(
        &self,
        body: &ProductPayload,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn update_product(
        &self,
        id: &ResourceId,
        body: &ProductPayload,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn delete_product(&self, id: &ResourceId)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── SKUs ─────────────────────────────────────────────────────────

    /// Product with its nested SKU list.
    fn product_skus(
        &self,
        product_id: &ResourceId,
    ) -> impl Future<Output = Result<Product, CoreError>> + Send;

    fn create_sku(
        &self,
        product_id: &ResourceId,
        body: &SkuPayload,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn update_sku(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        body: &SkuPayload,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_sku(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── SKU images ───────────────────────────────────────────────────
    fn list_sku_images(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
    ) -> impl Future<Output = Result<Vec<ProductImage>, CoreError>> + Send;

    fn upload_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<ProductImage, CoreError>> + Send;

    fn delete_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        image_id: &ResourceId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ── HTTP implementation ──────────────────────────────────────────────

impl CatalogBackend for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(CatalogClient::list_categories(self).await?)
    }

    async fn get_category(&self, id: &ResourceId) -> Result<Category, CoreError> {
        CatalogClient::get_category(self, id)
            .await
            .map_err(|e| CoreError::scoped(e, "category", id))
    }

    async fn create_category(&self, body: &CategoryPayload) -> Result<Category, CoreError> {
        Ok(CatalogClient::create_category(self, body).await?)
    }

    async fn update_category(
        &self,
        id: &ResourceId,
        body: &CategoryPayload,
    ) -> Result<Category, CoreError> {
        CatalogClient::update_category(self, id, body)
            .await
            .map_err(|e| CoreError::scoped(e, "category", id))
    }

    async fn delete_category(&self, id: &ResourceId) -> Result<(), CoreError> {
        CatalogClient::delete_category(self, id)
            .await
            .map_err(|e| CoreError::scoped(e, "category", id))
    }

    async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(CatalogClient::list_products(self).await?)
    }

    async fn get_product(&self, id: &ResourceId) -> Result<Product, CoreError> {
        CatalogClient::get_product(self, id)
            .await
            .map_err(|e| CoreError::scoped(e, "product", id))
    }

    async fn create_product(&self, body: &ProductPayload) -> Result<Product, CoreError> {
        Ok(CatalogClient::create_product(self, body).await?)
    }

    async fn update_product(
        &self,
        id: &ResourceId,
        body: &ProductPayload,
    ) -> Result<Product, CoreError> {
        CatalogClient::update_product(self, id, body)
            .await
            .map_err(|e| CoreError::scoped(e, "product", id))
    }

    async fn delete_product(&self, id: &ResourceId) -> Result<(), CoreError> {
        CatalogClient::delete_product(self, id)
            .await
            .map_err(|e| CoreError::scoped(e, "product", id))
    }

    async fn product_skus(&self, product_id: &ResourceId) -> Result<Product, CoreError> {
        self.get_product_skus(product_id)
            .await
            .map_err(|e| CoreError::scoped(e, "product", product_id))
    }

    async fn create_sku(&self, product_id: &ResourceId, body: &SkuPayload) -> Result<(), CoreError> {
        CatalogClient::create_sku(self, product_id, body)
            .await
            .map_err(|e| CoreError::scoped(e, "product", product_id))?;
        Ok(())
    }

    async fn update_sku(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        body: &SkuPayload,
    ) -> Result<(), CoreError> {
        CatalogClient::update_sku(self, product_id, sku_id, body)
            .await
            .map_err(|e| CoreError::scoped(e, "sku", sku_id))?;
        Ok(())
    }

    async fn delete_sku(&self, product_id: &ResourceId, sku_id: &ResourceId) -> Result<(), CoreError> {
        CatalogClient::delete_sku(self, product_id, sku_id)
            .await
            .map_err(|e| CoreError::scoped(e, "sku", sku_id))
    }

    async fn list_sku_images(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
    ) -> Result<Vec<ProductImage>, CoreError> {
        CatalogClient::list_sku_images(self, product_id, sku_id)
            .await
            .map_err(|e| CoreError::scoped(e, "sku", sku_id))
    }

    async fn upload_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProductImage, CoreError> {
        CatalogClient::upload_sku_image(self, product_id, sku_id, file_name, bytes)
            .await
            .map_err(|e| CoreError::scoped(e, "sku", sku_id))
    }

    async fn delete_sku_image(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        image_id: &ResourceId,
    ) -> Result<(), CoreError> {
        CatalogClient::delete_sku_image(self, product_id, sku_id, image_id)
            .await
            .map_err(|e| CoreError::scoped(e, "image", image_id))
    }
}
