// ── In-memory backend for unit tests ──
//
// Behaves like a small catalog server and records every call in order,
// so tests can assert on sequencing as well as on state.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use vitrine_api::{
    Category, CategoryPayload, FieldValue, Product, ProductImage, ProductPayload, ProductSku,
    ResourceId, SkuPayload,
};

use crate::backend::CatalogBackend;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCategories,
    GetCategory(ResourceId),
    CreateCategory(serde_json::Value),
    UpdateCategory(ResourceId, serde_json::Value),
    DeleteCategory(ResourceId),
    ListProducts,
    GetProduct(ResourceId),
    CreateProduct(serde_json::Value),
    UpdateProduct(ResourceId, serde_json::Value),
    DeleteProduct(ResourceId),
    ProductSkus(ResourceId),
    CreateSku {
        product_id: ResourceId,
        body: serde_json::Value,
    },
    UpdateSku {
        product_id: ResourceId,
        sku_id: ResourceId,
        body: serde_json::Value,
    },
    DeleteSku {
        product_id: ResourceId,
        sku_id: ResourceId,
    },
    ListImages(ResourceId),
    UploadImage {
        sku_id: ResourceId,
        file_name: String,
        len: usize,
    },
    DeleteImage(ResourceId),
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    categories: Vec<Category>,
    products: Vec<Product>,
    images: HashMap<ResourceId, Vec<ProductImage>>,
    calls: Vec<Call>,
    failing_skus: HashSet<String>,
    fail_fetches: bool,
    fail_deletes: bool,
}

impl State {
    fn allocate_id(&mut self) -> ResourceId {
        self.next_id += 1;
        ResourceId::Numeric(self.next_id)
    }

    fn product_mut(&mut self, id: &ResourceId) -> Result<&mut Product, CoreError> {
        self.products
            .iter_mut()
            .find(|p| p.id.as_ref() == Some(id))
            .ok_or_else(|| CoreError::not_found("product", id))
    }

    fn check_fetch(&self) -> Result<(), CoreError> {
        if self.fail_fetches {
            return Err(CoreError::ConnectionFailed {
                url: "http://catalog.test/".into(),
                reason: "connection refused".into(),
            });
        }
        Ok(())
    }

    fn check_delete(&self) -> Result<(), CoreError> {
        if self.fail_deletes {
            return Err(CoreError::Api {
                message: "cannot delete".into(),
                status: Some(409),
            });
        }
        Ok(())
    }

    fn check_sku(&self, body: &SkuPayload) -> Result<(), CoreError> {
        if self.failing_skus.contains(&body.sku) {
            return Err(CoreError::Api {
                message: format!("sku {} rejected", body.sku),
                status: Some(422),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

/// A persisted SKU with small fixed prices.
pub fn sku(id: u64, product_id: u64, code: &str) -> ProductSku {
    ProductSku {
        id: Some(ResourceId::Numeric(id)),
        product_id: Some(ResourceId::Numeric(product_id)),
        sku: code.into(),
        cost_price: FieldValue::from_input("10"),
        sale_price: FieldValue::from_input("20"),
        price: FieldValue::from_input("25"),
        quantity: FieldValue::from_input("5"),
    }
}

pub fn category(id: u64, name: &str) -> Category {
    Category {
        id: Some(ResourceId::Numeric(id)),
        name: name.into(),
        description: None,
    }
}

impl FakeBackend {
    pub fn with_product(id: u64, name: &str, skus: Vec<ProductSku>) -> Self {
        let backend = Self::default();
        backend.add_product(id, name, skus);
        backend
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.lock();
            state.next_id = categories.len() as u64 + 100;
            state.categories = categories;
        }
        backend
    }

    pub fn add_product(&self, id: u64, name: &str, skus: Vec<ProductSku>) {
        let mut state = self.lock();
        let highest = skus
            .iter()
            .filter_map(|s| match s.id {
                Some(ResourceId::Numeric(n)) => Some(n),
                _ => None,
            })
            .chain([id])
            .max()
            .unwrap_or(id);
        state.next_id = state.next_id.max(highest);
        state.products.push(Product {
            id: Some(ResourceId::Numeric(id)),
            name: name.into(),
            description: None,
            category_id: None,
            skus,
        });
    }

    pub fn add_image(&self, sku_id: u64, image_id: u64, url: &str) {
        let mut state = self.lock();
        state.next_id = state.next_id.max(image_id);
        state
            .images
            .entry(ResourceId::Numeric(sku_id))
            .or_default()
            .push(ProductImage {
                id: ResourceId::Numeric(image_id),
                sku_id: Some(ResourceId::Numeric(sku_id)),
                url: url.into(),
                position: None,
            });
    }

    /// Reject creates and updates whose payload carries this SKU code.
    pub fn fail_writes_for(&self, code: &str) {
        self.lock().failing_skus.insert(code.into());
    }

    pub fn fail_fetches(&self) {
        self.lock().fail_fetches = true;
    }

    pub fn fail_deletes(&self) {
        self.lock().fail_deletes = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_default()
}

impl CatalogBackend for FakeBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::ListCategories);
        state.check_fetch()?;
        Ok(state.categories.clone())
    }

    async fn get_category(&self, id: &ResourceId) -> Result<Category, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::GetCategory(id.clone()));
        state.check_fetch()?;
        state
            .categories
            .iter()
            .find(|c| c.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| CoreError::not_found("category", id))
    }

    async fn create_category(&self, body: &CategoryPayload) -> Result<Category, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::CreateCategory(json(body)));
        let category = Category {
            id: Some(state.allocate_id()),
            name: body.name.clone(),
            description: body.description.clone(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: &ResourceId,
        body: &CategoryPayload,
    ) -> Result<Category, CoreError> {
        let mut state = self.lock();
        state
            .calls
            .push(Call::UpdateCategory(id.clone(), json(body)));
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id.as_ref() == Some(id))
            .ok_or_else(|| CoreError::not_found("category", id))?;
        category.name.clone_from(&body.name);
        category.description.clone_from(&body.description);
        Ok(category.clone())
    }

    async fn delete_category(&self, id: &ResourceId) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteCategory(id.clone()));
        state.check_delete()?;
        state.categories.retain(|c| c.id.as_ref() != Some(id));
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::ListProducts);
        state.check_fetch()?;
        Ok(state.products.clone())
    }

    async fn get_product(&self, id: &ResourceId) -> Result<Product, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::GetProduct(id.clone()));
        state.check_fetch()?;
        state.product_mut(id).cloned()
    }

    async fn create_product(&self, body: &ProductPayload) -> Result<Product, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::CreateProduct(json(body)));
        let product = Product {
            id: Some(state.allocate_id()),
            name: body.name.clone(),
            description: body.description.clone(),
            category_id: body.category_id.clone(),
            skus: Vec::new(),
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &ResourceId,
        body: &ProductPayload,
    ) -> Result<Product, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::UpdateProduct(id.clone(), json(body)));
        let product = state.product_mut(id)?;
        product.name.clone_from(&body.name);
        product.description.clone_from(&body.description);
        product.category_id.clone_from(&body.category_id);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &ResourceId) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteProduct(id.clone()));
        state.check_delete()?;
        state.products.retain(|p| p.id.as_ref() != Some(id));
        Ok(())
    }

    async fn product_skus(&self, product_id: &ResourceId) -> Result<Product, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::ProductSkus(product_id.clone()));
        state.check_fetch()?;
        state.product_mut(product_id).cloned()
    }

    async fn create_sku(&self, product_id: &ResourceId, body: &SkuPayload) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::CreateSku {
            product_id: product_id.clone(),
            body: json(body),
        });
        state.check_sku(body)?;
        let id = state.allocate_id();
        let product = state.product_mut(product_id)?;
        product.skus.push(ProductSku {
            id: Some(id),
            product_id: Some(product_id.clone()),
            sku: body.sku.clone(),
            cost_price: body.cost_price.clone(),
            sale_price: body.sale_price.clone(),
            price: body.price.clone(),
            quantity: body.quantity.clone(),
        });
        Ok(())
    }

    async fn update_sku(
        &self,
        product_id: &ResourceId,
        sku_id: &ResourceId,
        body: &SkuPayload,
    ) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::UpdateSku {
            product_id: product_id.clone(),
            sku_id: sku_id.clone(),
            body: json(body),
        });
        state.check_sku(body)?;
        let sku = state
            .product_mut(product_id)?
            .skus
            .iter_mut()
            .find(|s| s.id.as_ref() == Some(sku_id))
            .ok_or_else(|| CoreError::not_found("sku", sku_id))?;
        sku.sku.clone_from(&body.sku);
        sku.cost_price = body.cost_price.clone();
        sku.sale_price = body.sale_price.clone();
        sku.price = body.price.clone();
        sku.quantity = body.quantity.clone();
        Ok(())
    }

    async fn delete_sku(&self, product_id: &ResourceId, sku_id: &ResourceId) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteSku {
            product_id: product_id.clone(),
            sku_id: sku_id.clone(),
        });
        state.check_delete()?;
        state
            .product_mut(product_id)?
            .skus
            .retain(|s| s.id.as_ref() != Some(sku_id));
        Ok(())
    }

    async fn list_sku_images(
        &self,
        _product_id: &ResourceId,
        sku_id: &ResourceId,
    ) -> Result<Vec<ProductImage>, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::ListImages(sku_id.clone()));
        state.check_fetch()?;
        Ok(state.images.get(sku_id).cloned().unwrap_or_default())
    }

    async fn upload_sku_image(
        &self,
        _product_id: &ResourceId,
        sku_id: &ResourceId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProductImage, CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::UploadImage {
            sku_id: sku_id.clone(),
            file_name: file_name.into(),
            len: bytes.len(),
        });
        let image = ProductImage {
            id: state.allocate_id(),
            sku_id: Some(sku_id.clone()),
            url: format!("/storage/{file_name}"),
            position: None,
        };
        state
            .images
            .entry(sku_id.clone())
            .or_default()
            .push(image.clone());
        Ok(image)
    }

    async fn delete_sku_image(
        &self,
        _product_id: &ResourceId,
        sku_id: &ResourceId,
        image_id: &ResourceId,
    ) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteImage(image_id.clone()));
        state.check_delete()?;
        if let Some(images) = state.images.get_mut(sku_id) {
            images.retain(|i| &i.id != image_id);
        }
        Ok(())
    }
}
