// ── Catalog facade ──
//
// Owns the backend handle and vends page components. The CLI holds one
// `Catalog` per invocation; tests build one over an in-memory backend.

use std::sync::Arc;

use tracing::debug;

use vitrine_api::CatalogClient;

use crate::backend::CatalogBackend;
use crate::config::CatalogConfig;
use crate::editor::entity::EntityForm;
use crate::editor::images::ImageGallery;
use crate::editor::sku::SkuCollectionEditor;
use crate::error::CoreError;
use crate::model::{Category, Product, ResourceId};
use crate::page::dashboard::DashboardSummary;
use crate::page::list::ListPage;
use crate::route::{EditorMode, Route};

/// The component a route resolves to, not yet loaded.
pub enum Page<B> {
    Dashboard,
    CategoryList(ListPage<B, Category>),
    CategoryForm(EntityForm<B, Category>),
    ProductList(ListPage<B, Product>),
    ProductForm(EntityForm<B, Product>),
    SkuEditor(SkuCollectionEditor<B>),
    Images(ImageGallery<B>),
    /// Static error view for unknown paths.
    NotFound(String),
}

impl<B> Page<B> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::CategoryList(_) => "category-list",
            Self::CategoryForm(_) => "category-form",
            Self::ProductList(_) => "product-list",
            Self::ProductForm(_) => "product-form",
            Self::SkuEditor(_) => "sku-editor",
            Self::Images(_) => "images",
            Self::NotFound(_) => "not-found",
        }
    }
}

pub struct Catalog<B = CatalogClient> {
    backend: Arc<B>,
}

impl<B> Clone for Catalog<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl Catalog<CatalogClient> {
    /// Build the HTTP client described by `config`.
    pub fn connect(config: &CatalogConfig) -> Result<Self, CoreError> {
        let client = CatalogClient::new(config.url.as_str(), &config.transport())?;
        debug!(url = %config.url, "catalog client ready");
        Ok(Self::with_backend(client))
    }
}

impl<B: CatalogBackend> Catalog<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    // ── Component factories ──────────────────────────────────────────

    pub fn sku_editor(&self, product_id: ResourceId, mode: EditorMode) -> SkuCollectionEditor<B> {
        SkuCollectionEditor::new(Arc::clone(&self.backend), product_id, mode)
    }

    pub fn new_category(&self) -> EntityForm<B, Category> {
        EntityForm::new(Arc::clone(&self.backend))
    }

    pub fn edit_category(&self, id: ResourceId) -> EntityForm<B, Category> {
        EntityForm::edit(Arc::clone(&self.backend), id)
    }

    pub fn new_product(&self) -> EntityForm<B, Product> {
        EntityForm::new(Arc::clone(&self.backend))
    }

    pub fn edit_product(&self, id: ResourceId) -> EntityForm<B, Product> {
        EntityForm::edit(Arc::clone(&self.backend), id)
    }

    pub fn categories(&self) -> ListPage<B, Category> {
        ListPage::new(Arc::clone(&self.backend))
    }

    pub fn products(&self) -> ListPage<B, Product> {
        ListPage::new(Arc::clone(&self.backend))
    }

    pub fn images(&self, product_id: ResourceId, sku_id: ResourceId) -> ImageGallery<B> {
        ImageGallery::new(Arc::clone(&self.backend), product_id, sku_id)
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, CoreError> {
        DashboardSummary::load(self.backend.as_ref()).await
    }

    /// Resolve a route to its component.
    pub fn open(&self, route: &Route) -> Page<B> {
        match route {
            Route::Dashboard => Page::Dashboard,
            Route::Categories => Page::CategoryList(self.categories()),
            Route::CategoryNew => Page::CategoryForm(self.new_category()),
            Route::CategoryEdit(id) => Page::CategoryForm(self.edit_category(id.clone())),
            Route::Products => Page::ProductList(self.products()),
            Route::ProductNew => Page::ProductForm(self.new_product()),
            Route::ProductEdit(id) => Page::ProductForm(self.edit_product(id.clone())),
            Route::ProductSkus(id) => {
                let mode = route.mode().unwrap_or(EditorMode::Edit);
                Page::SkuEditor(self.sku_editor(id.clone(), mode))
            }
            Route::SkuImages { product_id, sku_id } => {
                Page::Images(self.images(product_id.clone(), sku_id.clone()))
            }
            Route::NotFound(path) => Page::NotFound(path.clone()),
        }
    }
}
