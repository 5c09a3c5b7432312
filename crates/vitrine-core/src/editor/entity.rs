// ── Single-entity forms ──
//
// Category and product forms share one shape: load when editing, validate
// presence, POST or PUT depending on mode, then go back to the list.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::CatalogBackend;
use crate::editor::{LoadState, Outcome, SubmitError};
use crate::error::CoreError;
use crate::model::form::require;
use crate::model::{Category, CategoryPayload, FieldError, Product, ProductPayload, ResourceId};
use crate::notify::{Notice, NoticeSet, messages};
use crate::route::{EditorMode, Route};

/// A catalog entity with a create-or-update form and a list page.
pub trait FormResource: Clone + Default + Send + Sync + 'static {
    /// Singular name for logs and not-found errors.
    const NAME: &'static str;

    fn id(&self) -> Option<&ResourceId>;

    /// Label used in confirmation prompts.
    fn display_name(&self) -> &str;

    fn validate(&self) -> Vec<FieldError>;

    fn list_route() -> Route;

    fn fetch<B: CatalogBackend>(
        backend: &B,
        id: &ResourceId,
    ) -> impl Future<Output = Result<Self, CoreError>> + Send;

    /// Create when `id` is `None`, replace otherwise.
    fn save<B: CatalogBackend>(
        &self,
        backend: &B,
        id: Option<&ResourceId>,
    ) -> impl Future<Output = Result<Self, CoreError>> + Send;

    fn list<B: CatalogBackend>(backend: &B)
    -> impl Future<Output = Result<Vec<Self>, CoreError>> + Send;

    fn remove<B: CatalogBackend>(
        backend: &B,
        id: &ResourceId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ── Category ─────────────────────────────────────────────────────────

impl FormResource for Category {
    const NAME: &'static str = "category";

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, None, "name", &self.name);
        errors
    }

    fn list_route() -> Route {
        Route::Categories
    }

    async fn fetch<B: CatalogBackend>(backend: &B, id: &ResourceId) -> Result<Self, CoreError> {
        backend.get_category(id).await
    }

    async fn save<B: CatalogBackend>(
        &self,
        backend: &B,
        id: Option<&ResourceId>,
    ) -> Result<Self, CoreError> {
        let body = CategoryPayload::from(self);
        match id {
            Some(id) => backend.update_category(id, &body).await,
            None => backend.create_category(&body).await,
        }
    }

    async fn list<B: CatalogBackend>(backend: &B) -> Result<Vec<Self>, CoreError> {
        backend.list_categories().await
    }

    async fn remove<B: CatalogBackend>(backend: &B, id: &ResourceId) -> Result<(), CoreError> {
        backend.delete_category(id).await
    }
}

// ── Product ──────────────────────────────────────────────────────────

impl FormResource for Product {
    const NAME: &'static str = "product";

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, None, "name", &self.name);
        errors
    }

    fn list_route() -> Route {
        Route::Products
    }

    async fn fetch<B: CatalogBackend>(backend: &B, id: &ResourceId) -> Result<Self, CoreError> {
        backend.get_product(id).await
    }

    async fn save<B: CatalogBackend>(
        &self,
        backend: &B,
        id: Option<&ResourceId>,
    ) -> Result<Self, CoreError> {
        let body = ProductPayload::from(self);
        match id {
            Some(id) => backend.update_product(id, &body).await,
            None => backend.create_product(&body).await,
        }
    }

    async fn list<B: CatalogBackend>(backend: &B) -> Result<Vec<Self>, CoreError> {
        backend.list_products().await
    }

    async fn remove<B: CatalogBackend>(backend: &B, id: &ResourceId) -> Result<(), CoreError> {
        backend.delete_product(id).await
    }
}

// ── Form ─────────────────────────────────────────────────────────────

pub struct EntityForm<B, R> {
    backend: Arc<B>,
    mode: EditorMode,
    id: Option<ResourceId>,
    state: LoadState,
    draft: R,
}

impl<B: CatalogBackend, R: FormResource> EntityForm<B, R> {
    /// Blank form in create mode. Ready immediately.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            mode: EditorMode::Create,
            id: None,
            state: LoadState::Ready,
            draft: R::default(),
        }
    }

    /// Edit form for `id`. Call [`load`](Self::load) before submitting.
    pub fn edit(backend: Arc<B>, id: ResourceId) -> Self {
        Self {
            backend,
            mode: EditorMode::Edit,
            id: Some(id),
            state: LoadState::Loading,
            draft: R::default(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R {
        &mut self.draft
    }

    /// Fetch the entity being edited. No-op in create mode.
    pub async fn load(&mut self) -> Outcome<Result<(), CoreError>> {
        let Some(id) = self.id.clone() else {
            self.state = LoadState::Ready;
            return Outcome::new(Ok(()));
        };

        self.state = LoadState::Loading;
        match R::fetch(self.backend.as_ref(), &id).await {
            Ok(entity) => {
                debug!(kind = R::NAME, %id, "loaded");
                self.draft = entity;
                self.state = LoadState::Ready;
                Outcome::new(Ok(()))
            }
            Err(e) => {
                warn!(kind = R::NAME, %id, error = %e, "load failed");
                self.state = LoadState::Failed(e.to_string());
                let notice = Notice::error(messages::LOAD_FAILED).with_detail(&e);
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }

    /// Save the draft and send the user back to the list on success.
    pub async fn submit(&mut self) -> Outcome<Result<R, SubmitError>> {
        if !self.state.is_ready() {
            return Outcome::new(Err(SubmitError::NotLoaded));
        }
        let errors = self.draft.validate();
        if !errors.is_empty() {
            return Outcome::new(Err(SubmitError::Invalid(errors)));
        }

        let result = self.draft.save(self.backend.as_ref(), self.id.as_ref()).await;
        let notice = NoticeSet::SAVE.resolve(&result);

        match result {
            Ok(saved) => {
                debug!(kind = R::NAME, mode = ?self.mode, "saved");
                if let Some(id) = saved.id() {
                    self.id = Some(id.clone());
                }
                self.mode = EditorMode::Edit;
                self.draft = saved.clone();
                Outcome::new(Ok(saved))
                    .with_notice(notice)
                    .with_redirect(R::list_route())
            }
            Err(e) => {
                warn!(kind = R::NAME, error = %e, "save failed");
                Outcome::new(Err(e.into())).with_notice(notice)
            }
        }
    }
}
