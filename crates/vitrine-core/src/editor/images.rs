// ── SKU image gallery ──

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::CatalogBackend;
use crate::confirm::Confirm;
use crate::editor::sku::DeleteResult;
use crate::editor::{LoadState, Outcome};
use crate::error::CoreError;
use crate::model::{ProductImage, ResourceId};
use crate::notify::{Notice, NoticeSet, messages};

/// Images attached to one SKU. Uploads and deletes go straight to the
/// backend; there is no batch submit.
pub struct ImageGallery<B> {
    backend: Arc<B>,
    product_id: ResourceId,
    sku_id: ResourceId,
    state: LoadState,
    images: Vec<ProductImage>,
}

impl<B: CatalogBackend> ImageGallery<B> {
    pub fn new(backend: Arc<B>, product_id: ResourceId, sku_id: ResourceId) -> Self {
        Self {
            backend,
            product_id,
            sku_id,
            state: LoadState::Loading,
            images: Vec::new(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn images(&self) -> &[ProductImage] {
        &self.images
    }

    pub async fn load(&mut self) -> Outcome<Result<(), CoreError>> {
        self.state = LoadState::Loading;
        match self
            .backend
            .list_sku_images(&self.product_id, &self.sku_id)
            .await
        {
            Ok(images) => {
                debug!(sku_id = %self.sku_id, count = images.len(), "loaded images");
                self.images = images;
                self.state = LoadState::Ready;
                Outcome::new(Ok(()))
            }
            Err(e) => {
                warn!(sku_id = %self.sku_id, error = %e, "failed to load images");
                self.state = LoadState::Failed(e.to_string());
                let notice = Notice::error(messages::LOAD_FAILED).with_detail(&e);
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }

    pub async fn upload(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Outcome<Result<ProductImage, CoreError>> {
        let result = self
            .backend
            .upload_sku_image(&self.product_id, &self.sku_id, file_name, bytes)
            .await;
        let notice = NoticeSet::SAVE.resolve(&result);
        if let Ok(image) = &result {
            self.images.push(image.clone());
        }
        Outcome::new(result).with_notice(notice)
    }

    pub async fn delete(
        &mut self,
        image_id: &ResourceId,
        confirm: &mut impl Confirm,
    ) -> Outcome<Result<DeleteResult, CoreError>> {
        let Some(image) = self.images.iter().find(|i| &i.id == image_id) else {
            return Outcome::new(Err(CoreError::not_found("image", image_id)));
        };
        let label = if image.url.is_empty() {
            image.id.to_string()
        } else {
            image.url.clone()
        };
        if !confirm.confirm(&messages::confirm_delete(&label)) {
            return Outcome::new(Ok(DeleteResult::Cancelled));
        }

        let result = self
            .backend
            .delete_sku_image(&self.product_id, &self.sku_id, image_id)
            .await;
        let notice = NoticeSet::REMOVE.resolve(&result);
        match result {
            Ok(()) => {
                self.images.retain(|i| &i.id != image_id);
                Outcome::new(Ok(DeleteResult::Deleted)).with_notice(notice)
            }
            Err(e) => Outcome::new(Err(e)).with_notice(notice),
        }
    }
}
