// ── SKU collection editor ──
//
// Loads a product with its SKUs, exposes them as editable rows, and
// persists every row on submit. Writes are strictly sequential in display
// order; a failed row is recorded and the batch moves on. One re-fetch
// follows the batch and resyncs rows with the server, keeping the user's
// edits for rows that failed.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::CatalogBackend;
use crate::confirm::Confirm;
use crate::editor::{LoadState, Outcome, SubmitError};
use crate::error::CoreError;
use crate::model::{FieldError, Product, ResourceId, RowKey, SkuField, SkuRow};
use crate::notify::{Notice, NoticeSet, messages};
use crate::route::{EditorMode, Route};

// ── Batch reporting ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Create,
    Update,
}

/// What happened to one row during a submit.
#[derive(Debug)]
pub struct RowOutcome {
    pub key: RowKey,
    pub sku: String,
    pub action: RowAction,
    pub error: Option<CoreError>,
}

impl RowOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every row was written (vacuously true for an empty batch).
    Succeeded,
    /// Some rows were written, `failed` were not.
    Partial { failed: usize, total: usize },
    /// No row was written.
    Failed,
}

/// Per-row outcomes of one submit, in display order.
#[derive(Debug)]
pub struct BatchReport {
    pub rows: Vec<RowOutcome>,
    /// Set when the post-batch re-fetch failed; local rows were kept.
    pub refresh_error: Option<CoreError>,
}

impl BatchReport {
    pub fn status(&self) -> BatchStatus {
        let total = self.rows.len();
        let failed = self.rows.iter().filter(|r| !r.is_ok()).count();
        match failed {
            0 => BatchStatus::Succeeded,
            f if f == total => BatchStatus::Failed,
            f => BatchStatus::Partial { failed: f, total },
        }
    }

    pub fn failed_rows(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows.iter().filter(|r| !r.is_ok())
    }

    /// Aggregate notice for the whole batch.
    pub fn notice(&self) -> Notice {
        match self.status() {
            BatchStatus::Succeeded => match &self.refresh_error {
                None => Notice::success(messages::SAVED),
                Some(e) => Notice::warning(messages::RESYNC_FAILED).with_detail(e),
            },
            BatchStatus::Partial { failed, total } => {
                let names = self
                    .failed_rows()
                    .map(|r| if r.sku.is_empty() { "?" } else { r.sku.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ");
                let detail = self
                    .failed_rows()
                    .filter_map(|r| r.error.as_ref().map(|e| format!("{}: {e}", r.sku)))
                    .collect::<Vec<_>>()
                    .join("; ");
                Notice::warning(messages::partially_saved(failed, total, &names))
                    .with_detail(detail)
            }
            BatchStatus::Failed => {
                let detail = self
                    .failed_rows()
                    .filter_map(|r| r.error.as_ref().map(ToString::to_string))
                    .next()
                    .unwrap_or_default();
                Notice::error(messages::FAILED).with_detail(detail)
            }
        }
    }
}

// ── Deletion ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    /// The user declined; nothing happened.
    Cancelled,
    /// Deleted on the server and removed locally.
    Deleted,
    /// Row was never persisted; removed locally without a backend call.
    Discarded,
}

// ── Editor ──────────────────────────────────────────────────────────

pub struct SkuCollectionEditor<B> {
    backend: Arc<B>,
    product_id: ResourceId,
    mode: EditorMode,
    state: LoadState,
    /// Display state: the product as last fetched.
    product: Product,
    /// Editable state, seeded from the same payload as `product`.
    rows: Vec<SkuRow>,
}

impl<B: CatalogBackend> SkuCollectionEditor<B> {
    pub fn new(backend: Arc<B>, product_id: ResourceId, mode: EditorMode) -> Self {
        Self {
            backend,
            product_id,
            mode,
            state: LoadState::Loading,
            product: Product::default(),
            rows: Vec::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn product_id(&self) -> &ResourceId {
        &self.product_id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn rows(&self) -> &[SkuRow] {
        &self.rows
    }

    pub fn row(&self, key: RowKey) -> Option<&SkuRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn row_mut(&mut self, key: RowKey) -> Option<&mut SkuRow> {
        self.rows.iter_mut().find(|r| r.key == key)
    }

    /// Key of the row holding persisted SKU `id`, if it is on screen.
    pub fn key_for_id(&self, id: &ResourceId) -> Option<RowKey> {
        self.rows
            .iter()
            .find(|r| r.id.as_ref() == Some(id))
            .map(|r| r.key)
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Fetch the product with its SKUs and seed display and form state.
    ///
    /// In [`EditorMode::Create`], a product that comes back with an id
    /// produces a redirect to its canonical SKU route and switches the
    /// editor to [`EditorMode::Edit`].
    pub async fn load(&mut self) -> Outcome<Result<(), CoreError>> {
        self.state = LoadState::Loading;

        match self.backend.product_skus(&self.product_id).await {
            Ok(product) => {
                debug!(
                    product_id = %self.product_id,
                    skus = product.skus.len(),
                    "loaded product skus"
                );
                self.apply(product);
                self.state = LoadState::Ready;

                let mut outcome = Outcome::new(Ok(()));
                if let Some(route) = self.post_create_redirect() {
                    self.mode = EditorMode::Edit;
                    outcome = outcome.with_redirect(route);
                }
                outcome
            }
            Err(e) => {
                warn!(product_id = %self.product_id, error = %e, "failed to load product skus");
                self.state = LoadState::Failed(e.to_string());
                let notice = Notice::error(messages::LOAD_FAILED).with_detail(&e);
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }

    fn post_create_redirect(&self) -> Option<Route> {
        if self.mode != EditorMode::Create {
            return None;
        }
        self.product.id.clone().map(Route::ProductSkus)
    }

    fn apply(&mut self, product: Product) {
        self.rows = product.skus.iter().map(SkuRow::from_sku).collect();
        self.product = product;
    }

    // ── Row editing ──────────────────────────────────────────────────

    /// Append an empty row. Nothing is sent until [`submit`](Self::submit).
    pub fn add_row(&mut self) -> RowKey {
        let row = SkuRow::empty();
        let key = row.key;
        self.rows.push(row);
        key
    }

    /// Append a pre-filled row as a new SKU, ignoring any identifiers.
    pub fn push_row(&mut self, mut row: SkuRow) -> RowKey {
        row.key = RowKey::new();
        row.id = None;
        row.product_id = None;
        let key = row.key;
        self.rows.push(row);
        key
    }

    pub fn set_field(
        &mut self,
        key: RowKey,
        field: SkuField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let row = self
            .row_mut(key)
            .ok_or_else(|| CoreError::not_found("row", key))?;
        row.set(field, value);
        Ok(())
    }

    pub fn validate(&self) -> Vec<FieldError> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.validate(i))
            .collect()
    }

    // ── Submit ───────────────────────────────────────────────────────

    /// Persist every row, one request at a time, in display order.
    ///
    /// Rows without both identifiers are created under this editor's
    /// product; the rest are replaced in full. A failing row does not
    /// stop the batch. Exactly one re-fetch follows the last row.
    pub async fn submit(&mut self) -> Outcome<Result<BatchReport, SubmitError>> {
        if !self.state.is_ready() {
            return Outcome::new(Err(SubmitError::NotLoaded));
        }

        let errors = self.validate();
        if !errors.is_empty() {
            debug!(count = errors.len(), "submit blocked by validation");
            return Outcome::new(Err(SubmitError::Invalid(errors)));
        }

        let mut outcomes = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let payload = row.payload();
            let (action, result) = match (&row.id, &row.product_id) {
                (Some(id), Some(product_id)) => (
                    RowAction::Update,
                    self.backend.update_sku(product_id, id, &payload).await,
                ),
                _ => (
                    RowAction::Create,
                    self.backend.create_sku(&self.product_id, &payload).await,
                ),
            };

            if let Err(ref e) = result {
                warn!(sku = %row.sku, ?action, error = %e, "sku write failed");
            }
            outcomes.push(RowOutcome {
                key: row.key,
                sku: row.sku.clone(),
                action,
                error: result.err(),
            });
        }

        let refresh_error = self.resync(&outcomes).await.err();
        let report = BatchReport {
            rows: outcomes,
            refresh_error,
        };

        info!(
            product_id = %self.product_id,
            rows = report.rows.len(),
            status = ?report.status(),
            "sku batch finished"
        );

        let notice = report.notice();
        Outcome::new(Ok(report)).with_notice(notice)
    }

    /// Re-fetch after a batch. Rows that failed keep their local edits:
    /// failed updates are overlaid on the fresh server row, failed
    /// creates are appended again.
    async fn resync(&mut self, outcomes: &[RowOutcome]) -> Result<(), CoreError> {
        let product = match self.backend.product_skus(&self.product_id).await {
            Ok(p) => p,
            Err(e) => {
                warn!(product_id = %self.product_id, error = %e, "re-fetch after batch failed");
                return Err(e);
            }
        };

        let kept: Vec<SkuRow> = outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .filter_map(|o| self.row(o.key).cloned())
            .collect();

        self.apply(product);

        for local in kept {
            let fresh = local
                .id
                .as_ref()
                .and_then(|id| self.rows.iter_mut().find(|r| r.id.as_ref() == Some(id)));
            match fresh {
                Some(row) => {
                    row.key = local.key;
                    row.take_fields(&local);
                }
                None => self.rows.push(local),
            }
        }
        Ok(())
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Delete one row after confirmation.
    ///
    /// The row is resolved by key before the call and by persisted id
    /// after it, so rows added or removed meanwhile do not shift the
    /// target.
    pub async fn delete_row(
        &mut self,
        key: RowKey,
        confirm: &mut impl Confirm,
    ) -> Outcome<Result<DeleteResult, CoreError>> {
        let Some(row) = self.row(key) else {
            return Outcome::new(Err(CoreError::not_found("row", key)));
        };

        if !confirm.confirm(&messages::confirm_delete(&row.sku)) {
            return Outcome::new(Ok(DeleteResult::Cancelled));
        }

        let Some(id) = row.id.clone() else {
            self.rows.retain(|r| r.key != key);
            return Outcome::new(Ok(DeleteResult::Discarded))
                .with_notice(Notice::success(messages::REMOVED));
        };
        let product_id = row
            .product_id
            .clone()
            .unwrap_or_else(|| self.product_id.clone());

        let result = self.backend.delete_sku(&product_id, &id).await;
        let notice = NoticeSet::REMOVE.resolve(&result);

        match result {
            Ok(()) => {
                self.rows.retain(|r| r.id.as_ref() != Some(&id));
                self.product.skus.retain(|s| s.id.as_ref() != Some(&id));
                debug!(sku_id = %id, "sku deleted");
                Outcome::new(Ok(DeleteResult::Deleted)).with_notice(notice)
            }
            Err(e) => {
                warn!(sku_id = %id, error = %e, "sku delete failed");
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }
}
