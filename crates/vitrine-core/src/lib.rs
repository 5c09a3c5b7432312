//! Page and editor logic between `vitrine-api` and the presentation layer.
//!
//! This crate owns everything the admin front-end does with catalog data,
//! without rendering any of it:
//!
//! - **[`Catalog`]**: Facade owning the backend handle. Vends page
//!   components for a [`Route`] via [`Catalog::open`].
//!
//! - **[`SkuCollectionEditor`]**: Loads a product's SKUs into editable
//!   rows, appends and deletes rows, and persists the whole list on submit
//!   as a sequential batch whose per-row outcomes land in a [`BatchReport`].
//!
//! - **[`EntityForm`]** / **[`ListPage`]**: Single-entity create-or-update
//!   forms and list pages for categories and products.
//!
//! - **Effects**: Operations never print or navigate. They return an
//!   [`Outcome`] carrying the value plus an optional [`Notice`] and an
//!   optional redirect [`Route`]; the presentation layer dispatches both.
//!
//! - **[`CatalogBackend`]**: The seam between editors and HTTP. Implemented
//!   for [`vitrine_api::CatalogClient`]; tests substitute an in-memory fake.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod confirm;
pub mod editor;
pub mod error;
pub mod model;
pub mod notify;
pub mod page;
pub mod route;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::CatalogBackend;
pub use catalog::{Catalog, Page};
pub use config::{CatalogConfig, TlsVerification};
pub use confirm::Confirm;
pub use editor::entity::{EntityForm, FormResource};
pub use editor::images::ImageGallery;
pub use editor::sku::{
    BatchReport, BatchStatus, DeleteResult, RowAction, RowOutcome, SkuCollectionEditor,
};
pub use editor::{LoadState, Outcome, SubmitError};
pub use error::CoreError;
pub use model::{
    Category, FieldError, FieldValue, Product, ProductImage, ProductSku, ResourceId, RowKey,
    SkuField, SkuRow,
};
pub use notify::{Notice, NoticeLevel, NoticeSet};
pub use page::dashboard::DashboardSummary;
pub use page::list::ListPage;
pub use route::{EditorMode, Route};
