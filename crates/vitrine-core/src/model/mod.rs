// ── Domain model ──
//
// Wire types come straight from `vitrine-api`; this module adds the
// editor-side types that only exist client-side.

pub mod form;
pub mod row;

pub use form::FieldError;
pub use row::{RowKey, SkuField, SkuRow};
pub use vitrine_api::{
    Category, CategoryPayload, FieldValue, Product, ProductImage, ProductPayload, ProductSku,
    ResourceId, SkuPayload,
};
