// vitrine-api: Async Rust client for the catalog REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::CatalogClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    Category, CategoryPayload, FieldValue, Product, ProductImage, ProductPayload, ProductSku,
    ResourceId, SkuPayload,
};
