// ── Dashboard ──

use serde::Serialize;
use tracing::debug;

use crate::backend::CatalogBackend;
use crate::error::CoreError;

/// Catalog totals shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub categories: usize,
    pub products: usize,
    pub skus: usize,
}

impl DashboardSummary {
    /// Counts from the two list endpoints, fetched concurrently.
    ///
    /// `skus` only counts what the product list embeds; backends that
    /// omit nested SKUs there report zero.
    pub async fn load<B: CatalogBackend>(backend: &B) -> Result<Self, CoreError> {
        let (categories, products) =
            tokio::try_join!(backend.list_categories(), backend.list_products())?;
        let summary = Self {
            categories: categories.len(),
            products: products.len(),
            skus: products.iter().map(|p| p.skus.len()).sum(),
        };
        debug!(?summary, "dashboard loaded");
        Ok(summary)
    }
}
