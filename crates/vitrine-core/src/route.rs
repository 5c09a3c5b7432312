// ── Client-side routes ──
//
// Static path → page mapping. No guards, no auth; anything unknown
// lands on the catch-all error view.

use std::fmt;
use std::str::FromStr;

use vitrine_api::ResourceId;

/// Whether a form was opened to create a new entity or edit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    Create,
    #[default]
    Edit,
}

impl EditorMode {
    /// Infer the mode from a URL whose last segment is `new`.
    ///
    /// Only for callers that have nothing but a path; everything inside
    /// the crate carries the mode explicitly.
    pub fn from_path(path: &str) -> Self {
        let last = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if last == "new" {
            Self::Create
        } else {
            Self::Edit
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Categories,
    CategoryNew,
    CategoryEdit(ResourceId),
    Products,
    ProductNew,
    ProductEdit(ResourceId),
    ProductSkus(ResourceId),
    SkuImages {
        product_id: ResourceId,
        sku_id: ResourceId,
    },
    /// Catch-all, keeps the requested path for the error view.
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let clean = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Dashboard,
            ["categories"] => Self::Categories,
            ["categories", "new"] => Self::CategoryNew,
            ["categories", id, "edit"] => Self::CategoryEdit(ResourceId::from(*id)),
            ["products"] => Self::Products,
            ["products", "new"] => Self::ProductNew,
            ["products", id, "edit"] => Self::ProductEdit(ResourceId::from(*id)),
            ["products", id, "skus"] => Self::ProductSkus(ResourceId::from(*id)),
            ["products", id, "skus", sku, "images"] => Self::SkuImages {
                product_id: ResourceId::from(*id),
                sku_id: ResourceId::from(*sku),
            },
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/".into(),
            Self::Categories => "/categories".into(),
            Self::CategoryNew => "/categories/new".into(),
            Self::CategoryEdit(id) => format!("/categories/{id}/edit"),
            Self::Products => "/products".into(),
            Self::ProductNew => "/products/new".into(),
            Self::ProductEdit(id) => format!("/products/{id}/edit"),
            Self::ProductSkus(id) => format!("/products/{id}/skus"),
            Self::SkuImages { product_id, sku_id } => {
                format!("/products/{product_id}/skus/{sku_id}/images")
            }
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Page title shown by the front-end.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Categories => "Categorias",
            Self::CategoryNew | Self::CategoryEdit(_) => "Categorias - Editar/Cadastrar",
            Self::Products => "Produtos",
            Self::ProductNew | Self::ProductEdit(_) => "Produtos - Editar/Cadastrar",
            Self::ProductSkus(_) => "Produtos/Skus - Editar/Cadastrar",
            Self::SkuImages { .. } => "Produtos/Skus/Imagens - Editar/Cadastrar",
            Self::NotFound(_) => "ME ERROR",
        }
    }

    /// Form mode for routes that open a form.
    pub fn mode(&self) -> Option<EditorMode> {
        match self {
            Self::CategoryNew | Self::ProductNew => Some(EditorMode::Create),
            Self::CategoryEdit(_) | Self::ProductEdit(_) | Self::ProductSkus(_) => {
                Some(EditorMode::Edit)
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
