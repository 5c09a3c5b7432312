// Wire types for the catalog REST API.
//
// Field names follow the backend's snake_case JSON. Price and stock
// fields are deliberately loose: the backend accepts numbers or strings
// and the admin UI never validated them beyond "present".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ── ResourceId ──────────────────────────────────────────────────────

/// Server-assigned identifier of any catalog resource.
///
/// The backend emits integer ids, but some endpoints echo them back as
/// strings. Numeric strings are normalised to [`ResourceId::Numeric`] so
/// that `12` and `"12"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Numeric(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Numeric(n) => Self::Numeric(n),
            Raw::Text(s) => Self::from(s),
        })
    }
}

// ── FieldValue ──────────────────────────────────────────────────────

/// A numeric-or-text form value, preserved as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    /// Interpret raw form input. Numeric text becomes a JSON number,
    /// blank input becomes [`FieldValue::Empty`], anything else stays text.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match serde_json::Number::from_str(trimmed) {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }

    /// Render back into editable text.
    pub fn as_input(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_input())
    }
}

// ── Categories ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Category> for CategoryPayload {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}

// ── Products ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
    /// Present on `GET /products/{id}/skus`; absent or null elsewhere.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skus: Vec<ProductSku>,
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ResourceId>,
}

impl From<&Product> for ProductPayload {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            category_id: p.category_id.clone(),
        }
    }
}

// ── SKUs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSku {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ResourceId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(default)]
    pub cost_price: FieldValue,
    #[serde(default)]
    pub sale_price: FieldValue,
    #[serde(default)]
    pub price: FieldValue,
    #[serde(default)]
    pub quantity: FieldValue,
}

/// Body for SKU create and update: exactly the five catalog fields.
///
/// Identifiers travel in the URL, never in the body. Updates use
/// replacement semantics, so every field is always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuPayload {
    pub price: FieldValue,
    pub cost_price: FieldValue,
    pub sale_price: FieldValue,
    pub quantity: FieldValue,
    pub sku: String,
}

impl From<&ProductSku> for SkuPayload {
    fn from(s: &ProductSku) -> Self {
        Self {
            price: s.price.clone(),
            cost_price: s.cost_price.clone(),
            sale_price: s.sale_price.clone(),
            quantity: s.quantity.clone(),
            sku: s.sku.clone(),
        }
    }
}

// ── Images ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<ResourceId>,
    #[serde(default, alias = "path", deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

// ── Serde helpers ───────────────────────────────────────────────────

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_normalise_to_numeric_ids() {
        let from_str: ResourceId = serde_json::from_value(json!("42")).unwrap();
        let from_num: ResourceId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_num.to_string(), "42");
    }

    #[test]
    fn non_numeric_ids_stay_text() {
        let id: ResourceId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(id, ResourceId::Text("a1b2".into()));
    }

    #[test]
    fn field_value_from_input() {
        assert_eq!(FieldValue::from_input("  "), FieldValue::Empty);
        assert!(matches!(FieldValue::from_input("19.90"), FieldValue::Number(_)));
        assert_eq!(
            FieldValue::from_input("19,90"),
            FieldValue::Text("19,90".into())
        );
        assert_eq!(FieldValue::from_input("7").as_input(), "7");
    }

    #[test]
    fn product_with_null_skus_has_empty_list() {
        let p: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Camiseta",
            "skus": null
        }))
        .unwrap();
        assert!(p.skus.is_empty());
    }

    #[test]
    fn sku_tolerates_mixed_field_types() {
        let s: ProductSku = serde_json::from_value(json!({
            "id": 9,
            "product_id": "3",
            "sku": "CAM-P",
            "cost_price": "10.00",
            "sale_price": 25,
            "price": null,
            "quantity": 4
        }))
        .unwrap();
        assert_eq!(s.product_id, Some(ResourceId::Numeric(3)));
        assert_eq!(s.cost_price, FieldValue::Text("10.00".into()));
        assert_eq!(s.price, FieldValue::Empty);
        assert_eq!(s.quantity.as_input(), "4");
    }

    #[test]
    fn sku_payload_carries_exactly_five_fields() {
        let sku = ProductSku {
            id: Some(ResourceId::Numeric(1)),
            product_id: Some(ResourceId::Numeric(2)),
            sku: "X".into(),
            ..ProductSku::default()
        };
        let body = serde_json::to_value(SkuPayload::from(&sku)).unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["cost_price", "price", "quantity", "sale_price", "sku"]
        );
    }

    #[test]
    fn image_accepts_path_alias() {
        let img: ProductImage = serde_json::from_value(json!({
            "id": 5,
            "path": "/uploads/a.png"
        }))
        .unwrap();
        assert_eq!(img.url, "/uploads/a.png");
    }
}
