// ── Editable SKU rows ──
//
// A `SkuRow` is the form-side twin of `ProductSku`: every field is the
// raw text the user typed, and a synthetic `RowKey` identifies the row
// for rendering whether or not the server has seen it yet.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use vitrine_api::{FieldValue, ProductSku, ResourceId, SkuPayload};

use super::form::{FieldError, require};

// ── RowKey ──────────────────────────────────────────────────────────

/// Client-side key of an editor row. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowKey(Uuid);

impl RowKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── SkuField ────────────────────────────────────────────────────────

/// The five editable SKU fields, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SkuField {
    Sku,
    CostPrice,
    SalePrice,
    Price,
    Quantity,
}

impl SkuField {
    /// Every field, in form order.
    pub const ALL: [Self; 5] = [
        Self::Sku,
        Self::CostPrice,
        Self::SalePrice,
        Self::Price,
        Self::Quantity,
    ];

    /// Wire name, also used in validation messages.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sku => "SKU",
            Self::CostPrice => "Preço Custo",
            Self::SalePrice => "Preço Venda",
            Self::Price => "Preço",
            Self::Quantity => "Estoque",
        }
    }
}

// ── SkuRow ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuRow {
    #[serde(skip, default)]
    pub key: RowKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ResourceId>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub sku: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub cost_price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub sale_price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub quantity: String,
}

impl SkuRow {
    /// Empty template appended by the "add" action.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_sku(sku: &ProductSku) -> Self {
        Self {
            key: RowKey::new(),
            id: sku.id.clone(),
            product_id: sku.product_id.clone(),
            sku: sku.sku.clone(),
            cost_price: sku.cost_price.as_input(),
            sale_price: sku.sale_price.as_input(),
            price: sku.price.as_input(),
            quantity: sku.quantity.as_input(),
        }
    }

    /// Existing rows carry both the SKU id and the parent product id.
    /// Anything else is created on submit.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some() && self.product_id.is_some()
    }

    pub fn get(&self, field: SkuField) -> &str {
        match field {
            SkuField::Sku => &self.sku,
            SkuField::CostPrice => &self.cost_price,
            SkuField::SalePrice => &self.sale_price,
            SkuField::Price => &self.price,
            SkuField::Quantity => &self.quantity,
        }
    }

    pub fn set(&mut self, field: SkuField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SkuField::Sku => self.sku = value,
            SkuField::CostPrice => self.cost_price = value,
            SkuField::SalePrice => self.sale_price = value,
            SkuField::Price => self.price = value,
            SkuField::Quantity => self.quantity = value,
        }
    }

    /// Copy the editable fields of `other`, keeping this row's identity.
    pub(crate) fn take_fields(&mut self, other: &Self) {
        self.sku.clone_from(&other.sku);
        self.cost_price.clone_from(&other.cost_price);
        self.sale_price.clone_from(&other.sale_price);
        self.price.clone_from(&other.price);
        self.quantity.clone_from(&other.quantity);
    }

    /// Copy the non-blank fields of `other`; blank ones leave this row's
    /// value alone.
    pub fn merge(&mut self, other: &Self) {
        for field in SkuField::ALL {
            let value = other.get(field);
            if !value.trim().is_empty() {
                self.set(field, value);
            }
        }
    }

    /// Request body: the five catalog fields and nothing else.
    pub fn payload(&self) -> SkuPayload {
        SkuPayload {
            price: FieldValue::from_input(&self.price),
            cost_price: FieldValue::from_input(&self.cost_price),
            sale_price: FieldValue::from_input(&self.sale_price),
            quantity: FieldValue::from_input(&self.quantity),
            sku: self.sku.clone(),
        }
    }

    pub fn validate(&self, index: usize) -> Vec<FieldError> {
        use strum::IntoEnumIterator;

        let mut errors = Vec::new();
        for field in SkuField::iter() {
            require(&mut errors, Some(index), field.name(), self.get(field));
        }
        errors
    }
}

/// Accept `39.9`, `"39.90"` or `null` for an editable text field.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    FieldValue::deserialize(deserializer).map(|v| v.as_input())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn persisted() -> SkuRow {
        SkuRow::from_sku(&ProductSku {
            id: Some(ResourceId::from(10)),
            product_id: Some(ResourceId::from(3)),
            sku: "CAM-P".into(),
            cost_price: FieldValue::from_input("10"),
            sale_price: FieldValue::from_input("30"),
            price: FieldValue::from_input("35"),
            quantity: FieldValue::from_input("4"),
        })
    }

    #[test]
    fn persisted_needs_both_identifiers() {
        assert!(persisted().is_persisted());

        let mut orphan = persisted();
        orphan.product_id = None;
        assert!(!orphan.is_persisted());

        assert!(!SkuRow::empty().is_persisted());
    }

    #[test]
    fn rows_get_distinct_keys() {
        assert_ne!(SkuRow::empty().key, SkuRow::empty().key);
    }

    #[test]
    fn empty_row_fails_every_required_field() {
        let errors = SkuRow::empty().validate(0);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["sku", "cost_price", "sale_price", "price", "quantity"]
        );
    }

    #[test]
    fn set_and_get_round_through_field_names() {
        let mut row = SkuRow::empty();
        let field: SkuField = "sale_price".parse().unwrap();
        row.set(field, "29.90");
        assert_eq!(row.get(SkuField::SalePrice), "29.90");
        assert_eq!(field.name(), "sale_price");
    }

    #[test]
    fn merge_skips_blank_fields() {
        let mut row = persisted();
        let mut patch = SkuRow::empty();
        patch.price = "49.90".into();
        row.merge(&patch);
        assert_eq!(row.price, "49.90");
        assert_eq!(row.sku, "CAM-P");
        assert_eq!(row.quantity, "4");
    }

    #[test]
    fn rows_deserialize_from_numbers_or_text() {
        let row: SkuRow =
            serde_json::from_str(r#"{"sku": "CAM-P", "price": 39.9, "quantity": "4"}"#).unwrap();
        assert_eq!(row.price, "39.9");
        assert_eq!(row.quantity, "4");
        assert_eq!(row.cost_price, "");
    }

    #[test]
    fn payload_drops_identifiers() {
        let body = serde_json::to_value(persisted().payload()).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("product_id").is_none());
        assert_eq!(body["price"], serde_json::json!(35));
        assert_eq!(body["sku"], serde_json::json!("CAM-P"));
    }
}
