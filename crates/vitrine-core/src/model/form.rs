// ── Field validation ──
//
// The admin forms only ever checked presence. No numeric ranges, no
// cross-field rules.

use std::fmt;

use serde::Serialize;

use crate::notify::messages;

/// An inline validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Row position for list forms, `None` for single-entity forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn required(row: Option<usize>, field: &'static str) -> Self {
        Self {
            row,
            field,
            message: messages::REQUIRED.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {}: {}: {}", row + 1, self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Push a `required` error when `value` is blank.
pub(crate) fn require(
    errors: &mut Vec<FieldError>,
    row: Option<usize>,
    field: &'static str,
    value: &str,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(row, field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_required() {
        let mut errors = Vec::new();
        require(&mut errors, Some(1), "price", "   ");
        require(&mut errors, Some(1), "sku", "CAM-P");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "row 2: price: Campo obrigatório!");
    }
}
