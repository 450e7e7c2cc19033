//! Priced rows shown on the payment sheet.
//!
//! Amounts are decimal strings (e.g., `"9.99"`), never floating point, so the
//! value the merchant computes is exactly the value the host displays.

use serde::{Deserialize, Serialize};

use crate::enums::LineItemType;
use crate::open_enum::OpenEnum;

/// A line item in a payment request: a subtotal, tax, discount, or grand total.
///
/// # JSON Format
///
/// ```json
/// { "label": "Estimated Tax", "amount": "3.06", "type": "pending" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// A short, localized description of the line item.
    pub label: String,

    /// The line item's amount as a decimal string.
    pub amount: String,

    /// Whether the amount is final or pending.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<OpenEnum<LineItemType>>,
}

impl LineItem {
    /// Creates a line item with no type marker.
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            item_type: None,
        }
    }

    /// Sets the final/pending marker, from either the enum or its literal.
    #[must_use]
    pub fn with_type(mut self, item_type: impl Into<OpenEnum<LineItemType>>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Returns `true` if the item is marked pending.
    ///
    /// Items without a marker are final.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.item_type
            .as_ref()
            .is_some_and(|t| *t == LineItemType::Pending)
    }
}

/// A selectable fulfillment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    /// A short description of the shipping method.
    pub label: String,

    /// A further description of the shipping method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// The amount associated with this shipping method, as a decimal string.
    pub amount: String,

    /// A client-defined identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl ShippingMethod {
    /// Creates a shipping method with only a label and amount.
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            amount: amount.into(),
            identifier: None,
        }
    }

    /// Sets the descriptive detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the client-defined identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}
