//! The authorized payment and the card that produced it.

use serde::{Deserialize, Serialize};

use crate::contact::PaymentContact;
use crate::enums::{PaymentMethodType, PaymentPassActivationState};

/// A provisioned payment card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPass {
    /// The unique identifier for the primary account number of the card.
    pub primary_account_identifier: String,

    /// A version of the primary account number suitable for display.
    pub primary_account_number_suffix: String,

    /// The unique identifier for the device-specific account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_account_identifier: Option<String>,

    /// A version of the device account number suitable for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_account_number_suffix: Option<String>,

    /// The activation state of the pass.
    pub activation_state: PaymentPassActivationState,
}

/// The card the user chose on the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// A description of the card, suitable for display.
    pub display_name: String,

    /// The name of the payment network backing the card, suitable for display.
    pub network: String,

    /// The card's type of payment.
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,

    /// The payment pass associated with the card.
    pub payment_pass: PaymentPass,
}

/// Encrypted payment data produced by the secure element.
///
/// The structure is defined by the host and intentionally not interpreted
/// here; it is forwarded verbatim to the payment processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentData(serde_json::Value);

impl PaymentData {
    /// Returns a reference to the raw JSON value.
    #[must_use]
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the data and returns the raw JSON value.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for PaymentData {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The user's payment credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    /// The encrypted payment data.
    pub payment_data: PaymentData,

    /// The card used in the transaction.
    pub payment_method: PaymentMethod,

    /// A unique identifier for this payment.
    pub transaction_identifier: String,
}

/// The result of authorizing a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// The encrypted token for the authorized payment.
    pub token: PaymentToken,

    /// The billing contact selected by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_contact: Option<PaymentContact>,

    /// The shipping contact selected by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_contact: Option<PaymentContact>,
}

/// The opaque merchant session object returned by the payment gateway.
///
/// Obtained by the merchant server during merchant validation and handed back
/// to the host unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantSession(serde_json::Value);

impl MerchantSession {
    /// Returns a reference to the raw JSON value.
    #[must_use]
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the session and returns the raw JSON value.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for MerchantSession {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
