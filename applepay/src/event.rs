//! Events the host raises during a payment session.
//!
//! Each event carries exactly the payload of its lifecycle step. A host adapter
//! that receives events as JSON can deserialize them as a [`SessionEvent`],
//! tagged by the host's DOM event type in a `"type"` field.

use applepay_proto::{Payment, PaymentContact, PaymentMethod, ShippingMethod};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The lifecycle step an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The sheet is shown and the merchant must be validated.
    ValidateMerchant,
    /// The user picked a card.
    PaymentMethodSelected,
    /// The user picked a shipping contact.
    ShippingContactSelected,
    /// The user picked a shipping method.
    ShippingMethodSelected,
    /// The user authorized the payment.
    PaymentAuthorized,
    /// The sheet was dismissed.
    Cancel,
}

impl EventKind {
    /// Returns the host's DOM event type (e.g., `"validatemerchant"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidateMerchant => "validatemerchant",
            Self::PaymentMethodSelected => "paymentmethodselected",
            Self::ShippingContactSelected => "shippingcontactselected",
            Self::ShippingMethodSelected => "shippingmethodselected",
            Self::PaymentAuthorized => "paymentauthorized",
            Self::Cancel => "cancel",
        }
    }

    /// Returns the name of the session callback property (e.g., `"onvalidatemerchant"`).
    #[must_use]
    pub const fn handler_name(&self) -> &'static str {
        match self {
            Self::ValidateMerchant => "onvalidatemerchant",
            Self::PaymentMethodSelected => "onpaymentmethodselected",
            Self::ShippingContactSelected => "onshippingcontactselected",
            Self::ShippingMethodSelected => "onshippingmethodselected",
            Self::PaymentAuthorized => "onpaymentauthorized",
            Self::Cancel => "oncancel",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when the sheet is displayed and the merchant must prove its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMerchantEvent {
    /// The gateway URL the merchant server must call to obtain a merchant session.
    #[serde(rename = "validationURL")]
    pub validation_url: Url,
}

/// Raised when the user selects a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSelectedEvent {
    /// The selected card.
    pub payment_method: PaymentMethod,
}

/// Raised when the user selects a shipping contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingContactSelectedEvent {
    /// The selected (possibly redacted) shipping contact.
    pub shipping_contact: PaymentContact,
}

/// Raised when the user selects a shipping method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethodSelectedEvent {
    /// The selected shipping method.
    pub shipping_method: ShippingMethod,
}

/// Raised when the user authorizes the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorizedEvent {
    /// The authorized payment, including its encrypted token.
    pub payment: Payment,
}

/// Raised when the sheet is dismissed. Carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelEvent {}

/// Any event a host can deliver to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionEvent {
    /// See [`ValidateMerchantEvent`].
    ValidateMerchant(ValidateMerchantEvent),
    /// See [`PaymentMethodSelectedEvent`].
    PaymentMethodSelected(PaymentMethodSelectedEvent),
    /// See [`ShippingContactSelectedEvent`].
    ShippingContactSelected(ShippingContactSelectedEvent),
    /// See [`ShippingMethodSelectedEvent`].
    ShippingMethodSelected(ShippingMethodSelectedEvent),
    /// See [`PaymentAuthorizedEvent`].
    PaymentAuthorized(PaymentAuthorizedEvent),
    /// See [`CancelEvent`].
    Cancel(CancelEvent),
}

impl SessionEvent {
    /// Returns the lifecycle step of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ValidateMerchant(_) => EventKind::ValidateMerchant,
            Self::PaymentMethodSelected(_) => EventKind::PaymentMethodSelected,
            Self::ShippingContactSelected(_) => EventKind::ShippingContactSelected,
            Self::ShippingMethodSelected(_) => EventKind::ShippingMethodSelected,
            Self::PaymentAuthorized(_) => EventKind::PaymentAuthorized,
            Self::Cancel(_) => EventKind::Cancel,
        }
    }
}

impl From<ValidateMerchantEvent> for SessionEvent {
    fn from(event: ValidateMerchantEvent) -> Self {
        Self::ValidateMerchant(event)
    }
}

impl From<PaymentMethodSelectedEvent> for SessionEvent {
    fn from(event: PaymentMethodSelectedEvent) -> Self {
        Self::PaymentMethodSelected(event)
    }
}

impl From<ShippingContactSelectedEvent> for SessionEvent {
    fn from(event: ShippingContactSelectedEvent) -> Self {
        Self::ShippingContactSelected(event)
    }
}

impl From<ShippingMethodSelectedEvent> for SessionEvent {
    fn from(event: ShippingMethodSelectedEvent) -> Self {
        Self::ShippingMethodSelected(event)
    }
}

impl From<PaymentAuthorizedEvent> for SessionEvent {
    fn from(event: PaymentAuthorizedEvent) -> Self {
        Self::PaymentAuthorized(event)
    }
}

impl From<CancelEvent> for SessionEvent {
    fn from(event: CancelEvent) -> Self {
        Self::Cancel(event)
    }
}
