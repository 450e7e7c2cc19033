//! Wire format types for the Apple Pay JS payment session API.
//!
//! This crate describes the data exchanged between a merchant page and the
//! host's payment sheet: the payment request, line items, contacts, shipping
//! methods, the authorized payment and its opaque token, and the status codes
//! used to answer each step of a session. It has minimal dependencies (only
//! `serde`, `serde_json` and `thiserror`) and holds no behavior beyond
//! (de)serialization.
//!
//! # Modules
//!
//! - [`enums`] — Closed enumerations (`ContactField`, `MerchantCapability`, ...)
//! - [`open_enum`] — [`OpenEnum`], the "enum or string" representation
//! - [`line_item`] — [`LineItem`] and [`ShippingMethod`]
//! - [`contact`] — [`PaymentContact`]
//! - [`helpers`] — Parsing raw JSON into requests and payments
//! - [`payment`] — [`Payment`], [`PaymentToken`], [`PaymentMethod`], [`PaymentPass`]
//! - [`request`] — [`PaymentRequest`]
//! - [`status`] — [`Status`] completion codes
//!
//! # Wire Format
//!
//! All structs serialize to JSON using camelCase field names, matching the
//! dictionaries the host accepts and produces.

pub mod contact;
pub mod enums;
pub mod helpers;
pub mod line_item;
pub mod open_enum;
pub mod payment;
pub mod request;
pub mod status;

pub use contact::PaymentContact;
pub use enums::{
    ContactField, LineItemType, MerchantCapability, PaymentMethodType, PaymentNetwork,
    PaymentPassActivationState, ShippingType,
};
pub use helpers::{parse_payment, parse_payment_request};
pub use line_item::{LineItem, ShippingMethod};
pub use open_enum::{OpenEnum, WireEnum};
pub use payment::{
    MerchantSession, Payment, PaymentData, PaymentMethod, PaymentPass, PaymentToken,
};
pub use request::{PaymentRequest, ShippingMethods};
pub use status::Status;

/// Lowest API version accepted by any host.
pub const MIN_API_VERSION: u32 = 1;

/// Errors that can occur when interpreting Apple Pay wire values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A numeric status code is outside the known range.
    #[error("unknown status code: {0}")]
    UnknownStatus(u64),

    /// A string does not name any member of a closed enumeration.
    #[error("unknown {kind} value: {value}")]
    UnknownMember {
        /// The enumeration being parsed (e.g., `"ContactField"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
