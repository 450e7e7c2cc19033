//! The seam between a session and the environment that renders the payment sheet.
//!
//! Everything behind [`PaymentHost`] belongs to the host: the sheet itself, the
//! secure element, the wallet, and the gateway the merchant is validated
//! against. A session only asks questions of the host and forwards the
//! caller's answers to it as [`HostCommand`]s.

use applepay_proto::{LineItem, MerchantSession, PaymentRequest, ShippingMethod, Status};
use std::future::Future;
use std::pin::Pin;

/// A boxed future resolving exactly once to a host answer.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Refreshed sheet contents after a payment method was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodUpdate {
    /// The new total.
    pub new_total: LineItem,
    /// The new line items.
    pub new_line_items: Vec<LineItem>,
}

/// Refreshed sheet contents after a shipping contact was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingContactUpdate {
    /// Whether the contact is acceptable.
    pub status: Status,
    /// Shipping methods available for the contact.
    pub new_shipping_methods: Vec<ShippingMethod>,
    /// The new total.
    pub new_total: LineItem,
    /// The new line items.
    pub new_line_items: Vec<LineItem>,
}

/// Refreshed sheet contents after a shipping method was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingMethodUpdate {
    /// Whether the method is acceptable.
    pub status: Status,
    /// The new total.
    pub new_total: LineItem,
    /// The new line items.
    pub new_line_items: Vec<LineItem>,
}

/// A call from the caller to the host, forwarded by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Show the sheet and start merchant validation.
    Begin {
        /// The API version the session was created with.
        version: u32,
        /// The request to display.
        request: Box<PaymentRequest>,
    },
    /// Resume the flow with the merchant session from the gateway.
    CompleteMerchantValidation(MerchantSession),
    /// Answer a payment method selection.
    CompletePaymentMethodSelection(PaymentMethodUpdate),
    /// Answer a shipping contact selection.
    CompleteShippingContactSelection(ShippingContactUpdate),
    /// Answer a shipping method selection.
    CompleteShippingMethodSelection(ShippingMethodUpdate),
    /// Finish the payment with a status.
    CompletePayment(Status),
    /// Dismiss the sheet.
    Abort,
}

/// The environment that renders the payment sheet.
///
/// The capability probes need no session and have no effect on one. The trait
/// is dyn-compatible so sessions can hold an `Arc<dyn PaymentHost>`.
pub trait PaymentHost: Send + Sync {
    /// Returns `true` if the device supports Apple Pay.
    fn can_make_payments(&self) -> bool;

    /// Returns `true` if the host supports the given API version.
    fn supports_version(&self, version: u32) -> bool;

    /// Resolves to `true` if the device supports Apple Pay and the wallet holds
    /// at least one active card usable with the merchant.
    fn can_make_payments_with_active_card<'a>(
        &'a self,
        merchant_identifier: &'a str,
    ) -> HostFuture<'a, bool>;

    /// Shows the host's Apple Pay setup flow; resolves to whether setup succeeded.
    fn open_payment_setup<'a>(&'a self, merchant_identifier: &'a str) -> HostFuture<'a, bool>;

    /// Receives a command forwarded by a session.
    fn deliver(&self, command: HostCommand);
}
