//! Single-slot callbacks for session events.
//!
//! Each lifecycle step has exactly one handler. Assigning a new handler
//! replaces the previous one; there is no subscriber list.
//!
//! Handlers run synchronously on the dispatching turn and should return
//! quickly: work such as contacting the merchant server is started from the
//! handler and finished later by calling the matching completion operation on
//! the session.

use std::fmt;

use crate::event::{
    CancelEvent, EventKind, PaymentAuthorizedEvent, PaymentMethodSelectedEvent,
    SessionEvent, ShippingContactSelectedEvent, ShippingMethodSelectedEvent,
    ValidateMerchantEvent,
};

/// A boxed event handler.
pub type Handler<E> = Box<dyn FnMut(&E) + Send>;

/// Holds at most one handler for events of type `E`.
pub struct Slot<E> {
    handler: Option<Handler<E>>,
}

impl<E> Slot<E> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self { handler: None }
    }

    /// Installs `handler`, replacing any previous one.
    pub fn set(&mut self, handler: impl FnMut(&E) + Send + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Removes the handler, returning it if one was installed.
    pub fn take(&mut self) -> Option<Handler<E>> {
        self.handler.take()
    }

    /// Returns `true` if a handler is installed.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.handler.is_some()
    }

    /// Invokes the handler with `event`.
    ///
    /// Returns `false` without doing anything when the slot is empty.
    pub fn invoke(&mut self, event: &E) -> bool {
        match self.handler.as_mut() {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl<E> Default for Slot<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> fmt::Debug for Slot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "<handler>" } else { "<empty>" })
    }
}

/// The six callback slots of a payment session.
#[derive(Debug, Default)]
pub struct Handlers {
    /// Called when the merchant must be validated.
    pub on_validate_merchant: Slot<ValidateMerchantEvent>,
    /// Called when the user selects a card.
    pub on_payment_method_selected: Slot<PaymentMethodSelectedEvent>,
    /// Called when the user selects a shipping contact.
    pub on_shipping_contact_selected: Slot<ShippingContactSelectedEvent>,
    /// Called when the user selects a shipping method.
    pub on_shipping_method_selected: Slot<ShippingMethodSelectedEvent>,
    /// Called when the user authorizes the payment.
    pub on_payment_authorized: Slot<PaymentAuthorizedEvent>,
    /// Called when the sheet is dismissed.
    pub on_cancel: Slot<CancelEvent>,
}

impl Handlers {
    /// Returns `true` if the slot for `kind` holds a handler.
    #[must_use]
    pub const fn is_set(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::ValidateMerchant => self.on_validate_merchant.is_set(),
            EventKind::PaymentMethodSelected => self.on_payment_method_selected.is_set(),
            EventKind::ShippingContactSelected => self.on_shipping_contact_selected.is_set(),
            EventKind::ShippingMethodSelected => self.on_shipping_method_selected.is_set(),
            EventKind::PaymentAuthorized => self.on_payment_authorized.is_set(),
            EventKind::Cancel => self.on_cancel.is_set(),
        }
    }

    /// Routes `event` to its slot. Returns `false` if that slot was empty.
    pub fn invoke(&mut self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::ValidateMerchant(e) => self.on_validate_merchant.invoke(e),
            SessionEvent::PaymentMethodSelected(e) => self.on_payment_method_selected.invoke(e),
            SessionEvent::ShippingContactSelected(e) => {
                self.on_shipping_contact_selected.invoke(e)
            }
            SessionEvent::ShippingMethodSelected(e) => self.on_shipping_method_selected.invoke(e),
            SessionEvent::PaymentAuthorized(e) => self.on_payment_authorized.invoke(e),
            SessionEvent::Cancel(e) => self.on_cancel.invoke(e),
        }
    }
}
