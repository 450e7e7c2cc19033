//! The payment session handle.
//!
//! A [`PaymentSession`] coordinates one payment attempt with the host's payment
//! sheet. The host drives the flow: it raises events (delivered through
//! [`PaymentSession::dispatch`]) and waits for the caller to answer each one
//! with the matching completion call. Control alternates strictly between the
//! two sides, one step at a time.
//!
//! ```text
//! Created ──begin──▶ ValidatingMerchant ──validatemerchant / completeMerchantValidation──▶ Interactive
//!                                                                                            │
//!        selection event ──▶ (pending step) ──complete*Selection──▶ Interactive ◀───────────┤
//!        paymentauthorized ──▶ (pending) ──completePayment──▶ Completed(status)              │
//!   abort ──▶ Aborted                                    cancel (host) ──▶ Cancelled ◀───────┘
//! ```
//!
//! The phase is tracked so calls made out of turn fail locally with a
//! [`SessionError`] instead of reaching the host.

use applepay_proto::{
    LineItem, MIN_API_VERSION, MerchantSession, PaymentRequest, ShippingMethod, Status,
};
use std::fmt;
use std::sync::Arc;

use crate::error::SessionError;
use crate::event::{
    CancelEvent, EventKind, PaymentAuthorizedEvent, PaymentMethodSelectedEvent,
    SessionEvent, ShippingContactSelectedEvent, ShippingMethodSelectedEvent,
    ValidateMerchantEvent,
};
use crate::handler::Handlers;
use crate::host::{
    HostCommand, PaymentHost, PaymentMethodUpdate, ShippingContactUpdate, ShippingMethodUpdate,
};
use crate::validate::{validate_request, validate_shipping_methods, validate_sheet};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Constructed; [`PaymentSession::begin`] has not been called.
    Created,
    /// The sheet is up and the merchant is being validated.
    ValidatingMerchant,
    /// The merchant is validated; the user is choosing and authorizing.
    Interactive,
    /// [`PaymentSession::complete_payment`] ended the session with this status.
    Completed(Status),
    /// The caller aborted the session.
    Aborted,
    /// The host dismissed the sheet.
    Cancelled,
}

impl SessionPhase {
    /// Returns `true` once the session can no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Aborted | Self::Cancelled)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::ValidatingMerchant => f.write_str("validating merchant"),
            Self::Interactive => f.write_str("interactive"),
            Self::Completed(status) => write!(f, "completed ({status})"),
            Self::Aborted => f.write_str("aborted"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A host event that awaits the caller's completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingStep {
    /// Answered by [`PaymentSession::complete_merchant_validation`].
    MerchantValidation,
    /// Answered by [`PaymentSession::complete_payment_method_selection`].
    PaymentMethodSelection,
    /// Answered by [`PaymentSession::complete_shipping_contact_selection`].
    ShippingContactSelection,
    /// Answered by [`PaymentSession::complete_shipping_method_selection`].
    ShippingMethodSelection,
    /// Answered by [`PaymentSession::complete_payment`].
    PaymentAuthorization,
}

impl PendingStep {
    const fn for_event(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::ValidateMerchant => Some(Self::MerchantValidation),
            EventKind::PaymentMethodSelected => Some(Self::PaymentMethodSelection),
            EventKind::ShippingContactSelected => Some(Self::ShippingContactSelection),
            EventKind::ShippingMethodSelected => Some(Self::ShippingMethodSelection),
            EventKind::PaymentAuthorized => Some(Self::PaymentAuthorization),
            EventKind::Cancel => None,
        }
    }
}

impl fmt::Display for PendingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MerchantValidation => "merchant validation",
            Self::PaymentMethodSelection => "payment method selection",
            Self::ShippingContactSelection => "shipping contact selection",
            Self::ShippingMethodSelection => "shipping method selection",
            Self::PaymentAuthorization => "payment authorization",
        })
    }
}

/// A handle for one payment attempt.
pub struct PaymentSession {
    version: u32,
    request: PaymentRequest,
    host: Arc<dyn PaymentHost>,
    handlers: Handlers,
    phase: SessionPhase,
    pending: Option<PendingStep>,
}

impl fmt::Debug for PaymentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentSession")
            .field("version", &self.version)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

impl PaymentSession {
    /// Creates a session for `request` using API `version`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedVersion`] if the host does not support
    /// `version`, or [`SessionError::InvalidRequest`] if the request would be
    /// refused.
    pub fn new(
        version: u32,
        request: PaymentRequest,
        host: Arc<dyn PaymentHost>,
    ) -> Result<Self, SessionError> {
        if version < MIN_API_VERSION || !host.supports_version(version) {
            return Err(SessionError::UnsupportedVersion(version));
        }
        validate_request(&request)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            version,
            country = %request.country_code,
            currency = %request.currency_code,
            "Created payment session"
        );

        Ok(Self {
            version,
            request,
            host,
            handlers: Handlers::default(),
            phase: SessionPhase::Created,
            pending: None,
        })
    }

    /// Returns the API version the session was created with.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the request, including any totals refreshed by completion calls.
    #[must_use]
    pub const fn request(&self) -> &PaymentRequest {
        &self.request
    }

    /// Returns the total currently shown on the sheet.
    #[must_use]
    pub const fn total(&self) -> &LineItem {
        &self.request.total
    }

    /// Returns the line items currently shown on the sheet.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        self.request.line_items()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the step awaiting a completion call, if any.
    #[must_use]
    pub const fn pending_step(&self) -> Option<PendingStep> {
        self.pending
    }

    /// Returns the callback slots.
    #[must_use]
    pub const fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Sets the `onvalidatemerchant` handler, replacing any previous one.
    pub fn on_validate_merchant(
        &mut self,
        handler: impl FnMut(&ValidateMerchantEvent) + Send + 'static,
    ) {
        self.handlers.on_validate_merchant.set(handler);
    }

    /// Sets the `onpaymentmethodselected` handler, replacing any previous one.
    pub fn on_payment_method_selected(
        &mut self,
        handler: impl FnMut(&PaymentMethodSelectedEvent) + Send + 'static,
    ) {
        self.handlers.on_payment_method_selected.set(handler);
    }

    /// Sets the `onshippingcontactselected` handler, replacing any previous one.
    pub fn on_shipping_contact_selected(
        &mut self,
        handler: impl FnMut(&ShippingContactSelectedEvent) + Send + 'static,
    ) {
        self.handlers.on_shipping_contact_selected.set(handler);
    }

    /// Sets the `onshippingmethodselected` handler, replacing any previous one.
    pub fn on_shipping_method_selected(
        &mut self,
        handler: impl FnMut(&ShippingMethodSelectedEvent) + Send + 'static,
    ) {
        self.handlers.on_shipping_method_selected.set(handler);
    }

    /// Sets the `onpaymentauthorized` handler, replacing any previous one.
    pub fn on_payment_authorized(
        &mut self,
        handler: impl FnMut(&PaymentAuthorizedEvent) + Send + 'static,
    ) {
        self.handlers.on_payment_authorized.set(handler);
    }

    /// Sets the `oncancel` handler, replacing any previous one.
    pub fn on_cancel(&mut self, handler: impl FnMut(&CancelEvent) + Send + 'static) {
        self.handlers.on_cancel.set(handler);
    }

    /// Shows the sheet and starts merchant validation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] unless the session was just created.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Created {
            return Err(self.invalid_state("begin"));
        }
        self.phase = SessionPhase::ValidatingMerchant;
        self.host.deliver(HostCommand::Begin {
            version: self.version,
            request: Box::new(self.request.clone()),
        });
        Ok(())
    }

    /// Resumes the flow with the merchant session obtained out of band.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPending`] unless a `validatemerchant` event is
    /// awaiting completion.
    pub fn complete_merchant_validation(
        &mut self,
        merchant_session: MerchantSession,
    ) -> Result<(), SessionError> {
        self.finish_step("completeMerchantValidation", PendingStep::MerchantValidation)?;
        self.phase = SessionPhase::Interactive;
        self.host
            .deliver(HostCommand::CompleteMerchantValidation(merchant_session));
        Ok(())
    }

    /// Answers a payment method selection with a refreshed total and line items.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPending`] unless a payment method selection is
    /// awaiting completion, or [`SessionError::InvalidRequest`] if the update is
    /// malformed.
    pub fn complete_payment_method_selection(
        &mut self,
        new_total: LineItem,
        new_line_items: Vec<LineItem>,
    ) -> Result<(), SessionError> {
        self.expect_pending(
            "completePaymentMethodSelection",
            PendingStep::PaymentMethodSelection,
        )?;
        validate_sheet(&new_total, &new_line_items)?;
        self.pending = None;
        self.apply_sheet(&new_total, &new_line_items);
        self.host
            .deliver(HostCommand::CompletePaymentMethodSelection(
                PaymentMethodUpdate {
                    new_total,
                    new_line_items,
                },
            ));
        Ok(())
    }

    /// Answers a shipping contact selection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPending`] unless a shipping contact selection
    /// is awaiting completion, or [`SessionError::InvalidRequest`] if the update
    /// is malformed.
    pub fn complete_shipping_contact_selection(
        &mut self,
        status: Status,
        new_shipping_methods: Vec<ShippingMethod>,
        new_total: LineItem,
        new_line_items: Vec<LineItem>,
    ) -> Result<(), SessionError> {
        self.expect_pending(
            "completeShippingContactSelection",
            PendingStep::ShippingContactSelection,
        )?;
        validate_shipping_methods(&new_shipping_methods)?;
        validate_sheet(&new_total, &new_line_items)?;
        self.pending = None;
        self.apply_sheet(&new_total, &new_line_items);
        self.request.shipping_methods = Some(new_shipping_methods.clone().into());
        self.host
            .deliver(HostCommand::CompleteShippingContactSelection(
                ShippingContactUpdate {
                    status,
                    new_shipping_methods,
                    new_total,
                    new_line_items,
                },
            ));
        Ok(())
    }

    /// Answers a shipping method selection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPending`] unless a shipping method selection
    /// is awaiting completion, or [`SessionError::InvalidRequest`] if the update
    /// is malformed.
    pub fn complete_shipping_method_selection(
        &mut self,
        status: Status,
        new_total: LineItem,
        new_line_items: Vec<LineItem>,
    ) -> Result<(), SessionError> {
        self.expect_pending(
            "completeShippingMethodSelection",
            PendingStep::ShippingMethodSelection,
        )?;
        validate_sheet(&new_total, &new_line_items)?;
        self.pending = None;
        self.apply_sheet(&new_total, &new_line_items);
        self.host
            .deliver(HostCommand::CompleteShippingMethodSelection(
                ShippingMethodUpdate {
                    status,
                    new_total,
                    new_line_items,
                },
            ));
        Ok(())
    }

    /// Finishes the payment. The session ends whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotPending`] unless an authorized payment is
    /// awaiting completion.
    pub fn complete_payment(&mut self, status: Status) -> Result<(), SessionError> {
        self.finish_step("completePayment", PendingStep::PaymentAuthorization)?;
        self.phase = SessionPhase::Completed(status);

        #[cfg(feature = "telemetry")]
        tracing::info!(status = %status, "Payment session completed");

        self.host.deliver(HostCommand::CompletePayment(status));
        Ok(())
    }

    /// Ends the session and dismisses the sheet.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] if the session already ended.
    pub fn abort(&mut self) -> Result<(), SessionError> {
        if self.phase.is_terminal() {
            return Err(self.invalid_state("abort"));
        }
        self.phase = SessionPhase::Aborted;
        self.pending = None;

        #[cfg(feature = "telemetry")]
        tracing::info!("Payment session aborted");

        self.host.deliver(HostCommand::Abort);
        Ok(())
    }

    /// Delivers a host event: advances the phase and invokes the handler.
    ///
    /// Returns whether a handler was installed for the event. Host adapters
    /// call this; merchant code normally does not.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] if the event is not expected in
    /// the current phase, or [`SessionError::StepInFlight`] if another step is
    /// still awaiting completion. Cancellation is accepted at any time before
    /// the session ends.
    pub fn dispatch(&mut self, event: &SessionEvent) -> Result<bool, SessionError> {
        let kind = event.kind();
        if self.phase.is_terminal() {
            return Err(self.invalid_state(kind.as_str()));
        }

        match PendingStep::for_event(kind) {
            None => {
                self.phase = SessionPhase::Cancelled;
                self.pending = None;
            }
            Some(step) => {
                let expected_phase = if step == PendingStep::MerchantValidation {
                    SessionPhase::ValidatingMerchant
                } else {
                    SessionPhase::Interactive
                };
                if self.phase != expected_phase {
                    return Err(self.invalid_state(kind.as_str()));
                }
                if let Some(pending) = self.pending {
                    return Err(SessionError::StepInFlight {
                        event: kind,
                        pending,
                    });
                }
                self.pending = Some(step);
            }
        }

        let handled = self.handlers.invoke(event);

        #[cfg(feature = "telemetry")]
        {
            if handled {
                tracing::debug!(event = %kind, phase = %self.phase, "Dispatched session event");
            } else {
                tracing::warn!(
                    event = %kind,
                    handler = kind.handler_name(),
                    "No handler installed for session event"
                );
            }
        }

        Ok(handled)
    }

    fn expect_pending(
        &self,
        operation: &'static str,
        expected: PendingStep,
    ) -> Result<(), SessionError> {
        if self.phase.is_terminal() {
            return Err(self.invalid_state(operation));
        }
        if self.pending == Some(expected) {
            Ok(())
        } else {
            Err(SessionError::NotPending {
                operation,
                expected,
            })
        }
    }

    fn finish_step(
        &mut self,
        operation: &'static str,
        expected: PendingStep,
    ) -> Result<(), SessionError> {
        self.expect_pending(operation, expected)?;
        self.pending = None;
        Ok(())
    }

    fn apply_sheet(&mut self, total: &LineItem, line_items: &[LineItem]) {
        self.request.total = total.clone();
        self.request.line_items = Some(line_items.to_vec());
    }

    const fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostFuture;
    use applepay_proto::{
        LineItemType, Payment, PaymentContact, PaymentData, PaymentMethod, PaymentMethodType,
        PaymentPass, PaymentPassActivationState, PaymentToken,
    };
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingHost {
        commands: Mutex<Vec<HostCommand>>,
    }

    impl RecordingHost {
        fn commands(&self) -> Vec<HostCommand> {
            self.commands.lock().unwrap().clone()
        }
    }

    impl PaymentHost for RecordingHost {
        fn can_make_payments(&self) -> bool {
            true
        }

        fn supports_version(&self, version: u32) -> bool {
            (1..=3).contains(&version)
        }

        fn can_make_payments_with_active_card<'a>(
            &'a self,
            _merchant_identifier: &'a str,
        ) -> HostFuture<'a, bool> {
            Box::pin(async { true })
        }

        fn open_payment_setup<'a>(&'a self, _merchant_identifier: &'a str) -> HostFuture<'a, bool> {
            Box::pin(async { false })
        }

        fn deliver(&self, command: HostCommand) {
            self.commands.lock().unwrap().push(command);
        }
    }

    fn request() -> PaymentRequest {
        PaymentRequest::new(
            "US",
            "USD",
            ["masterCard", "visa"],
            ["supports3DS"],
            LineItem::new("My Store", "9.99"),
        )
    }

    fn session() -> (Arc<RecordingHost>, PaymentSession) {
        let host = Arc::new(RecordingHost::default());
        let session = PaymentSession::new(1, request(), host.clone()).unwrap();
        (host, session)
    }

    fn validated_session() -> (Arc<RecordingHost>, PaymentSession) {
        let (host, mut session) = session();
        session.begin().unwrap();
        session.dispatch(&validate_merchant()).unwrap();
        session
            .complete_merchant_validation(MerchantSession::from(json!({})))
            .unwrap();
        (host, session)
    }

    fn validate_merchant() -> SessionEvent {
        ValidateMerchantEvent {
            validation_url: "https://apple-pay-gateway.apple.com/paymentservices/startSession"
                .parse()
                .unwrap(),
        }
        .into()
    }

    fn payment_method() -> PaymentMethod {
        PaymentMethod {
            display_name: "Visa 0492".into(),
            network: "Visa".into(),
            method_type: PaymentMethodType::Credit,
            payment_pass: PaymentPass {
                primary_account_identifier: "V0010010000000000000000000000001".into(),
                primary_account_number_suffix: "0492".into(),
                device_account_identifier: None,
                device_account_number_suffix: None,
                activation_state: PaymentPassActivationState::Activated,
            },
        }
    }

    fn payment_authorized() -> SessionEvent {
        PaymentAuthorizedEvent {
            payment: Payment {
                token: PaymentToken {
                    payment_data: PaymentData::from(json!({ "version": "EC_v1" })),
                    payment_method: payment_method(),
                    transaction_identifier: "C1CAF5AE".into(),
                },
                billing_contact: None,
                shipping_contact: None,
            },
        }
        .into()
    }

    fn line_items() -> Vec<LineItem> {
        vec![
            LineItem::new("Subtotal", "35.00").with_type(LineItemType::Final),
            LineItem::new("Free Shipping", "0.00").with_type("pending"),
            LineItem::new("Estimated Tax", "3.06"),
        ]
    }

    #[test]
    fn test_new_rejects_unsupported_version() {
        let host = Arc::new(RecordingHost::default());
        let err = PaymentSession::new(0, request(), host.clone()).unwrap_err();
        assert_eq!(err, SessionError::UnsupportedVersion(0));
        let err = PaymentSession::new(9, request(), host).unwrap_err();
        assert_eq!(err, SessionError::UnsupportedVersion(9));
    }

    #[test]
    fn test_new_rejects_invalid_request() {
        let host = Arc::new(RecordingHost::default());
        let mut req = request();
        req.merchant_capabilities = vec!["supportsDebit".into()];
        let err = PaymentSession::new(1, req, host.clone()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidRequest(_)));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_begin_forwards_request() {
        let (host, mut session) = session();
        session.begin().unwrap();
        assert_eq!(session.phase(), SessionPhase::ValidatingMerchant);
        assert_eq!(
            host.commands(),
            vec![HostCommand::Begin {
                version: 1,
                request: Box::new(request()),
            }]
        );
        assert!(matches!(
            session.begin(),
            Err(SessionError::InvalidState { operation: "begin", .. })
        ));
    }

    #[test]
    fn test_merchant_validation_flow() {
        let (host, mut session) = session();
        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        session.on_validate_merchant(move |event| {
            *slot.lock().unwrap() = Some(event.validation_url.clone());
        });

        session.begin().unwrap();
        assert!(session.dispatch(&validate_merchant()).unwrap());
        assert_eq!(session.pending_step(), Some(PendingStep::MerchantValidation));
        assert_eq!(
            seen.lock().unwrap().as_ref().and_then(|u| u.host_str().map(str::to_owned)),
            Some("apple-pay-gateway.apple.com".to_owned())
        );

        let merchant_session = MerchantSession::from(json!({ "merchantSessionIdentifier": "abc" }));
        session
            .complete_merchant_validation(merchant_session.clone())
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Interactive);
        assert_eq!(session.pending_step(), None);
        assert_eq!(
            host.commands().last(),
            Some(&HostCommand::CompleteMerchantValidation(merchant_session))
        );
    }

    #[test]
    fn test_validate_merchant_requires_begin() {
        let (_host, mut session) = session();
        assert!(matches!(
            session.dispatch(&validate_merchant()),
            Err(SessionError::InvalidState {
                phase: SessionPhase::Created,
                ..
            })
        ));
    }

    #[test]
    fn test_selection_update_uses_request_shapes() {
        let initial_items = vec![
            LineItem::new("Subtotal", "35.00").with_type(LineItemType::Final),
            LineItem::new("Free Shipping", "0.00").with_type("pending"),
        ];
        let host = Arc::new(RecordingHost::default());
        let mut session = PaymentSession::new(
            1,
            request().with_line_items(initial_items.clone()),
            host.clone(),
        )
        .unwrap();
        assert_eq!(session.line_items(), initial_items.as_slice());
        session.begin().unwrap();
        session.dispatch(&validate_merchant()).unwrap();
        session
            .complete_merchant_validation(MerchantSession::from(json!({})))
            .unwrap();

        let total = LineItem::new("Subtotal", "35.00").with_type(LineItemType::Final);

        session
            .dispatch(&PaymentMethodSelectedEvent {
                payment_method: payment_method(),
            }
            .into())
            .unwrap();
        let updated_items = vec![
            initial_items[0].clone(),
            LineItem::new("Express Shipping", "5.00").with_type("pending"),
        ];
        session
            .complete_payment_method_selection(total.clone(), updated_items.clone())
            .unwrap();

        assert_eq!(session.total(), &total);
        assert_eq!(session.line_items(), updated_items.as_slice());
        assert_eq!(
            host.commands().last(),
            Some(&HostCommand::CompletePaymentMethodSelection(
                PaymentMethodUpdate {
                    new_total: total,
                    new_line_items: updated_items,
                }
            ))
        );

        // The refreshed request still validates as a construction-time request.
        assert_eq!(validate_request(session.request()), Ok(()));
    }

    #[test]
    fn test_shipping_contact_selection_with_invalid_address_status() {
        let (host, mut session) = validated_session();
        let methods = vec![
            ShippingMethod::new("Free Shipping", "0.00")
                .with_detail("Arrives in 5 to 7 days")
                .with_identifier("FreeShipping"),
            ShippingMethod::new("2-hour Shipping", "5.00"),
        ];
        let total = LineItem::new("Subtotal", "35.00");

        session
            .dispatch(&ShippingContactSelectedEvent {
                shipping_contact: PaymentContact {
                    postal_code: Some("00000".into()),
                    ..PaymentContact::default()
                },
            }
            .into())
            .unwrap();
        session
            .complete_shipping_contact_selection(
                Status::STATUS_INVALID_SHIPPING_POSTAL_ADDRESS,
                methods.clone(),
                total.clone(),
                line_items(),
            )
            .unwrap();

        assert_eq!(session.phase(), SessionPhase::Interactive);
        assert_eq!(
            host.commands().last(),
            Some(&HostCommand::CompleteShippingContactSelection(
                ShippingContactUpdate {
                    status: Status::InvalidShippingPostalAddress,
                    new_shipping_methods: methods,
                    new_total: total,
                    new_line_items: line_items(),
                }
            ))
        );
    }

    #[test]
    fn test_shipping_method_selection() {
        let (host, mut session) = validated_session();
        let event = ShippingMethodSelectedEvent {
            shipping_method: ShippingMethod::new("2-hour Shipping", "5.00"),
        };
        session.dispatch(&event.into()).unwrap();
        session
            .complete_shipping_method_selection(
                Status::STATUS_SUCCESS,
                LineItem::new("My Store", "14.99"),
                vec![],
            )
            .unwrap();
        assert_eq!(session.total().amount, "14.99");
        assert!(matches!(
            host.commands().last(),
            Some(HostCommand::CompleteShippingMethodSelection(update)) if update.status.is_success()
        ));
    }

    #[test]
    fn test_one_step_in_flight_at_a_time() {
        let (_host, mut session) = validated_session();
        session
            .dispatch(&PaymentMethodSelectedEvent {
                payment_method: payment_method(),
            }
            .into())
            .unwrap();

        let err = session
            .dispatch(&ShippingMethodSelectedEvent {
                shipping_method: ShippingMethod::new("Express", "5.00"),
            }
            .into())
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::StepInFlight {
                event: EventKind::ShippingMethodSelected,
                pending: PendingStep::PaymentMethodSelection,
            }
        );
    }

    #[test]
    fn test_completion_must_match_pending_step() {
        let (host, mut session) = validated_session();
        let before = host.commands().len();

        let err = session
            .complete_shipping_method_selection(
                Status::Success,
                LineItem::new("My Store", "9.99"),
                vec![],
            )
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::NotPending {
                operation: "completeShippingMethodSelection",
                expected: PendingStep::ShippingMethodSelection,
            }
        );
        assert!(session.complete_payment(Status::Success).is_err());
        assert_eq!(host.commands().len(), before);
    }

    #[test]
    fn test_invalid_update_keeps_step_pending() {
        let (_host, mut session) = validated_session();
        session
            .dispatch(&PaymentMethodSelectedEvent {
                payment_method: payment_method(),
            }
            .into())
            .unwrap();

        let err = session
            .complete_payment_method_selection(LineItem::new("My Store", "abc"), vec![])
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidRequest(_)));
        assert_eq!(
            session.pending_step(),
            Some(PendingStep::PaymentMethodSelection)
        );
        assert_eq!(session.total().amount, "9.99");
    }

    #[test]
    fn test_complete_payment_is_terminal_for_every_status() {
        for status in Status::ALL {
            let (host, mut session) = validated_session();
            session.dispatch(&payment_authorized()).unwrap();
            session.complete_payment(status).unwrap();

            assert_eq!(session.phase(), SessionPhase::Completed(status));
            assert!(session.phase().is_terminal());
            assert_eq!(
                host.commands().last(),
                Some(&HostCommand::CompletePayment(status))
            );
            assert!(session.abort().is_err());
        }
    }

    #[test]
    fn test_abort_from_any_live_phase() {
        let (host, mut session) = session();
        session.abort().unwrap();
        assert_eq!(session.phase(), SessionPhase::Aborted);
        assert_eq!(host.commands(), vec![HostCommand::Abort]);

        let (_host, mut session) = validated_session();
        session.dispatch(&payment_authorized()).unwrap();
        session.abort().unwrap();
        assert_eq!(session.pending_step(), None);
        assert!(session.complete_payment(Status::Success).is_err());
    }

    #[test]
    fn test_host_cancel_at_any_point() {
        let cancelled = Arc::new(AtomicUsize::new(0));

        let (_host, mut session) = session();
        session.begin().unwrap();
        session.dispatch(&validate_merchant()).unwrap();

        let counter = Arc::clone(&cancelled);
        session.on_cancel(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(session.dispatch(&CancelEvent {}.into()).unwrap());
        assert_eq!(session.phase(), SessionPhase::Cancelled);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);

        assert!(session.dispatch(&CancelEvent {}.into()).is_err());
        assert!(
            session
                .complete_merchant_validation(MerchantSession::default())
                .is_err()
        );
    }

    #[test]
    fn test_dispatch_without_handler_still_advances() {
        let (_host, mut session) = validated_session();
        assert!(!session.dispatch(&payment_authorized()).unwrap());
        assert_eq!(
            session.pending_step(),
            Some(PendingStep::PaymentAuthorization)
        );
    }

    #[test]
    fn test_handlers_receive_only_their_payload() {
        let (_host, mut session) = validated_session();
        let labels = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&labels);
        session.on_shipping_method_selected(move |event| {
            sink.lock().unwrap().push(event.shipping_method.label.clone());
        });
        let sink = Arc::clone(&labels);
        session.on_payment_authorized(move |event| {
            sink.lock()
                .unwrap()
                .push(event.payment.token.transaction_identifier.clone());
        });

        session
            .dispatch(&ShippingMethodSelectedEvent {
                shipping_method: ShippingMethod::new("Express", "5.00"),
            }
            .into())
            .unwrap();
        session
            .complete_shipping_method_selection(
                Status::Success,
                LineItem::new("My Store", "14.99"),
                vec![],
            )
            .unwrap();
        session.dispatch(&payment_authorized()).unwrap();

        assert_eq!(*labels.lock().unwrap(), vec!["Express", "C1CAF5AE"]);
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn test_traced_dispatch_without_handler() {
        let (host, mut session) = session();
        session.begin().unwrap();
        assert_eq!(session.dispatch(&validate_merchant()), Ok(false));

        session.on_cancel(|_| {});
        assert_eq!(session.dispatch(&CancelEvent {}.into()), Ok(true));
        assert_eq!(session.phase(), SessionPhase::Cancelled);
        assert_eq!(host.commands().len(), 1);
    }
}
