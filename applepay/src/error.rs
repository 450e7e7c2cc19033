//! Error types for payment sessions.
//!
//! Step outcomes the host understands (an invalid address, a wrong PIN) are
//! not errors; they travel as [`Status`](applepay_proto::Status) values. The
//! errors here cover misuse that never reaches the host: a malformed request,
//! an unsupported API version, or a completion call made out of turn.

use crate::event::EventKind;
use crate::session::{PendingStep, SessionPhase};

/// A payment request or sheet update that the host would refuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The country code is not a two-letter ISO 3166 code.
    #[error("invalid country code {0:?}: expected two uppercase letters")]
    InvalidCountryCode(String),

    /// The currency code is not a three-letter ISO 4217 code.
    #[error("invalid currency code {0:?}: expected three uppercase letters")]
    InvalidCurrencyCode(String),

    /// No payment network was listed.
    #[error("supportedNetworks must not be empty")]
    NoSupportedNetworks,

    /// The capability set lacks `supports3DS`.
    #[error("merchantCapabilities must include supports3DS")]
    Missing3DS,

    /// A line item or shipping method has an empty label.
    #[error("line item label must not be empty")]
    EmptyLabel,

    /// An amount is not a decimal string.
    #[error("invalid amount {amount:?} for {label:?}: {reason}")]
    InvalidAmount {
        /// Label of the offending row.
        label: String,
        /// The rejected amount text.
        amount: String,
        /// Why the amount could not be parsed.
        reason: String,
    },

    /// The total is negative.
    #[error("total amount {0} must not be negative")]
    NegativeTotal(String),
}

/// A session operation that cannot be performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The API version is below the minimum or unsupported by the host.
    #[error("Apple Pay JS version {0} is not supported")]
    UnsupportedVersion(u32),

    /// The payment request or an update failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// The operation is not allowed in the session's current phase.
    #[error("{operation} is not allowed while the session is {phase}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the session was in.
        phase: SessionPhase,
    },

    /// A completion call does not answer the step currently awaiting one.
    #[error("{operation} requires a pending {expected} step")]
    NotPending {
        /// The rejected completion call.
        operation: &'static str,
        /// The step that call answers.
        expected: PendingStep,
    },

    /// The host delivered an event while another step awaits completion.
    #[error("{event} event received while {pending} is awaiting completion")]
    StepInFlight {
        /// The event that arrived.
        event: EventKind,
        /// The step still awaiting completion.
        pending: PendingStep,
    },
}

/// A merchant configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory configuration value is empty.
    #[error("{0} must not be empty")]
    MissingValue(&'static str),

    /// The validation URL does not use https.
    #[error("validation URL must use https: {0}")]
    InsecureValidationUrl(String),

    /// The validation URL does not point at an Apple Pay gateway.
    #[error("validation URL host is not an Apple Pay gateway: {0}")]
    UntrustedValidationHost(String),
}
