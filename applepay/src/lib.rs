#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Apple Pay JS payment sessions for Rust.
//!
//! This crate models the in-page Apple Pay session: the merchant builds a
//! [`PaymentRequest`], opens a [`PaymentSession`] against a [`PaymentHost`]
//! (the environment that renders the payment sheet), and answers each host
//! event with the matching completion call. Payment processing, decryption of
//! the payment token, and the network call to the validation gateway all stay
//! outside this crate.
//!
//! # Overview
//!
//! A session moves through merchant validation, any number of payment method
//! and shipping selections, and payment authorization. Each step is a host
//! event delivered to a single-slot handler, followed by the caller's
//! completion call carrying a [`Status`] and refreshed sheet contents. Only
//! one step is in flight at a time, and the host may cancel at any point.
//!
//! # Modules
//!
//! - [`config`] - Merchant identity and the merchant validation request body
//! - [`error`] - Request, session and configuration errors
//! - [`event`] - Host events and their payloads
//! - [`handler`] - Single-slot event handlers
//! - [`host`] - The [`PaymentHost`] seam: capability probes and forwarded commands
//! - [`session`] - The [`PaymentSession`] handle and its lifecycle
//! - [`validate`] - Request and sheet update validation
//!
//! Wire types are re-exported from [`applepay_proto`] as [`proto`].
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events on session transitions
//! - `cli` - Derives `clap::Args` for [`config::MerchantConfig`]

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod host;
pub mod session;
pub mod validate;

pub use applepay_proto as proto;
pub use applepay_proto::{
    ContactField, LineItem, LineItemType, MerchantCapability, MerchantSession, OpenEnum, Payment,
    PaymentContact, PaymentMethod, PaymentMethodType, PaymentNetwork, PaymentPass,
    PaymentPassActivationState, PaymentRequest, PaymentToken, ShippingMethod, ShippingType, Status,
};
pub use error::{ConfigError, RequestError, SessionError};
pub use event::{EventKind, SessionEvent};
pub use host::{HostCommand, PaymentHost};
pub use session::{PaymentSession, PendingStep, SessionPhase};
