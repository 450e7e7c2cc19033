//! Parsing entry points for raw JSON received from a page or a host adapter.

use crate::{Payment, PaymentRequest, ProtocolError};

/// Parses a payment request from raw JSON bytes.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if the bytes are not a well-formed request.
pub fn parse_payment_request(data: &[u8]) -> Result<PaymentRequest, ProtocolError> {
    Ok(serde_json::from_slice(data)?)
}

/// Parses an authorized payment from raw JSON bytes.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if the bytes are not a well-formed payment.
pub fn parse_payment(data: &[u8]) -> Result<Payment, ProtocolError> {
    Ok(serde_json::from_slice(data)?)
}
