//! Status codes used to answer each step of a payment session.
//!
//! The host communicates outcomes as data: every completion call carries one
//! of these codes, and the host decides how to render it (re-prompting for an
//! address, showing a PIN error, dismissing the sheet).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::ProtocolError;

/// The result of a session step.
///
/// Serializes as the host's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// The requested action succeeded.
    Success = 0,
    /// The requested action failed.
    Failure = 1,
    /// The billing address is not valid.
    InvalidBillingPostalAddress = 2,
    /// The shipping address is not valid.
    InvalidShippingPostalAddress = 3,
    /// The shipping contact information is not valid.
    InvalidShippingContact = 4,
    /// The required PIN was not provided. Cards on the China Union Pay network may require a PIN.
    PinRequired = 5,
    /// The PIN is not valid.
    PinIncorrect = 6,
    /// The maximum number of PIN attempts was reached and the user is locked out.
    PinLockout = 7,
}

impl Status {
    /// The requested action succeeded.
    pub const STATUS_SUCCESS: Self = Self::Success;
    /// The requested action failed.
    pub const STATUS_FAILURE: Self = Self::Failure;
    /// The billing address is not valid.
    pub const STATUS_INVALID_BILLING_POSTAL_ADDRESS: Self = Self::InvalidBillingPostalAddress;
    /// The shipping address is not valid.
    pub const STATUS_INVALID_SHIPPING_POSTAL_ADDRESS: Self = Self::InvalidShippingPostalAddress;
    /// The shipping contact information is not valid.
    pub const STATUS_INVALID_SHIPPING_CONTACT: Self = Self::InvalidShippingContact;
    /// The PIN is not valid.
    pub const STATUS_PIN_INCORRECT: Self = Self::PinIncorrect;
    /// The user is locked out after too many PIN attempts.
    pub const STATUS_PIN_LOCKOUT: Self = Self::PinLockout;
    /// The required PIN was not provided.
    pub const STATUS_PIN_REQUIRED: Self = Self::PinRequired;

    /// Every status, in code order.
    pub const ALL: [Self; 8] = [
        Self::Success,
        Self::Failure,
        Self::InvalidBillingPostalAddress,
        Self::InvalidShippingPostalAddress,
        Self::InvalidShippingContact,
        Self::PinRequired,
        Self::PinIncorrect,
        Self::PinLockout,
    ];

    /// Returns the host's numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` for [`Status::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the host constant name (e.g., `"STATUS_PIN_LOCKOUT"`).
    #[must_use]
    pub const fn constant_name(self) -> &'static str {
        match self {
            Self::Success => "STATUS_SUCCESS",
            Self::Failure => "STATUS_FAILURE",
            Self::InvalidBillingPostalAddress => "STATUS_INVALID_BILLING_POSTAL_ADDRESS",
            Self::InvalidShippingPostalAddress => "STATUS_INVALID_SHIPPING_POSTAL_ADDRESS",
            Self::InvalidShippingContact => "STATUS_INVALID_SHIPPING_CONTACT",
            Self::PinRequired => "STATUS_PIN_REQUIRED",
            Self::PinIncorrect => "STATUS_PIN_INCORRECT",
            Self::PinLockout => "STATUS_PIN_LOCKOUT",
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ProtocolError::UnknownStatus(u64::from(code)))
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constant_name())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u64::deserialize(deserializer)?;
        u8::try_from(code)
            .map_err(|_| ProtocolError::UnknownStatus(code))
            .and_then(Self::try_from)
            .map_err(serde::de::Error::custom)
    }
}
