//! Closed enumerations of the payment session API.
//!
//! Each enumeration serializes as its wire name (e.g., `"postalAddress"`) and
//! accepts either that name or the member's ordinal on deserialization. Fields
//! that also accept free-form strings wrap these in [`OpenEnum`](crate::OpenEnum).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;
use crate::open_enum::WireEnum;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [Self] = &[$(Self::$variant,)+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ProtocolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s).ok_or_else(|| ProtocolError::UnknownMember {
                    kind: Self::NAME,
                    value: s.to_owned(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::open_enum::deserialize_closed(deserializer)
            }
        }
    };
}

wire_enum! {
    /// Types that indicate a contact field.
    pub enum ContactField {
        /// The contact's postal address.
        PostalAddress => "postalAddress",
        /// The contact's name.
        Name => "name",
        /// The contact's telephone number.
        Phone => "phone",
        /// The contact's email address.
        Email => "email",
    }
}

wire_enum! {
    /// Types that indicate if a line item is final or pending.
    pub enum LineItemType {
        /// A line item representing the known, final cost.
        Final => "final",
        /// A line item representing an estimated or unknown cost.
        Pending => "pending",
    }
}

wire_enum! {
    /// Payment processing capabilities a merchant supports.
    pub enum MerchantCapability {
        /// 3-D Secure transactions are supported. Every request must include this value.
        Supports3DS => "supports3DS",
        /// Only transactions categorized as credit cards are allowed.
        SupportsCredit => "supportsCredit",
        /// Only transactions categorized as debit cards are allowed.
        SupportsDebit => "supportsDebit",
        /// China Union Pay (EMV) transactions are supported.
        SupportsEMV => "supportsEMV",
    }
}

wire_enum! {
    /// The kind of card backing a payment method.
    pub enum PaymentMethodType {
        /// A debit card.
        Debit => "debit",
        /// A credit card.
        Credit => "credit",
        /// A card with pre-paid funds.
        Prepaid => "prepaid",
        /// A store card, such as a loyalty card.
        Store => "store",
    }
}

wire_enum! {
    /// Provisioning state of a payment pass as tracked by the host.
    pub enum PaymentPassActivationState {
        /// Active and ready to be used for payment.
        Activated => "activated",
        /// Not active but may be activated by the issuer.
        RequiresActivation => "requiresActivation",
        /// Not ready for use but activation is in progress.
        Activating => "activating",
        /// Not active and can't be activated.
        Suspended => "suspended",
        /// Not active because the issuer has disabled the account on the device.
        Deactivated => "deactivated",
    }
}

wire_enum! {
    /// How the items of a purchase are to be shipped.
    pub enum ShippingType {
        /// Shipped to the customer's address.
        Shipping => "shipping",
        /// Delivered by the merchant.
        Delivery => "delivery",
        /// Picked up by the customer at a store.
        StorePickup => "storePickup",
        /// Picked up by the customer at a service location.
        ServicePickup => "servicePickup",
    }
}

wire_enum! {
    /// Payment networks a merchant may list in `supportedNetworks`.
    ///
    /// Hosts add networks over time; requests carry these as
    /// [`OpenEnum`](crate::OpenEnum) so unlisted names pass through.
    pub enum PaymentNetwork {
        /// American Express.
        Amex => "amex",
        /// China Union Pay.
        ChinaUnionPay => "chinaUnionPay",
        /// Discover.
        Discover => "discover",
        /// Interac.
        Interac => "interac",
        /// JCB.
        Jcb => "jcb",
        /// Mastercard.
        MasterCard => "masterCard",
        /// Store-issued private label cards.
        PrivateLabel => "privateLabel",
        /// Visa.
        Visa => "visa",
    }
}
