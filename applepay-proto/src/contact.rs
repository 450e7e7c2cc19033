//! Billing and shipping contact information.

use serde::{Deserialize, Serialize};

use crate::enums::ContactField;

/// Contact information needed for billing and shipping.
///
/// Every field is optional: the host only fills in what the request asked for
/// through `requiredBillingContactFields` / `requiredShippingContactFields`,
/// and during shipping-contact selection it may redact the address down to the
/// locality and postal code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentContact {
    /// An email address for the contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// The contact's family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// The contact's given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// A phone number for the contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// The street portion of the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_lines: Option<Vec<String>>,

    /// The city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    /// The state or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,

    /// The zip code, where applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// The colloquial country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// The ISO 3166 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl PaymentContact {
    /// Returns `true` if the contact carries data for the given field.
    ///
    /// A postal address counts as present once any address component is set.
    #[must_use]
    pub fn has_field(&self, field: ContactField) -> bool {
        match field {
            ContactField::PostalAddress => {
                self.address_lines.as_ref().is_some_and(|l| !l.is_empty())
                    || self.locality.is_some()
                    || self.administrative_area.is_some()
                    || self.postal_code.is_some()
                    || self.country_code.is_some()
            }
            ContactField::Name => self.given_name.is_some() || self.family_name.is_some(),
            ContactField::Phone => self.phone_number.is_some(),
            ContactField::Email => self.email_address.is_some(),
        }
    }
}
