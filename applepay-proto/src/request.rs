//! The payment request presented on the payment sheet.

use serde::{Deserialize, Serialize};

use crate::contact::PaymentContact;
use crate::enums::{ContactField, MerchantCapability, PaymentNetwork, ShippingType};
use crate::line_item::{LineItem, ShippingMethod};
use crate::open_enum::OpenEnum;

/// Shipping options offered with a request.
///
/// The host accepts either full [`ShippingMethod`] dictionaries or a list of
/// bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShippingMethods {
    /// Full shipping method descriptions.
    Methods(Vec<ShippingMethod>),
    /// Bare shipping method names.
    Names(Vec<String>),
}

impl ShippingMethods {
    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Methods(methods) => methods.len(),
            Self::Names(names) => names.len(),
        }
    }

    /// Returns `true` if there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<ShippingMethod>> for ShippingMethods {
    fn from(methods: Vec<ShippingMethod>) -> Self {
        Self::Methods(methods)
    }
}

impl From<Vec<String>> for ShippingMethods {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

/// A request for payment: processing capabilities, the amount, and shipping
/// information.
///
/// The mandatory fields are plain struct fields, so a request without a total,
/// country code or currency code cannot be constructed, and JSON lacking one
/// of them fails to deserialize.
///
/// # JSON Format
///
/// ```json
/// {
///   "countryCode": "US",
///   "currencyCode": "USD",
///   "supportedNetworks": ["masterCard", "visa"],
///   "merchantCapabilities": ["supports3DS"],
///   "total": { "label": "My Store", "amount": "9.99" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// The merchant's two-letter ISO 3166 country code.
    pub country_code: String,

    /// The three-letter ISO 4217 currency code for the payment.
    pub currency_code: String,

    /// The payment networks supported by the merchant.
    pub supported_networks: Vec<OpenEnum<PaymentNetwork>>,

    /// The payment capabilities supported by the merchant.
    ///
    /// Must contain at least [`MerchantCapability::Supports3DS`].
    pub merchant_capabilities: Vec<OpenEnum<MerchantCapability>>,

    /// A line item representing the total for the payment.
    pub total: LineItem,

    /// Line items explaining recurring payments and/or additional charges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,

    /// Billing contact information for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_contact: Option<PaymentContact>,

    /// Billing information required from the user to process the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_billing_contact_fields: Option<Vec<OpenEnum<ContactField>>>,

    /// Shipping information required from the user to fulfill the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_shipping_contact_fields: Option<Vec<OpenEnum<ContactField>>>,

    /// Shipping contact information for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_contact: Option<PaymentContact>,

    /// The available shipping methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_methods: Option<ShippingMethods>,

    /// How the items are to be shipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_type: Option<OpenEnum<ShippingType>>,

    /// Optional user-defined data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_data: Option<String>,
}

impl PaymentRequest {
    /// Creates a request with all mandatory fields and no optional ones.
    pub fn new<N, C>(
        country_code: impl Into<String>,
        currency_code: impl Into<String>,
        supported_networks: impl IntoIterator<Item = N>,
        merchant_capabilities: impl IntoIterator<Item = C>,
        total: LineItem,
    ) -> Self
    where
        N: Into<OpenEnum<PaymentNetwork>>,
        C: Into<OpenEnum<MerchantCapability>>,
    {
        Self {
            country_code: country_code.into(),
            currency_code: currency_code.into(),
            supported_networks: supported_networks.into_iter().map(Into::into).collect(),
            merchant_capabilities: merchant_capabilities.into_iter().map(Into::into).collect(),
            total,
            line_items: None,
            billing_contact: None,
            required_billing_contact_fields: None,
            required_shipping_contact_fields: None,
            shipping_contact: None,
            shipping_methods: None,
            shipping_type: None,
            application_data: None,
        }
    }

    /// Sets the line items.
    #[must_use]
    pub fn with_line_items(mut self, line_items: Vec<LineItem>) -> Self {
        self.line_items = Some(line_items);
        self
    }

    /// Sets the prefilled billing contact.
    #[must_use]
    pub fn with_billing_contact(mut self, contact: PaymentContact) -> Self {
        self.billing_contact = Some(contact);
        self
    }

    /// Sets the required billing contact fields, from enum members or literals.
    #[must_use]
    pub fn with_required_billing_contact_fields<F>(
        mut self,
        fields: impl IntoIterator<Item = F>,
    ) -> Self
    where
        F: Into<OpenEnum<ContactField>>,
    {
        self.required_billing_contact_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the required shipping contact fields, from enum members or literals.
    #[must_use]
    pub fn with_required_shipping_contact_fields<F>(
        mut self,
        fields: impl IntoIterator<Item = F>,
    ) -> Self
    where
        F: Into<OpenEnum<ContactField>>,
    {
        self.required_shipping_contact_fields =
            Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the prefilled shipping contact.
    #[must_use]
    pub fn with_shipping_contact(mut self, contact: PaymentContact) -> Self {
        self.shipping_contact = Some(contact);
        self
    }

    /// Sets the available shipping methods.
    #[must_use]
    pub fn with_shipping_methods(mut self, methods: impl Into<ShippingMethods>) -> Self {
        self.shipping_methods = Some(methods.into());
        self
    }

    /// Sets the shipping type, from an enum member or a literal.
    #[must_use]
    pub fn with_shipping_type(mut self, shipping_type: impl Into<OpenEnum<ShippingType>>) -> Self {
        self.shipping_type = Some(shipping_type.into());
        self
    }

    /// Sets the opaque application data.
    #[must_use]
    pub fn with_application_data(mut self, data: impl Into<String>) -> Self {
        self.application_data = Some(data.into());
        self
    }

    /// Returns `true` if the merchant capabilities include the given one.
    #[must_use]
    pub fn has_capability(&self, capability: MerchantCapability) -> bool {
        self.merchant_capabilities.iter().any(|c| *c == capability)
    }

    /// Returns the line items, or an empty slice when none were given.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.as_deref().unwrap_or_default()
    }
}
