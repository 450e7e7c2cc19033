//! Checks a payment request the way the host checks it before showing the sheet.

use applepay_proto::{
    LineItem, MerchantCapability, PaymentRequest, ShippingMethod, ShippingMethods,
};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::RequestError;

static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid country code pattern"));

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency code pattern"));

/// Validates a full payment request.
///
/// # Errors
///
/// Returns the first [`RequestError`] found, checking codes, networks,
/// capabilities, the total, line items, and shipping methods in that order.
pub fn validate_request(request: &PaymentRequest) -> Result<(), RequestError> {
    if !COUNTRY_CODE.is_match(&request.country_code) {
        return Err(RequestError::InvalidCountryCode(request.country_code.clone()));
    }
    if !CURRENCY_CODE.is_match(&request.currency_code) {
        return Err(RequestError::InvalidCurrencyCode(
            request.currency_code.clone(),
        ));
    }
    if request.supported_networks.is_empty() {
        return Err(RequestError::NoSupportedNetworks);
    }
    if !request.has_capability(MerchantCapability::Supports3DS) {
        return Err(RequestError::Missing3DS);
    }
    validate_sheet(&request.total, request.line_items())?;
    if let Some(ShippingMethods::Methods(methods)) = &request.shipping_methods {
        validate_shipping_methods(methods)?;
    }
    Ok(())
}

/// Validates a total and its line items, as supplied at construction or in a
/// selection update.
///
/// # Errors
///
/// Returns [`RequestError::EmptyLabel`], [`RequestError::InvalidAmount`] or
/// [`RequestError::NegativeTotal`].
pub fn validate_sheet(total: &LineItem, line_items: &[LineItem]) -> Result<(), RequestError> {
    let amount = parse_amount(&total.label, &total.amount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(RequestError::NegativeTotal(total.amount.clone()));
    }
    for item in line_items {
        parse_amount(&item.label, &item.amount)?;
    }
    Ok(())
}

/// Validates the labels and amounts of shipping methods.
///
/// # Errors
///
/// Returns [`RequestError::EmptyLabel`] or [`RequestError::InvalidAmount`].
pub fn validate_shipping_methods(methods: &[ShippingMethod]) -> Result<(), RequestError> {
    for method in methods {
        parse_amount(&method.label, &method.amount)?;
    }
    Ok(())
}

/// Parses a decimal amount string such as `"9.99"` or `"-5.00"`.
///
/// # Errors
///
/// Returns [`RequestError::EmptyLabel`] for an empty label and
/// [`RequestError::InvalidAmount`] if the amount is not a plain decimal.
pub fn parse_amount(label: &str, amount: &str) -> Result<Decimal, RequestError> {
    if label.trim().is_empty() {
        return Err(RequestError::EmptyLabel);
    }
    let invalid = |reason: String| RequestError::InvalidAmount {
        label: label.to_owned(),
        amount: amount.to_owned(),
        reason,
    };
    // Decimal::from_str tolerates surrounding whitespace and `_` separators; the host does not.
    if amount.is_empty()
        || !amount
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(invalid("expected a decimal string".to_owned()));
    }
    Decimal::from_str(amount).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use applepay_proto::LineItemType;

    fn request() -> PaymentRequest {
        PaymentRequest::new(
            "US",
            "USD",
            ["masterCard", "visa"],
            ["supports3DS"],
            LineItem::new("My Store", "9.99"),
        )
    }

    #[test]
    fn test_minimal_request_is_valid() {
        assert_eq!(validate_request(&request()), Ok(()));
    }

    #[test]
    fn test_codes_must_be_iso_shaped() {
        let mut req = request();
        req.country_code = "usa".into();
        assert_eq!(
            validate_request(&req),
            Err(RequestError::InvalidCountryCode("usa".into()))
        );

        let mut req = request();
        req.currency_code = String::new();
        assert_eq!(
            validate_request(&req),
            Err(RequestError::InvalidCurrencyCode(String::new()))
        );
    }

    #[test]
    fn test_capabilities_must_include_3ds() {
        let req = PaymentRequest::new(
            "US",
            "USD",
            ["visa"],
            [MerchantCapability::SupportsCredit],
            LineItem::new("My Store", "9.99"),
        );
        assert_eq!(validate_request(&req), Err(RequestError::Missing3DS));

        let no_caps = PaymentRequest::new(
            "US",
            "USD",
            ["visa"],
            Vec::<MerchantCapability>::new(),
            LineItem::new("My Store", "9.99"),
        );
        assert_eq!(validate_request(&no_caps), Err(RequestError::Missing3DS));
    }

    #[test]
    fn test_networks_must_not_be_empty() {
        let mut req = request();
        req.supported_networks.clear();
        assert_eq!(validate_request(&req), Err(RequestError::NoSupportedNetworks));
    }

    #[test]
    fn test_amounts_must_be_decimal_strings() {
        let req = request().with_line_items(vec![
            LineItem::new("Subtotal", "35.00").with_type(LineItemType::Final),
            LineItem::new("Estimated Tax", "3,06"),
        ]);
        assert!(matches!(
            validate_request(&req),
            Err(RequestError::InvalidAmount { label, .. }) if label == "Estimated Tax"
        ));

        assert!(parse_amount("Tax", " 1.00").is_err());
        assert!(parse_amount("Tax", "1e3").is_err());
        assert!(parse_amount("Tax", "").is_err());
        assert_eq!(
            parse_amount("Discount", "-5.00").unwrap(),
            Decimal::new(-500, 2)
        );
    }

    #[test]
    fn test_total_must_not_be_negative() {
        let total = LineItem::new("My Store", "-1.00");
        assert_eq!(
            validate_sheet(&total, &[]),
            Err(RequestError::NegativeTotal("-1.00".into()))
        );
        assert!(validate_sheet(&LineItem::new("Free", "0.00"), &[]).is_ok());
    }

    #[test]
    fn test_labels_must_not_be_empty() {
        assert_eq!(
            validate_shipping_methods(&[ShippingMethod::new(" ", "5.00")]),
            Err(RequestError::EmptyLabel)
        );
    }
}
