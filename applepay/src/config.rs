//! Merchant configuration and the merchant validation request.
//!
//! When the host raises `validatemerchant`, the merchant's server must call the
//! validation URL with its identity and relay the returned merchant session
//! back through [`PaymentSession::complete_merchant_validation`]. This module
//! builds the body of that server-side call. The call itself, and the client
//! certificate it requires, are out of scope.
//!
//! [`PaymentSession::complete_merchant_validation`]: crate::PaymentSession::complete_merchant_validation
//!
//! # Example
//!
//! ```rust
//! use applepay::config::MerchantConfig;
//!
//! let config = MerchantConfig {
//!     merchant_identifier: "merchant.com.example.store".into(),
//!     display_name: "Example Store".into(),
//!     domain_name: "store.example.com".into(),
//! };
//! let body = config.validation_request().unwrap();
//! assert_eq!(body.initiative, "web");
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Initiative value for payments started from a web page.
pub const WEB_INITIATIVE: &str = "web";

/// The merchant identity used for merchant validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(rename_all = "camelCase")]
pub struct MerchantConfig {
    /// The merchant ID registered for Apple Pay (e.g., `merchant.com.example`).
    #[cfg_attr(feature = "cli", arg(long, env = "APPLE_PAY_MERCHANT_IDENTIFIER"))]
    pub merchant_identifier: String,

    /// The store name shown on the payment sheet.
    #[cfg_attr(feature = "cli", arg(long, env = "APPLE_PAY_DISPLAY_NAME"))]
    pub display_name: String,

    /// The verified domain the payment page is served from.
    #[cfg_attr(feature = "cli", arg(long, env = "APPLE_PAY_DOMAIN_NAME"))]
    pub domain_name: String,
}

/// Body the merchant server posts to the validation URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantValidationRequest {
    /// The merchant ID.
    pub merchant_identifier: String,
    /// The store name shown on the payment sheet.
    pub display_name: String,
    /// Always [`WEB_INITIATIVE`] for this API.
    pub initiative: String,
    /// The domain the payment page is served from.
    pub initiative_context: String,
}

impl MerchantConfig {
    /// Checks that every value is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] naming the first empty value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("merchantIdentifier", &self.merchant_identifier),
            ("displayName", &self.display_name),
            ("domainName", &self.domain_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue(name));
            }
        }
        Ok(())
    }

    /// Builds the validation request body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] if the configuration is incomplete.
    pub fn validation_request(&self) -> Result<MerchantValidationRequest, ConfigError> {
        self.validate()?;
        Ok(MerchantValidationRequest {
            merchant_identifier: self.merchant_identifier.clone(),
            display_name: self.display_name.clone(),
            initiative: WEB_INITIATIVE.to_owned(),
            initiative_context: self.domain_name.clone(),
        })
    }

    /// Builds the validation request body for a URL received from the host.
    ///
    /// The URL comes from the browser and must not be trusted blindly: it has
    /// to be https and point at an `apple.com` host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InsecureValidationUrl`] or
    /// [`ConfigError::UntrustedValidationHost`] for a suspicious URL, or
    /// [`ConfigError::MissingValue`] if the configuration is incomplete.
    pub fn validation_request_for(
        &self,
        validation_url: &Url,
    ) -> Result<MerchantValidationRequest, ConfigError> {
        check_validation_url(validation_url)?;
        self.validation_request()
    }
}

/// Checks that a validation URL points at an Apple Pay gateway.
///
/// # Errors
///
/// Returns [`ConfigError::InsecureValidationUrl`] if the scheme is not https,
/// or [`ConfigError::UntrustedValidationHost`] if the host is not `apple.com`
/// or one of its subdomains.
pub fn check_validation_url(validation_url: &Url) -> Result<(), ConfigError> {
    if validation_url.scheme() != "https" {
        return Err(ConfigError::InsecureValidationUrl(
            validation_url.to_string(),
        ));
    }
    let host = validation_url.host_str().unwrap_or_default();
    if host == "apple.com" || host.ends_with(".apple.com") {
        Ok(())
    } else {
        Err(ConfigError::UntrustedValidationHost(host.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> MerchantConfig {
        MerchantConfig {
            merchant_identifier: "merchant.com.example.store".into(),
            display_name: "Example Store".into(),
            domain_name: "store.example.com".into(),
        }
    }

    #[test]
    fn test_validation_request_wire_format() {
        let url = Url::parse("https://apple-pay-gateway.apple.com/paymentservices/startSession")
            .unwrap();
        let body = config().validation_request_for(&url).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "merchantIdentifier": "merchant.com.example.store",
                "displayName": "Example Store",
                "initiative": "web",
                "initiativeContext": "store.example.com"
            })
        );
    }

    #[test]
    fn test_rejects_insecure_url() {
        let url = Url::parse("http://apple-pay-gateway.apple.com/paymentservices/startSession")
            .unwrap();
        assert!(matches!(
            check_validation_url(&url),
            Err(ConfigError::InsecureValidationUrl(_))
        ));
    }

    #[test]
    fn test_rejects_lookalike_host() {
        for raw in [
            "https://apple-pay-gateway.apple.com.evil.example/startSession",
            "https://notapple.com/startSession",
        ] {
            let url = Url::parse(raw).unwrap();
            assert!(matches!(
                check_validation_url(&url),
                Err(ConfigError::UntrustedValidationHost(_))
            ));
        }
        let cn = Url::parse("https://cn-apple-pay-gateway.apple.com/paymentservices/paymentSession")
            .unwrap();
        assert_eq!(check_validation_url(&cn), Ok(()));
    }

    #[test]
    fn test_missing_value_reported_by_wire_name() {
        let mut cfg = config();
        cfg.display_name = "  ".into();
        assert_eq!(
            cfg.validation_request(),
            Err(ConfigError::MissingValue("displayName"))
        );
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let cfg: MerchantConfig = serde_json::from_value(json!({
            "merchantIdentifier": "merchant.com.example.store",
            "displayName": "Example Store",
            "domainName": "store.example.com"
        }))
        .unwrap();
        assert_eq!(cfg, config());
    }
}
