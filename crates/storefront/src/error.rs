//! Unified error surface for callers that want one error type.
//!
//! Module errors stay precise at their seams; `AppError` folds them
//! together for UI code that only needs to classify and display. The
//! propagation policy:
//!
//! - persistence failures never appear here at all (the adapter swallows
//!   them with safe defaults)
//! - user-input rejections (line items, promo codes, form fields) are
//!   returned for display, never panicked on
//! - network failures from checkout block cart-clearing and surface as
//!   retryable

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::pricing::PricingError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A store mutation was rejected.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A promo code was rejected.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// The catalog document could not be fetched or decoded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout was rejected or the submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl AppError {
    /// Whether retrying the same operation can reasonably succeed.
    ///
    /// Drives the UI's retry affordance: submission and catalog fetch
    /// failures are transient, everything else needs different input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Catalog(_) | Self::Checkout(CheckoutError::Submission(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use oakline_core::LineItemError;

    use crate::telegram::TelegramError;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Pricing(PricingError::InvalidPromoCode);
        assert_eq!(err.to_string(), "Pricing error: unknown promo code");

        let err = AppError::Store(StoreError::InvalidLineItem(
            LineItemError::NonPositiveQuantity,
        ));
        assert_eq!(
            err.to_string(),
            "Store error: invalid line item: line item quantity must be at least 1"
        );
    }

    #[test]
    fn test_retryable_classification() {
        let submission = AppError::Checkout(CheckoutError::Submission(TelegramError::Api(
            "chat not found".to_string(),
        )));
        assert!(submission.is_retryable());

        let in_flight = AppError::Checkout(CheckoutError::SubmissionInFlight);
        assert!(!in_flight.is_retryable());

        let promo = AppError::Pricing(PricingError::InvalidPromoCode);
        assert!(!promo.is_retryable());
    }
}
