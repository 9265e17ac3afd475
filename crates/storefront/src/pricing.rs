//! Subtotal, promo discount and total for the current cart contents.
//!
//! A pure function of (items, promo code): the calculator holds no state,
//! so quoting the same cart with the same code any number of times yields
//! the same amounts. The UI layer tracks which code is currently applied.

use oakline_core::{CartLineItem, Money};
use thiserror::Error;

/// The single accepted promo code, matched case-insensitively.
pub const PROMO_CODE: &str = "SALE10";

/// Flat discount rate unlocked by [`PROMO_CODE`], in percent.
pub const PROMO_RATE_PERCENT: u32 = 10;

/// Derived amounts for the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Furniture subtotal; fabric swatches contribute nothing.
    pub subtotal: Money,
    /// Promo discount, zero when no code is applied.
    pub discount: Money,
    /// `subtotal - discount`, floored at zero.
    pub total: Money,
}

/// Non-fatal pricing rejections, surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The promo string does not match the known code.
    #[error("unknown promo code")]
    InvalidPromoCode,
}

/// Quote the cart, optionally applying a promo code.
///
/// The subtotal sums `unit_price * quantity` over furniture lines only;
/// fabric-sample lines are excluded from monetary aggregation outright
/// rather than relying on their price being zero.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPromoCode`] for an unrecognized code.
/// Cart state is unaffected either way; the caller simply keeps the
/// undiscounted quote on rejection.
pub fn quote(items: &[CartLineItem], promo: Option<&str>) -> Result<Quote, PricingError> {
    let subtotal: Money = items
        .iter()
        .filter(|item| !item.is_fabric_sample())
        .map(CartLineItem::line_total)
        .sum();

    let discount = match promo {
        Some(code) if code.eq_ignore_ascii_case(PROMO_CODE) => {
            subtotal.percent(PROMO_RATE_PERCENT)
        }
        Some(_) => return Err(PricingError::InvalidPromoCode),
        None => Money::ZERO,
    };

    Ok(Quote {
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
    })
}
