//! Checkout: order summary assembly and submission.
//!
//! The submission flow is single-flight: while one order is in transit a
//! second submit is rejected outright instead of racing it. The cart is
//! cleared only after the notification channel confirms delivery; any
//! failure leaves the cart intact so the customer can retry.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, instrument};

use oakline_core::CartLineItem;

use crate::pricing::{self, PricingError, Quote};
use crate::store::CartStore;
use crate::telegram::{TelegramClient, TelegramError};

/// How the customer prefers to be contacted about the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethod {
    Phone,
    Telegram,
    WhatsApp,
    Viber,
}

impl ContactMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "phone call",
            Self::Telegram => "Telegram",
            Self::WhatsApp => "WhatsApp",
            Self::Viber => "Viber",
        }
    }
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "bank card",
            Self::CashOnDelivery => "cash on delivery",
        }
    }
}

/// Contact and delivery details collected by the checkout form.
#[derive(Debug, Clone)]
pub struct OrderForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub contact_method: ContactMethod,
    pub payment_method: PaymentMethod,
}

impl OrderForm {
    /// Reject blank required fields before any submission work starts.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidForm`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        for (value, field) in [
            (&self.full_name, "full name"),
            (&self.phone, "phone"),
            (&self.address, "address"),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::InvalidForm(field));
            }
        }
        Ok(())
    }
}

/// A successfully submitted order.
#[derive(Debug, Clone, Copy)]
pub struct SubmittedOrder {
    pub quote: Quote,
    pub placed_at: DateTime<Utc>,
}

/// Checkout failures surfaced to the UI.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("the cart is empty")]
    EmptyCart,

    /// A required form field is blank.
    #[error("required field missing: {0}")]
    InvalidForm(&'static str),

    /// The applied promo code no longer validates.
    #[error(transparent)]
    Promo(#[from] PricingError),

    /// Another submission is already in transit.
    #[error("an order submission is already in progress")]
    SubmissionInFlight,

    /// The notification channel failed; retryable, cart untouched.
    #[error("order submission failed: {0}")]
    Submission(#[from] TelegramError),

    /// The cart state lock was poisoned by a panicking caller.
    #[error("cart state unavailable")]
    CartUnavailable,
}

/// Delivery seam for the order message.
///
/// The production implementation is [`TelegramClient`]; tests substitute
/// recording or failing notifiers to exercise the submission flow offline.
pub trait OrderNotifier {
    /// Deliver the order text, confirming success.
    fn notify(&self, text: &str) -> impl Future<Output = Result<(), TelegramError>> + Send;
}

impl OrderNotifier for TelegramClient {
    async fn notify(&self, text: &str) -> Result<(), TelegramError> {
        self.send_text(text).await
    }
}

/// Orchestrates order submission against the notification channel.
pub struct CheckoutService<N> {
    notifier: N,
    in_flight: AtomicBool,
}

impl<N: OrderNotifier> CheckoutService<N> {
    /// Create a service delivering through the given notifier.
    #[must_use]
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in transit.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit the current cart as an order.
    ///
    /// Snapshots the cart, prices it with the applied promo code, builds
    /// the order message and hands it to the notifier. The cart is
    /// cleared only after the notifier confirms delivery; every failure
    /// path leaves it untouched and releases the in-flight guard.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; [`CheckoutError::Submission`] is retryable.
    #[instrument(skip(self, cart, form, promo))]
    pub async fn submit(
        &self,
        cart: &Mutex<CartStore>,
        form: &OrderForm,
        promo: Option<&str>,
    ) -> Result<SubmittedOrder, CheckoutError> {
        form.validate()?;

        let _guard = FlightGuard::acquire(&self.in_flight)?;

        // Snapshot under the lock, then release before any await.
        let items: Vec<CartLineItem> = {
            let cart = cart.lock().map_err(|_| CheckoutError::CartUnavailable)?;
            cart.items().to_vec()
        };
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let quote = pricing::quote(&items, promo)?;
        let placed_at = Utc::now();
        let message = build_order_message(&items, &quote, form, placed_at);

        self.notifier.notify(&message).await?;

        // Confirmed delivery is the only path that empties the cart.
        cart.lock()
            .map_err(|_| CheckoutError::CartUnavailable)?
            .clear();
        info!(total = %quote.total, "order submitted, cart cleared");

        Ok(SubmittedOrder { quote, placed_at })
    }
}

impl<N> std::fmt::Debug for CheckoutService<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// RAII guard flipping the in-flight flag, released on every exit path.
struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckoutError::SubmissionInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// Order message
// =============================================================================

/// Assemble the human-readable order summary handed to the notifier.
///
/// Furniture lines come first with size, option and line price; fabric
/// swatches are listed in their own section with their color; amounts
/// close the message. Pure function of its inputs.
#[must_use]
pub fn build_order_message(
    items: &[CartLineItem],
    quote: &Quote,
    form: &OrderForm,
    placed_at: DateTime<Utc>,
) -> String {
    let mut message = String::from("New order at Oakline\n\n");

    message.push_str(&format!("Customer: {}\n", form.full_name));
    message.push_str(&format!("Phone: {}\n", form.phone));
    message.push_str(&format!("Delivery address: {}\n", form.address));
    message.push_str(&format!("Preferred contact: {}\n", form.contact_method.label()));
    message.push_str(&format!("Payment: {}\n", form.payment_method.label()));

    let (furniture, fabrics): (Vec<_>, Vec<_>) =
        items.iter().partition(|item| !item.is_fabric_sample());

    if !furniture.is_empty() {
        message.push_str("\nFurniture:\n");
        for item in furniture {
            message.push_str(&format!("- {} x {}", item.name, item.quantity));
            if let Some(dimension) = &item.dimension {
                message.push_str(&format!(", {}x{} cm", dimension.width, dimension.length));
            }
            if let Some(option) = &item.additional_option {
                message.push_str(&format!(", {}", option.name));
            }
            message.push_str(&format!(" — {} BYN\n", item.line_total()));
        }
    }

    if !fabrics.is_empty() {
        message.push_str("\nFabric samples:\n");
        for item in fabrics {
            message.push_str(&format!("- {}", item.name));
            if let Some(color) = item
                .configuration
                .as_ref()
                .and_then(|c| c.color.as_deref())
            {
                message.push_str(&format!(" (color: {color})"));
            }
            message.push('\n');
        }
    }

    message.push_str(&format!("\nSubtotal: {} BYN\n", quote.subtotal));
    if !quote.discount.is_zero() {
        message.push_str(&format!("Discount: -{} BYN\n", quote.discount));
    }
    message.push_str(&format!("Total: {} BYN\n", quote.total));
    message.push_str(&format!(
        "\nPlaced at {}",
        placed_at.format("%Y-%m-%d %H:%M UTC")
    ));

    message
}
