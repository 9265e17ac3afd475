//! Integration tests for Oakline.
//!
//! Cross-module behavior tests for the cart/favorites engine: store
//! flows through [`oakline_storefront::state::AppState`], persistence
//! round-trips over the on-disk backend, and the checkout submission
//! flow against substitute notifiers.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p oakline-integration-tests
//! ```
//!
//! No external services are required: checkout tests inject their own
//! [`oakline_storefront::checkout::OrderNotifier`] implementations and
//! persistence tests run against temporary directories.

use std::path::Path;
use std::sync::Once;

use secrecy::SecretString;
use url::Url;

use oakline_storefront::config::{StorefrontConfig, TelegramConfig};

/// Install a test tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to warnings only so store internals stay
/// quiet unless a test run asks for more.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Build a config pointing at a throwaway data directory.
///
/// The catalog URL and Telegram credentials are placeholders shaped like
/// the real thing; tests that would hit the network inject substitutes
/// instead of calling out.
#[must_use]
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        catalog_url: Url::parse("http://127.0.0.1:9/data/data.json").expect("static test url"),
        telegram: TelegramConfig {
            bot_token: SecretString::from("000000:test-bot-token"),
            chat_id: "-1000000000000".to_string(),
        },
    }
}
