//! Integration tests for cart and favorites flows through `AppState`.
//!
//! These drive the engine the way UI event handlers do: lock a store,
//! mutate, read derived aggregates back.

use oakline_core::{AdditionalOption, CartLineItem, Configuration, Dimension, ItemId, Money};
use oakline_integration_tests::{init_tracing, test_config};
use oakline_storefront::state::AppState;
use oakline_storefront::store::Storage;

fn state() -> AppState {
    init_tracing();
    // In-memory storage: the configured data dir is never touched
    AppState::with_storage(
        test_config(std::path::Path::new(".oakline-test")),
        Storage::in_memory(),
    )
}

fn sofa(quantity: u32) -> CartLineItem {
    CartLineItem {
        id: ItemId::new("sofa-1"),
        name: "Sofa Verona".to_string(),
        unit_price: Money::from(500),
        quantity,
        image: "products/sofa-1.jpg".to_string(),
        dimension: Some(Dimension {
            width: 160,
            length: 200,
        }),
        additional_option: None,
        configuration: None,
    }
}

fn swatch() -> CartLineItem {
    CartLineItem {
        id: ItemId::fabric_variant("Velours", "Verona", 3),
        name: "Verona Grey".to_string(),
        unit_price: Money::ZERO,
        quantity: 1,
        image: "fabrics/verona-3.jpg".to_string(),
        dimension: None,
        additional_option: None,
        configuration: Some(Configuration {
            color: Some("Grey".to_string()),
            ..Configuration::default()
        }),
    }
}

// =============================================================================
// Cart Scenarios
// =============================================================================

#[test]
fn test_repeated_add_merges_into_one_line() {
    let state = state();
    let mut cart = state.cart().lock().expect("cart lock");

    cart.add(sofa(1)).expect("first add");
    cart.add(sofa(2)).expect("second add");

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Money::from(1500));
}

#[test]
fn test_variant_adds_stay_distinct_but_remove_is_by_id() {
    let state = state();
    let mut cart = state.cart().lock().expect("cart lock");

    cart.add(sofa(1)).expect("plain add");

    let mut with_option = sofa(1);
    with_option.additional_option = Some(AdditionalOption {
        name: "lift mechanism".to_string(),
        price: Money::from(50),
    });
    cart.add(with_option).expect("option add");

    let mut other_size = sofa(1);
    other_size.dimension = Some(Dimension {
        width: 180,
        length: 200,
    });
    cart.add(other_size).expect("size add");

    // Three distinct variant lines of the same product
    assert_eq!(cart.items().len(), 3);

    // One bare-id removal drops all of them
    cart.remove(&ItemId::new("sofa-1"));
    assert!(cart.is_empty());
}

#[test]
fn test_fabric_and_furniture_share_the_cart() {
    let state = state();
    let mut cart = state.cart().lock().expect("cart lock");

    cart.add(swatch()).expect("swatch add");
    let mut bed = sofa(1);
    bed.id = ItemId::new("bed-7");
    bed.unit_price = Money::from(800);
    cart.add(bed).expect("furniture add");

    assert_eq!(cart.total_items(), 2);
    // Swatches are free, so the cart total is the furniture alone
    assert_eq!(cart.total_price(), Money::from(800));

    let fabric_lines = cart
        .items()
        .iter()
        .filter(|item| item.is_fabric_sample())
        .count();
    assert_eq!(fabric_lines, 1);
}

#[test]
fn test_quantity_update_and_guard_through_state() {
    let state = state();
    let mut cart = state.cart().lock().expect("cart lock");

    cart.add(sofa(2)).expect("add");

    cart.update_quantity(&ItemId::new("sofa-1"), 5);
    assert_eq!(cart.total_items(), 5);

    // Below-one update is a no-op, not a removal
    cart.update_quantity(&ItemId::new("sofa-1"), 0);
    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.items().len(), 1);
}

// =============================================================================
// Favorites
// =============================================================================

#[test]
fn test_favorites_toggle_and_clear() {
    let state = state();
    let mut favorites = state.favorites().lock().expect("favorites lock");

    let sofa_id = ItemId::new("sofa-1");
    let fabric_id = ItemId::fabric_variant("Velours", "Verona", 3);

    favorites.toggle(&sofa_id);
    favorites.toggle(&fabric_id);
    assert!(favorites.is_favorite(&sofa_id));
    assert!(favorites.is_favorite(&fabric_id));
    assert_eq!(favorites.len(), 2);

    favorites.toggle(&sofa_id);
    assert!(!favorites.is_favorite(&sofa_id));

    favorites.clear();
    assert!(favorites.is_empty());
}

#[test]
fn test_cart_and_favorites_are_independent() {
    let state = state();

    state
        .cart()
        .lock()
        .expect("cart lock")
        .add(sofa(1))
        .expect("add");
    state
        .favorites()
        .lock()
        .expect("favorites lock")
        .toggle(&ItemId::new("bed-7"));

    state.cart().lock().expect("cart lock").clear();

    // Clearing the cart does not touch favorites
    let favorites = state.favorites().lock().expect("favorites lock");
    assert!(favorites.is_favorite(&ItemId::new("bed-7")));
}
