//! The favorites store: membership only, no payload.

use oakline_core::ItemId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::persistence::{FAVORITES_SLOT, Storage};

/// Persisted shape of the favorites set.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesState {
    favorites: Vec<ItemId>,
}

/// Owns the set of favorited item ids.
///
/// Stored as an insertion-ordered duplicate-free list so snapshots stay
/// stable across sessions. Favorites carry no metadata; they are resolved
/// against the catalog lazily at render time, and an id the catalog no
/// longer knows stays in the set until explicitly toggled off.
pub struct FavoritesStore {
    state: FavoritesState,
    storage: Storage,
}

impl FavoritesStore {
    /// Open the favorites set, restoring the persisted snapshot if any.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let state = storage.load(FAVORITES_SLOT);
        Self { state, storage }
    }

    /// Flip membership for the given id.
    pub fn toggle(&mut self, id: &ItemId) {
        if let Some(position) = self.state.favorites.iter().position(|f| f == id) {
            self.state.favorites.remove(position);
            debug!(%id, "unfavorited");
        } else {
            self.state.favorites.push(id.clone());
            debug!(%id, "favorited");
        }
        self.persist();
    }

    /// Pure membership lookup.
    #[must_use]
    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.state.favorites.iter().any(|f| f == id)
    }

    /// Empty the set.
    pub fn clear(&mut self) {
        self.state.favorites.clear();
        self.persist();
    }

    /// The favorited ids, in the order they were first added.
    #[must_use]
    pub fn ids(&self) -> &[ItemId] {
        &self.state.favorites
    }

    /// Number of favorited ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.favorites.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.favorites.is_empty()
    }

    fn persist(&self) {
        self.storage.save(FAVORITES_SLOT, &self.state);
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.state.favorites.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FavoritesStore {
        FavoritesStore::open(Storage::in_memory())
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut favorites = store();
        let id = ItemId::new("sofa1");

        favorites.toggle(&id);
        assert!(favorites.is_favorite(&id));

        favorites.toggle(&id);
        assert!(!favorites.is_favorite(&id));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut favorites = store();
        let id = ItemId::fabric_variant("Velours", "Verona", 3);

        favorites.toggle(&id);
        favorites.toggle(&ItemId::new("bed-7"));
        favorites.toggle(&id);
        favorites.toggle(&id);

        assert_eq!(favorites.len(), 2);
        assert!(favorites.is_favorite(&id));
    }

    #[test]
    fn test_clear() {
        let mut favorites = store();
        favorites.toggle(&ItemId::new("a"));
        favorites.toggle(&ItemId::new("b"));
        favorites.clear();
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_reopen_restores_membership_and_order() {
        let storage = Storage::in_memory();
        {
            let mut favorites = FavoritesStore::open(storage.clone());
            favorites.toggle(&ItemId::new("b"));
            favorites.toggle(&ItemId::new("a"));
        }
        let reopened = FavoritesStore::open(storage);
        let ids: Vec<&str> = reopened.ids().iter().map(ItemId::as_str).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
