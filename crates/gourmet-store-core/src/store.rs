use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{MenuItem, NewPlace, Place};

/// Result of a menu lookup by place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuQuery {
    /// The place is registered; its menu may still be absent.
    Found(Option<Vec<MenuItem>>),
    /// No place with that name is registered.
    NotRegistered,
}

/// Serialized CRUD access to the place collection.
///
/// Mutating operations (`create`, `update_menu`, `delete`) and `pick_random`
/// run inside a shared critical section: implementations serialize them
/// against each other for the whole read-modify-persist span.
///
/// Plain reads (`list`, `find_menu`) are deliberately not serialized.
/// Implementations must still guarantee that a concurrent reader observes
/// the last fully-written snapshot rather than a torn write; a read racing a
/// write may return the state from just before that write.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// List all places, optionally filtered by `type` (exact match).
    async fn list(&self, kind: Option<&str>) -> Result<Vec<Place>, StoreError>;

    /// Look up the menu of the place with the given name.
    async fn find_menu(&self, name: &str) -> Result<MenuQuery, StoreError>;

    /// Register a new place.
    ///
    /// Fails with [`StoreError::DuplicateName`] when the name is already
    /// taken (case-sensitive exact match); otherwise assigns the next id,
    /// appends the record, and persists the collection.
    async fn create(&self, input: NewPlace) -> Result<Place, StoreError>;

    /// Replace the menu of the named place wholesale. The previous menu is
    /// discarded, not merged into.
    async fn update_menu(&self, name: &str, menu: Vec<MenuItem>) -> Result<(), StoreError>;

    /// Remove the named place from the collection.
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Pick one place of the given `type` uniformly at random. Fails with
    /// [`StoreError::NotFound`] when no place matches.
    async fn pick_random(&self, kind: &str) -> Result<Place, StoreError>;
}
