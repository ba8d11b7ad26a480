use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use gourmet_store_core::{MenuItem, MenuQuery, NewPlace, Place, PlaceStore, StoreError};

/// File-backed place store.
///
/// The whole collection lives in one JSON file. Every operation reloads it
/// from disk; mutating operations apply their change in memory and write the
/// full array back. Writes go through a temp file plus rename, so an
/// unlocked reader always observes a complete snapshot, never a torn write.
///
/// The write mutex is process-local. Running several processes against the
/// same file is out of contract.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store over the given file path. The file does not have to
    /// exist yet; a missing file reads as the empty collection.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full collection from disk.
    async fn load(&self) -> Result<Vec<Place>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::Malformed(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Write the full collection back, atomically via temp file + rename.
    async fn persist(&self, places: &[Place]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(places)
            .map_err(|e| StoreError::Io(format!("Failed to serialize collection: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await.map_err(|e| {
            StoreError::Io(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StoreError::Io(format!("Failed to rename to {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl PlaceStore for JsonFileStore {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self, kind: Option<&str>) -> Result<Vec<Place>, StoreError> {
        let mut places = self.load().await?;
        if let Some(kind) = kind {
            places.retain(|p| p.kind == kind);
        }
        debug!("Listed {} places", places.len());
        Ok(places)
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_menu(&self, name: &str) -> Result<MenuQuery, StoreError> {
        let places = self.load().await?;
        match places.into_iter().find(|p| p.name == name) {
            Some(place) => Ok(MenuQuery::Found(place.menu)),
            None => Ok(MenuQuery::NotRegistered),
        }
    }

    #[instrument(skip(self, input), level = "debug", fields(name = %input.name))]
    async fn create(&self, input: NewPlace) -> Result<Place, StoreError> {
        // Name check and id assignment must not interleave with another
        // writer's read-modify-persist span.
        let _guard = self.write_lock.lock().await;

        let mut places = self.load().await?;
        if places.iter().any(|p| p.name == input.name) {
            return Err(StoreError::DuplicateName(input.name));
        }

        let next_id = places.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let place = input.into_place(next_id);
        places.push(place.clone());
        self.persist(&places).await?;

        debug!("Created place {} (id {})", place.name, place.id);
        Ok(place)
    }

    #[instrument(skip(self, menu), level = "debug")]
    async fn update_menu(&self, name: &str, menu: Vec<MenuItem>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut places = self.load().await?;
        let place = places
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        place.menu = Some(menu);
        self.persist(&places).await?;

        debug!("Replaced menu of {}", name);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut places = self.load().await?;
        let pos = places
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        places.remove(pos);
        self.persist(&places).await?;

        debug!("Deleted place {}", name);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn pick_random(&self, kind: &str) -> Result<Place, StoreError> {
        // Read-only, but shares the writers' critical section.
        let _guard = self.write_lock.lock().await;

        let places = self.load().await?;
        let filtered: Vec<Place> = places.into_iter().filter(|p| p.kind == kind).collect();
        filtered
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("no places of type {}", kind)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;

    fn setup() -> (JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("places.json"));
        (store, temp_dir)
    }

    fn new_place(name: &str, kind: &str) -> NewPlace {
        NewPlace {
            name: name.to_string(),
            kind: kind.to_string(),
            specialty: format!("{} specialty", name),
            menu: None,
        }
    }

    async fn file_bytes(store: &JsonFileStore) -> Vec<u8> {
        fs::read(&store.path).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_collection() {
        let (store, _temp) = setup();
        assert!(store.list(None).await.unwrap().is_empty());
        assert_eq!(
            store.find_menu("anything").await.unwrap(),
            MenuQuery::NotRegistered
        );
    }

    #[tokio::test]
    async fn test_create_list_delete_scenario() {
        let (store, _temp) = setup();

        let a = store.create(new_place("A", "food")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(a.menu, None);

        let b = store.create(new_place("B", "drink")).await.unwrap();
        assert_eq!(b.id, 2);

        let food = store.list(Some("food")).await.unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].id, 1);
        assert_eq!(food[0].name, "A");

        store.delete("A").await.unwrap();
        let remaining = store.list(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);

        let err = store.delete("A").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ids_are_contiguous_and_increasing() {
        let (store, _temp) = setup();

        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            let place = store.create(new_place(name, "food")).await.unwrap();
            assert_eq!(place.id, i as u64 + 1);
        }
    }

    #[tokio::test]
    async fn test_id_follows_current_max_after_delete() {
        let (store, _temp) = setup();

        store.create(new_place("A", "food")).await.unwrap();
        store.create(new_place("B", "food")).await.unwrap();
        store.delete("B").await.unwrap();

        // Max surviving id is 1, so the next assignment is 2 again.
        let c = store.create(new_place("C", "food")).await.unwrap();
        assert_eq!(c.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_and_non_destructive() {
        let (store, _temp) = setup();

        store.create(new_place("A", "food")).await.unwrap();
        let before = file_bytes(&store).await;

        let err = store.create(new_place("A", "drink")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
        assert_eq!(file_bytes(&store).await, before);
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let (store, _temp) = setup();

        store.create(new_place("McDonald's", "food")).await.unwrap();
        let mcdonalds_lower = store.create(new_place("mcdonald's", "food")).await.unwrap();
        assert_eq!(mcdonalds_lower.id, 2);

        assert_eq!(
            store.find_menu("MCDONALD'S").await.unwrap(),
            MenuQuery::NotRegistered
        );
    }

    #[tokio::test]
    async fn test_update_replaces_menu_wholesale() {
        let (store, _temp) = setup();

        let mut input = new_place("A", "food");
        input.menu = Some(vec![MenuItem::new("old dish", "50")]);
        store.create(input).await.unwrap();

        let replacement = vec![
            MenuItem::new("Big Mac", "85"),
            MenuItem::new("French Fries", "45"),
        ];
        store.update_menu("A", replacement.clone()).await.unwrap();

        assert_eq!(
            store.find_menu("A").await.unwrap(),
            MenuQuery::Found(Some(replacement))
        );
    }

    #[tokio::test]
    async fn test_not_found_is_non_destructive() {
        let (store, _temp) = setup();

        store.create(new_place("A", "food")).await.unwrap();
        let before = file_bytes(&store).await;

        let err = store.delete("nonexistent").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = store
            .update_menu("nonexistent", vec![MenuItem::new("x", "1")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        assert_eq!(file_bytes(&store).await, before);
    }

    #[tokio::test]
    async fn test_persist_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("places.json");

        let store = JsonFileStore::new(&path);
        let mut input = new_place("老王炒飯", "food");
        input.menu = Some(vec![
            MenuItem::new("青菜蛋炒飯", "100"),
            MenuItem::new("叉燒蛋炒飯", "115"),
        ]);
        store.create(input).await.unwrap();
        store.create(new_place("50嵐", "drink")).await.unwrap();
        let written = store.list(None).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        let reloaded = reopened.list(None).await.unwrap();
        assert_eq!(reloaded, written);
    }

    #[tokio::test]
    async fn test_malformed_file_surfaces_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("places.json");
        fs::write(&path, "not json at all").await.unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.list(None).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));

        let err = store.find_menu("A").await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(temp_dir.path().join("places.json")));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(new_place(&format!("place-{}", i), "food")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let places = store.list(None).await.unwrap();
        assert_eq!(places.len(), 16);

        let mut ids: Vec<u64> = places.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_pick_random_filters_by_type() {
        let (store, _temp) = setup();

        store.create(new_place("A", "food")).await.unwrap();
        store.create(new_place("B", "food")).await.unwrap();
        store.create(new_place("C", "drink")).await.unwrap();

        for _ in 0..10 {
            let picked = store.pick_random("food").await.unwrap();
            assert!(picked.name == "A" || picked.name == "B");
        }

        let picked = store.pick_random("drink").await.unwrap();
        assert_eq!(picked.name, "C");

        let err = store.pick_random("tea").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_pick_random_does_not_persist() {
        let (store, _temp) = setup();

        store.create(new_place("A", "food")).await.unwrap();
        let before = file_bytes(&store).await;

        store.pick_random("food").await.unwrap();
        assert_eq!(file_bytes(&store).await, before);
    }
}
