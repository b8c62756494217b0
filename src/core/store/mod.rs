//! Launcher instance store
//!
//! Single source of truth for the instance collection. Every mutation
//! funnels through an action here; views get read-only snapshots and the
//! derived orderings. Fallible actions share one discipline: clear the
//! previous error, raise `is_loading`, validate, hit the backend, mutate,
//! then settle (record any failure and drop `is_loading` no matter what).

use std::cmp::Reverse;

use chrono::DateTime;
use thiserror::Error;

use crate::core::api::{ApiError, FakeApi, PersistenceApi};
use crate::core::instance::{Instance, fake_instances};
use crate::core::schema::{self, InstanceDraft, SchemaError};

/// How many instances the "recent" view exposes.
const RECENT_LIMIT: usize = 5;

/// Failure of a store action. Actions return these as values; nothing
/// escapes to the caller as a panic.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid instance data: {0}")]
    Validation(#[from] SchemaError),
    #[error("An instance named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("Instance \"{0}\" not found")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] ApiError),
}

/// In-memory instance store backed by a persistence collaborator.
pub struct LauncherStore<P> {
    api: P,
    instances: Vec<Instance>,
    current_instance: Option<Instance>,
    is_loading: bool,
    error: Option<String>,
    /// Modal visibility, owned by the UI; not part of the action discipline.
    pub settings_modal_open: bool,
    pub add_instance_modal_open: bool,
}

impl LauncherStore<FakeApi> {
    /// Store wired to the simulated backend.
    pub fn with_fake_backend() -> Self {
        Self::new(FakeApi::new())
    }
}

impl<P: PersistenceApi> LauncherStore<P> {
    pub fn new(api: P) -> Self {
        Self {
            api,
            instances: Vec::new(),
            current_instance: None,
            is_loading: false,
            error: None,
            settings_modal_open: false,
            add_instance_modal_open: false,
        }
    }

    // --- read-only state ---

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn current_instance(&self) -> Option<&Instance> {
        self.current_instance.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- derived views ---

    /// Snapshot sorted by recency, most recently played first. Instances
    /// never played sort last; the sort is stable, so ties keep their
    /// relative order from the underlying collection.
    pub fn sorted_instances(&self) -> Vec<Instance> {
        let mut sorted = self.instances.clone();
        sorted.sort_by_key(|i| Reverse(i.last_played.unwrap_or(DateTime::UNIX_EPOCH)));
        sorted
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn has_instances(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Exact-match lookup. First match wins, which is unambiguous as long
    /// as every insert path enforces name uniqueness.
    pub fn get_instance_by_name(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// The five most recently played instances.
    pub fn recent_instances(&self) -> Vec<Instance> {
        let mut recent = self.sorted_instances();
        recent.truncate(RECENT_LIMIT);
        recent
    }

    // --- synchronous state setters (outside the action discipline) ---

    pub fn set_current_instance(&mut self, instance: Option<Instance>) {
        self.current_instance = instance;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn toggle_settings_modal(&mut self) {
        self.settings_modal_open = !self.settings_modal_open;
    }

    pub fn toggle_add_instance_modal(&mut self) {
        self.add_instance_modal_open = !self.add_instance_modal_open;
    }

    /// Stamp an instance as played right now. Silently no-ops when the
    /// name is unknown; callers treat that as an expected condition.
    pub fn update_instance_last_played(&mut self, name: &str) {
        if let Some(instance) = self.instances.iter_mut().find(|i| i.name == name) {
            instance.touch();
        }
    }

    /// Swap in the built-in seed set and clear selection and error.
    pub fn reset_to_fake_data(&mut self) {
        self.instances = fake_instances();
        self.current_instance = None;
        self.error = None;
        tracing::info!("store reset to seed data ({} instances)", self.instances.len());
    }

    // --- actions ---

    fn begin(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    fn settle(&mut self, result: Result<(), StoreError>) -> Result<(), StoreError> {
        if let Err(err) = &result {
            self.error = Some(err.to_string());
            tracing::warn!("store action failed: {err}");
        }
        self.is_loading = false;
        result
    }

    /// Validate a draft, enforce name uniqueness, stamp `last_played`,
    /// persist, and append to the collection.
    pub async fn add_instance(&mut self, draft: InstanceDraft) -> Result<(), StoreError> {
        self.begin();
        let result = self.do_add_instance(draft).await;
        self.settle(result)
    }

    async fn do_add_instance(&mut self, draft: InstanceDraft) -> Result<(), StoreError> {
        let mut instance = schema::parse_instance(&draft)?;

        if self.get_instance_by_name(&instance.name).is_some() {
            return Err(StoreError::DuplicateName(instance.name));
        }

        instance.touch();
        self.api.save_instance(&instance).await?;

        tracing::info!("added instance '{}'", instance.name);
        self.instances.push(instance);
        Ok(())
    }

    /// Fetch the full list from the backend and replace the collection
    /// wholesale. A single invalid element rejects the entire batch and
    /// leaves the current collection untouched.
    pub async fn load_instances(&mut self) -> Result<(), StoreError> {
        self.begin();
        let result = self.do_load_instances().await;
        self.settle(result)
    }

    async fn do_load_instances(&mut self) -> Result<(), StoreError> {
        let drafts = self.api.load_instances().await?;
        let instances = schema::parse_instances(&drafts)?;

        tracing::info!("loaded {} instances", instances.len());
        self.instances = instances;
        Ok(())
    }

    /// Remove an instance by name, clearing the current selection if it
    /// pointed at the removed instance.
    pub async fn delete_instance(&mut self, name: &str) -> Result<(), StoreError> {
        self.begin();
        let result = self.do_delete_instance(name).await;
        self.settle(result)
    }

    async fn do_delete_instance(&mut self, name: &str) -> Result<(), StoreError> {
        schema::validate_name(name)?;
        self.api.delete_instance(name).await?;

        self.instances.retain(|i| i.name != name);
        if self.current_instance.as_ref().is_some_and(|c| c.name == name) {
            self.current_instance = None;
        }

        tracing::info!("removed instance '{name}'");
        Ok(())
    }

    /// Clone an existing instance under a new name. The clone goes through
    /// [`Self::add_instance`], so it gets a fresh `last_played` stamp and
    /// the usual uniqueness check.
    pub async fn duplicate_instance(
        &mut self,
        original_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        if let Err(err) =
            schema::validate_name(original_name).and_then(|_| schema::validate_new_name(new_name))
        {
            let err = StoreError::from(err);
            self.error = Some(err.to_string());
            return Err(err);
        }

        // A missing original is an expected condition, reported as a
        // distinct result without touching the store error field.
        let Some(original) = self.get_instance_by_name(original_name).cloned() else {
            return Err(StoreError::NotFound(original_name.to_string()));
        };

        let mut draft = InstanceDraft::from(&original);
        draft.name = new_name.to_string();
        self.add_instance(draft).await
    }

    /// Load from the backend, but only when the collection is empty.
    pub async fn initialize(&mut self) -> Result<(), StoreError> {
        if self.instances.is_empty() {
            return self.load_instances().await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{GameDraft, LoaderDraft};
    use chrono::Utc;
    use std::time::Duration;

    /// Backend whose load serves a batch with one schema-invalid element.
    struct BadBatchApi;

    impl PersistenceApi for BadBatchApi {
        async fn save_instance(&self, _instance: &Instance) -> Result<(), ApiError> {
            Ok(())
        }

        async fn load_instances(&self) -> Result<Vec<InstanceDraft>, ApiError> {
            let mut drafts: Vec<InstanceDraft> =
                fake_instances().iter().map(InstanceDraft::from).collect();
            drafts[1].game.version = String::new();
            Ok(drafts)
        }

        async fn delete_instance(&self, _name: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    /// Backend that refuses every write.
    struct DownApi;

    impl PersistenceApi for DownApi {
        async fn save_instance(&self, _instance: &Instance) -> Result<(), ApiError> {
            Err(ApiError::Unavailable("connection refused".to_string()))
        }

        async fn load_instances(&self) -> Result<Vec<InstanceDraft>, ApiError> {
            Err(ApiError::Unavailable("connection refused".to_string()))
        }

        async fn delete_instance(&self, _name: &str) -> Result<(), ApiError> {
            Err(ApiError::Unavailable("connection refused".to_string()))
        }
    }

    fn store() -> LauncherStore<FakeApi> {
        LauncherStore::new(FakeApi::with_latency(Duration::ZERO))
    }

    fn draft(name: &str) -> InstanceDraft {
        InstanceDraft {
            name: name.to_string(),
            loader: LoaderDraft {
                loader: "Fabric".to_string(),
                version: "0.15.3".to_string(),
            },
            game: GameDraft {
                version: "1.20.1".to_string(),
            },
            last_played: None,
        }
    }

    #[tokio::test]
    async fn test_add_instance_appends_and_stamps() {
        let mut store = store();
        let before = Utc::now();

        store.add_instance(draft("My Pack")).await.unwrap();

        assert_eq!(store.instance_count(), 1);
        assert!(store.has_instances());
        let added = store.get_instance_by_name("My Pack").unwrap();
        assert!(added.last_played.unwrap() >= before);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_add_duplicate_name_rejected() {
        let mut store = store();
        store.add_instance(draft("My Pack")).await.unwrap();

        let err = store.add_instance(draft("My Pack")).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateName(_)));
        assert_eq!(store.instance_count(), 1);
        assert!(store.error().unwrap().contains("already exists"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_add_empty_name_reports_required() {
        let mut store = store();

        let err = store.add_instance(draft("")).await.unwrap_err();

        assert!(err.to_string().contains("Instance name is required"));
        assert_eq!(store.instance_count(), 0);
        assert_eq!(store.error(), Some(err.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_add_clears_previous_error() {
        let mut store = store();
        store.add_instance(draft("")).await.unwrap_err();
        assert!(store.error().is_some());

        store.add_instance(draft("My Pack")).await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_load_instances_replaces_collection() {
        let mut store = store();
        store.load_instances().await.unwrap();

        assert_eq!(store.instance_count(), 4);
        assert!(store.get_instance_by_name("Vanilla 1.20.4").is_some());
    }

    #[tokio::test]
    async fn test_load_invalid_batch_leaves_collection_untouched() {
        let mut store = LauncherStore::new(BadBatchApi);
        store.reset_to_fake_data();
        store.delete_instance("Quilt Experimental").await.unwrap();
        let before: Vec<String> = store.instances().iter().map(|i| i.name.clone()).collect();

        let err = store.load_instances().await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        let after: Vec<String> = store.instances().iter().map(|i| i.name.clone()).collect();
        assert_eq!(before, after);
        assert!(store.error().is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_delete_clears_matching_current_instance() {
        let mut store = store();
        store.reset_to_fake_data();
        let current = store.get_instance_by_name("Fabric Modded").cloned();
        store.set_current_instance(current);

        store.delete_instance("Fabric Modded").await.unwrap();

        assert!(store.current_instance().is_none());
        assert_eq!(store.instance_count(), 3);
    }

    #[tokio::test]
    async fn test_delete_keeps_unrelated_current_instance() {
        let mut store = store();
        store.reset_to_fake_data();
        let current = store.get_instance_by_name("Fabric Modded").cloned();
        store.set_current_instance(current);

        store.delete_instance("Forge Adventure").await.unwrap();

        assert_eq!(store.current_instance().unwrap().name, "Fabric Modded");
    }

    #[tokio::test]
    async fn test_delete_empty_name_rejected() {
        let mut store = store();
        store.reset_to_fake_data();

        let err = store.delete_instance("").await.unwrap_err();

        assert!(err.to_string().contains("Instance name is required"));
        assert_eq!(store.instance_count(), 4);
    }

    #[tokio::test]
    async fn test_persistence_failure_sets_error_and_clears_loading() {
        let mut store = LauncherStore::new(DownApi);

        let err = store.add_instance(draft("My Pack")).await.unwrap_err();

        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.error().unwrap().contains("backend unavailable"));
        assert!(!store.is_loading());
        assert_eq!(store.instance_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_instance_clones_with_fresh_stamp() {
        let mut store = store();
        store.reset_to_fake_data();
        let before = Utc::now();

        store
            .duplicate_instance("Vanilla 1.20.4", "Vanilla Copy")
            .await
            .unwrap();

        assert_eq!(store.instance_count(), 5);
        let original = store.get_instance_by_name("Vanilla 1.20.4").unwrap().clone();
        let copy = store.get_instance_by_name("Vanilla Copy").unwrap();
        assert_eq!(copy.loader, original.loader);
        assert_eq!(copy.game, original.game);
        assert!(copy.last_played.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_duplicate_missing_original_is_not_found() {
        let mut store = store();
        store.reset_to_fake_data();

        let err = store
            .duplicate_instance("No Such Pack", "Copy")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        // Expected condition: the store error field stays clear.
        assert!(store.error().is_none());
        assert_eq!(store.instance_count(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_to_existing_name_rejected() {
        let mut store = store();
        store.reset_to_fake_data();

        let err = store
            .duplicate_instance("Vanilla 1.20.4", "Fabric Modded")
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateName(_)));
        assert_eq!(store.instance_count(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_overlong_new_name_rejected() {
        let mut store = store();
        store.reset_to_fake_data();

        let err = store
            .duplicate_instance("Vanilla 1.20.4", &"x".repeat(51))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Instance name too long"));
        assert!(store.error().is_some());
    }

    #[test]
    fn test_sorted_instances_recency_order() {
        let mut store = store();
        store.reset_to_fake_data();

        let sorted = store.sorted_instances();
        let names: Vec<&str> = sorted.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Vanilla 1.20.4",
                "Fabric Modded",
                "Quilt Experimental",
                "Forge Adventure",
            ]
        );
    }

    #[tokio::test]
    async fn test_never_played_sorts_last() {
        let mut store = store();
        store.reset_to_fake_data();
        let mut never_played = draft("Fresh Pack");
        never_played.last_played = None;
        store.add_instance(never_played).await.unwrap();
        // add_instance stamps the clock, so rewind it by hand.
        store
            .instances
            .iter_mut()
            .find(|i| i.name == "Fresh Pack")
            .unwrap()
            .last_played = None;

        let sorted = store.sorted_instances();
        assert_eq!(sorted.last().unwrap().name, "Fresh Pack");
    }

    #[test]
    fn test_recent_instances_caps_at_five() {
        let mut store = store();
        store.reset_to_fake_data();
        assert_eq!(store.recent_instances().len(), 4);

        for i in 0..4 {
            let mut instance = fake_instances().remove(0);
            instance.name = format!("Extra {i}");
            store.instances.push(instance);
        }
        assert_eq!(store.recent_instances().len(), 5);
    }

    #[test]
    fn test_update_last_played_stamps_and_ignores_missing() {
        let mut store = store();
        store.reset_to_fake_data();
        let before = Utc::now();

        store.update_instance_last_played("Forge Adventure");
        let stamped = store.get_instance_by_name("Forge Adventure").unwrap();
        assert!(stamped.last_played.unwrap() >= before);

        // Missing name is a silent no-op.
        store.update_instance_last_played("No Such Pack");
        assert_eq!(store.instance_count(), 4);
    }

    #[test]
    fn test_reset_to_fake_data_from_empty() {
        let mut store = store();
        assert_eq!(store.instance_count(), 0);

        store.reset_to_fake_data();

        assert_eq!(store.instance_count(), 4);
        assert!(store.error().is_none());
        assert!(store.current_instance().is_none());
    }

    #[tokio::test]
    async fn test_initialize_loads_only_when_empty() {
        let mut store = store();
        store.initialize().await.unwrap();
        assert_eq!(store.instance_count(), 4);

        store.delete_instance("Vanilla 1.20.4").await.unwrap();
        store.initialize().await.unwrap();
        // Not empty anymore, so no reload happens.
        assert_eq!(store.instance_count(), 3);
    }

    #[test]
    fn test_modal_toggles() {
        let mut store = store();
        store.toggle_settings_modal();
        store.toggle_add_instance_modal();
        assert!(store.settings_modal_open);
        assert!(store.add_instance_modal_open);
        store.toggle_settings_modal();
        assert!(!store.settings_modal_open);
    }
}
