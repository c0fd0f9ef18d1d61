//! Recipe list state management
//!
//! This module contains the model behind the recipe list: the load state,
//! the selected cuisine filter, and the filtered list derived from both. The
//! filtered list is recomputed and published to subscribers every time
//! either input changes.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

use crate::data::{Recipe, RecipeSource};
use crate::filter::{available_filter_options, filter_recipes, FilterOption};

/// Load state of the recipe list
#[derive(Debug, Clone, Default)]
pub enum RecipeListState {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A fetch is outstanding
    Loading,
    /// The feed returned at least one recipe
    Loaded(Vec<Recipe>),
    /// The feed returned no recipes
    Empty,
    /// The last fetch failed; holds the message to show the user
    Error(String),
}

impl PartialEq for RecipeListState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecipeListState::Idle, RecipeListState::Idle)
            | (RecipeListState::Loading, RecipeListState::Loading)
            | (RecipeListState::Empty, RecipeListState::Empty) => true,
            (RecipeListState::Loaded(a), RecipeListState::Loaded(b)) => {
                a.iter().map(|r| &r.uuid).eq(b.iter().map(|r| &r.uuid))
            }
            (RecipeListState::Error(a), RecipeListState::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl RecipeListState {
    /// Recipes held by this state, empty unless loaded
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            RecipeListState::Loaded(recipes) => recipes,
            _ => &[],
        }
    }
}

/// Mutable part of the model, always updated under one lock
#[derive(Debug, Default)]
struct ListInner {
    state: RecipeListState,
    selected_filter: FilterOption,
    last_loaded: Option<DateTime<Utc>>,
}

/// Clears the in-flight flag when a load finishes or its future is dropped
///
/// While `previous` is set the load has not settled; dropping the guard then
/// puts back the state the load replaced and republishes it.
struct InFlight<'a> {
    model: &'a RecipeListModel,
    previous: Option<RecipeListState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!("Load dropped before completion, restoring previous state");
            let mut inner = self.model.lock();
            inner.state = previous;
            self.model.publish(&inner);
        }
        self.model.in_flight.store(false, Ordering::Release);
    }
}

/// Model behind the recipe list
///
/// Shared by reference: every method takes `&self`, so the model can sit in
/// an `Arc` and be driven from several tasks. At most one load runs at a
/// time; a load requested while another is outstanding is ignored.
pub struct RecipeListModel {
    /// Where recipes come from
    source: Arc<dyn RecipeSource>,
    /// Load state and filter selection
    inner: Mutex<ListInner>,
    /// Set while a load is outstanding
    in_flight: AtomicBool,
    /// Publishes the filtered list on every recompute
    filtered_tx: watch::Sender<Vec<Recipe>>,
}

impl RecipeListModel {
    /// Creates a model in the `Idle` state with the `All` filter selected
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        let (filtered_tx, _) = watch::channel(Vec::new());
        Self {
            source,
            inner: Mutex::new(ListInner::default()),
            in_flight: AtomicBool::new(false),
            filtered_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListInner> {
        // The lock is never held across an await or a user callback, so a
        // poisoned lock still holds consistent data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current load state
    pub fn state(&self) -> RecipeListState {
        self.lock().state.clone()
    }

    /// Currently selected filter
    pub fn selected_filter(&self) -> FilterOption {
        self.lock().selected_filter
    }

    /// When the last successful load finished
    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.lock().last_loaded
    }

    /// Whether a load is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The filtered list as of the last recompute
    pub fn filtered_recipes(&self) -> Vec<Recipe> {
        self.filtered_tx.borrow().clone()
    }

    /// Subscribes to the filtered list
    ///
    /// The receiver sees a new value every time the list is recomputed,
    /// i.e. after each filter change and each state change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Recipe>> {
        self.filtered_tx.subscribe()
    }

    /// Selects a filter and recomputes the filtered list
    pub fn set_filter(&self, filter: FilterOption) {
        let mut inner = self.lock();
        inner.selected_filter = filter;
        debug!("Filter set to {}", filter.label());
        self.publish(&inner);
    }

    /// Filters worth offering for the currently loaded recipes
    pub fn available_filter_options(&self) -> Vec<FilterOption> {
        available_filter_options(self.lock().state.recipes())
    }

    /// Looks up a loaded recipe by uuid
    pub fn recipe(&self, uuid: &str) -> Option<Recipe> {
        self.lock()
            .state
            .recipes()
            .iter()
            .find(|recipe| recipe.uuid == uuid)
            .cloned()
    }

    /// Loads the recipe list from the source
    ///
    /// Moves to `Loading`, awaits a single fetch, then settles on `Loaded`,
    /// `Empty` or `Error`. Failures are not retried.
    ///
    /// # Returns
    /// * `true` if this call performed the load
    /// * `false` if another load was already outstanding and this request was ignored
    pub async fn load_recipes(&self) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Load already in flight, ignoring request");
            return false;
        }
        let previous = self.replace_state(RecipeListState::Loading);
        let mut guard = InFlight {
            model: self,
            previous: Some(previous),
        };

        let result = self.source.fetch_recipes().await;

        let state = match result {
            Ok(recipes) if recipes.is_empty() => {
                info!("Recipe feed is empty");
                RecipeListState::Empty
            }
            Ok(recipes) => {
                info!("Loaded {} recipes", recipes.len());
                RecipeListState::Loaded(recipes)
            }
            Err(e) => {
                warn!("Failed to load recipes: {}", e);
                RecipeListState::Error(e.to_string())
            }
        };

        let mut inner = self.lock();
        if !matches!(state, RecipeListState::Error(_)) {
            inner.last_loaded = Some(Utc::now());
        }
        inner.state = state;
        self.publish(&inner);
        drop(inner);

        guard.previous = None;
        true
    }

    /// Manual refresh requested by the user; behaves like `load_recipes`
    pub async fn refresh_recipes(&self) -> bool {
        self.load_recipes().await
    }

    /// Swaps in a new state, republishes, and returns the old one
    fn replace_state(&self, state: RecipeListState) -> RecipeListState {
        let mut inner = self.lock();
        let previous = std::mem::replace(&mut inner.state, state);
        self.publish(&inner);
        previous
    }

    /// Recomputes the filtered list from the current state and filter
    fn publish(&self, inner: &ListInner) {
        let filtered = filter_recipes(inner.state.recipes(), inner.selected_filter);
        self.filtered_tx.send_replace(filtered);
    }
}
