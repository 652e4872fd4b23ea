use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::content::{ContentItem, ContentProvider, TrendingItem, TrendingSampler};

use super::error::StoreError;
use super::events::{spawn_content_fetch, spawn_search, spawn_trending, StoreEvent};
use super::ordering::{move_item, renumber};
use super::state::{DashboardState, FilterPatch, UserProfile};

/// Capacity of the background event channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Bookkeeping for one class of background request.
///
/// `generation` is bumped for every new request; a completion is accepted
/// only if it carries the current generation and a request is still pending.
#[derive(Default)]
struct RequestSlot {
    generation: u64,
    pending: bool,
    handle: Option<JoinHandle<()>>,
}

impl RequestSlot {
    /// Start a new request, aborting the one it supersedes.
    fn begin(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.generation
    }

    fn accept(&mut self, generation: u64) -> bool {
        if !self.pending || generation != self.generation {
            return false;
        }
        self.pending = false;
        self.handle = None;
        true
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// What happened when an event was handed to [`DashboardStore::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was the latest of its kind and state was updated.
    Applied,
    /// The latest request of its kind failed. Content and search failures
    /// also set `error` in state; trending failures do not.
    Failed(StoreError),
    /// A newer request superseded this one; state was not touched.
    Stale,
}

/// Single owner of the dashboard state.
///
/// All mutation goes through the methods below. Provider requests are
/// spawned on the tokio runtime and their results come back as
/// [`StoreEvent`]s, which must be fed to [`handle_event`](Self::handle_event)
/// (or drained with [`settle`](Self::settle)).
pub struct DashboardStore {
    provider: Arc<dyn ContentProvider>,
    state: DashboardState,
    sampler: TrendingSampler,
    event_tx: mpsc::Sender<StoreEvent>,
    event_rx: mpsc::Receiver<StoreEvent>,
    content_req: RequestSlot,
    search_req: RequestSlot,
    trending_req: RequestSlot,
}

impl DashboardStore {
    /// Store with an OS-seeded trending sampler.
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self::with_sampler(provider, TrendingSampler::from_os_rng())
    }

    /// Store whose trending samples are reproducible from `seed`.
    pub fn with_seed(provider: Arc<dyn ContentProvider>, seed: u64) -> Self {
        Self::with_sampler(provider, TrendingSampler::from_seed(seed))
    }

    fn with_sampler(provider: Arc<dyn ContentProvider>, sampler: TrendingSampler) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            provider,
            state: DashboardState::default(),
            sampler,
            event_tx,
            event_rx,
            content_req: RequestSlot::default(),
            search_req: RequestSlot::default(),
            trending_req: RequestSlot::default(),
        }
    }

    /// Current snapshot for rendering.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Favorite status is derived from favorites membership only.
    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.state.favorites.iter().any(|f| f.id == item_id)
    }

    /// True when no request of any kind is waiting for a response.
    pub fn is_idle(&self) -> bool {
        !self.content_req.pending && !self.search_req.pending && !self.trending_req.pending
    }

    fn sync_loading(&mut self) {
        self.state.is_loading = self.content_req.pending || self.search_req.pending;
    }

    // ========================================================================
    // Async Operations
    // ========================================================================

    /// Replace the feed with the provider's content for `categories`.
    ///
    /// An empty slice means no category filter. Returns the request's
    /// generation. Must be called inside a tokio runtime.
    pub fn fetch_personalized_content(&mut self, categories: &[String]) -> u64 {
        let generation = self.content_req.begin();
        self.state.error = None;
        self.sync_loading();

        tracing::debug!(generation, categories = ?categories, "Spawning content fetch");
        self.content_req.handle = Some(spawn_content_fetch(
            Arc::clone(&self.provider),
            categories.to_vec(),
            generation,
            self.event_tx.clone(),
        ));
        generation
    }

    /// Search all sources for `query`. Results land in `search_results`.
    pub fn search_content(&mut self, query: &str) -> u64 {
        let generation = self.search_req.begin();
        self.state.error = None;
        self.sync_loading();

        tracing::debug!(generation, query = %query, "Spawning search");
        self.search_req.handle = Some(spawn_search(
            Arc::clone(&self.provider),
            query.to_string(),
            generation,
            self.event_tx.clone(),
        ));
        generation
    }

    /// Resample the trending list. Does not touch the loading flag.
    pub fn refresh_trending(&mut self) -> u64 {
        let generation = self.trending_req.begin();
        let sampler = self.sampler.fork();

        tracing::debug!(generation, "Spawning trending sample");
        self.trending_req.handle = Some(spawn_trending(
            Arc::clone(&self.provider),
            sampler,
            generation,
            self.event_tx.clone(),
        ));
        generation
    }

    /// Wait for the next background completion.
    pub async fn next_event(&mut self) -> Option<StoreEvent> {
        self.event_rx.recv().await
    }

    /// Apply every outstanding completion until no request is pending.
    ///
    /// Returns the outcomes in arrival order.
    pub async fn settle(&mut self) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while !self.is_idle() {
            match self.event_rx.recv().await {
                Some(event) => outcomes.push(self.handle_event(event)),
                None => break,
            }
        }
        outcomes
    }

    /// Fold a background completion into state, unless it is stale.
    pub fn handle_event(&mut self, event: StoreEvent) -> EventOutcome {
        let outcome = match event {
            StoreEvent::ContentLoaded {
                generation,
                categories,
                result,
            } => {
                if !self.content_req.accept(generation) {
                    tracing::debug!(
                        expected = self.content_req.generation,
                        got = generation,
                        "Ignoring stale content fetch (generation mismatch)"
                    );
                    return EventOutcome::Stale;
                }
                match result {
                    Ok(items) => {
                        tracing::info!(count = items.len(), categories = ?categories, "Content loaded");
                        self.state.content = items;
                        EventOutcome::Applied
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, categories = ?categories, "Content fetch failed");
                        self.fail(e.into())
                    }
                }
            }
            StoreEvent::SearchCompleted {
                generation,
                query,
                result,
            } => {
                if !self.search_req.accept(generation) {
                    tracing::debug!(
                        expected = self.search_req.generation,
                        got = generation,
                        query = %query,
                        "Ignoring stale search result (generation mismatch)"
                    );
                    return EventOutcome::Stale;
                }
                match result {
                    Ok(results) => {
                        tracing::debug!(query = %query, count = results.total(), "Search completed");
                        self.state.search_results = Some(results);
                        EventOutcome::Applied
                    }
                    Err(e) => {
                        tracing::warn!(query = %query, error = %e, "Search failed");
                        self.fail(e.into())
                    }
                }
            }
            StoreEvent::TrendingLoaded { generation, result } => {
                if !self.trending_req.accept(generation) {
                    tracing::debug!(
                        expected = self.trending_req.generation,
                        got = generation,
                        "Ignoring stale trending sample (generation mismatch)"
                    );
                    return EventOutcome::Stale;
                }
                match result {
                    Ok(items) => {
                        self.state.trending = items;
                        EventOutcome::Applied
                    }
                    // Trending failures stay local to the trending list.
                    Err(e) => {
                        tracing::warn!(error = %e, "Trending fetch failed");
                        EventOutcome::Failed(e.into())
                    }
                }
            }
        };
        self.sync_loading();
        outcome
    }

    fn fail(&mut self, err: StoreError) -> EventOutcome {
        self.state.error = Some(err.to_string());
        EventOutcome::Failed(err)
    }

    // ========================================================================
    // Synchronous Mutations
    // ========================================================================

    /// Snapshot `item_id` from the feed onto the end of favorites.
    ///
    /// Returns false (and changes nothing) if the id is not in the feed or is
    /// already a favorite.
    pub fn add_to_favorites(&mut self, item_id: &str) -> bool {
        if self.is_favorite(item_id) {
            return false;
        }
        let Some(item) = self.state.content.iter().find(|i| i.id == item_id) else {
            tracing::debug!(item_id, "Favorite target not in feed, ignoring");
            return false;
        };

        let mut snapshot = item.clone();
        snapshot.order = self.state.favorites.len();
        self.state.favorites.push(snapshot);
        tracing::debug!(item_id, count = self.state.favorites.len(), "Added favorite");
        true
    }

    /// Drop `item_id` from favorites. Returns false if it was not there.
    pub fn remove_from_favorites(&mut self, item_id: &str) -> bool {
        let before = self.state.favorites.len();
        self.state.favorites.retain(|f| f.id != item_id);
        let removed = self.state.favorites.len() != before;
        if removed {
            renumber(&mut self.state.favorites);
            tracing::debug!(item_id, "Removed favorite");
        }
        removed
    }

    pub fn reorder_content(&mut self, source: usize, destination: usize) -> Result<(), StoreError> {
        move_item(&mut self.state.content, source, destination).inspect_err(|e| {
            tracing::warn!(source, destination, error = %e, "Rejected feed reorder");
        })
    }

    pub fn reorder_favorites(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<(), StoreError> {
        move_item(&mut self.state.favorites, source, destination).inspect_err(|e| {
            tracing::warn!(source, destination, error = %e, "Rejected favorites reorder");
        })
    }

    /// Shallow-merge filter fields. Does not trigger a fetch.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.state.filters.apply(patch);
    }

    /// Return to "never searched". Also forgets any in-flight search so its
    /// late result cannot resurrect the cleared state.
    pub fn clear_search_results(&mut self) {
        self.search_req.abort();
        self.search_req.pending = false;
        self.state.search_results = None;
        self.sync_loading();
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.state.user = Some(user);
    }

    /// Replace the feed directly, renumbering to positions.
    pub fn set_content(&mut self, mut items: Vec<ContentItem>) {
        renumber(&mut items);
        self.state.content = items;
    }

    pub fn set_trending(&mut self, items: Vec<TrendingItem>) {
        self.state.trending = items;
    }

    /// Load a previously saved favorites list, keeping the first occurrence
    /// of any duplicated id.
    pub fn restore_favorites(&mut self, items: Vec<ContentItem>) {
        let mut restored: Vec<ContentItem> = Vec::with_capacity(items.len());
        for item in items {
            if !restored.iter().any(|r| r.id == item.id) {
                restored.push(item);
            }
        }
        renumber(&mut restored);
        self.state.favorites = restored;
    }
}

impl Drop for DashboardStore {
    fn drop(&mut self) {
        self.content_req.abort();
        self.search_req.abort();
        self.trending_req.abort();
    }
}
