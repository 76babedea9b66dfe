use crate::core::cart::CartStore;
use crate::domain::model::Product;
use crate::domain::ports::ProductSource;
use crate::utils::error::StoreError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Product),
    NotFound(u64),
    Failed(String),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            LoadState::Loaded(product) => Some(product),
            _ => None,
        }
    }
}

/// Loads one product for display.
///
/// The fetch runs on a task owned by the view. Each fetch carries a
/// generation number; dropping the view or retrying bumps the generation
/// under the state lock, so a response that arrives afterwards is never
/// applied even if the aborted task was already past its last await.
pub struct ProductDetailView {
    id: u64,
    source: Arc<dyn ProductSource>,
    state: Arc<watch::Sender<LoadState>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl ProductDetailView {
    /// Starts loading `id`. Must be called from within a tokio runtime.
    pub fn open(source: Arc<dyn ProductSource>, id: u64) -> Self {
        let (tx, _) = watch::channel(LoadState::Loading);
        let mut view = Self {
            id,
            source,
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        };
        view.spawn_fetch();
        view
    }

    pub fn product_id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Waits for the current fetch to finish and returns its outcome.
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on a state change.
        let settled = rx
            .wait_for(LoadState::is_settled)
            .await
            .map(|state| (*state).clone());
        settled.unwrap_or_else(|_| self.state())
    }

    /// Re-issues the fetch after a not-found or failed load. Returns `false`
    /// while loading or once loaded.
    pub fn retry(&mut self) -> bool {
        match *self.state.borrow() {
            LoadState::NotFound(_) | LoadState::Failed(_) => {}
            LoadState::Loading | LoadState::Loaded(_) => return false,
        }
        tracing::info!("🔁 Retrying product {}", self.id);
        self.spawn_fetch();
        true
    }

    /// Adds the loaded product to `cart`. Does nothing until the product is loaded.
    pub fn add_to_cart(&self, cart: &CartStore) -> bool {
        match self.state.borrow().product() {
            Some(product) => {
                cart.add_to_cart(product);
                true
            }
            None => false,
        }
    }

    fn spawn_fetch(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let ticket = self.invalidate();
        self.state.send_replace(LoadState::Loading);

        let id = self.id;
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        self.task = Some(tokio::spawn(async move {
            let next = match source.get_product(id).await {
                Ok(product) => LoadState::Loaded(product),
                Err(StoreError::NotFound { id }) => LoadState::NotFound(id),
                Err(e) => {
                    tracing::warn!("⚠️ Loading product {} failed: {}", id, e);
                    LoadState::Failed(e.to_string())
                }
            };
            if !publish_if_current(&state, &generation, ticket, next) {
                tracing::debug!("Dropped stale result for product {}", id);
            }
        }));
    }

    /// Moves to a new generation while holding the state lock, so no
    /// in-flight publish can interleave. Returns the new generation.
    fn invalidate(&self) -> u64 {
        let mut current = 0;
        self.state.send_if_modified(|_| {
            current = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });
        current
    }
}

/// Stores `next` only if no newer fetch or disposal happened since `ticket`
/// was issued. The check and the write happen under the same lock.
fn publish_if_current(
    state: &watch::Sender<LoadState>,
    generation: &AtomicU64,
    ticket: u64,
    next: LoadState,
) -> bool {
    state.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *current = next;
        true
    })
}

impl Drop for ProductDetailView {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("Discarding in-flight load of product {}", self.id);
            }
            task.abort();
        }
        self.invalidate();
    }
}

impl std::fmt::Debug for ProductDetailView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDetailView")
            .field("id", &self.id)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
