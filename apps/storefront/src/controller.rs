//! # View Controller
//!
//! Single-writer actor that owns all storefront state.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Controller                            │
//! │                                                                         │
//! │  StorefrontHandle ──┐                                                   │
//! │  (clone per view)   │ Action (mpsc)                                     │
//! │                     ▼                                                   │
//! │             ┌───────────────────┐   spawn    ┌──────────────────────┐  │
//! │             │                   │ ─────────► │ fetch task           │  │
//! │             │   run loop        │            │ store.list_products  │  │
//! │             │                   │ ◄───────── │ (tagged RequestId)   │  │
//! │             │  Catalog          │   Event    └──────────────────────┘  │
//! │             │  Cart             │                                       │
//! │             │  categories       │                                       │
//! │             │  modal / notice   │                                       │
//! │             └─────────┬─────────┘                                       │
//! │                       │ watch::Sender<StorefrontView>                   │
//! │                       ▼                                                 │
//! │             snapshot after every processed message                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch tasks never touch state. Their completions are applied one at a
//! time by the run loop, and a completion for anything but the latest
//! request is dropped. No error ends the loop; it stops on `shutdown()` or
//! when every handle is gone.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use storefront_client::{ClientResult, ProductStore};
use storefront_core::{
    AddOutcome, Cart, Catalog, CatalogPhase, Category, CategoryFilter, Product, ProductId,
    RequestId, SortKey,
};

use crate::config::DisplaySettings;
use crate::error::{AppError, AppResult, UserError};
use crate::view::{Notice, StorefrontView, ViewInputs};

/// Pending user actions before `send` waits.
const ACTION_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Messages
// =============================================================================

/// User callbacks, delivered through [`StorefrontHandle`].
#[derive(Debug)]
enum Action {
    SelectCategory(CategoryFilter),
    SetSortKey(SortKey),
    AddToCart {
        product: Product,
        reply: oneshot::Sender<AddOutcome>,
    },
    RemoveFromCart(ProductId),
    ToggleCartModal,
    DismissNotice,
    Shutdown,
}

/// Network completions posted by fetch tasks.
#[derive(Debug)]
enum Event {
    CategoriesLoaded(ClientResult<Vec<Category>>),
    ProductsLoaded {
        request: RequestId,
        category: CategoryFilter,
        result: ClientResult<Vec<Product>>,
    },
}

/// Add outcome held back until the snapshot reflecting it is published.
#[derive(Debug)]
struct AddReply {
    tx: oneshot::Sender<AddOutcome>,
    outcome: AddOutcome,
}

impl AddReply {
    fn deliver(self) {
        // Caller may have stopped waiting.
        let _ = self.tx.send(self.outcome);
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Callbacks and view access for the presentational layer.
///
/// ## Usage
/// ```rust,no_run
/// use std::sync::Arc;
/// use storefront::{DisplaySettings, Storefront};
/// use storefront_client::{ClientConfig, HttpProductStore};
/// use storefront_core::{CategoryFilter, SortKey};
///
/// # async fn demo() -> storefront::AppResult<()> {
/// let store = Arc::new(HttpProductStore::new(&ClientConfig::default())?);
/// let handle = Storefront::start(store, DisplaySettings::default());
///
/// handle.set_selected_category(CategoryFilter::Category("jewelery".into())).await?;
/// handle.set_sort_key(SortKey::PriceLow).await?;
/// let view = handle.wait_for(|v| !v.loading).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StorefrontHandle {
    action_tx: mpsc::Sender<Action>,
    view_rx: watch::Receiver<StorefrontView>,
}

impl StorefrontHandle {
    async fn send(&self, action: Action) -> AppResult<()> {
        self.action_tx
            .send(action)
            .await
            .map_err(|_| AppError::ControllerStopped)
    }

    /// Selects a category. Reloads the catalog unless it is already selected.
    pub async fn set_selected_category(&self, category: CategoryFilter) -> AppResult<()> {
        self.send(Action::SelectCategory(category)).await
    }

    /// Changes the sort key. Never reloads.
    pub async fn set_sort_key(&self, key: SortKey) -> AppResult<()> {
        self.send(Action::SetSortKey(key)).await
    }

    /// Adds `product` to the cart and reports whether it was already there.
    pub async fn add_to_cart(&self, product: Product) -> AppResult<AddOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.send(Action::AddToCart { product, reply }).await?;
        outcome.await.map_err(|_| AppError::ControllerStopped)
    }

    /// Removes `id` from the cart; no-op if absent.
    pub async fn remove_from_cart(&self, id: ProductId) -> AppResult<()> {
        self.send(Action::RemoveFromCart(id)).await
    }

    pub async fn toggle_cart_modal_visibility(&self) -> AppResult<()> {
        self.send(Action::ToggleCartModal).await
    }

    /// Clears the transient notice, if any.
    pub async fn dismiss_notice(&self) -> AppResult<()> {
        self.send(Action::DismissNotice).await
    }

    /// Stops the controller. In-flight fetches are abandoned.
    pub async fn shutdown(&self) -> AppResult<()> {
        self.send(Action::Shutdown).await
    }

    /// Latest published snapshot.
    pub fn view(&self) -> StorefrontView {
        self.view_rx.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StorefrontView> {
        self.view_rx.clone()
    }

    /// Waits until a snapshot satisfies `predicate`, checking the current
    /// one first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&StorefrontView) -> bool,
    ) -> AppResult<StorefrontView> {
        let mut rx = self.view_rx.clone();
        let view = rx
            .wait_for(predicate)
            .await
            .map_err(|_| AppError::ControllerStopped)?;
        Ok((*view).clone())
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The storefront controller task state.
pub struct Storefront {
    store: Arc<dyn ProductStore>,
    display: DisplaySettings,

    catalog: Catalog,
    cart: Cart,
    categories: Vec<Category>,
    cart_visible: bool,
    notice: Option<Notice>,

    event_tx: mpsc::UnboundedSender<Event>,
    view_tx: watch::Sender<StorefrontView>,
}

impl Storefront {
    /// Starts the controller on the current tokio runtime.
    ///
    /// The category fetch and the initial `all` load are issued before this
    /// returns, so the first snapshot a subscriber sees is already loading.
    pub fn start(store: Arc<dyn ProductStore>, display: DisplaySettings) -> StorefrontHandle {
        let span = info_span!("storefront", session = %Uuid::new_v4());
        let (action_tx, action_rx) = mpsc::channel(ACTION_CHANNEL_CAPACITY);
        let (mut controller, event_rx, view_rx) = Storefront::new(store, display);

        span.in_scope(|| controller.bootstrap());
        tokio::spawn(controller.run(action_rx, event_rx).instrument(span));

        StorefrontHandle { action_tx, view_rx }
    }

    fn new(
        store: Arc<dyn ProductStore>,
        display: DisplaySettings,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<Event>,
        watch::Receiver<StorefrontView>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(StorefrontView::default());

        let controller = Storefront {
            store,
            display,
            catalog: Catalog::new(),
            cart: Cart::new(),
            categories: Vec::new(),
            cart_visible: false,
            notice: None,
            event_tx,
            view_tx,
        };
        (controller, event_rx, view_rx)
    }

    fn bootstrap(&mut self) {
        info!("Storefront controller started");
        self.fetch_categories();
        self.start_load(CategoryFilter::All);
        self.publish();
    }

    /// Main controller loop.
    async fn run(
        mut self,
        mut actions: mpsc::Receiver<Action>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        loop {
            let reply = tokio::select! {
                action = actions.recv() => match action {
                    Some(Action::Shutdown) | None => {
                        info!("Storefront controller shutting down");
                        break;
                    }
                    Some(action) => self.handle_action(action),
                },
                Some(event) = events.recv() => {
                    self.handle_event(event);
                    None
                }
            };

            self.publish();
            if let Some(reply) = reply {
                reply.deliver();
            }
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn handle_action(&mut self, action: Action) -> Option<AddReply> {
        // Notices only last until the next thing the shopper does.
        self.notice = None;

        match action {
            Action::SelectCategory(category) => self.select_category(category),
            Action::SetSortKey(key) => {
                debug!(sort_key = %key, "Sort key changed");
                self.catalog.set_sort_key(key);
            }
            Action::AddToCart { product, reply } => {
                let id = product.id;
                let outcome = self.cart.add(product);
                debug!(product_id = id, ?outcome, cart_len = self.cart.len(), "Add to cart");

                self.notice = Notice::for_add_outcome(outcome, id);
                return Some(AddReply { tx: reply, outcome });
            }
            Action::RemoveFromCart(id) => {
                let removed = self.cart.remove(id);
                debug!(product_id = id, removed, cart_len = self.cart.len(), "Remove from cart");
            }
            Action::ToggleCartModal => {
                self.cart_visible = !self.cart_visible;
                debug!(visible = self.cart_visible, "Cart modal toggled");
            }
            Action::DismissNotice => {}
            // Handled by the run loop.
            Action::Shutdown => {}
        }
        None
    }

    fn select_category(&mut self, category: CategoryFilter) {
        if self.catalog.phase() != CatalogPhase::Idle
            && *self.catalog.selected_category() == category
        {
            debug!(category = %category, "Category already selected");
            return;
        }
        self.start_load(category);
    }

    // =========================================================================
    // Fetches
    // =========================================================================

    fn fetch_categories(&self) {
        let store = Arc::clone(&self.store);
        let events = self.event_tx.clone();

        tokio::spawn(
            async move {
                let result = store.list_categories().await;
                if events.send(Event::CategoriesLoaded(result)).is_err() {
                    debug!("Controller gone, dropping category response");
                }
            }
            .in_current_span(),
        );
    }

    fn start_load(&mut self, category: CategoryFilter) {
        let request = self.catalog.begin_load(category.clone());
        info!(category = %category, request = %request, "Loading products");

        let store = Arc::clone(&self.store);
        let events = self.event_tx.clone();

        tokio::spawn(
            async move {
                let result = store.list_products(&category).await;
                let event = Event::ProductsLoaded {
                    request,
                    category,
                    result,
                };
                if events.send(event).is_err() {
                    debug!(request = %request, "Controller gone, dropping product response");
                }
            }
            .in_current_span(),
        );
    }

    // =========================================================================
    // Completions
    // =========================================================================

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::CategoriesLoaded(Ok(categories)) => {
                debug!(count = categories.len(), "Categories loaded");
                self.categories = categories;
            }
            Event::CategoriesLoaded(Err(e)) => {
                warn!(error = %e, "Failed to fetch categories, keeping previous list");
            }
            Event::ProductsLoaded {
                request,
                category,
                result,
            } => self.apply_products(request, category, result),
        }
    }

    fn apply_products(
        &mut self,
        request: RequestId,
        category: CategoryFilter,
        result: ClientResult<Vec<Product>>,
    ) {
        if !self.catalog.is_current(request) {
            debug!(category = %category, request = %request, "Discarding stale product response");
            return;
        }

        match result {
            Ok(products) => {
                let count = products.len();
                self.catalog.complete_load(request, products, Utc::now());
                info!(category = %category, request = %request, count, "Products loaded");
            }
            Err(e) => {
                let user_error = UserError::from(e);
                self.catalog.fail_load(request, user_error.message);
            }
        }
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    fn view(&self) -> StorefrontView {
        StorefrontView::build(ViewInputs {
            catalog: &self.catalog,
            cart: &self.cart,
            categories: &self.categories,
            cart_visible: self.cart_visible,
            notice: self.notice.as_ref(),
            display: &self.display,
        })
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}
