//! Application controller
//!
//! [`App`] wires the session, navigation, request tracking and services
//! together. Every screen action goes through it: the action runs as a
//! tracked request on behalf of the screen on top, failures are queued as
//! [`Notice`]s, and navigation follows the session whenever a request
//! signs in or out.

use app_core::{
    AppError, AuthService, Credentials, NewItem, OutfitService, RecommendationForm,
    Result, WardrobeService,
};
use app_state::{RequestTracker, Session, SessionState, SessionStore};
use fitcheck_client::{Coords, ImageUpload, OutfitSelection, WardrobeApi, WardrobeItem};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use crate::navigation::{ItemChoice, NavigationState, Route, StackKind, WardrobeMode};
use crate::screens::{ItemDetailView, Notice, OutfitResultView, RecommendFormView, WardrobeGrid};

/// Application controller, cheap to clone
#[derive(Clone)]
pub struct App {
    session: SessionState,
    nav: Arc<Mutex<NavigationState>>,
    requests: RequestTracker,
    auth: AuthService,
    wardrobe: WardrobeService,
    outfits: OutfitService,
    /// Items of the open wardrobe; `None` until a load succeeds
    items: Arc<Mutex<Option<Vec<WardrobeItem>>>>,
    notices: Arc<Mutex<VecDeque<Notice>>>,
}

impl App {
    /// Create an app over a backend and a token store
    pub fn new(api: Arc<dyn WardrobeApi>, store: SessionStore) -> Self {
        let session = SessionState::new(store);
        Self {
            nav: Arc::new(Mutex::new(NavigationState::for_session(false))),
            requests: RequestTracker::new(),
            auth: AuthService::new(Arc::clone(&api), session.clone()),
            wardrobe: WardrobeService::new(Arc::clone(&api), session.clone()),
            outfits: OutfitService::new(api, session.clone()),
            items: Arc::new(Mutex::new(None)),
            notices: Arc::new(Mutex::new(VecDeque::new())),
            session,
        }
    }

    /// Restore the persisted session and show the matching stack
    pub fn boot(&self) -> StackKind {
        if let Err(err) = self.auth.restore() {
            tracing::warn!(error = %err, "could not restore session");
            self.report(err);
        }
        self.sync_navigation();
        self.nav.lock().kind()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Shared session
    pub fn session(&self) -> Session {
        self.session.current()
    }

    /// Route on top of the active stack
    pub fn current_route(&self) -> Route {
        self.nav.lock().current_route().clone()
    }

    /// Key of the screen on top
    pub fn current_key(&self) -> String {
        self.nav.lock().current_key().to_string()
    }

    /// Active top-level stack
    pub fn stack_kind(&self) -> StackKind {
        self.nav.lock().kind()
    }

    /// Snapshot of the navigation state
    pub fn navigation(&self) -> NavigationState {
        self.nav.lock().clone()
    }

    /// Drain queued notices, oldest first
    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices.lock().drain(..).collect()
    }

    /// Whether the screen on top has a request in flight
    pub fn is_busy(&self) -> bool {
        self.requests.is_pending(&self.current_key())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Push a screen
    pub fn navigate(&self, route: Route) -> bool {
        self.nav.lock().navigate(route)
    }

    /// Pop the top screen, aborting its request
    pub fn go_back(&self) -> bool {
        let popped = self.nav.lock().go_back();
        if popped {
            self.prune_requests();
        }
        popped
    }

    /// Open the wardrobe and load it
    pub async fn open_wardrobe(&self, mode: WardrobeMode) -> Result<Vec<WardrobeItem>> {
        *self.items.lock() = None;
        if !self.navigate(Route::Wardrobe { mode }) {
            return Err(self.report(not_signed_in()));
        }
        self.load_wardrobe().await
    }

    /// Open an empty recommendation form
    pub fn open_recommend(&self) -> bool {
        self.navigate(Route::Recommend { base_item: None })
    }

    /// Open the add-item form from the wardrobe
    pub fn open_add_item(&self) -> Result<()> {
        match self.current_route() {
            Route::Wardrobe { mode: WardrobeMode::Browse } => {
                self.navigate(Route::AddItem);
                Ok(())
            }
            _ => Err(self.report(AppError::ActionUnavailable(
                "Items can only be added while browsing the wardrobe.".to_string(),
            ))),
        }
    }

    /// Handle a tap on a loaded wardrobe item
    pub fn choose_item(&self, image_url: &str) -> Result<ItemChoice> {
        let item = self
            .items
            .lock()
            .iter()
            .flatten()
            .find(|item| item.image_url == image_url)
            .cloned();

        let Some(item) = item else {
            return Err(self.report(AppError::ActionUnavailable(format!(
                "No wardrobe item with image {}",
                image_url
            ))));
        };

        let choice = self.nav.lock().choose_wardrobe_item(item);
        match choice {
            Some(choice) => {
                self.prune_requests();
                Ok(choice)
            }
            None => Err(self.report(AppError::ActionUnavailable(
                "Open the wardrobe to choose an item.".to_string(),
            ))),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Sign in from the login stack
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<()> {
        let screen = self.auth_screen()?;
        let auth = self.auth.clone();
        let credentials = Credentials::new(username, password);
        self.run(screen, async move { auth.sign_in(credentials).await }).await
    }

    /// Create an account from the login stack
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<()> {
        let screen = self.auth_screen()?;
        let auth = self.auth.clone();
        let credentials = Credentials::new(username, password);
        self.run(screen, async move { auth.sign_up(credentials).await }).await
    }

    /// Sign out and return to the login stack
    pub fn sign_out(&self) -> Result<()> {
        let result = self.auth.sign_out();
        self.sync_navigation();
        result.map_err(|err| self.report(err))
    }

    // =========================================================================
    // Wardrobe
    // =========================================================================

    /// Load the wardrobe shown on top
    pub async fn load_wardrobe(&self) -> Result<Vec<WardrobeItem>> {
        let screen = match self.current_route() {
            Route::Wardrobe { .. } => self.current_key(),
            _ => {
                return Err(self.report(AppError::ActionUnavailable(
                    "The wardrobe is not open.".to_string(),
                )))
            }
        };

        let wardrobe = self.wardrobe.clone();
        let items = self.run(screen, async move { wardrobe.list().await }).await?;
        *self.items.lock() = Some(items.clone());
        Ok(items)
    }

    /// Submit the add-item form, then return to the wardrobe
    pub async fn add_item(&self, item: NewItem) -> Result<Option<WardrobeItem>> {
        let screen = match self.current_route() {
            Route::AddItem => self.current_key(),
            _ => {
                return Err(self.report(AppError::ActionUnavailable(
                    "The add-item form is not open.".to_string(),
                )))
            }
        };

        let wardrobe = self.wardrobe.clone();
        let saved = self.run(screen.clone(), async move { wardrobe.add(item).await }).await?;
        self.close_screen(&screen);

        let cached = match (&saved, self.items.lock().as_mut()) {
            (Some(item), Some(items)) => {
                items.push(item.clone());
                true
            }
            _ => false,
        };

        // The upload already succeeded; a failed refresh only queues its notice
        if !cached && matches!(self.current_route(), Route::Wardrobe { .. }) {
            if let Err(err) = self.load_wardrobe().await {
                tracing::debug!(error = %err, "wardrobe refresh after upload failed");
            }
        }
        Ok(saved)
    }

    /// Delete the item shown in item detail, then return to the wardrobe
    pub async fn delete_item(&self) -> Result<()> {
        let (screen, image_url) = match self.current_route() {
            Route::ItemDetail { item } => (self.current_key(), item.image_url),
            _ => {
                return Err(self.report(AppError::ActionUnavailable(
                    "Items can only be deleted from their detail screen.".to_string(),
                )))
            }
        };

        let wardrobe = self.wardrobe.clone();
        let url = image_url.clone();
        self.run(screen.clone(), async move { wardrobe.delete(&url).await }).await?;

        if let Some(items) = self.items.lock().as_mut() {
            items.retain(|item| item.image_url != image_url);
        }
        self.close_screen(&screen);
        Ok(())
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    /// Submit the recommendation form and show the result
    ///
    /// A new photo takes the place of any wardrobe base item.
    pub async fn submit_recommendation(
        &self,
        prompt: &str,
        photo: Option<ImageUpload>,
        coords: Option<Coords>,
    ) -> Result<OutfitSelection> {
        let (screen, base_item) = match self.current_route() {
            Route::Recommend { base_item } => (self.current_key(), base_item),
            _ => {
                return Err(self.report(AppError::ActionUnavailable(
                    "The recommendation form is not open.".to_string(),
                )))
            }
        };

        let mut form = RecommendationForm::new(prompt);
        form.coords = coords;
        form = match (photo, base_item) {
            (Some(photo), _) => form.with_photo(photo),
            (None, Some(item)) => form.with_base_item(item),
            (None, None) => form,
        };

        let outfits = self.outfits.clone();
        let selection = self.run(screen, async move { outfits.recommend(form).await }).await?;

        self.navigate(Route::OutfitResult { selection: selection.clone() });
        Ok(selection)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Wardrobe grid, when the wardrobe is on top
    pub fn wardrobe_view(&self) -> Option<WardrobeGrid> {
        let nav = self.nav.lock();
        match nav.current_route() {
            Route::Wardrobe { mode } => Some(WardrobeGrid::new(
                *mode,
                self.items.lock().as_deref(),
                self.requests.state(nav.current_key()),
            )),
            _ => None,
        }
    }

    /// Item detail, when it is on top
    pub fn item_detail_view(&self) -> Option<ItemDetailView> {
        let nav = self.nav.lock();
        match nav.current_route() {
            Route::ItemDetail { item } => {
                Some(ItemDetailView::new(item, self.requests.state(nav.current_key())))
            }
            _ => None,
        }
    }

    /// Recommendation form, when it is on top
    pub fn recommend_view(&self) -> Option<RecommendFormView> {
        let nav = self.nav.lock();
        match nav.current_route() {
            Route::Recommend { base_item } => Some(RecommendFormView::new(
                base_item.as_ref(),
                self.requests.state(nav.current_key()),
            )),
            _ => None,
        }
    }

    /// Outfit result, when it is on top
    pub fn outfit_view(&self) -> Option<OutfitResultView> {
        match self.nav.lock().current_route() {
            Route::OutfitResult { selection } => Some(OutfitResultView::new(selection)),
            _ => None,
        }
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn auth_screen(&self) -> Result<String> {
        let nav = self.nav.lock();
        if nav.kind() == StackKind::Auth {
            Ok(nav.current_key().to_string())
        } else {
            drop(nav);
            Err(self.report(AppError::ActionUnavailable("Already signed in.".to_string())))
        }
    }

    /// Run `fut` as the request of `screen`
    ///
    /// The result is dropped as [`AppError::Cancelled`] if the screen left
    /// the stack meanwhile. A rejected token is always reported.
    async fn run<T, F>(&self, screen: String, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let pending = self.requests.start(&screen, fut).map_err(AppError::from)?;
        let outcome = pending.wait().await;

        // Checked before following the session: a successful sign-in
        // replaces the very screen that asked for it.
        let screen_alive = self.nav.lock().contains_key(&screen);
        self.sync_navigation();

        let result = outcome.map_err(AppError::from).and_then(|result| result);

        match result {
            Err(err) if err.is_session_expired() => Err(self.report(err)),
            _ if !screen_alive => {
                tracing::debug!(screen = %screen, "dropping result for a closed screen");
                Err(AppError::Cancelled)
            }
            Err(err) => Err(self.report(err)),
            Ok(value) => Ok(value),
        }
    }

    /// Follow the session onto the right stack
    fn sync_navigation(&self) {
        let authenticated = self.session.is_authenticated();
        let switched = self.nav.lock().sync_session(authenticated);
        if switched {
            *self.items.lock() = None;
            self.prune_requests();
        }
    }

    /// Close the screen that made a request, even if others were pushed on
    /// top of it meanwhile
    fn close_screen(&self, key: &str) {
        let closed = self.nav.lock().close(key);
        if closed {
            self.prune_requests();
        }
    }

    /// Abort requests whose screens are gone
    fn prune_requests(&self) {
        let nav = self.nav.lock();
        self.requests.retain(|key| nav.contains_key(key));
    }

    /// Queue a notice for `err` and hand it back
    fn report(&self, err: AppError) -> AppError {
        if !matches!(err, AppError::Busy | AppError::Cancelled) {
            tracing::warn!(title = err.title(), error = %err, "action failed");
            self.notices.lock().push_back(Notice::from(&err));
        }
        err
    }
}

fn not_signed_in() -> AppError {
    AppError::ActionUnavailable("Please sign in first.".to_string())
}
