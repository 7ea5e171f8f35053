//! Navigation system for FitCheck
//!
//! This module provides:
//! - Route definitions with their screen parameters
//! - Navigation stacks whose entries carry a unique screen key
//! - The two top-level stacks (login and main) chosen by session state
//! - Wardrobe browse/select modes

use fitcheck_client::{OutfitSelection, WardrobeItem};
use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// How the wardrobe screen reacts to a tap on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardrobeMode {
    /// Tap opens item detail; add and delete are offered
    #[default]
    Browse,
    /// Tap returns the item to the recommendation screen
    Select,
}

/// All possible routes in the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    // Login stack
    /// Sign-in form
    Login,
    /// Account creation form
    Signup,

    // Main stack
    /// Landing screen after sign-in
    Home,
    /// Wardrobe grid
    Wardrobe {
        /// Browse or select
        mode: WardrobeMode,
    },
    /// One wardrobe item
    ItemDetail {
        /// The item shown
        item: WardrobeItem,
    },
    /// Add-item form
    AddItem,
    /// Recommendation form
    Recommend {
        /// Wardrobe item the outfit is built around
        base_item: Option<WardrobeItem>,
    },
    /// Generated outfit
    OutfitResult {
        /// Backend answer
        selection: OutfitSelection,
    },
}

impl Route {
    /// The stack this route lives on
    pub fn stack_kind(&self) -> StackKind {
        match self {
            Route::Login | Route::Signup => StackKind::Auth,
            _ => StackKind::Main,
        }
    }

    /// Check if route requires authentication
    pub fn requires_auth(&self) -> bool {
        self.stack_kind() == StackKind::Main
    }

    /// Get the screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Signup => "Create Account",
            Route::Home => "FitCheck",
            Route::Wardrobe { mode: WardrobeMode::Browse } => "My Wardrobe",
            Route::Wardrobe { mode: WardrobeMode::Select } => "Choose a Base Item",
            Route::ItemDetail { .. } => "Item",
            Route::AddItem => "Add Item",
            Route::Recommend { .. } => "Get an Outfit",
            Route::OutfitResult { .. } => "Your Outfit",
        }
    }
}

/// Top-level stack, selected solely by whether a token is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackKind {
    /// Login and signup
    Auth,
    /// Everything behind sign-in
    Main,
}

impl StackKind {
    /// Stack for a session state
    pub fn for_session(authenticated: bool) -> Self {
        if authenticated {
            StackKind::Main
        } else {
            StackKind::Auth
        }
    }

    /// Root route of this stack
    pub fn root_route(&self) -> Route {
        match self {
            StackKind::Auth => Route::Login,
            StackKind::Main => Route::Home,
        }
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this screen instance
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Stack of screens above a fixed root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Root entry, never popped
    root: StackEntry,
    /// Entries above the root (bottom to top)
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self { root: StackEntry::new(root), above: Vec::new() }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.above.clear();
    }

    /// Replace the top route with a new screen instance
    pub fn replace(&mut self, route: Route) {
        match self.above.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// All entries, bottom to top
    pub fn entries(&self) -> impl Iterator<Item = &StackEntry> {
        std::iter::once(&self.root).chain(self.above.iter())
    }

    /// Find an entry by screen key
    pub fn entry(&self, key: &str) -> Option<&StackEntry> {
        self.entries().find(|e| e.key == key)
    }

    /// Pop entries until the one with `key` is on top
    ///
    /// Returns false, leaving the stack untouched, if no entry has `key`.
    pub fn pop_to_key(&mut self, key: &str) -> bool {
        if self.root.key == key {
            self.above.clear();
            return true;
        }

        match self.above.iter().position(|e| e.key == key) {
            Some(index) => {
                self.above.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    fn current_entry_mut(&mut self) -> &mut StackEntry {
        match self.above.last_mut() {
            Some(entry) => entry,
            None => &mut self.root,
        }
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Where a tap on a wardrobe item led
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChoice {
    /// Back on the recommendation screen with the item as base
    BaseSelected,
    /// Item detail pushed
    Detail,
}

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    kind: StackKind,
    stack: NavigationStack,
}

impl NavigationState {
    /// Navigation for the given session state
    pub fn for_session(authenticated: bool) -> Self {
        let kind = StackKind::for_session(authenticated);
        Self { kind, stack: NavigationStack::new(kind.root_route()) }
    }

    /// Switch stacks if the session state calls for it
    ///
    /// Switching resets the stack; no screen or parameter survives. Returns
    /// whether a switch happened.
    pub fn sync_session(&mut self, authenticated: bool) -> bool {
        let kind = StackKind::for_session(authenticated);
        if kind == self.kind {
            return false;
        }

        tracing::debug!(from = ?self.kind, to = ?kind, "switching navigation stack");
        *self = Self::for_session(authenticated);
        true
    }

    /// Active top-level stack
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// Active stack
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Get the current route
    pub fn current_route(&self) -> &Route {
        self.stack.current()
    }

    /// Key of the screen on top
    pub fn current_key(&self) -> &str {
        &self.stack.current_entry().key
    }

    /// Whether the screen with `key` is still on the stack
    pub fn contains_key(&self, key: &str) -> bool {
        self.stack.entry(key).is_some()
    }

    /// Push a route; routes of the other stack are refused
    pub fn navigate(&mut self, route: Route) -> bool {
        if route.stack_kind() != self.kind {
            tracing::debug!(route = route.title(), "refusing route from the other stack");
            return false;
        }
        self.stack.push(route);
        true
    }

    /// Replace the top screen; routes of the other stack are refused
    pub fn replace(&mut self, route: Route) -> bool {
        if route.stack_kind() != self.kind {
            return false;
        }
        self.stack.replace(route);
        true
    }

    /// Go back
    pub fn go_back(&mut self) -> bool {
        self.stack.pop()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.stack.can_go_back()
    }

    /// Close the screen with `key` along with everything above it
    ///
    /// Returns false if the screen is gone or is the stack root.
    pub fn close(&mut self, key: &str) -> bool {
        let is_root = self.stack.entries().next().is_some_and(|root| root.key == key);
        !is_root && self.stack.pop_to_key(key) && self.stack.pop()
    }

    /// Return to the stack root
    pub fn pop_to_root(&mut self) {
        self.stack.pop_to_root();
    }

    /// Handle a tap on a wardrobe item
    ///
    /// In select mode the stack pops back to the nearest recommendation
    /// screen, which keeps its key and receives the item as base. Item
    /// detail is never reached from select mode. Returns `None` when the
    /// wardrobe is not on top.
    pub fn choose_wardrobe_item(&mut self, item: WardrobeItem) -> Option<ItemChoice> {
        let mode = match self.current_route() {
            Route::Wardrobe { mode } => *mode,
            _ => return None,
        };

        match mode {
            WardrobeMode::Browse => {
                self.stack.push(Route::ItemDetail { item });
                Some(ItemChoice::Detail)
            }
            WardrobeMode::Select => {
                let recommend_key = self
                    .stack
                    .entries()
                    .filter(|e| matches!(e.route, Route::Recommend { .. }))
                    .last()
                    .map(|e| e.key.clone());

                match recommend_key {
                    Some(key) => {
                        self.stack.pop_to_key(&key);
                    }
                    None => self.stack.replace(Route::Recommend { base_item: None }),
                }

                if let Route::Recommend { base_item } = &mut self.stack.current_entry_mut().route {
                    *base_item = Some(item);
                }
                Some(ItemChoice::BaseSelected)
            }
        }
    }
}
