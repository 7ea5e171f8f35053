//! User interface layer for FitCheck
//!
//! This crate provides the screen flow of the app, independent of any
//! rendering toolkit.
//!
//! # Modules
//!
//! - [`navigation`] - Routes, stacks and the login/main stack switch
//! - [`screens`] - View-models for each screen and modal notices
//! - [`app`] - The controller that screens call into
//!
//! # Example
//!
//! ```rust
//! use app_ui::{NavigationState, Route, StackKind, WardrobeMode};
//!
//! let mut nav = NavigationState::for_session(true);
//! assert_eq!(nav.kind(), StackKind::Main);
//!
//! nav.navigate(Route::Recommend { base_item: None });
//! nav.navigate(Route::Wardrobe { mode: WardrobeMode::Select });
//! assert_eq!(nav.stack().depth(), 3);
//!
//! // Signing out drops every screen
//! nav.sync_session(false);
//! assert_eq!(nav.current_route(), &Route::Login);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod navigation;
pub mod screens;

#[cfg(test)]
mod test_utils;

pub use app::App;

pub use navigation::{
    ItemChoice, NavigationStack, NavigationState, Route, StackEntry, StackKind, WardrobeMode,
};

pub use screens::{
    ItemDetailView, ItemTile, Notice, OutfitCard, OutfitResultView, RecommendFormView,
    WardrobeGrid, EMPTY_OUTFIT_MESSAGE, EMPTY_WARDROBE_MESSAGE, WARDROBE_NOT_LOADED_MESSAGE,
};
