//! Screen view-models
//!
//! Each screen renders from one of these. They hold display-ready strings
//! and the availability of every action, so a front-end only draws them.

use app_core::AppError;
use app_state::RequestState;
use fitcheck_client::{OutfitSelection, SelectedItem, WardrobeItem};
use std::fmt;

use crate::navigation::WardrobeMode;

/// Shown on the wardrobe grid when nothing is stored yet
pub const EMPTY_WARDROBE_MESSAGE: &str = "Your wardrobe is empty. Add your first item!";

/// Shown on the wardrobe grid while its items could not be fetched
pub const WARDROBE_NOT_LOADED_MESSAGE: &str = "Your wardrobe could not be loaded.";

/// Shown on the result screen when the backend picked nothing
pub const EMPTY_OUTFIT_MESSAGE: &str =
    "No outfit could be put together. Try adding more items to your wardrobe.";

// =============================================================================
// Notices
// =============================================================================

/// Modal notice with a title and the raw error message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Notice title
    pub title: String,
    /// Message as received
    pub message: String,
}

impl Notice {
    /// Create a notice
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Self::new(err.title(), err.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

// =============================================================================
// Wardrobe
// =============================================================================

/// One cell of the wardrobe grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTile {
    /// Image to show
    pub image_url: String,
    /// Caption
    pub label: String,
}

/// Wardrobe grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardrobeGrid {
    /// Browse or select
    pub mode: WardrobeMode,
    /// Tiles in backend order
    pub tiles: Vec<ItemTile>,
    /// Whether the add button is shown
    pub can_add: bool,
    /// Whether items can be deleted from here
    pub can_delete: bool,
    /// Whether a load is in flight
    pub is_loading: bool,
    /// Whether the items came back from the backend
    pub is_loaded: bool,
}

impl WardrobeGrid {
    /// Build the grid for a mode; `items` is `None` until a load succeeds
    pub fn new(mode: WardrobeMode, items: Option<&[WardrobeItem]>, request: RequestState) -> Self {
        let browsing = mode == WardrobeMode::Browse;
        Self {
            mode,
            tiles: items
                .unwrap_or_default()
                .iter()
                .map(|item| ItemTile { image_url: item.image_url.clone(), label: item.display_label() })
                .collect(),
            can_add: browsing,
            can_delete: browsing,
            is_loading: request == RequestState::Pending,
            is_loaded: items.is_some(),
        }
    }

    /// Message for an empty, loaded grid
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.tiles.is_empty() && self.is_loaded && !self.is_loading)
            .then_some(EMPTY_WARDROBE_MESSAGE)
    }
}

impl fmt::Display for WardrobeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_loaded {
            return writeln!(f, "{}", WARDROBE_NOT_LOADED_MESSAGE);
        }
        if let Some(message) = self.empty_message() {
            return writeln!(f, "{}", message);
        }
        for tile in &self.tiles {
            writeln!(f, "{}  {}", tile.label, tile.image_url)?;
        }
        Ok(())
    }
}

/// Item detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetailView {
    /// Image to show
    pub image_url: String,
    /// Heading
    pub title: String,
    /// Labelled attributes that are present
    pub attributes: Vec<(String, String)>,
    /// Season and style tags
    pub tags: Vec<String>,
    /// Stylist notes
    pub notes: Option<String>,
    /// Whether the delete button is enabled
    pub can_delete: bool,
}

impl ItemDetailView {
    /// Build the detail view
    pub fn new(item: &WardrobeItem, request: RequestState) -> Self {
        Self {
            image_url: item.image_url.clone(),
            title: item.display_label(),
            attributes: item
                .attributes()
                .into_iter()
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect(),
            tags: item.season_tags.iter().chain(&item.style_tags).cloned().collect(),
            notes: item.notes.clone().filter(|n| !n.trim().is_empty()),
            can_delete: request == RequestState::Idle,
        }
    }
}

impl fmt::Display for ItemDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.image_url)?;
        for (label, value) in &self.attributes {
            writeln!(f, "  {}: {}", label, value)?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "  Tags: {}", self.tags.join(", "))?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "  Notes: {}", notes)?;
        }
        Ok(())
    }
}

// =============================================================================
// Recommendations
// =============================================================================

/// Recommendation form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendFormView {
    /// Label of the chosen base item
    pub base_label: Option<String>,
    /// Image of the chosen base item
    pub base_image_url: Option<String>,
    /// Whether the submit button is enabled
    pub submit_enabled: bool,
}

impl RecommendFormView {
    /// Build the form
    pub fn new(base_item: Option<&WardrobeItem>, request: RequestState) -> Self {
        Self {
            base_label: base_item.map(WardrobeItem::display_label),
            base_image_url: base_item.map(|item| item.image_url.clone()),
            submit_enabled: request == RequestState::Idle,
        }
    }
}

/// One picked item on the result screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitCard {
    /// Image to show
    pub image_url: String,
    /// Caption
    pub label: String,
    /// Why it was picked
    pub reason: String,
    /// Material, texture and pattern that are present
    pub details: Vec<String>,
}

impl From<&SelectedItem> for OutfitCard {
    fn from(item: &SelectedItem) -> Self {
        Self {
            image_url: item.image_url.clone(),
            label: item.display_label(),
            reason: item.reason.trim().to_string(),
            details: [&item.material, &item.texture, &item.pattern]
                .into_iter()
                .filter_map(|value| value.as_deref().map(str::trim))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Outfit result screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitResultView {
    /// Picked items
    pub cards: Vec<OutfitCard>,
    /// Overall reason split into notes
    pub notes: Vec<String>,
    /// Weather sentence, when known
    pub weather_summary: Option<String>,
    /// Weather warning, when there is one
    pub weather_warning: Option<String>,
    /// Shown instead of cards when nothing was picked
    pub empty_message: Option<&'static str>,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl OutfitResultView {
    /// Build the result screen
    pub fn new(selection: &OutfitSelection) -> Self {
        Self {
            cards: selection.selected_items.iter().map(OutfitCard::from).collect(),
            notes: selection.reason_notes(),
            weather_summary: non_blank(&selection.weather_summary),
            weather_warning: non_blank(&selection.weather_warning),
            empty_message: selection.is_empty().then_some(EMPTY_OUTFIT_MESSAGE),
        }
    }
}

impl fmt::Display for OutfitResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(summary) = &self.weather_summary {
            writeln!(f, "Weather: {}", summary)?;
        }
        if let Some(warning) = &self.weather_warning {
            writeln!(f, "Warning: {}", warning)?;
        }

        match self.empty_message {
            Some(message) => writeln!(f, "{}", message)?,
            None => {
                for card in &self.cards {
                    writeln!(f, "- {}  {}", card.label, card.image_url)?;
                    if !card.reason.is_empty() {
                        writeln!(f, "    {}", card.reason)?;
                    }
                    if !card.details.is_empty() {
                        writeln!(f, "    ({})", card.details.join(", "))?;
                    }
                }
            }
        }

        for note in &self.notes {
            writeln!(f, "* {}", note)?;
        }
        Ok(())
    }
}
