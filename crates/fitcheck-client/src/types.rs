//! Wire types shared with the FitCheck backend
//!
//! Every record here is owned by the server. The client never derives
//! anything from them beyond a display label and the note list split out of
//! an outfit's overall reason.

use serde::{Deserialize, Serialize};

/// Label used when an item has no name, color or category
pub const FALLBACK_LABEL: &str = "Item";

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build a display label: `name`, else `"{color} {category}"`, else `"Item"`.
///
/// Blank strings count as missing. When only one of color and category is
/// known, that one alone becomes the label.
pub fn display_label(
    name: &Option<String>,
    color: &Option<String>,
    category: &Option<String>,
) -> String {
    if let Some(name) = present(name) {
        return name.to_string();
    }

    let parts: Vec<&str> = [present(color), present(category)]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        parts.join(" ")
    }
}

// =============================================================================
// Wardrobe
// =============================================================================

/// A stored garment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Hosted image of the garment; doubles as the item's identity
    pub image_url: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Garment category (e.g., "shirt", "jeans")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Dominant color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Fabric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Surface texture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,

    /// Print or pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Formality level (e.g., "casual", "formal")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<String>,

    /// Intended wearer ("unisex" when unspecified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Seasons the garment suits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub season_tags: Vec<String>,

    /// Style descriptors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_tags: Vec<String>,

    /// Free-form stylist notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WardrobeItem {
    /// Create an item with only its image URL set
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            name: None,
            category: None,
            color: None,
            material: None,
            texture: None,
            pattern: None,
            formality: None,
            gender: None,
            season_tags: Vec::new(),
            style_tags: Vec::new(),
            notes: None,
        }
    }

    /// Label shown under the item's tile
    pub fn display_label(&self) -> String {
        display_label(&self.name, &self.color, &self.category)
    }

    /// Descriptive attributes that are present, in display order
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        [
            ("Category", &self.category),
            ("Color", &self.color),
            ("Material", &self.material),
            ("Texture", &self.texture),
            ("Pattern", &self.pattern),
            ("Formality", &self.formality),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|v| (label, v)))
        .collect()
    }
}

// =============================================================================
// Outfits
// =============================================================================

/// One wardrobe item picked for an outfit, with the stylist's reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    /// Image of the picked item
    pub image_url: String,

    /// Why the item was picked
    #[serde(default)]
    pub reason: String,

    /// Display name copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Category copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Color copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Material copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Texture copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,

    /// Pattern copied from the wardrobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl SelectedItem {
    /// Label shown on the outfit card
    pub fn display_label(&self) -> String {
        display_label(&self.name, &self.color, &self.category)
    }
}

/// A server-computed outfit for one recommendation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitSelection {
    /// Picked items, base item first when one was given
    #[serde(default)]
    pub selected_items: Vec<SelectedItem>,

    /// Stylist rationale for the whole outfit
    #[serde(default)]
    pub overall_reason: String,

    /// Today's weather in a sentence; empty without location
    #[serde(default)]
    pub weather_summary: String,

    /// Warning when the outfit fights the weather; empty when fine
    #[serde(default)]
    pub weather_warning: String,
}

impl OutfitSelection {
    /// Whether the backend picked nothing
    pub fn is_empty(&self) -> bool {
        self.selected_items.is_empty()
    }

    /// Split the overall reason into short notes
    ///
    /// Sentences and semicolon clauses become separate notes; each is
    /// trimmed and blanks are dropped.
    pub fn reason_notes(&self) -> Vec<String> {
        self.overall_reason
            .split(['.', ';'])
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Device location attached to a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coords {
    /// Create a coordinate pair
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// =============================================================================
// Request payloads
// =============================================================================

/// Image bytes ready for a multipart upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// File name sent with the part
    pub file_name: String,
    /// MIME type sent with the part
    pub mime_type: String,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("bytes", &self.bytes.len())
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

impl ImageUpload {
    /// A camera capture, uploaded as `photo.jpg`
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    /// An image file, with the MIME type taken from its extension
    pub fn named(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let mime_type = match extension.as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            "heic" => "image/heic",
            "gif" => "image/gif",
            _ => "image/jpeg",
        };

        Self { bytes, file_name, mime_type: mime_type.to_string() }
    }

    /// Whether there is anything to upload
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Payload for `POST /add-item`
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpload {
    /// Garment photo
    pub image: ImageUpload,
    /// Suggested name (may be empty; the backend names it)
    pub name: String,
    /// Intended wearer, omitted when unknown
    pub gender: Option<String>,
}

impl ItemUpload {
    /// Create an upload with a suggested name
    pub fn new(image: ImageUpload, name: impl Into<String>) -> Self {
        Self { image, name: name.into(), gender: None }
    }

    /// Set the intended wearer
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

/// Payload for `POST /outfit/from-prompt`
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecommendation {
    /// Occasion or requirements
    pub prompt: String,
    /// Device location for weather
    pub coords: Option<Coords>,
    /// Existing wardrobe item to build around
    pub base_image_url: Option<String>,
}

impl PromptRecommendation {
    /// Create a request from a prompt alone
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), coords: None, base_image_url: None }
    }

    /// Attach device location
    pub fn with_coords(mut self, coords: Coords) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Build around an existing wardrobe item
    pub fn with_base_image_url(mut self, url: impl Into<String>) -> Self {
        self.base_image_url = Some(url.into());
        self
    }
}

/// Payload for `POST /outfit/from-image`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecommendation {
    /// Occasion or requirements
    pub prompt: String,
    /// New base item photo; the backend also saves it to the wardrobe
    pub image: ImageUpload,
    /// Device location for weather
    pub coords: Option<Coords>,
}

impl ImageRecommendation {
    /// Create a request around a new photo
    pub fn new(prompt: impl Into<String>, image: ImageUpload) -> Self {
        Self { prompt: prompt.into(), image, coords: None }
    }

    /// Attach device location
    pub fn with_coords(mut self, coords: Coords) -> Self {
        self.coords = Some(coords);
        self
    }
}
