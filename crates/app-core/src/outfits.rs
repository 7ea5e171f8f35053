//! Outfit recommendation service
//!
//! A recommendation is built around an optional base item. An existing
//! wardrobe item is referenced by its image URL; a new photo is uploaded
//! alongside the prompt and the backend also saves it to the wardrobe.

use crate::{require_token, settle, AppError, Result};
use app_state::SessionState;
use fitcheck_client::{
    Coords, ImageRecommendation, ImageUpload, OutfitSelection, PromptRecommendation, WardrobeApi,
    WardrobeItem,
};
use std::sync::Arc;

/// What the outfit is built around
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BaseItem {
    /// Let the stylist pick everything
    #[default]
    None,
    /// An item already in the wardrobe
    Wardrobe(WardrobeItem),
    /// A new photo
    Photo(ImageUpload),
}

/// Recommendation form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationForm {
    /// Occasion or requirements; required
    pub prompt: String,
    /// Base item
    pub base: BaseItem,
    /// Device location for weather
    pub coords: Option<Coords>,
}

impl RecommendationForm {
    /// Form with a prompt and no base item
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), ..Default::default() }
    }

    /// Build around a wardrobe item
    pub fn with_base_item(mut self, item: WardrobeItem) -> Self {
        self.base = BaseItem::Wardrobe(item);
        self
    }

    /// Build around a new photo
    pub fn with_photo(mut self, photo: ImageUpload) -> Self {
        self.base = BaseItem::Photo(photo);
        self
    }

    /// Attach device location
    pub fn with_coords(mut self, coords: Coords) -> Self {
        self.coords = Some(coords);
        self
    }
}

/// Outfit recommendation service
#[derive(Clone)]
pub struct OutfitService {
    api: Arc<dyn WardrobeApi>,
    session: SessionState,
}

impl OutfitService {
    /// Create a new outfit service
    pub fn new(api: Arc<dyn WardrobeApi>, session: SessionState) -> Self {
        Self { api, session }
    }

    /// Ask the backend for an outfit
    pub async fn recommend(&self, form: RecommendationForm) -> Result<OutfitSelection> {
        let prompt = form.prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::Validation("Please describe the occasion.".to_string()));
        }

        let token = require_token(&self.session)?;

        let result = match form.base {
            BaseItem::Photo(photo) => {
                if photo.is_empty() {
                    return Err(AppError::Validation("The selected photo is empty.".to_string()));
                }
                let mut request = ImageRecommendation::new(prompt, photo);
                request.coords = form.coords;
                self.api.recommend_from_image(&token, request).await
            }
            base => {
                let mut request = PromptRecommendation::new(prompt);
                request.coords = form.coords;
                if let BaseItem::Wardrobe(item) = base {
                    request = request.with_base_image_url(item.image_url);
                }
                self.api.recommend_from_prompt(&token, request).await
            }
        };

        let outfit = result.map_err(|e| settle(&self.session, e))?;
        tracing::debug!(items = outfit.selected_items.len(), "outfit received");
        Ok(outfit)
    }
}
