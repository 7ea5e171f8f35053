//! Wardrobe service
//!
//! Listing, adding and deleting garments. Every call carries the session
//! token; a rejected token signs the session out before the error returns.

use crate::{require_token, settle, AppError, Result};
use app_state::SessionState;
use fitcheck_client::{ImageUpload, ItemUpload, WardrobeApi, WardrobeItem};
use std::sync::Arc;

/// Add-item form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    /// Garment photo; required
    pub photo: Option<ImageUpload>,
    /// Suggested name; optional
    pub name: String,
    /// Intended wearer; optional
    pub gender: Option<String>,
}

impl NewItem {
    /// Form with a photo and no name
    pub fn with_photo(photo: ImageUpload) -> Self {
        Self { photo: Some(photo), ..Default::default() }
    }

    /// Set the suggested name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the intended wearer
    pub fn for_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    fn into_upload(self) -> Result<ItemUpload> {
        let photo = self
            .photo
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("Please choose a photo first.".to_string()))?;

        let mut upload = ItemUpload::new(photo, self.name.trim());
        if let Some(gender) = self.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            upload = upload.with_gender(gender);
        }
        Ok(upload)
    }
}

/// Wardrobe service
#[derive(Clone)]
pub struct WardrobeService {
    api: Arc<dyn WardrobeApi>,
    session: SessionState,
}

impl WardrobeService {
    /// Create a new wardrobe service
    pub fn new(api: Arc<dyn WardrobeApi>, session: SessionState) -> Self {
        Self { api, session }
    }

    /// Fetch every item
    pub async fn list(&self) -> Result<Vec<WardrobeItem>> {
        let token = require_token(&self.session)?;
        self.api.list_items(&token).await.map_err(|e| settle(&self.session, e))
    }

    /// Upload a new item
    pub async fn add(&self, item: NewItem) -> Result<Option<WardrobeItem>> {
        let upload = item.into_upload()?;
        let token = require_token(&self.session)?;

        let saved = self
            .api
            .add_item(&token, upload)
            .await
            .map_err(|e| settle(&self.session, e))?;

        tracing::debug!(echoed = saved.is_some(), "item added");
        Ok(saved)
    }

    /// Delete the item with this image URL
    pub async fn delete(&self, image_url: &str) -> Result<()> {
        if image_url.trim().is_empty() {
            return Err(AppError::Validation("No item selected.".to_string()));
        }

        let token = require_token(&self.session)?;
        self.api
            .delete_item(&token, image_url)
            .await
            .map_err(|e| settle(&self.session, e))
    }
}
