//! Test fixtures for FitCheck wire types

use crate::types::{OutfitSelection, SelectedItem, WardrobeItem};

/// Wardrobe item fixtures
pub mod items {
    use super::*;

    /// Item with a name
    pub fn named_jacket() -> WardrobeItem {
        WardrobeItem {
            name: Some("Denim Jacket".to_string()),
            category: Some("jacket".to_string()),
            color: Some("blue".to_string()),
            material: Some("denim".to_string()),
            ..WardrobeItem::new("https://cdn.example.com/jacket.png")
        }
    }

    /// Unnamed item that still has color and category
    pub fn blue_shirt() -> WardrobeItem {
        WardrobeItem {
            category: Some("shirt".to_string()),
            color: Some("blue".to_string()),
            ..WardrobeItem::new("https://cdn.example.com/shirt.png")
        }
    }

    /// Item with nothing but an image
    pub fn bare() -> WardrobeItem {
        WardrobeItem::new("https://cdn.example.com/bare.png")
    }
}

/// Outfit fixtures
pub mod outfits {
    use super::*;

    fn pick(url: &str, reason: &str) -> SelectedItem {
        SelectedItem {
            image_url: url.to_string(),
            reason: reason.to_string(),
            name: None,
            category: None,
            color: None,
            material: None,
            texture: None,
            pattern: None,
        }
    }

    /// Top, bottom and an item the wardrobe no longer knows about
    pub fn three_piece() -> OutfitSelection {
        let mut top = pick("https://cdn.example.com/tee.png", "Clean base layer.");
        top.name = Some("White Tee".to_string());

        let mut bottom = pick("https://cdn.example.com/jeans.png", "Grounds the look.");
        bottom.color = Some("black".to_string());
        bottom.category = Some("jeans".to_string());

        OutfitSelection {
            selected_items: vec![
                top,
                bottom,
                pick("https://cdn.example.com/unknown.png", "Adds contrast."),
            ],
            overall_reason: "Relaxed and balanced. Neutral palette.".to_string(),
            weather_summary: "Sunny, 24°C.".to_string(),
            weather_warning: String::new(),
        }
    }
}
