//! Test helpers: a mockall backend and an app over an in-memory store

use crate::app::App;
use app_state::SessionStore;
use async_trait::async_trait;
use fitcheck_client::{
    ImageRecommendation, ItemUpload, OutfitSelection, PromptRecommendation, WardrobeApi,
    WardrobeItem,
};
use mockall::mock;
use std::sync::Arc;
use storage::KvStore;

pub const TOKEN: &str = "tok-123";

mock! {
    pub Api {}

    #[async_trait]
    impl WardrobeApi for Api {
        async fn login(&self, username: &str, password: &str) -> fitcheck_client::Result<String>;
        async fn signup(&self, username: &str, password: &str) -> fitcheck_client::Result<String>;
        async fn list_items(&self, token: &str) -> fitcheck_client::Result<Vec<WardrobeItem>>;
        async fn add_item(
            &self,
            token: &str,
            upload: ItemUpload,
        ) -> fitcheck_client::Result<Option<WardrobeItem>>;
        async fn delete_item(&self, token: &str, image_url: &str) -> fitcheck_client::Result<()>;
        async fn recommend_from_prompt(
            &self,
            token: &str,
            request: PromptRecommendation,
        ) -> fitcheck_client::Result<OutfitSelection>;
        async fn recommend_from_image(
            &self,
            token: &str,
            request: ImageRecommendation,
        ) -> fitcheck_client::Result<OutfitSelection>;
    }
}

/// App over `api`, with `token` already persisted when given
pub fn app_with(api: MockApi, token: Option<&str>) -> (App, SessionStore) {
    let store = SessionStore::new(KvStore::in_memory().unwrap());
    if let Some(token) = token {
        store.save(token).unwrap();
    }
    (App::new(Arc::new(api), store.clone()), store)
}
