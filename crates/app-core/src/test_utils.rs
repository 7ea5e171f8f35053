//! Test helpers: a mockall backend and ready-made sessions

use app_state::{SessionState, SessionStore};
use async_trait::async_trait;
use fitcheck_client::{
    ImageRecommendation, ItemUpload, OutfitSelection, PromptRecommendation, WardrobeApi,
    WardrobeItem,
};
use mockall::mock;
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

/// Fresh unauthenticated session over an in-memory store
pub fn signed_out() -> SessionState {
    SessionState::new(SessionStore::new(KvStore::in_memory().unwrap()))
}

/// Session already holding [`TOKEN`]
pub fn signed_in() -> SessionState {
    let session = signed_out();
    session.sign_in(TOKEN).unwrap();
    session
}
