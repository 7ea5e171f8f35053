//! FitCheck backend operations
//!
//! [`WardrobeApi`] is the seam the rest of the app depends on; the services
//! hold it as `Arc<dyn WardrobeApi>` so tests can swap in a mock.
//! [`FitCheckClient`] is the production implementation over HTTP.
//!
//! # Example
//!
//! ```rust,no_run
//! use fitcheck_client::{ClientConfig, FitCheckClient, WardrobeApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FitCheckClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     let token = client.login("alice", "secret").await?;
//!     for item in client.list_items(&token).await? {
//!         println!("{}", item.display_label());
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::http::{ApiRequest, ApiResponse, ClientConfig, HttpClient};
use crate::types::{
    ImageRecommendation, ItemUpload, OutfitSelection, PromptRecommendation, WardrobeItem,
};
use crate::{ApiError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Operations offered by the FitCheck backend
#[async_trait]
pub trait WardrobeApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Create an account and return its bearer token
    async fn signup(&self, username: &str, password: &str) -> Result<String>;

    /// Fetch every wardrobe item for the token's user
    async fn list_items(&self, token: &str) -> Result<Vec<WardrobeItem>>;

    /// Upload a garment photo; returns the saved item when the backend echoes it
    async fn add_item(&self, token: &str, upload: ItemUpload) -> Result<Option<WardrobeItem>>;

    /// Remove the item identified by its image URL
    async fn delete_item(&self, token: &str, image_url: &str) -> Result<()>;

    /// Generate an outfit from a text prompt
    async fn recommend_from_prompt(
        &self,
        token: &str,
        request: PromptRecommendation,
    ) -> Result<OutfitSelection>;

    /// Generate an outfit around a new photo
    async fn recommend_from_image(
        &self,
        token: &str,
        request: ImageRecommendation,
    ) -> Result<OutfitSelection>;
}

// =============================================================================
// Wire Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsResponse {
    List(Vec<WardrobeItem>),
    Wrapped { items: Vec<WardrobeItem> },
}

impl ItemsResponse {
    fn into_items(self) -> Vec<WardrobeItem> {
        match self {
            ItemsResponse::List(items) | ItemsResponse::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddItemResponse {
    #[serde(default)]
    item: Option<WardrobeItem>,
}

#[derive(Debug, Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_image_url: Option<&'a str>,
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// HTTP client for the FitCheck backend
#[derive(Debug, Clone)]
pub struct FitCheckClient {
    http: HttpClient,
}

impl FitCheckClient {
    /// Create a client for the configured backend
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self { http: HttpClient::new(config)? })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn credentials(
        &self,
        path: &str,
        action: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let request = ApiRequest::post(path)
            .form_field("username", username)
            .form_field("password", password);

        let response = self.http.send(request).await?;

        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("{} failed (HTTP {})", action, response.status));
            tracing::warn!(path, status = response.status, "credentials rejected");
            return Err(ApiError::Auth(message));
        }

        response
            .json::<TokenResponse>()
            .ok()
            .and_then(|body| body.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::warn!(path, "response carried no access token");
                ApiError::Auth(format!("{} failed: no access token in response", action))
            })
    }

    /// Send an authenticated request, turning 401 into `SessionExpired`
    /// and other failures into `on_error`
    async fn authorized(
        &self,
        request: ApiRequest,
        token: &str,
        on_error: impl FnOnce(String) -> ApiError,
        fallback: &str,
    ) -> Result<ApiResponse> {
        let path = request.path.clone();
        let response = self.http.send(request.bearer(token)).await?;

        if response.is_unauthorized() {
            tracing::warn!(path = %path, "bearer token rejected");
            return Err(ApiError::SessionExpired);
        }

        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("{} (HTTP {})", fallback, response.status));
            tracing::warn!(path = %path, status = response.status, error = %message, "request failed");
            return Err(on_error(message));
        }

        Ok(response)
    }
}

/// Parse an outfit body; a 2xx answer may still carry `{"error": ...}`
fn parse_outfit(response: &ApiResponse) -> Result<OutfitSelection> {
    let value: serde_json::Value = response.json().map_err(|e| {
        ApiError::Recommendation(format!("Unexpected recommendation response: {}", e))
    })?;

    if value.get("selected_items").is_none() {
        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            return Err(ApiError::Recommendation(error.to_string()));
        }
    }

    serde_json::from_value(value).map_err(|e| {
        ApiError::Recommendation(format!("Unexpected recommendation response: {}", e))
    })
}

#[async_trait]
impl WardrobeApi for FitCheckClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        self.credentials("/token", "Login", username, password).await
    }

    async fn signup(&self, username: &str, password: &str) -> Result<String> {
        self.credentials("/signup", "Signup", username, password).await
    }

    async fn list_items(&self, token: &str) -> Result<Vec<WardrobeItem>> {
        let response = self
            .authorized(ApiRequest::get("/items"), token, ApiError::Items, "Failed to fetch items")
            .await?;

        response
            .json::<ItemsResponse>()
            .map(ItemsResponse::into_items)
            .map_err(|e| ApiError::Items(format!("Unexpected items response: {}", e)))
    }

    async fn add_item(&self, token: &str, upload: ItemUpload) -> Result<Option<WardrobeItem>> {
        let mut request = ApiRequest::post("/add-item")
            .file_part("file", upload.image)
            .text_part("name", upload.name);

        if let Some(gender) = upload.gender {
            request = request.text_part("gender", gender);
        }

        let response = self.authorized(request, token, ApiError::Upload, "Upload failed").await?;

        Ok(response.json::<AddItemResponse>().ok().and_then(|body| body.item))
    }

    async fn delete_item(&self, token: &str, image_url: &str) -> Result<()> {
        let request = ApiRequest::delete("/delete-item").text_part("image_url", image_url);
        self.authorized(request, token, ApiError::Delete, "Delete failed").await?;
        Ok(())
    }

    async fn recommend_from_prompt(
        &self,
        token: &str,
        request: PromptRecommendation,
    ) -> Result<OutfitSelection> {
        let body = PromptBody {
            prompt: &request.prompt,
            lat: request.coords.map(|c| c.lat),
            lon: request.coords.map(|c| c.lon),
            base_image_url: request.base_image_url.as_deref(),
        };

        let api_request = ApiRequest::post("/outfit/from-prompt")
            .json_body(&body)
            .map_err(|e| ApiError::Recommendation(e.to_string()))?;

        let response = self
            .authorized(api_request, token, ApiError::Recommendation, "Recommendation failed")
            .await?;

        parse_outfit(&response)
    }

    async fn recommend_from_image(
        &self,
        token: &str,
        request: ImageRecommendation,
    ) -> Result<OutfitSelection> {
        let mut api_request = ApiRequest::post("/outfit/from-image")
            .file_part("file", request.image)
            .text_part("prompt", request.prompt);

        if let Some(coords) = request.coords {
            api_request = api_request
                .text_part("lat", coords.lat.to_string())
                .text_part("lon", coords.lon.to_string());
        }

        let response = self
            .authorized(api_request, token, ApiError::Recommendation, "Recommendation failed")
            .await?;

        parse_outfit(&response)
    }
}
