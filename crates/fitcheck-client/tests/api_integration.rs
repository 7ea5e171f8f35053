//! Integration tests for the FitCheck client
//!
//! These tests run the client against a wiremock backend and check the
//! request shapes and the mapping of every failure onto `ApiError`.

use fitcheck_client::{
    ApiError, ClientConfig, Coords, FitCheckClient, ImageRecommendation, ImageUpload, ItemUpload,
    PromptRecommendation, WardrobeApi,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "tok-123";

async fn client_for(server: &MockServer) -> FitCheckClient {
    FitCheckClient::new(ClientConfig::new(server.uri())).unwrap()
}

fn outfit_body() -> serde_json::Value {
    json!({
        "selected_items": [
            {"image_url": "https://cdn.example.com/tee.png", "reason": "Light and airy.", "name": "White Tee"},
            {"image_url": "https://cdn.example.com/shorts.png", "reason": "Keeps it casual.", "color": "khaki", "category": "shorts"}
        ],
        "overall_reason": "Great for warm weather. Breathable fabric; casual fit.",
        "weather_summary": "Sunny, 28°C.",
        "weather_warning": ""
    })
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_login_sends_form_and_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": TOKEN})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let token = client.login("alice", "secret").await.unwrap();
    assert_eq!(token, TOKEN);
}

#[tokio::test]
async fn test_login_invalid_credentials_uses_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.login("alice", "wrong").await {
        Err(ApiError::Auth(message)) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_without_token_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.login("alice", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)));
    assert!(err.to_string().contains("no access token"));
}

#[tokio::test]
async fn test_signup_existing_username() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Username exists"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.signup("alice", "secret").await {
        Err(ApiError::Auth(message)) => assert_eq!(message, "Username exists"),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_signup_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new-tok"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.signup("bob", "pw").await.unwrap(), "new-tok");
}

// =============================================================================
// Wardrobe
// =============================================================================

#[tokio::test]
async fn test_list_items_sends_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"image_url": "https://cdn.example.com/a.png", "name": "Denim Jacket"},
            {"image_url": "https://cdn.example.com/b.png", "color": "blue", "category": "shirt"},
            {"image_url": "https://cdn.example.com/c.png", "name": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items = client.list_items(TOKEN).await.unwrap();

    let labels: Vec<String> = items.iter().map(|i| i.display_label()).collect();
    assert_eq!(labels, vec!["Denim Jacket", "blue shirt", "Item"]);
}

#[tokio::test]
async fn test_list_items_wrapped_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"image_url": "https://cdn.example.com/a.png"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.list_items(TOKEN).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_items_unauthorized_is_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_items(TOKEN).await.unwrap_err();
    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_list_items_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.list_items(TOKEN).await {
        Err(ApiError::Items(message)) => assert!(message.contains("503")),
        other => panic!("expected items error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_item_uploads_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add-item"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"photo.jpg\""))
        .and(body_string_contains("name=\"gender\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "saved",
            "item": {"image_url": "https://cdn.example.com/new.png", "name": "Linen Shirt"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let upload = ItemUpload::new(ImageUpload::jpeg(vec![0xFF, 0xD8, 0xFF]), "Linen Shirt")
        .with_gender("female");

    let item = client.add_item(TOKEN, upload).await.unwrap().unwrap();
    assert_eq!(item.image_url, "https://cdn.example.com/new.png");
}

#[tokio::test]
async fn test_add_item_without_echo() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add-item"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let upload = ItemUpload::new(ImageUpload::jpeg(vec![1, 2, 3]), "");
    assert_eq!(client.add_item(TOKEN, upload).await.unwrap(), None);
}

#[tokio::test]
async fn test_add_item_error_message_from_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add-item"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Image too large"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let upload = ItemUpload::new(ImageUpload::jpeg(vec![1]), "Tee");
    match client.add_item(TOKEN, upload).await {
        Err(ApiError::Upload(message)) => assert_eq!(message, "Image too large"),
        other => panic!("expected upload error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_item_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add-item"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let upload = ItemUpload::new(ImageUpload::jpeg(vec![1]), "Tee");
    let err = client.add_item(TOKEN, upload).await.unwrap_err();
    assert_eq!(err.to_string(), "Upload failed (HTTP 502)");
}

#[tokio::test]
async fn test_delete_item() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/delete-item"))
        .and(body_string_contains("name=\"image_url\""))
        .and(body_string_contains("https://cdn.example.com/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_item(TOKEN, "https://cdn.example.com/a.png").await.unwrap();
}

#[tokio::test]
async fn test_delete_item_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/delete-item"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Item not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.delete_item(TOKEN, "https://cdn.example.com/gone.png").await {
        Err(ApiError::Delete(message)) => assert_eq!(message, "Item not found"),
        other => panic!("expected delete error, got {:?}", other),
    }
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_recommend_from_prompt_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-prompt"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "prompt": "beach day",
            "lat": 40.5,
            "lon": -3.25,
            "base_image_url": "https://cdn.example.com/tee.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(outfit_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = PromptRecommendation::new("beach day")
        .with_coords(Coords::new(40.5, -3.25))
        .with_base_image_url("https://cdn.example.com/tee.png");

    let outfit = client.recommend_from_prompt(TOKEN, request).await.unwrap();
    assert_eq!(outfit.selected_items.len(), 2);
    assert_eq!(outfit.selected_items[1].display_label(), "khaki shorts");
    assert_eq!(outfit.reason_notes().len(), 3);
    assert_eq!(outfit.weather_summary, "Sunny, 28°C.");
}

#[tokio::test]
async fn test_recommend_from_prompt_minimal_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-prompt"))
        .and(body_json(json!({"prompt": "office"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "selected_items": [],
            "overall_reason": "No wardrobe items found."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outfit = client
        .recommend_from_prompt(TOKEN, PromptRecommendation::new("office"))
        .await
        .unwrap();
    assert!(outfit.is_empty());
    assert_eq!(outfit.weather_warning, "");
}

#[tokio::test]
async fn test_recommend_from_prompt_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-prompt"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Model overloaded"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.recommend_from_prompt(TOKEN, PromptRecommendation::new("x")).await {
        Err(ApiError::Recommendation(message)) => assert_eq!(message, "Model overloaded"),
        other => panic!("expected recommendation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_recommend_from_prompt_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-prompt"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .recommend_from_prompt(TOKEN, PromptRecommendation::new("x"))
        .await
        .unwrap_err();
    assert!(err.is_session_expired());
}

#[tokio::test]
async fn test_recommend_from_image_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-image"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("name=\"prompt\""))
        .and(body_string_contains("date night"))
        .and(body_string_contains("name=\"lat\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(outfit_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = ImageRecommendation::new("date night", ImageUpload::named(vec![1, 2], "top.png"))
        .with_coords(Coords::new(51.5, -0.12));

    let outfit = client.recommend_from_image(TOKEN, request).await.unwrap();
    assert_eq!(outfit.selected_items[0].display_label(), "White Tee");
}

#[tokio::test]
async fn test_recommend_from_image_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-image"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = ImageRecommendation::new("x", ImageUpload::jpeg(vec![1]));
    let err = client.recommend_from_image(TOKEN, request).await.unwrap_err();
    assert_eq!(err.to_string(), "Recommendation failed (HTTP 500)");
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_add_item_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/add-item"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let upload = ItemUpload::new(ImageUpload::jpeg(vec![1, 2, 3]), "Scarf");
    assert!(matches!(client.add_item(TOKEN, upload).await, Err(ApiError::SessionExpired)));
}

#[tokio::test]
async fn test_delete_item_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/delete-item"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.delete_item(TOKEN, "https://cdn.example.com/a.png").await;
    assert!(matches!(result, Err(ApiError::SessionExpired)));
}

#[tokio::test]
async fn test_recommend_from_image_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/outfit/from-image"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = ImageRecommendation::new("brunch", ImageUpload::named(vec![1, 2], "top.png"));
    assert!(client.recommend_from_image(TOKEN, request).await.unwrap_err().is_session_expired());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = FitCheckClient::new(ClientConfig::new(uri)).unwrap();
    let err = client.login("alice", "secret").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
