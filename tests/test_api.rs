use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bookmarks_api::api::{build_router, AppState};
use bookmarks_api::application::BookmarkServiceImpl;
use bookmarks_api::config::StorageKind;
use bookmarks_api::domain::bookmark::Bookmark;
use bookmarks_api::domain::repositories::repository::BookmarkRepository;
use bookmarks_api::infrastructure::di::ServiceContainer;
use bookmarks_api::infrastructure::repositories::memory::InMemoryBookmarkRepository;
use bookmarks_api::util::testing::{init_test_env, setup_test_db};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

fn make_bookmarks_array() -> Vec<Bookmark> {
    vec![
        Bookmark::from_storage(
            1,
            "First test post!".to_string(),
            "https://courses.thinkful.com/ei-node-postgres-v1/checkpoint/15".to_string(),
            Some("Lorem ipsum dolor sit amet, consectetur adipisicing elit.".to_string()),
            5,
        ),
        Bookmark::from_storage(
            2,
            "Second test post!".to_string(),
            "https://overview.thinkful.com/programs/web-development-full-time".to_string(),
            Some("Cum, exercitationem cupiditate dignissimos est perspiciatis.".to_string()),
            4,
        ),
        Bookmark::from_storage(
            3,
            "Third test post!".to_string(),
            "https://www.google.com/".to_string(),
            Some("Possimus, voluptate? Necessitatibus, reiciendis?".to_string()),
            3,
        ),
        Bookmark::from_storage(
            4,
            "Fourth test post!".to_string(),
            "http://tacocatdotcom.com/".to_string(),
            None,
            2,
        ),
    ]
}

fn malicious_bookmark() -> Bookmark {
    Bookmark::from_storage(
        911,
        r#"Naughty naughty very naughty <script>alert("xss");</script>"#.to_string(),
        "https://www.hackers.com".to_string(),
        Some(
            r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#
                .to_string(),
        ),
        1,
    )
}

fn app_with(bookmarks: Vec<Bookmark>, prefix: &str) -> Router {
    let _ = init_test_env();
    let repository = Arc::new(InMemoryBookmarkRepository::with_bookmarks(bookmarks));
    let service = Arc::new(BookmarkServiceImpl::new(repository));
    build_router(AppState::new(service), prefix)
}

fn app(bookmarks: Vec<Bookmark>) -> Router {
    app_with(bookmarks, "/api")
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn not_found_body() -> Value {
    json!({ "error": { "message": "Bookmark doesn't exist" } })
}

fn new_bookmark_body() -> Value {
    json!({
        "title": "Test new bookmark",
        "url": "https://www.test.com",
        "description": "Test new bookmark description...",
        "rating": 4
    })
}

#[tokio::test]
async fn given_no_bookmarks_when_list_then_200_and_empty_array() {
    let app = app(vec![]);

    let (status, _, body) = send(&app, Method::GET, "/api/bookmarks", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn given_bookmarks_when_list_then_200_and_all_bookmarks() {
    let bookmarks = make_bookmarks_array();
    let app = app(bookmarks.clone());

    let (status, _, body) = send(&app, Method::GET, "/api/bookmarks", None).await;

    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Bookmark> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed, bookmarks);
    assert_eq!(json_of(&body)[3]["description"], Value::Null);
}

#[rstest]
#[case::unknown("/api/bookmarks/123456")]
#[case::not_a_number("/api/bookmarks/abc")]
#[case::zero("/api/bookmarks/0")]
#[tokio::test]
async fn given_missing_bookmark_when_get_then_404(#[case] uri: &str) {
    let app = app(make_bookmarks_array());

    let (status, _, body) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body), not_found_body());
}

#[tokio::test]
async fn given_bookmarks_when_get_by_id_then_200_and_that_bookmark() {
    let bookmarks = make_bookmarks_array();
    let app = app(bookmarks.clone());

    let (status, _, body) = send(&app, Method::GET, "/api/bookmarks/2", None).await;

    assert_eq!(status, StatusCode::OK);
    let fetched: Bookmark = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, bookmarks[1]);
}

#[tokio::test]
async fn given_xss_bookmark_when_get_then_markup_sanitized() {
    // Arrange
    let app = app(vec![malicious_bookmark()]);

    // Act
    let (status, _, body) = send(&app, Method::GET, "/api/bookmarks/911", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let body = json_of(&body);
    assert_eq!(
        body["title"],
        r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#
    );
    assert_eq!(
        body["description"],
        r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#
    );
    assert_eq!(body["rating"], 1);
}

#[tokio::test]
async fn given_valid_body_when_post_then_201_with_location_and_bookmark() {
    // Arrange
    let app = app(vec![]);
    let new_bookmark = new_bookmark_body();

    // Act
    let (status, headers, body) =
        send(&app, Method::POST, "/api/bookmarks", Some(new_bookmark.clone())).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let created = json_of(&body);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], new_bookmark["title"]);
    assert_eq!(created["url"], new_bookmark["url"]);
    assert_eq!(created["description"], new_bookmark["description"]);
    assert_eq!(created["rating"], new_bookmark["rating"]);
    let location = headers.get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, format!("/api/bookmarks/{}", id));

    let (status, _, fetched) = send(&app, Method::GET, location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&fetched), created);
}

#[tokio::test]
async fn given_body_without_description_when_post_then_201_with_null_description() {
    let app = app(vec![]);
    let body = json!({ "title": "No description", "url": "https://nodesc.example", "rating": 0 });

    let (status, _, created) = send(&app, Method::POST, "/api/bookmarks", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let created = json_of(&created);
    assert_eq!(created["description"], Value::Null);
    assert_eq!(created["rating"], 0);
}

#[rstest]
#[case::title("title")]
#[case::url("url")]
#[case::rating("rating")]
#[tokio::test]
async fn given_body_missing_field_when_post_then_400_naming_field(#[case] field: &str) {
    let app = app(vec![]);
    let mut body = new_bookmark_body();
    body.as_object_mut().unwrap().remove(field);

    let (status, _, response) = send(&app, Method::POST, "/api/bookmarks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(&response),
        json!({ "error": { "message": format!("Missing '{}' in request body", field) } })
    );
}

#[tokio::test]
async fn given_malformed_json_when_post_then_400_and_nothing_stored() {
    let app = app(vec![]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bookmarks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let (_, _, listed) = send(&app, Method::GET, "/api/bookmarks", None).await;
    assert_eq!(json_of(&listed), json!([]));
}

#[tokio::test]
async fn given_bookmark_when_delete_then_204_and_gone() {
    // Arrange
    let bookmarks = make_bookmarks_array();
    let app = app(bookmarks.clone());

    // Act
    let (status, _, body) = send(&app, Method::DELETE, "/api/bookmarks/2", None).await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    let (_, _, listed) = send(&app, Method::GET, "/api/bookmarks", None).await;
    let listed: Vec<Bookmark> = serde_json::from_slice(&listed).unwrap();
    let expected: Vec<Bookmark> = bookmarks.into_iter().filter(|b| b.id != 2).collect();
    assert_eq!(listed, expected);

    let (status, _, body) = send(&app, Method::DELETE, "/api/bookmarks/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body), not_found_body());
}

#[tokio::test]
async fn given_missing_bookmark_when_patch_then_404() {
    let app = app(vec![]);

    let (status, _, body) = send(
        &app,
        Method::PATCH,
        "/api/bookmarks/123456",
        Some(json!({ "title": "updated" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body), not_found_body());
}

#[tokio::test]
async fn given_full_body_when_patch_then_204_and_all_fields_updated() {
    // Arrange
    let app = app(make_bookmarks_array());
    let update = json!({
        "title": "updated bookmark title",
        "url": "https://updated-url.com",
        "description": "updated bookmark description",
        "rating": 1
    });

    // Act
    let (status, _, body) = send(&app, Method::PATCH, "/api/bookmarks/2", Some(update)).await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    let (_, _, fetched) = send(&app, Method::GET, "/api/bookmarks/2", None).await;
    assert_eq!(
        json_of(&fetched),
        json!({
            "id": 2,
            "title": "updated bookmark title",
            "url": "https://updated-url.com",
            "description": "updated bookmark description",
            "rating": 1
        })
    );
}

#[tokio::test]
async fn given_irrelevant_fields_when_patch_then_400_must_contain_message() {
    let app = app(make_bookmarks_array());

    let (status, _, body) = send(
        &app,
        Method::PATCH,
        "/api/bookmarks/2",
        Some(json!({ "irrelevantField": "foo" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(&body),
        json!({ "error": { "message": "Request body must contain either 'title', 'description', 'rating', or 'url'" } })
    );
}

#[tokio::test]
async fn given_subset_of_fields_when_patch_then_only_those_updated() {
    // Arrange
    let bookmarks = make_bookmarks_array();
    let app = app(bookmarks.clone());

    // Act
    let (status, _, _) = send(
        &app,
        Method::PATCH,
        "/api/bookmarks/2",
        Some(json!({ "title": "updated bookmark title", "fieldToIgnore": "should not be in GET response" })),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, _, fetched) = send(&app, Method::GET, "/api/bookmarks/2", None).await;
    let fetched = json_of(&fetched);
    let mut expected = serde_json::to_value(&bookmarks[1]).unwrap();
    expected["title"] = json!("updated bookmark title");
    assert_eq!(fetched, expected);
    assert!(fetched.get("fieldToIgnore").is_none());
}

#[tokio::test]
async fn given_root_prefix_when_post_then_location_is_relative_to_collection() {
    let app = app_with(vec![], "");

    let (status, headers, body) =
        send(&app, Method::POST, "/bookmarks", Some(new_bookmark_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = json_of(&body)["id"].as_i64().unwrap();
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        format!("/bookmarks/{}", id)
    );
    let (status, _, _) = send(&app, Method::GET, "/api/bookmarks", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_running_app_when_health_then_ok() {
    let app = app(vec![]);

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["ok"], true);
}

#[tokio::test]
async fn given_running_app_when_openapi_requested_then_documents_bookmark_paths() {
    let app = app(vec![]);

    let (status, _, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let doc = json_of(&body);
    assert!(doc["paths"].get("/bookmarks").is_some());
    assert!(doc["paths"].get("/bookmarks/{id}").is_some());
    assert!(doc["components"]["schemas"].get("ErrorBody").is_some());
    assert_eq!(
        doc["paths"]["/bookmarks/{id}"]["get"]["responses"]["404"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorBody"
    );
    assert_eq!(doc["servers"][0]["url"], "/api");
}

#[tokio::test]
async fn given_sqlite_store_when_create_get_delete_get_then_201_200_204_404() {
    // Arrange
    let (_dir, repository) = setup_test_db();
    let repository = Arc::new(repository);
    let services = ServiceContainer::with_repository(repository.clone(), StorageKind::Sqlite);
    let app = build_router(AppState::from(&services), "/api");

    // Act + Assert
    let (status, headers, created) =
        send(&app, Method::POST, "/api/bookmarks", Some(new_bookmark_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let location = headers
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let (status, _, fetched) = send(&app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&fetched), json_of(&created));

    let (status, _, _) = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = send(&app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body), not_found_body());
    assert!(repository.list_all().await.unwrap().is_empty());
}
