//! Tests for the user CRUD handlers.

use std::sync::Arc;

use super::*;
use crate::Trace;
use crate::domain::ports::{MockUserRepository, UserPersistenceError, UserRepository};
use crate::domain::{DEFAULT_STORE_DEADLINE, USER_NOT_FOUND, UserDirectoryService};
use crate::inbound::http::routes::configure;
use crate::outbound::persistence::InMemoryUserRepository;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const UNKNOWN_ID: &str = "507f1f77bcf86cd799439011";

fn test_app(
    repository: Arc<dyn UserRepository>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = UserDirectoryService::new(repository, DEFAULT_STORE_DEADLINE);
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(service))))
        .wrap(Trace)
        .configure(configure)
}

#[fixture]
fn store() -> InMemoryUserRepository {
    InMemoryUserRepository::new()
}

fn ada() -> Value {
    json!({ "name": "Ada", "location": "London", "title": "Engineer" })
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn create_returns_the_stored_user(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store.clone()))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/user").set_json(ada()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "success");
    let id = body["data"]["id"].as_str().expect("id string");
    assert_eq!(id.len(), 24);
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["location"], "London");
    assert_eq!(body["data"]["title"], "Engineer");
    assert_eq!(store.len().await, 1);
}

#[rstest]
#[actix_web::test]
async fn create_ignores_a_client_supplied_id(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;
    let mut payload = ada();
    payload["id"] = json!(UNKNOWN_ID);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/user").set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["data"]["id"], UNKNOWN_ID);
}

#[rstest]
#[actix_web::test]
async fn create_reports_every_blank_or_missing_field(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store.clone()))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "  ", "location": "London" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "error");
    assert_eq!(
        body["error"],
        "name must not be empty; title must not be empty"
    );
    assert_eq!(body["details"]["fields"], json!(["name", "title"]));
    assert!(body.get("data").is_none());
    assert!(store.is_empty().await);
}

#[rstest]
#[case::not_json(actix_test::TestRequest::post()
    .uri("/user")
    .insert_header(("content-type", "application/json"))
    .set_payload("{not json"))]
#[case::wrong_type(actix_test::TestRequest::post()
    .uri("/user")
    .set_json(json!({ "name": 7, "location": "London", "title": "Engineer" })))]
#[case::wrong_content_type(actix_test::TestRequest::post()
    .uri("/user")
    .insert_header(("content-type", "text/plain"))
    .set_payload("name=Ada"))]
#[actix_web::test]
async fn unparseable_bodies_are_bad_requests(
    store: InMemoryUserRepository,
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(test_app(Arc::new(store.clone()))).await;

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "error");
    assert_eq!(body["details"]["code"], "malformed_body");
    assert!(body["traceId"].is_string());
    assert!(store.is_empty().await);
}

#[rstest]
#[case::fetch(actix_test::TestRequest::get().uri("/user/42"))]
#[case::update(actix_test::TestRequest::put().uri("/user/42").set_json(ada()))]
#[case::delete(actix_test::TestRequest::delete().uri("/user/42"))]
#[actix_web::test]
async fn malformed_ids_are_bad_requests(
    store: InMemoryUserRepository,
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "userId");
    assert_eq!(body["details"]["value"], "42");
}

#[rstest]
#[case::fetch(actix_test::TestRequest::get().uri(&format!("/user/{UNKNOWN_ID}")))]
#[case::update(actix_test::TestRequest::put()
    .uri(&format!("/user/{UNKNOWN_ID}"))
    .set_json(ada()))]
#[case::delete(actix_test::TestRequest::delete().uri(&format!("/user/{UNKNOWN_ID}")))]
#[actix_web::test]
async fn unknown_ids_are_not_found(
    store: InMemoryUserRepository,
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], USER_NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields_and_keeps_the_id(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/user").set_json(ada()),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let (status, body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/user/{id}"))
            .set_json(json!({ "name": "Ada", "location": "Paris", "title": "Engineer" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["location"], "Paris");
}

#[rstest]
#[actix_web::test]
async fn invalid_update_leaves_the_record_untouched(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/user").set_json(ada()),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_owned();

    let (status, _) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/user/{id}"))
            .set_json(json!({ "name": "Ada", "location": "", "title": "Engineer" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/user/{id}")),
    )
    .await;
    assert_eq!(fetched["data"]["location"], "London");
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_then_reports_not_found(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;
    let (_, created) = send(
        &app,
        actix_test::TestRequest::post().uri("/user").set_json(ada()),
    )
    .await;
    let uri = format!("/user/{}", created["data"]["id"].as_str().expect("id"));

    let (first_status, first_body) =
        send(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first_body["data"], USER_DELETED);

    let (second_status, second_body) =
        send(&app, actix_test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(second_status, StatusCode::NOT_FOUND);
    assert_eq!(second_body["error"], "User with specified ID not found!");
}

#[rstest]
#[actix_web::test]
async fn list_returns_an_empty_array_for_an_empty_store(store: InMemoryUserRepository) {
    let app = actix_test::init_service(test_app(Arc::new(store))).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/user")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn store_failures_surface_raw_text() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .return_once(|| Err(UserPersistenceError::query("cursor killed")));
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/user").to_request(),
    )
    .await;
    let header = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "user store query failed: cursor killed");
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}

#[rstest]
fn request_without_fields_fails_validation() {
    let err = UserProfile::try_from(UserRequest::default()).expect_err("all fields missing");
    assert_eq!(err.fields().len(), 3);
}
