//! `RemoteSession` against a fake W3C endpoint served by axum

#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tactile::{
    ActionBuilder, By, InteractionError, RemoteSession, Session, SuiteConfig, WebElement,
    ELEMENT_KEY,
};

#[derive(Default)]
struct Recorded {
    session_requests: Vec<Value>,
    actions: Vec<Value>,
    released: usize,
    quit: bool,
}

type Shared = Arc<Mutex<Recorded>>;

async fn new_session(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.lock().unwrap().session_requests.push(body);
    Json(json!({
        "value": {
            "sessionId": "s1",
            "capabilities": { "browserName": "chrome", "browserVersion": "120" }
        }
    }))
}

async fn find_element(
    Path(_session): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["value"].as_str().unwrap_or_default().contains("missing") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "value": { "error": "no such element", "message": "Unable to locate element", "stacktrace": "" }
            })),
        );
    }
    (StatusCode::OK, Json(json!({ "value": { ELEMENT_KEY: "e1" } })))
}

async fn find_children(Path((_session, parent)): Path<(String, String)>) -> Json<Value> {
    Json(json!({
        "value": [
            { ELEMENT_KEY: format!("{parent}-li-1") },
            { ELEMENT_KEY: format!("{parent}-li-2") }
        ]
    }))
}

async fn property(Path((_session, element, name)): Path<(String, String, String)>) -> Json<Value> {
    Json(json!({ "value": format!("{element}.{name}") }))
}

async fn rect(Path((_session, _element)): Path<(String, String)>) -> Json<Value> {
    Json(json!({ "value": { "x": 20.0, "y": 20.0, "width": 300, "height": 200 } }))
}

async fn text(Path((_session, _element)): Path<(String, String)>) -> Json<Value> {
    Json(json!({ "value": "Nothing happened." }))
}

async fn execute(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "value": { "script": body["script"], "args": body["args"] } }))
}

async fn perform(
    State(state): State<Shared>,
    Path(_session): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["actions"][0]["id"] == "bad" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "value": { "error": "invalid argument", "message": "bad source" } })),
        );
    }
    state.lock().unwrap().actions.push(body);
    (StatusCode::OK, Json(json!({ "value": null })))
}

async fn release(State(state): State<Shared>, Path(_session): Path<String>) -> Json<Value> {
    state.lock().unwrap().released += 1;
    Json(json!({ "value": null }))
}

async fn quit(State(state): State<Shared>, Path(_session): Path<String>) -> Json<Value> {
    state.lock().unwrap().quit = true;
    Json(json!({ "value": null }))
}

async fn ok_null() -> Json<Value> {
    Json(json!({ "value": null }))
}

async fn start_fake_driver() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/session", post(new_session))
        .route("/session/{id}", delete(quit))
        .route("/session/{id}/url", post(ok_null))
        .route("/session/{id}/element", post(find_element))
        .route("/session/{id}/element/{el}/elements", post(find_children))
        .route("/session/{id}/element/{el}/click", post(ok_null))
        .route("/session/{id}/element/{el}/text", get(text))
        .route("/session/{id}/element/{el}/rect", get(rect))
        .route("/session/{id}/element/{el}/property/{name}", get(property))
        .route("/session/{id}/execute/sync", post(execute))
        .route("/session/{id}/actions", post(perform).delete(release))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

async fn connect(url: &str) -> RemoteSession {
    let config = SuiteConfig::default()
        .with_webdriver_url(url)
        .with_http_timeout(Duration::from_secs(5));
    RemoteSession::connect(&config).await.unwrap()
}

#[tokio::test]
async fn test_connect_sends_capabilities() {
    let (url, state) = start_fake_driver().await;
    let session = connect(&url).await;

    assert_eq!(session.session_id(), "s1");
    assert_eq!(session.browser_name(), "chrome");
    let recorded = state.lock().unwrap();
    let caps = &recorded.session_requests[0]["capabilities"]["alwaysMatch"];
    assert_eq!(caps["browserName"], "chrome");
    assert_eq!(caps["goog:chromeOptions"]["args"][0], "--headless=new");
}

#[tokio::test]
async fn test_element_commands() {
    let (url, _state) = start_fake_driver().await;
    let session = connect(&url).await;

    session.navigate("http://pages.test/formPage.html").await.unwrap();
    let element = session.find_element(&By::id("working")).await.unwrap();
    assert_eq!(element, WebElement::new("e1"));

    session.element_click(&element).await.unwrap();
    assert_eq!(
        session.element_property(&element, "value").await.unwrap(),
        json!("e1.value")
    );
    assert_eq!(session.element_text(&element).await.unwrap(), "Nothing happened.");

    let rect = session.element_rect(&element).await.unwrap();
    assert_eq!((rect.x, rect.width, rect.height), (20.0, 300.0, 200.0));

    let children = session
        .find_child_elements(&element, &By::tag("li"))
        .await
        .unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].id, "e1-li-2");
}

#[tokio::test]
async fn test_missing_element_maps_to_not_found() {
    let (url, _state) = start_fake_driver().await;
    let session = connect(&url).await;

    let err = session.find_element(&By::id("missing")).await.unwrap_err();
    assert!(err.is_no_such_element());
    assert!(!tactile::is_element_available(&session, "missing").await);
    assert!(tactile::is_element_available(&session, "draggable").await);
}

#[tokio::test]
async fn test_execute_script_passes_args() {
    let (url, _state) = start_fake_driver().await;
    let session = connect(&url).await;

    let value = session
        .execute_script("return arguments[0];", vec![json!(7)])
        .await
        .unwrap();
    assert_eq!(value["script"], "return arguments[0];");
    assert_eq!(value["args"], json!([7]));
}

#[tokio::test]
async fn test_perform_and_release_actions() {
    let (url, state) = start_fake_driver().await;
    let session = connect(&url).await;
    let target = WebElement::new("e1");

    let mut actions = ActionBuilder::new();
    actions.pointer_action().move_to(&target).click();
    actions.perform(&session).await.unwrap();
    actions.clear_actions(&session).await.unwrap();

    let recorded = state.lock().unwrap();
    let body = &recorded.actions[0];
    assert_eq!(body["actions"][0]["type"], "pointer");
    assert_eq!(body["actions"][0]["id"], "mouse");
    assert_eq!(
        body["actions"][0]["actions"][0]["origin"],
        json!({ ELEMENT_KEY: "e1" })
    );
    assert_eq!(body["actions"][0]["actions"][0]["duration"], 250);
    assert_eq!(recorded.released, 1);
}

#[tokio::test]
async fn test_rejected_actions_map_to_webdriver_error() {
    let (url, _state) = start_fake_driver().await;
    let session = connect(&url).await;

    let mut actions = ActionBuilder::new();
    actions
        .add_key_input("bad")
        .unwrap()
        .pause(Duration::ZERO);
    let err = actions.perform(&session).await.unwrap_err();
    match err {
        InteractionError::WebDriver { error, message } => {
            assert_eq!(error, "invalid argument");
            assert_eq!(message, "bad source");
        }
        other => panic!("expected webdriver error, got {other:?}"),
    }
    assert!(actions.is_empty());
}

#[tokio::test]
async fn test_quit_deletes_session() {
    let (url, state) = start_fake_driver().await;
    let session = connect(&url).await;
    session.quit().await.unwrap();
    assert!(state.lock().unwrap().quit);
}

#[tokio::test]
async fn test_connect_to_dead_endpoint_is_http_error() {
    let config = SuiteConfig::default()
        .with_webdriver_url("http://127.0.0.1:9")
        .with_http_timeout(Duration::from_secs(2));
    let err = RemoteSession::connect(&config).await.unwrap_err();
    assert!(matches!(err, InteractionError::Http { .. }));
}
