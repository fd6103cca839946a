//! HTTP search client and search session tests against an in-process API.
//!
//! An axum router stands in for the title-search API: it checks Basic
//! credentials, records every query string, and answers with canned bodies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::watch;

use movielookup_core::{
    ApiConfig, CredentialProvider, CredentialStore, Credentials, DisplayStatus, HttpSearchClient,
    MemoryCredentialStore, PageRequest, QueryParameters, ResultSnapshot, SearchClient,
    SearchController, SearchError, SearchSession, Settlement, TitleType, TokioScheduler,
    ViewportPosition, ViewportSignal,
};

/// base64("user:pass")
const EXPECTED_AUTH: &str = "Basic dXNlcjpwYXNz";

#[derive(Debug, Clone)]
struct RecordedRequest {
    query: HashMap<String, String>,
    authorization: Option<String>,
}

#[derive(Clone, Default)]
struct ApiState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ApiState {
    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn batman_item(page: u32) -> serde_json::Value {
    json!({
        "Title": format!("Batman {}", page),
        "Year": "1989",
        "imdbID": format!("tt{}", page),
        "Poster": format!("p{}", page)
    })
}

async fn search(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(RecordedRequest {
        query: query.clone(),
        authorization: authorization.clone(),
    });

    if authorization.as_deref() != Some(EXPECTED_AUTH) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    match query.get("t").map(String::as_str) {
        Some("batman") => Json(json!({
            "Search": [batman_item(page)],
            "totalResults": "60",
            "Response": "True"
        }))
        .into_response(),
        Some("short") => Json(json!({
            "Search": [batman_item(page)],
            "totalResults": "11",
            "Response": "True"
        }))
        .into_response(),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        Some("garbage") => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => Json(json!({ "Response": "False", "Error": "Movie not found!" })).into_response(),
    }
}

async fn spawn_api() -> (String, ApiState) {
    let state = ApiState::default();
    let app = Router::new()
        .route("/api/search", get(search))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn client(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Arc<HttpSearchClient> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    Arc::new(HttpSearchClient::new(&config, credentials).unwrap())
}

fn signed_in() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
        "user", "pass",
    )))
}

async fn wait_for(
    rx: &mut watch::Receiver<ResultSnapshot>,
    done: impl Fn(&ResultSnapshot) -> bool,
) -> ResultSnapshot {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if done(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("controller dropped");
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

#[tokio::test]
async fn test_request_carries_parameters_and_basic_auth() {
    let (base_url, api) = spawn_api().await;
    let client = client(&base_url, signed_in());

    let params = QueryParameters::new("batman")
        .with_year("1989".parse().unwrap())
        .with_title_type(TitleType::Series);
    client.fetch_page(&PageRequest::new(params, 3)).await.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let query = &requests[0].query;
    assert_eq!(query["t"], "batman");
    assert_eq!(query["y"], "1989");
    assert_eq!(query["type"], "series");
    assert_eq!(query["page"], "3");
    assert_eq!(requests[0].authorization.as_deref(), Some(EXPECTED_AUTH));
}

#[tokio::test]
async fn test_year_is_sent_empty_when_unset() {
    let (base_url, api) = spawn_api().await;
    let client = client(&base_url, signed_in());

    client
        .fetch_page(&PageRequest::new(QueryParameters::new("batman"), 1))
        .await
        .unwrap();

    let query = &api.requests()[0].query;
    assert_eq!(query.get("y").map(String::as_str), Some(""));
    assert_eq!(query["type"], "movie");
}

#[tokio::test]
async fn test_batman_scenario_sets_next_page() {
    let (base_url, _api) = spawn_api().await;
    let controller = SearchController::new(client(&base_url, signed_in()));

    let settlement = controller.fresh_search(QueryParameters::new("batman")).await;

    assert_eq!(settlement, Settlement::Applied);
    let state = controller.state();
    assert_eq!(state.movies.len(), 1);
    assert_eq!(state.movies[0].id, "tt1");
    assert_eq!(state.movies[0].title, "Batman 1");
    assert_eq!(state.movies[0].year, "1989");
    assert_eq!(state.movies[0].poster_url, "p1");
    assert_eq!(state.next_page, Some(2));
    assert!(state.error.is_empty());
}

#[tokio::test]
async fn test_not_found_is_empty_result_not_error() {
    let (base_url, _api) = spawn_api().await;
    let controller = SearchController::new(client(&base_url, signed_in()));

    let settlement = controller
        .fresh_search(QueryParameters::new("qwertyuiop"))
        .await;

    assert_eq!(settlement, Settlement::Applied);
    let snapshot = controller.snapshot();
    assert!(snapshot.movies.is_empty());
    assert!(snapshot.error.is_empty());
    assert_eq!(snapshot.status(), DisplayStatus::NothingFound);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let (base_url, _api) = spawn_api().await;
    let client = client(&base_url, signed_in());

    let result = client
        .fetch_page(&PageRequest::new(QueryParameters::new("boom"), 1))
        .await;

    match result {
        Err(SearchError::HttpStatus { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_is_parse_error() {
    let (base_url, _api) = spawn_api().await;
    let client = client(&base_url, signed_in());

    let result = client
        .fetch_page(&PageRequest::new(QueryParameters::new("garbage"), 1))
        .await;
    assert!(matches!(result, Err(SearchError::ParseError(_))));
}

#[tokio::test]
async fn test_wrong_credentials_are_rejected() {
    let (base_url, _api) = spawn_api().await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
        "user", "wrong",
    )));
    let client = client(&base_url, store);

    let result = client
        .fetch_page(&PageRequest::new(QueryParameters::new("batman"), 1))
        .await;
    assert!(matches!(
        result,
        Err(SearchError::HttpStatus { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_credentials_are_read_on_every_request() {
    let (base_url, api) = spawn_api().await;
    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
        "user", "wrong",
    )));
    let client = client(&base_url, store.clone());
    let request = PageRequest::new(QueryParameters::new("batman"), 1);

    assert!(client.fetch_page(&request).await.is_err());

    store.save(&Credentials::new("user", "pass")).await.unwrap();
    assert!(client.fetch_page(&request).await.is_ok());
    assert_eq!(api.requests().len(), 2);
}

#[tokio::test]
async fn test_connection_error_keeps_movies_and_sets_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let controller = SearchController::new(client(&format!("http://{}", addr), signed_in()));
    let settlement = controller.fresh_search(QueryParameters::new("batman")).await;

    assert_eq!(settlement, Settlement::Failed);
    let snapshot = controller.snapshot();
    assert!(snapshot.movies.is_empty());
    assert!(!snapshot.error.is_empty());
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_session_types_then_scrolls_for_more() {
    let (base_url, api) = spawn_api().await;
    let viewport = ViewportSignal::new();
    let session = SearchSession::mount(
        client(&base_url, signed_in()),
        Arc::new(TokioScheduler::new()),
        &viewport,
    );
    let mut snapshots = session.subscribe();

    for term in ["s", "sh", "sho", "shor", "short"] {
        session.set_search_term(term);
    }
    let first = wait_for(&mut snapshots, |s| !s.loading && s.movies.len() == 1).await;
    assert_eq!(first.movies[0].id, "tt1");

    viewport.emit(ViewportPosition::at_bottom(600.0, 640.0));
    let second = wait_for(&mut snapshots, |s| !s.loading && s.movies.len() == 2).await;
    assert_eq!(second.movies[0].id, "tt1");
    assert_eq!(second.movies[1].id, "tt2");
    assert_eq!(session.controller().state().next_page, None);

    // Last page reached: scrolling again issues nothing.
    viewport.emit(ViewportPosition::at_bottom(600.0, 1280.0));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let terms: Vec<_> = api
        .requests()
        .iter()
        .map(|r| (r.query["t"].clone(), r.query["page"].clone()))
        .collect();
    assert_eq!(
        terms,
        vec![
            ("short".to_string(), "1".to_string()),
            ("short".to_string(), "2".to_string())
        ]
    );
}
