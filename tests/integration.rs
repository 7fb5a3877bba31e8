//! Integration tests for the HTTP backend, request gate and view against
//! a mock search endpoint.

use std::sync::Arc;

use gated_search::{
    HttpBackend, RequestGate, RequestState, SearchBackend, SearchConfig, SearchError, SearchView,
    StaticProvider, ViewParams,
};
use mockito::{Matcher, Server, ServerGuard};

const SUCCESS_BODY: &str = r#"{
    "results": [
        {"url": "https://one.example.com/", "title": "One", "description": "first", "score": 3.0},
        {"url": "https://two.example.com/", "title": "Two", "description": "second", "score": 5.0,
         "links_from": [{"link": "https://referrer.example.net/post"}]},
        {"url": "https://three.example.com/", "title": "Three", "description": "third", "score": 5.0}
    ],
    "matching_webpages": 4321,
    "time_taken": {"total_request": 0.137, "fetch": 0.09}
}"#;

fn backend_for(server: &ServerGuard) -> HttpBackend {
    HttpBackend::new(SearchConfig::new(server.url()))
}

#[tokio::test]
async fn http_backend_sends_expected_query_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "rust async".into()),
            Matcher::UrlEncoded("results".into(), "200".into()),
            Matcher::UrlEncoded("token".into(), "tok-1".into()),
            Matcher::UrlEncoded("links".into(), "true".into()),
        ]))
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let response = backend_for(&server)
        .search("rust async", "tok-1")
        .await
        .unwrap();
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.matching_webpages, 4321);
    assert_eq!(response.time_taken.total_request, Some(0.137));
    mock.assert_async().await;
}

#[tokio::test]
async fn http_backend_maps_invalid_token_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Invalid Turnstile token"}"#)
        .create_async()
        .await;

    let err = backend_for(&server).search("q", "stale").await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidToken));
}

#[tokio::test]
async fn http_backend_surfaces_other_api_errors_verbatim() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "index temporarily unavailable"}"#)
        .create_async()
        .await;

    let err = backend_for(&server).search("q", "tok").await.unwrap_err();
    match err {
        SearchError::Api(message) => assert_eq!(message, "index temporarily unavailable"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn http_backend_maps_http_status_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    let err = backend_for(&server).search("q", "tok").await.unwrap_err();
    assert!(matches!(err, SearchError::Status(503)));
}

#[tokio::test]
async fn http_backend_maps_undecodable_bodies_to_parse_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = backend_for(&server).search("q", "tok").await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn gate_issues_exactly_one_network_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SUCCESS_BODY)
        .expect(1)
        .create_async()
        .await;

    let gate = RequestGate::new(Arc::new(backend_for(&server)));
    assert!(gate.execute("rust", "tok").await.unwrap().is_some());
    assert!(gate.execute("rust", "tok").await.unwrap().is_none());
    assert!(gate.execute("rust", "tok").await.unwrap().is_none());
    assert_eq!(gate.state(), RequestState::Succeeded);
    mock.assert_async().await;
}

#[tokio::test]
async fn gate_with_empty_token_never_reaches_the_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SUCCESS_BODY)
        .expect(0)
        .create_async()
        .await;

    let gate = RequestGate::new(Arc::new(backend_for(&server)));
    assert!(matches!(
        gate.execute("rust", "").await,
        Err(SearchError::MissingToken)
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn view_loads_ranks_and_paginates_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SUCCESS_BODY)
        .expect(1)
        .create_async()
        .await;

    let backend = Arc::new(backend_for(&server));
    let provider = Arc::new(StaticProvider::new("tok-1"));
    let mut view = SearchView::new(
        ViewParams::new("rust async", "tok-1"),
        backend,
        provider,
    );

    view.load().await.unwrap();
    // Duplicate load is collapsed by the gate.
    view.load().await.unwrap();

    // Score-5 group first, externally-linked result ahead of its peer,
    // score-3 result last.
    let urls: Vec<&str> = view.results().iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://two.example.com/",
            "https://three.example.com/",
            "https://one.example.com/",
        ]
    );
    assert_eq!(view.stats().result_count, 3);
    assert_eq!(view.stats().total_matches, 4321);
    assert_eq!(view.pagination().total_pages(), 1);
    assert!(!view.change_page(2));
    mock.assert_async().await;
}

#[tokio::test]
async fn view_surfaces_verification_failure_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "Invalid Turnstile token"}"#)
        .create_async()
        .await;

    let backend = Arc::new(backend_for(&server));
    let provider = Arc::new(StaticProvider::new("expired"));
    let mut view = SearchView::new(
        ViewParams::new("rust", "expired"),
        backend,
        provider,
    );

    let err = view.load().await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidToken));
    assert!(view.results().is_empty());
    assert_eq!(
        view.error(),
        Some("We couldn't confirm if you were human. Please try again.")
    );
}
