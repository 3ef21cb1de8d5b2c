use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, MockConfig, MockState};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, authorization)
        .body(String::new())
        .unwrap()
}

// --- states/all ---

#[tokio::test]
async fn all_states_returns_fixture() {
    let resp = app(MockState::default())
        .oneshot(get("/api/states/all"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["time"], 1586031310);
    assert_eq!(body["states"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn all_states_filters_by_icao24_and_time() {
    let resp = app(MockState::default())
        .oneshot(get("/api/states/all?time=1593993600&icao24=c0ffee"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["time"], 1593993600);
    let states = body["states"].as_array().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0][0], "c0ffee");
}

#[tokio::test]
async fn all_states_bad_time_returns_400() {
    let resp = app(MockState::default())
        .oneshot(get("/api/states/all?time=yesterday"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- states/own ---

#[tokio::test]
async fn own_states_without_auth_returns_403() {
    let resp = app(MockState::default())
        .oneshot(get("/api/states/own"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn own_states_with_wrong_auth_returns_403() {
    // "unauthorizedUser:secret"
    let resp = app(MockState::default())
        .oneshot(get_with_auth(
            "/api/states/own",
            "Basic dW5hdXRob3JpemVkVXNlcjpzZWNyZXQ=",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn own_states_with_auth_returns_fixture() {
    // "user:password"
    let resp = app(MockState::default())
        .oneshot(get_with_auth("/api/states/own", "Basic dXNlcjpwYXNzd29yZA=="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["states"].as_array().unwrap().len(), 6);
}

// --- flights/all ---

#[tokio::test]
async fn flights_in_window() {
    let resp = app(MockState::default())
        .oneshot(get("/api/flights/all?begin=1517227200&end=1517230800"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn flights_empty_window_returns_404() {
    let resp = app(MockState::default())
        .oneshot(get("/api/flights/all?begin=1600000000&end=1600003600"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn flights_missing_params_returns_400() {
    let resp = app(MockState::default())
        .oneshot(get("/api/flights/all?begin=1517227200"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn flights_window_too_big_returns_400() {
    let resp = app(MockState::default())
        .oneshot(get("/api/flights/all?begin=1517227200&end=1517238000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- forced status and hit counting ---

#[tokio::test]
async fn forced_status_applies_to_every_route() {
    let state = MockState::new(MockConfig::default().with_forced_status(500));
    for uri in [
        "/api/states/all",
        "/api/states/own",
        "/api/flights/all?begin=1517227200&end=1517230800",
    ] {
        let resp = app(state.clone()).oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
    }
    assert_eq!(state.hits(), 3);
}

#[tokio::test]
async fn hits_are_shared_between_clones() {
    let state = MockState::default();
    let resp = app(state.clone())
        .oneshot(get("/api/states/all"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.hits(), 1);
}
