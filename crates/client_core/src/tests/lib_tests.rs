use super::*;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use shared::domain::UserId;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-avatar";

#[derive(Clone)]
struct DirectoryState {
    users: Arc<Vec<serde_json::Value>>,
    users_status: StatusCode,
    avatar_requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

fn directory_user(id: i64, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("User {id}"),
        "username": username,
        "email": format!("{username}@example.com"),
        "phone": format!("555-01{id:02}"),
        "website": format!("{username}.example.org"),
        "company": { "name": "Acme" }
    })
}

async fn list_users(State(state): State<DirectoryState>) -> Response {
    if state.users_status != StatusCode::OK {
        return state.users_status.into_response();
    }
    Json(state.users.as_ref().clone()).into_response()
}

async fn avatar(
    State(state): State<DirectoryState>,
    Path(format): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let seed = params.get("seed").cloned().unwrap_or_default();
    state
        .avatar_requests
        .lock()
        .await
        .push((format, params));

    if seed == "broken" {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], FAKE_PNG.to_vec()).into_response()
}

async fn spawn_directory_server(
    users: Vec<serde_json::Value>,
    users_status: StatusCode,
) -> (String, DirectoryState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = DirectoryState {
        users: Arc::new(users),
        users_status,
        avatar_requests: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/users", get(list_users))
        .route("/avatars/:format", get(avatar))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn client_for(server_url: &str) -> ProfileClient {
    ProfileClient::new(ClientSettings {
        users_url: format!("{server_url}/users"),
        avatar_base_url: format!("{server_url}/avatars"),
        load_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
        ..ClientSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn load_profiles_keeps_first_ten_in_directory_order() {
    let users = (1..=12)
        .map(|id| directory_user(id, &format!("user{id}")))
        .collect();
    let (server_url, state) = spawn_directory_server(users, StatusCode::OK).await;
    let client = client_for(&server_url);

    let loaded = client.load_profiles().await.expect("load");

    let ids: Vec<UserId> = loaded.iter().map(|p| p.profile.id).collect();
    assert_eq!(ids, (1..=10).map(UserId).collect::<Vec<_>>());
    assert!(loaded.iter().all(|p| !p.profile.liked));
    assert_eq!(loaded[0].profile.email, "user1@example.com");
    assert_eq!(loaded[0].avatar_bytes, FAKE_PNG);
    assert_eq!(loaded[0].avatar_content_type.as_deref(), Some("image/png"));
    assert!(loaded[0]
        .profile
        .avatar
        .starts_with(&format!("{server_url}/avatars/png?seed=user1&size=200")));

    let requests = state.avatar_requests.lock().await;
    assert_eq!(requests.len(), 10);
    assert!(requests.iter().all(|(format, _)| format == "png"));
    let (_, params) = &requests[0];
    assert_eq!(params.get("backgroundColor").map(String::as_str), Some("transparent"));
    assert_eq!(params.get("eyes").map(String::as_str), Some("happy"));
}

#[tokio::test]
async fn one_failed_avatar_fails_the_whole_load() {
    let users = vec![
        directory_user(1, "Bret"),
        directory_user(2, "broken"),
        directory_user(3, "Samantha"),
    ];
    let (server_url, _state) = spawn_directory_server(users, StatusCode::OK).await;
    let client = client_for(&server_url);

    let err = client.load_profiles().await.expect_err("must fail");
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("seed=broken"), "unexpected error: {err}");
}

#[tokio::test]
async fn directory_status_error_is_reported() {
    let (server_url, state) =
        spawn_directory_server(Vec::new(), StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = client_for(&server_url);

    let err = client.fetch_users().await.expect_err("must fail");
    assert_eq!(err.status(), Some(500));
    assert!(state.avatar_requests.lock().await.is_empty());
}

#[tokio::test]
async fn unreachable_directory_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    let err = client.fetch_users().await.expect_err("must fail");
    assert!(matches!(err, ProfileFetchError::Request { .. }), "unexpected error: {err}");
}

#[test]
fn avatar_url_encodes_username_and_style_params() {
    let client = ProfileClient::new(ClientSettings::default()).expect("client");

    let url = client.avatar_url("Mrs. Dennis").expect("url");
    assert_eq!(
        url.as_str(),
        "https://api.dicebear.com/9.x/avataaars/png?seed=Mrs.+Dennis&size=200&backgroundColor=transparent&eyes=happy&mouth=smile"
    );
}

#[test]
fn avatar_url_skips_empty_background_and_tolerates_trailing_slash() {
    let client = ProfileClient::new(ClientSettings {
        avatar_base_url: "https://avatars.example/v2/".to_string(),
        avatar_format: "svg".to_string(),
        avatar_background: String::new(),
        avatar_params: Default::default(),
        ..ClientSettings::default()
    })
    .expect("client");

    let url = client.avatar_url("Bret").expect("url");
    assert_eq!(url.as_str(), "https://avatars.example/v2/svg?seed=Bret&size=200");
}

#[test]
fn avatar_url_rejects_opaque_base() {
    let client = ProfileClient::new(ClientSettings {
        avatar_base_url: "mailto:avatars@example.com".to_string(),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.avatar_url("Bret").expect_err("must fail");
    assert!(matches!(err, ProfileFetchError::AvatarUrl { .. }));
}
