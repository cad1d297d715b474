//! Full-client flows against a mock backend: credential exchange publishing
//! into the session store, and the query path observing whatever the store
//! holds at header-assembly time.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use restbase::prelude::*;

const API_KEY: &str = "test-anon-key";

fn client_for(server: &MockServer) -> Client {
    Client::new(ClientConfig::new(server.uri(), API_KEY)).unwrap()
}

fn session_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {"id": "user-1", "email": "test@example.com"}
    })
}

async fn mount_password_grant(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(access, refresh)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn sign_in_publishes_session_used_by_subsequent_queries() {
    let server = MockServer::start().await;
    mount_password_grant(&server, "signed-in-jwt", "refresh-1").await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rooms"))
        .and(header("apikey", API_KEY))
        .and(header("authorization", "Bearer signed-in-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client
        .sign_in_with_email_password("test@example.com", "password")
        .await
        .unwrap();
    assert_eq!(session.access_token, "signed-in-jwt");
    assert_eq!(client.current_session().access_token, "signed-in-jwt");

    let (rooms, count) = client.from("rooms").execute_string().await.unwrap();
    assert_eq!(rooms, "[]");
    assert_eq!(count, None);
}

#[tokio::test]
async fn select_with_exact_count_returns_payload_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/countries"))
        .and(query_param("select", "*"))
        .and(header("Prefer", "count=exact"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Range", "0-1/97")
                .set_body_raw(r#"[{"name":"NZ"},{"name":"AU"}]"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client
        .from("countries")
        .select("*", CountOption::Exact, false)
        .execute()
        .await
        .unwrap();
    assert_eq!(resp.count, Some(97));
    assert_eq!(resp.data, br#"[{"name":"NZ"},{"name":"AU"}]"#.to_vec());
}

#[tokio::test]
async fn refresh_session_swaps_the_stored_credential_wholesale() {
    let server = MockServer::start().await;
    mount_password_grant(&server, "old-jwt", "refresh-1").await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({"refresh_token": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("new-jwt", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .sign_in_with_email_password("test@example.com", "password")
        .await
        .unwrap();
    client.refresh_session().await.unwrap();

    let current = client.current_session();
    assert_eq!(current.access_token, "new-jwt");
    assert_eq!(current.refresh_token, "refresh-2");
}

#[tokio::test]
async fn refresh_without_a_session_fails_before_any_io() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    assert!(matches!(
        client.refresh_session().await,
        Err(AuthError::NoSession)
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn sign_out_revokes_and_clears_the_session() {
    let server = MockServer::start().await;
    mount_password_grant(&server, "doomed-jwt", "refresh-1").await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer doomed-jwt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .sign_in_with_email_password("test@example.com", "password")
        .await
        .unwrap();
    client.sign_out().await.unwrap();
    assert!(!client.current_session().is_authenticated());

    // Back to API-key-only identity on the wire.
    client.from("rooms").execute().await.unwrap();
    let rooms_request = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/rest/v1/rooms")
        .unwrap();
    assert!(!rooms_request.headers.contains_key("authorization"));
}

#[tokio::test]
async fn failed_sign_in_leaves_the_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error_code": "invalid_credentials", "msg": "Invalid login credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .sign_in_with_email_password("test@example.com", "wrong")
        .await
        .unwrap_err();
    match err {
        AuthError::Api {
            status,
            message,
            error_code,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid login credentials");
            assert_eq!(error_code.as_deref(), Some("invalid_credentials"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!client.current_session().is_authenticated());
}
