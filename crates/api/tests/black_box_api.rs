use reqwest::StatusCode;
use serde_json::json;

use atrium_api::app::{AppConfig, build_app};

const ADMIN_LOGIN: &str = "admin";
const ADMIN_PASSWORD: &str = "administrator-pass-1";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app (same router as prod), but bind to an ephemeral port.
        let config = AppConfig::new("test-secret").with_bootstrap_admin(ADMIN_LOGIN, ADMIN_PASSWORD);
        let app = build_app(&config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn admin_token(&self, client: &reqwest::Client) -> String {
        let res = client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "login": ADMIN_LOGIN, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = res.json().await.unwrap();
        body["token"]["access_token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user_payload(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "password": "operator-secret-1",
        "confirm_password": "operator-secret-1",
        "full_name": "Test Operator",
        "email": format!("{login}@example.com"),
        "phone_number": "379123456789",
        "role": "Operator",
    })
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_a_working_token_pair() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "login": ADMIN_LOGIN, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["login"], json!(ADMIN_LOGIN));
    assert_eq!(body["user"]["role_name"], json!("Administrator"));
    let access = body["token"]["access_token"].as_str().unwrap();
    let refresh = body["token"]["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());

    // The access token works as a bearer credential.
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(access)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let me: serde_json::Value = res.json().await.unwrap();
    assert_eq!(me["user"]["login"], json!(ADMIN_LOGIN));

    // The refresh token does not.
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(refresh)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_unauthorized_with_error_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "login": ADMIN_LOGIN, "password": "not-the-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Authentication failed"));
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn refresh_mints_a_new_access_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "login": ADMIN_LOGIN, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let refresh = body["token"]["refresh_token"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/auth/refresh", srv.base_url))
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    let access = body["access_token"].as_str().unwrap();
    let res = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(access)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // An access token is not a refresh credential.
    let access = access.to_string();
    let res = client
        .post(format!("{}/auth/refresh", srv.base_url))
        .json(&json!({ "refresh_token": access }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    // Create.
    let res = client
        .post(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .json(&user_payload("operator1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["user"]["status"], json!(true));

    // List with search.
    let res = client
        .get(format!("{}/users?search=operator&order_by=login:asc", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed["users"].as_array().unwrap().len(), 1);
    assert_eq!(listed["page"], json!(1));
    assert_eq!(listed["total_page"], json!(1));

    // Get by id.
    let res = client
        .get(format!("{}/users/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Update.
    let res = client
        .patch(format!("{}/users/{}", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "full_name": "Renamed Operator" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["user"]["full_name"], json!("Renamed Operator"));

    // Delete (bulk endpoint, single id).
    let res = client
        .delete(format!("{}/users?ids={}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let deleted: serde_json::Value = res.json().await.unwrap();
    assert_eq!(deleted["success"], json!(true));

    let res = client
        .get(format!("{}/users/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_error_body_contract() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    let mut payload = user_payload("badphone");
    payload["phone_number"] = json!("12345");

    let res = client
        .post(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        json!("Your request contains invalid data. Please check the provided details.")
    );
    assert_eq!(body["detail"], json!("phone_number must be 12 digits"));
}

#[tokio::test]
async fn client_role_users_carry_the_client_name() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    // Register a client company.
    let res = client
        .post(format!("{}/clients", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Initech",
            "tax_number": 7700000001i64,
            "legal_address": "1 Main St",
            "actual_address": "1 Main St",
            "general_director": "B. Lumbergh",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = res.json().await.unwrap();
    let client_id = created["client"]["id"].as_str().unwrap().to_string();

    // A Client-role user without a company is invalid.
    let mut payload = user_payload("clientuser");
    payload["role"] = json!("Client");
    let res = client
        .post(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // With the company attached, the join shows up in responses.
    payload["client_id"] = json!(client_id);
    let res = client
        .post(format!("{}/users", srv.base_url))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["user"]["client_name"], json!("Initech"));

    // And in the login claims-backed /auth/me.
    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "login": "clientuser", "password": "operator-secret-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let login: serde_json::Value = res.json().await.unwrap();
    assert_eq!(login["user"]["client_name"], json!("Initech"));
}

#[tokio::test]
async fn license_request_flow() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.admin_token(&client).await;

    let res = client
        .post(format!("{}/clients", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Globex",
            "tax_number": 7700000002i64,
            "legal_address": "2 Main St",
            "actual_address": "2 Main St",
            "general_director": "H. Scorpio",
        }))
        .send()
        .await
        .unwrap();
    let client_id = res.json::<serde_json::Value>().await.unwrap()["client"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = client
        .post(format!("{}/license-types", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Perpetual" }))
        .send()
        .await
        .unwrap();
    let type_id = res.json::<serde_json::Value>().await.unwrap()["license_type"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = client
        .post(format!("{}/components", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Gateway" }))
        .send()
        .await
        .unwrap();
    let component_id = res.json::<serde_json::Value>().await.unwrap()["component"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Create a request and issue it.
    let res = client
        .post(format!("{}/license-requests", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "client_id": client_id,
            "component_id": component_id,
            "license_type_id": type_id,
            "license_expiration_date": "2027-01-01T00:00:00Z",
            "technical_support_expiration_date": "2026-01-01T00:00:00Z",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let request: serde_json::Value = res.json().await.unwrap();
    let request_id = request["license_request"]["id"].as_str().unwrap().to_string();
    assert_eq!(request["license_request"]["is_license_issued"], json!(false));
    assert_eq!(request["license_request"]["request_creation_mode"], json!("auto"));

    let res = client
        .post(format!("{}/license-requests/{}/issue", srv.base_url, request_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let issued: serde_json::Value = res.json().await.unwrap();
    assert_eq!(issued["license_request"]["is_license_issued"], json!(true));

    // Issuing twice is a conflict (unregistered kind → default 500 body).
    let res = client
        .post(format!("{}/license-requests/{}/issue", srv.base_url, request_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Atrium Support"));
}
