//! Integration tests for the portal backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::assistant::{AssistantClient, ERROR_FALLBACK};
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

const ADMIN_EMAIL: &str = "divino@portal.test";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Create config
        let config = Config {
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            jwt_secret: "test-secret".to_string(),
            admin_email: Some(ADMIN_EMAIL.to_string()),
            assistant_api_key: None,
            assistant_model: "gemini-3-flash-preview".to_string(),
            whatsapp_number: "+5563999191919".to_string(),
            youtube_url: "https://www.youtube.com/channel/UCTJEBpIkx-ghf5N9TuAsG8g".to_string(),
        };

        // Assistant without an API key answers with its fixed fallback,
        // which keeps these tests offline.
        let assistant = Arc::new(AssistantClient::new(
            config.assistant_api_key.clone(),
            config.assistant_model.clone(),
        ));

        let state = AppState {
            repo,
            assistant,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign up and sign in, returning the bearer token and the profile.
    async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        username: &str,
    ) -> (String, Value) {
        let signup_resp = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&json!({
                "email": email,
                "password": password,
                "fullName": full_name,
                "username": username
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(signup_resp.status(), 200);

        let signin_resp = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(signin_resp.status(), 200);

        let body: Value = signin_resp.json().await.unwrap();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (token, body["data"]["profile"].clone())
    }

    /// An admin session (the bootstrap admin e-mail).
    async fn register_admin(&self) -> (String, Value) {
        self.register(ADMIN_EMAIL, "secret1", "Prof. Divino Viana", "divino")
            .await
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_sign_up_and_sign_in() {
    let fixture = TestFixture::new().await;

    let signup_resp = fixture
        .client
        .post(fixture.url("/api/auth/signup"))
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "fullName": "Ana Silva",
            "username": "ana"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(signup_resp.status(), 200);
    let signup_body: Value = signup_resp.json().await.unwrap();
    assert_eq!(signup_body["success"], true);
    assert_eq!(signup_body["data"]["username"], "ana");
    assert_eq!(signup_body["data"]["fullName"], "Ana Silva");
    assert_eq!(signup_body["data"]["role"], "member");
    // Credentials never serialize outward
    assert!(signup_body["data"].get("email").is_none());

    let signin_resp = fixture
        .client
        .post(fixture.url("/api/auth/signin"))
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(signin_resp.status(), 200);
    let signin_body: Value = signin_resp.json().await.unwrap();
    assert!(signin_body["data"]["token"].as_str().unwrap().len() > 20);
    assert_eq!(signin_body["data"]["profile"]["username"], "ana");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let fixture = TestFixture::new().await;

    // Short password
    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signup"))
        .json(&json!({
            "email": "a@b.com",
            "password": "12345",
            "fullName": "Ana Silva",
            "username": "ana"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["message"],
        "A senha deve ter pelo menos 6 caracteres."
    );

    // Missing @ in the e-mail
    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signup"))
        .json(&json!({
            "email": "not-an-email",
            "password": "secret1",
            "fullName": "Ana Silva",
            "username": "ana"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let fixture = TestFixture::new().await;
    fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signup"))
        .json(&json!({
            "email": "a@b.com",
            "password": "secret2",
            "fullName": "Outra Ana",
            "username": "outra-ana"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"]["message"],
        "Este e-mail já está cadastrado no portal."
    );
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let fixture = TestFixture::new().await;
    fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signin"))
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "E-mail ou senha incorretos. Verifique os dados e tente novamente."
    );
}

#[tokio::test]
async fn test_session_lookup() {
    let fixture = TestFixture::new().await;
    let (token, _) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/auth/session"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["username"], "ana");

    // No token means no session
    let resp = fixture
        .client
        .get(fixture.url("/api/auth/session"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_sign_out_acknowledges() {
    let fixture = TestFixture::new().await;
    let (token, _) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .post(fixture.url("/api/auth/signout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_publications_placeholder_fallback() {
    let fixture = TestFixture::new().await;

    // Empty table serves the four bundled founding publications
    let resp = fixture
        .client
        .get(fixture.url("/api/publications"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let placeholders = body["data"].as_array().unwrap();
    assert_eq!(placeholders.len(), 4);
    assert_eq!(placeholders[0]["authorName"], "Prof. Me. Divino Viana");

    // One real record replaces the placeholders entirely
    let (admin_token, _) = fixture.register_admin().await;
    let create_resp = fixture
        .client
        .post(fixture.url("/api/publications"))
        .bearer_auth(&admin_token)
        .json(&json!({
            "title": "Spinoza e a imaginação",
            "abstract": "Estudo sobre o segundo gênero de conhecimento.",
            "link": "https://example.org/artigo",
            "category": "Epistemologia"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let created: Value = create_resp.json().await.unwrap();
    assert_eq!(created["data"]["authorName"], "Prof. Divino Viana");

    let resp = fixture
        .client
        .get(fixture.url("/api/publications"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let publications = body["data"].as_array().unwrap();
    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0]["title"], "Spinoza e a imaginação");
}

#[tokio::test]
async fn test_publication_create_requires_admin() {
    let fixture = TestFixture::new().await;
    let (member_token, _) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let body = json!({
        "title": "Tentativa",
        "link": "https://example.org",
        "category": "Ética"
    });

    // Unauthenticated
    let resp = fixture
        .client
        .post(fixture.url("/api/publications"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Signed in, but not an admin
    let resp = fixture
        .client
        .post(fixture.url("/api/publications"))
        .bearer_auth(&member_token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_forum_topic_create_and_filter() {
    let fixture = TestFixture::new().await;
    let (token, profile) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/forum/topics"))
        .bearer_auth(&token)
        .json(&json!({
            "category": "Ética",
            "title": "O conatus na Parte III",
            "content": "Como entender a proposição 6?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let created: Value = create_resp.json().await.unwrap();
    // Author is denormalized from the signed-in profile
    assert_eq!(created["data"]["authorName"], "Ana Silva");
    assert_eq!(created["data"]["authorId"], profile["id"]);
    assert_eq!(created["data"]["category"], "Ética");

    // Newest first
    let list_resp = fixture
        .client
        .get(fixture.url("/api/forum/topics"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let topics = list_body["data"].as_array().unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0]["title"], "O conatus na Parte III");

    // Category filter is an equality match
    let filtered_resp = fixture
        .client
        .get(fixture.url("/api/forum/topics?category=Ontologia"))
        .send()
        .await
        .unwrap();
    let filtered_body: Value = filtered_resp.json().await.unwrap();
    assert_eq!(filtered_body["data"].as_array().unwrap().len(), 0);

    // Unknown categories are rejected, not silently empty
    let bad_resp = fixture
        .client
        .get(fixture.url("/api/forum/topics?category=Estética"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_resp.status(), 400);

    // A category outside the closed set is rejected at the boundary
    let bad_create = fixture
        .client
        .post(fixture.url("/api/forum/topics"))
        .bearer_auth(&token)
        .json(&json!({
            "category": "Estética",
            "title": "t",
            "content": "c"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_create.status(), 422);
}

#[tokio::test]
async fn test_event_lifecycle() {
    let fixture = TestFixture::new().await;
    let (admin_token, _) = fixture.register_admin().await;

    // Schedule two events out of date order
    let later = fixture
        .client
        .post(fixture.url("/api/events"))
        .bearer_auth(&admin_token)
        .json(&json!({
            "title": "Leitura da Parte V",
            "description": "Encerramento do ciclo",
            "date": "2026-10-02",
            "time": "19:30",
            "meetingLink": "https://meet.example.org/parte-v"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(later.status(), 200);

    let sooner = fixture
        .client
        .post(fixture.url("/api/events"))
        .bearer_auth(&admin_token)
        .json(&json!({
            "title": "Leitura da Parte I",
            "description": "Abertura do ciclo",
            "date": "2026-09-04",
            "time": "19:30",
            "meetingLink": "https://meet.example.org/parte-i"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(sooner.status(), 200);
    let sooner_body: Value = sooner.json().await.unwrap();
    let sooner_id = sooner_body["data"]["id"].as_str().unwrap();

    // Agenda is oldest first by date
    let list_resp = fixture
        .client
        .get(fixture.url("/api/events"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let events = list_body["data"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Leitura da Parte I");
    assert_eq!(events[1]["title"], "Leitura da Parte V");

    // Delete removes exactly the addressed event
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/events/{}", sooner_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let list_body: Value = fixture
        .client
        .get(fixture.url("/api/events"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let events = list_body["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Leitura da Parte V");

    // Deleting again is a 404
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/events/{}", sooner_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_event_write_requires_admin() {
    let fixture = TestFixture::new().await;
    let (member_token, _) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/events"))
        .bearer_auth(&member_token)
        .json(&json!({
            "title": "Encontro",
            "date": "2026-09-04",
            "time": "19:30",
            "meetingLink": "https://meet.example.org"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .client
        .delete(fixture.url("/api/events/some-id"))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_contact_message_flow() {
    let fixture = TestFixture::new().await;
    let (admin_token, _) = fixture.register_admin().await;
    let (member_token, _) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    // Anyone can leave a message
    let create_resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "name": "Visitante",
            "email": "visitante@example.org",
            "message": "Gostaria de participar do grupo."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 200);
    let created: Value = create_resp.json().await.unwrap();
    let message_id = created["data"]["id"].as_str().unwrap();
    assert_eq!(created["data"]["isRead"], false);

    // The inbox is admin only
    let resp = fixture
        .client
        .get(fixture.url("/api/contact"))
        .bearer_auth(&member_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let inbox: Value = fixture
        .client
        .get(fixture.url("/api/contact"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["data"].as_array().unwrap().len(), 1);

    // Mark read flips the flag, and a refetch shows it
    let read_resp = fixture
        .client
        .put(fixture.url(&format!("/api/contact/{}/read", message_id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(read_resp.status(), 200);
    let read_body: Value = read_resp.json().await.unwrap();
    assert_eq!(read_body["data"]["isRead"], true);

    let inbox: Value = fixture
        .client
        .get(fixture.url("/api/contact"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["data"][0]["isRead"], true);
}

#[tokio::test]
async fn test_profile_update() {
    let fixture = TestFixture::new().await;
    let (token, profile) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;
    let profile_id = profile["id"].as_str().unwrap();

    let update_resp = fixture
        .client
        .put(fixture.url("/api/profile"))
        .bearer_auth(&token)
        .json(&json!({
            "bio": "Mestranda em filosofia moderna.",
            "lattesUrl": "http://lattes.cnpq.br/0000000000000000"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(update_resp.status(), 200);
    let updated: Value = update_resp.json().await.unwrap();
    assert_eq!(updated["data"]["bio"], "Mestranda em filosofia moderna.");
    // Untouched fields keep their values
    assert_eq!(updated["data"]["fullName"], "Ana Silva");
    assert_eq!(updated["data"]["role"], "member");

    // The directory reflects the change
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/members/{}", profile_id)))
        .send()
        .await
        .unwrap();
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["bio"], "Mestranda em filosofia moderna.");
}

#[tokio::test]
async fn test_member_directory() {
    let fixture = TestFixture::new().await;
    fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/members"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let members = body["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].get("email").is_none());

    let resp = fixture
        .client
        .get(fixture.url("/api/members/non-existent-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_portal_snapshot() {
    let fixture = TestFixture::new().await;
    fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/portal"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    // Placeholder publications until something is published
    assert_eq!(body["data"]["publications"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["events"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["topics"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["gallery"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["members"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["links"]["whatsapp"], "https://wa.me/5563999191919");
    assert_eq!(
        body["data"]["links"]["youtube"],
        "https://www.youtube.com/channel/UCTJEBpIkx-ghf5N9TuAsG8g"
    );
}

#[tokio::test]
async fn test_assistant_fallback_without_api_key() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/assistant"))
        .json(&json!({ "prompt": "Qual o conceito de Conatus?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["reply"], ERROR_FALLBACK);

    // A blank question is rejected before any relay attempt
    let resp = fixture
        .client
        .post(fixture.url("/api/assistant"))
        .json(&json!({ "prompt": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_admin_bootstrap_email_gets_admin_role() {
    let fixture = TestFixture::new().await;
    let (_, admin_profile) = fixture.register_admin().await;
    assert_eq!(admin_profile["role"], "admin");

    let (_, member_profile) = fixture.register("a@b.com", "secret1", "Ana Silva", "ana").await;
    assert_eq!(member_profile["role"], "member");
}
