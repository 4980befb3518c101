// tests/api.rs
//
// HTTP-surface tests: the whole router wired to a fresh in-memory store,
// exercised with tower's oneshot. No sockets involved.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use kartu_pelajar::{
    config::{Config, SchoolSettings},
    models::admin::AdminLevel,
    state::AppState,
    store::Store,
    web::routes,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

fn test_config() -> Config {
    Config {
        port: 0,
        jwt_secret: SECRET.to_string(),
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
        settings: SchoolSettings {
            nama_sekolah: "SMA NEGERI 1 DIGITAL".to_string(),
            alamat_sekolah: String::new(),
            tahun_ajaran: "2023/2024".to_string(),
            email_sekolah: String::new(),
            telepon_sekolah: String::new(),
            website: String::new(),
            kepala_sekolah: String::new(),
            nip_kepsek: String::new(),
            logo_url: String::new(),
            warna_utama: "#2563eb".to_string(),
            ukuran_kartu: "85mm x 54mm".to_string(),
            masa_berlaku: "1 Tahun".to_string(),
        },
    }
}

/// Router over an empty store with a single admin account. Low bcrypt cost
/// keeps the suite fast; verification does not care.
async fn test_app() -> Router {
    let store = Store::new();
    store
        .lock()
        .await
        .create_admin(
            "admin".to_string(),
            bcrypt::hash("admin123", 4).unwrap(),
            "Administrator".to_string(),
            AdminLevel::Superadmin,
        )
        .unwrap();
    routes::create_router(AppState::new(store, test_config()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": "admin", "password": "admin123" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["username"], json!("admin"));
    body["token"].as_str().unwrap().to_string()
}

async fn create_siswa(app: &Router, nama: &str, nis: &str, kelas: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/siswa",
            json!({ "nama": nama, "nis": nis, "kelas": kelas }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_conflict_delete_recreate_flow() {
    let app = test_app().await;

    let created = create_siswa(&app, "budi", "20230099", "X A").await;
    assert_eq!(created["data"]["nama"], json!("BUDI"));
    assert_eq!(created["data"]["status"], json!("active"));
    let qr = created["data"]["qr_code"].as_str().unwrap();
    assert!(qr.starts_with("KARTU20230099"));
    let id = created["data"]["id"].as_u64().unwrap();
    assert_eq!(created["pdf_url"], json!(format!("/api/siswa/{}/pdf", id)));

    // Same active NIS is rejected with a conflict kind.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/siswa",
            json!({ "nama": "Lain", "nis": "20230099", "kelas": "X B" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("conflict"));

    // Delete requires a token, then frees the NIS.
    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/siswa/{}", id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/siswa/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    create_siswa(&app, "Lain", "20230099", "X B").await;
}

#[tokio::test]
async fn missing_required_fields_is_a_validation_error() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/siswa",
            json!({ "nama": "Budi" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], json!("validation"));
}

#[tokio::test]
async fn mutations_are_gated_by_the_bearer_token() {
    let app = test_app().await;
    let created = create_siswa(&app, "Budi", "20230001", "X A").await;
    let id = created["data"]["id"].as_u64().unwrap();
    let uri = format!("/api/siswa/{}", id);
    let patch = json!({ "kelas": "XI A" });

    // No header at all: 401.
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, patch.clone(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token: 403.
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, patch.clone(), Some("garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Valid token: the merge goes through and the name survives untouched.
    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, patch, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kelas"], json!("XI A"));
    assert_eq!(body["data"]["nama"], json!("BUDI"));
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": "admin", "password": "wrong" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["kind"], json!("invalid_credentials"));
}

#[tokio::test]
async fn register_needs_auth_and_rejects_duplicates() {
    let app = test_app().await;
    let payload = json!({ "username": "petugas", "password": "rahasia" });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/register", payload.clone(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            payload.clone(),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["level"], json!("admin"));
    assert!(body["user"].get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/register", payload, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_and_reports_meta() {
    let app = test_app().await;
    for i in 0..25 {
        create_siswa(&app, &format!("Siswa {:02}", i), &format!("50{:06}", i), "X A").await;
    }

    let response = app
        .clone()
        .oneshot(get("/api/siswa?page=2&limit=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], json!(25));
    assert_eq!(body["meta"]["total_pages"], json!(3));
    assert_eq!(body["meta"]["has_next"], json!(true));
    assert_eq!(body["meta"]["has_prev"], json!(true));
    assert_eq!(body["filters"]["kelas"], json!(["X A"]));
}

#[tokio::test]
async fn pdf_route_renders_html_and_logs_a_print_event() {
    let app = test_app().await;
    let created = create_siswa(&app, "Budi", "20230001", "X A").await;
    let id = created["data"]["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/siswa/{}/pdf", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("BUDI"));
    assert!(html.contains("KARTU PELAJAR"));

    // Creation logged one digital event, rendering added a pdf one.
    let response = app.clone().oneshot(get("/api/stats")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["total_cetakan"], json!(2));
    assert_eq!(body["data"]["total_siswa"], json!(1));
    assert_eq!(body["data"]["per_kelas"]["X A"], json!(1));
}

#[tokio::test]
async fn dashboard_is_protected_and_shaped() {
    let app = test_app().await;
    create_siswa(&app, "Budi", "20230001", "X A").await;

    let response = app.clone().oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["recent_siswa"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["monthly_stats"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn search_and_check_nis_endpoints() {
    let app = test_app().await;
    create_siswa(&app, "Budi Santoso", "20230001", "X A").await;

    let response = app.clone().oneshot(get("/api/search?q=b")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], json!("Masukkan minimal 2 karakter"));

    let response = app
        .clone()
        .oneshot(get("/api/search?q=santoso"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["nama"], json!("BUDI SANTOSO"));

    let response = app
        .clone()
        .oneshot(get("/api/check-nis/20230001"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["available"], json!(false));

    let response = app
        .clone()
        .oneshot(get("/api/check-nis/99999"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["available"], json!(true));
}

#[tokio::test]
async fn backup_contains_collections_but_never_hashes() {
    let app = test_app().await;
    create_siswa(&app, "Budi", "20230001", "X A").await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/backup")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"backup-"));

    let body = body_json(response).await;
    assert_eq!(body["siswa"].as_array().unwrap().len(), 1);
    assert_eq!(body["admin"][0]["username"], json!("admin"));
    assert!(body["admin"][0].get("password_hash").is_none());
    assert_eq!(body["settings"]["nama_sekolah"], json!("SMA NEGERI 1 DIGITAL"));
}

#[tokio::test]
async fn misc_endpoints_and_fallback() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["siswa_count"], json!(0));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/upload",
            json!({ "image": "data:image/png;base64,AAAA" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["url"], json!("data:image/png;base64,AAAA"));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/upload",
            json!({ "image": "http://example.com/a.png" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/api/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Endpoint tidak ditemukan"));
    assert_eq!(body["path"], json!("/api/nonexistent"));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/print/{}", 1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}
