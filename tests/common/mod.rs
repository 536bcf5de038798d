//! Shared harness: an in-process router over a temp SQLite file and a temp
//! static directory, driven with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use axum_extra::extract::cookie::Key;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use vitrine::db::{CatalogStorage, connect};
use vitrine::{AdminCredentials, VitrineState, vitrine_router};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "hunter2";
pub const MULTIPART_BOUNDARY: &str = "vitrine-test-boundary";

pub struct TestSite {
    pub app: Router,
    pub storage: CatalogStorage,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
}

impl TestSite {
    pub fn cleanup(&self) {
        let _ = fs::remove_file(&self.db_path);
        let _ = fs::remove_dir_all(&self.static_dir);
    }
}

pub async fn spawn_site(tag: &str) -> TestSite {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!("vitrine-{tag}-{pid}-{nanos}.sqlite"));
    let mut static_dir = std::env::temp_dir();
    static_dir.push(format!("vitrine-static-{tag}-{pid}-{nanos}"));

    let pool = connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open temp database");
    let storage = CatalogStorage::new(pool);
    storage.init_schema().await.expect("schema init failed");

    let auth = AdminCredentials::new(TEST_USERNAME, TEST_PASSWORD);
    let key = Key::derive_from(b"an-integration-test-secret-key-of-enough-length");
    let state = VitrineState::new(storage.clone(), auth, key, static_dir.clone());

    TestSite {
        app: vitrine_router(state),
        storage,
        db_path,
        static_dir,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request failed")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn multipart_request(uri: &str, body: Vec<u8>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("failed to build request")
}

/// Encode text fields plus an optional `(field, filename, bytes)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\ncontent-disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\ncontent-type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// Collapse a response's Set-Cookie headers into a Cookie header value.
pub fn cookies_from(resp: &Response<Body>) -> String {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn location_of(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing Location header")
}

/// Log in and return a Cookie header carrying the admin session.
pub async fn login(app: &Router) -> String {
    let resp = send(
        app,
        form_request(
            "/admin",
            &format!("username={TEST_USERNAME}&password={TEST_PASSWORD}"),
            None,
        ),
    )
    .await;
    assert_eq!(location_of(&resp), "/admin/dashboard");
    cookies_from(&resp)
}
