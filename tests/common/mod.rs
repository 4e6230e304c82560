#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;
use tokio::sync::Mutex;
use tower::ServiceExt;

use job_board_backend::{
    config::{Config, StorageBackend},
    error::{Error, Result},
    repositories::Repositories,
    routes::app_router,
    services::mailer::{Mailer, OutgoingEmail},
    utils::crypto::hash_password,
    AppState,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret-pass";
pub const BOUNDARY: &str = "----job-board-test-boundary";

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        if self.fail {
            return Err(Error::Notification("relay unavailable".into()));
        }
        self.sent.lock().await.push(email);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub token: String,
    pub uploads: PathBuf,
    _dir: TempDir,
}

pub fn test_config(uploads: &Path) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        storage_backend: StorageBackend::Memory,
        database_url: None,
        uploads_dir: uploads.to_path_buf(),
        jwt_secret: "test_secret_key".into(),
        admin_username: ADMIN_USERNAME.into(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("hash"),
        session_ttl_hours: 1,
        admin_email: "hiring@example.com".into(),
        mail_from: "\"Job Board\" <no-reply@example.com>".into(),
        smtp: None,
        public_base_url: "https://jobs.example.com/".into(),
        site_url: None,
        public_rps: 10_000,
        log_json: false,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_mailer(RecordingMailer::default())
}

pub fn spawn_app_with_mailer(mailer: RecordingMailer) -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    let mailer = Arc::new(mailer);
    let state = AppState::new(&config, Repositories::in_memory(), mailer.clone());
    let token = state
        .auth_service
        .issue_token(ADMIN_USERNAME, Utc::now() + Duration::hours(1))
        .expect("token");

    TestApp {
        router: app_router(state),
        mailer,
        token,
        uploads: dir.path().to_path_buf(),
        _dir: dir,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> JsonValue {
        serde_json::from_slice(&self.bytes).unwrap_or(JsonValue::Null)
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec();
        TestResponse {
            status,
            headers,
            bytes,
        }
    }

    pub async fn get(&self, uri: &str, auth: bool) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if auth {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        let req = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &JsonValue) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    /// Creates a listing through the admin API and returns its JSON.
    pub async fn create_listing(&self, body: &JsonValue) -> JsonValue {
        let res = self.send_json("POST", "/jobs", body).await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.json());
        res.json()
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<FilePart>,
    ) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(fields, file)))
            .unwrap();
        self.send(req).await
    }

    pub async fn submit_application(&self, job_id: &str, file: Option<FilePart>) -> TestResponse {
        self.post_multipart("/applications", &application_fields(job_id), file)
            .await
    }
}

pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub fn pdf_part(size: usize) -> FilePart {
    FilePart {
        field: "resume",
        file_name: "resume.pdf".into(),
        content_type: "application/pdf".into(),
        data: vec![b'x'; size],
    }
}

pub fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn application_fields(job_id: &str) -> Vec<(&str, &str)> {
    vec![
        ("jobId", job_id),
        ("firstName", "Jane"),
        ("lastName", "Doe"),
        ("email", "jane.doe@example.com"),
        ("phone", "+1 555 0100"),
        ("experience", "4 years of backend work"),
        ("education", "BSc Computer Science"),
        ("coverLetter", "I would love to join.\nThanks!"),
    ]
}

pub fn listing_body(title: &str) -> JsonValue {
    json!({
        "title": title,
        "company": "Acme Corp",
        "companyUrl": "https://acme.example.com",
        "companyLogo": "https://acme.example.com/logo.png",
        "industry": "Technology",
        "type": "Full Time",
        "location": {
            "country": "USA",
            "state": "NY",
            "city": "New York",
            "street": "1 Main St",
            "zipCode": "10001"
        },
        "description": "Build and run services.",
        "responsibilities": ["Write code", "Review code"],
        "qualifications": ["Rust", "SQL"],
        "education": "Bachelor's degree",
        "experience": "3+ years"
    })
}

pub fn parse_time(value: &JsonValue) -> chrono::DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .expect("RFC 3339 timestamp")
}
