use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use serde_json::Value;
use server::{cli::Cli, db, routes::app, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

/// A router backed by a fresh database in a temporary directory. The
/// directory is removed when this is dropped
pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("test.sqlite");
        let path = path.to_str().expect("Temp path isn't utf-8");

        db::run_migrations(path).expect("Failed to run migrations");
        let pool = db::create_pool(path).expect("Failed to create pool");

        let args = Cli::parse_from([
            "server",
            "--sqlite-connection-string",
            path,
            "--assets-dir",
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets"),
        ]);
        let router = app(AppState::new(pool), &args).expect("Failed to build router");

        Self { router, _dir: dir }
    }

    pub async fn send(&self, request: TestRequest) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request.build())
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Creates a user and returns its id
    pub async fn create_user(&self, username: &str) -> String {
        let response = self
            .send(TestRequest::post("/api/users").json(&serde_json::json!({ "username": username })))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.json()["_id"]
            .as_str()
            .expect("_id should be a string")
            .to_string()
    }
}

pub struct TestRequest {
    method: Method,
    uri: String,
    content_type: Option<&'static str>,
    body: String,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_owned(),
            content_type: None,
            body: String::new(),
        }
    }

    pub fn post(uri: &str) -> Self {
        Self {
            method: Method::POST,
            ..Self::get(uri)
        }
    }

    pub fn json(mut self, data: &Value) -> Self {
        self.body = data.to_string();
        self.content_type = Some("application/json");
        self
    }

    /// Body is sent as is, so it has to be urlencoded already
    pub fn form(mut self, body: &str) -> Self {
        self.body = body.to_owned();
        self.content_type = Some("application/x-www-form-urlencoded");
        self
    }

    pub fn raw(mut self, content_type: &'static str, body: &str) -> Self {
        self.body = body.to_owned();
        self.content_type = Some(content_type);
        self
    }

    fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(self.body))
            .expect("Failed to build request")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Body isn't json ({e}): {}", self.body))
    }
}
