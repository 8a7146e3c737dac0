#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use seed_inventory::{
    build_router,
    config::AppConfig,
    db,
    repositories::{SeaOrmSeedRepository, SeedRepository},
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up the application over a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub repo: Arc<SeaOrmSeedRepository>,
    pub config: AppConfig,
    // Keeps the database file alive for the lifetime of the test.
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Builds the app after letting the caller tweak the test configuration.
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db_path = dir.path().join("seeds_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 4;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let repo = Arc::new(SeaOrmSeedRepository::new(Arc::new(pool)));
        let seeds: Arc<dyn SeedRepository> = repo.clone();
        let router = build_router(AppState::new(seeds, cfg.clone()));

        Self {
            router,
            repo,
            config: cfg,
            _dir: dir,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.request(request).await
    }

    /// Submits `fields` as an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("failed to build request");
        self.request(request).await
    }

    pub async fn add_seed(&self, name: &str, quantity: &str, status: &str) -> Response {
        self.post_form(
            "/add",
            &[
                ("seed_name", name),
                ("seed_type", "Vegetable"),
                ("quantity", quantity),
                ("supplier", "AgriCo"),
                ("status", status),
            ],
        )
        .await
    }
}

fn form_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body is not utf-8")
}

pub fn assert_redirects_to_report(response: &Response) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/report")
    );
}
