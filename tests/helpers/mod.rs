#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use boomabrovers::{AppState, Config};
use boomabrovers_contact::{Command, Notifier, Query};
use boomabrovers_notification::{
    ContactNotifier, Email, EmailConfig, EmailService, Mailer, NotificationError,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const ADMIN_ADDRESS: &str = "office@boomabrovers.localhost";

pub struct TestApp {
    pub router: Router,
    pub write_pool: SqlitePool,
    pub read_pool: SqlitePool,
    _dir: TempDir,
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<Email>>>,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email);

        Ok(())
    }
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(ContactNotifier::new(self.clone(), ADMIN_ADDRESS))
    }
}

/// Real SMTP notifier aimed at a port nobody listens on.
pub async fn unreachable_notifier() -> anyhow::Result<Arc<dyn Notifier>> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let service = EmailService::new(&EmailConfig {
        smtp_host: "127.0.0.1".to_owned(),
        smtp_port: port,
        ..Default::default()
    })?;

    Ok(Arc::new(ContactNotifier::new(service, ADMIN_ADDRESS)))
}

pub fn config(admin_token: Option<&str>) -> Config {
    let mut config = Config::default();
    config.admin.api_token = admin_token.map(str::to_owned);
    config.email.admin_address = ADMIN_ADDRESS.to_owned();

    config
}

pub async fn setup_app(config: Config, notifier: Arc<dyn Notifier>) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_string_lossy());

    let write_pool = boomabrovers::db::create_write_pool(&url).await?;
    boomabrovers::db::migrate(&write_pool).await?;
    let read_pool = boomabrovers::db::create_read_pool(&url, 2).await?;

    let router = boomabrovers::router(AppState {
        config,
        command: Command::new(write_pool.clone(), notifier),
        query: Query(read_pool.clone()),
        pool: read_pool.clone(),
    });

    Ok(TestApp {
        router,
        write_pool,
        read_pool,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Body>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = self
            .router
            .clone()
            .oneshot(builder.body(body.unwrap_or_else(Body::empty))?)
            .await?;

        let status = res.status();
        let bytes = res.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    pub async fn post_contact(&self, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.request(
            "POST",
            "/api/contact",
            None,
            Some(Body::from(serde_json::to_vec(&body)?)),
        )
        .await
    }

    pub async fn list(&self) -> anyhow::Result<(StatusCode, Value)> {
        self.request("GET", "/api/contact", Some(ADMIN_TOKEN), None)
            .await
    }

    pub async fn patch_status(&self, id: &str, status: &str) -> anyhow::Result<(StatusCode, Value)> {
        let body = serde_json::json!({ "status": status });

        self.request(
            "PATCH",
            &format!("/api/contact/{id}/status"),
            Some(ADMIN_TOKEN),
            Some(Body::from(serde_json::to_vec(&body)?)),
        )
        .await
    }
}
