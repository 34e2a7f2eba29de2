#![allow(dead_code)]

use news_service::config::{CorsConfig, MongoConfig, NewsConfig};
use news_service::services::NewsDb;
use news_service::startup::Application;
use service_core::config::Config as CoreConfig;
use uuid::Uuid;

pub const ALLOWED_ORIGIN: &str = "http://localhost:8081";

/// Nothing listens on port 1, so server selection fails fast.
pub const UNREACHABLE_MONGODB_URI: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: NewsDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns against a real MongoDB (`TEST_MONGODB_URI`, default localhost).
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        Self::spawn_with_uri(&uri).await
    }

    /// Spawns with a store that can never be reached.
    pub async fn spawn_without_store() -> Self {
        Self::spawn_with_uri(UNREACHABLE_MONGODB_URI).await
    }

    async fn spawn_with_uri(uri: &str) -> Self {
        let db_name = format!("news_test_{}", Uuid::new_v4().simple());

        let config = NewsConfig {
            common: CoreConfig { port: 0 },
            service_name: "news-service".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            mongodb: MongoConfig {
                uri: uri.to_string(),
                database: db_name.clone(),
                collection: "news".to_string(),
            },
            cors: CorsConfig::default(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            db,
            db_name,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

pub fn assert_cors_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}
