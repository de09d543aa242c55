//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use drivebox_auth::SessionClaims;
use drivebox_core::config::AppConfig;
use drivebox_core::result::AppResult;
use drivebox_core::traits::{BlobStore, ByteStream, StoredBlob};
use drivebox_storage::LocalBlobStore;

/// Blob store wrapper that records every delete call so tests can assert
/// batching and exactly-once deletion.
#[derive(Debug)]
pub struct RecordingBlobStore {
    inner: LocalBlobStore,
    /// One entry per delete call, each holding the keys of that batch.
    pub delete_calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingBlobStore {
    pub fn new(inner: LocalBlobStore) -> Self {
        Self {
            inner,
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    /// All keys deleted so far, across every call.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    fn provider_type(&self) -> &str {
        "recording"
    }

    fn url_prefix(&self) -> &str {
        self.inner.url_prefix()
    }

    async fn store(&self, name: &str, data: Bytes) -> AppResult<StoredBlob> {
        self.inner.store(name, data).await
    }

    async fn fetch(&self, key: &str) -> AppResult<ByteStream> {
        self.inner.fetch(key).await
    }

    async fn delete(&self, keys: &[String]) -> AppResult<()> {
        self.delete_calls.lock().unwrap().push(keys.to_vec());
        self.inner.delete(keys).await
    }

    async fn rename(&self, key: &str, new_name: &str) -> AppResult<String> {
        self.inner.rename(key, new_name).await
    }
}

/// A parsed HTTP response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Recording blob store shared with the application
    pub blob: Arc<RecordingBlobStore>,
    _blob_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let mut config = AppConfig::load_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        let db_pool = drivebox_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        drivebox_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");
        let local = LocalBlobStore::new(blob_dir.path(), &config.blob.public_url_prefix)
            .await
            .expect("Failed to init blob store");
        let blob = Arc::new(RecordingBlobStore::new(local));

        let state = drivebox_api::assemble_state(
            config.clone(),
            db_pool.clone(),
            blob.clone() as Arc<dyn BlobStore>,
        );
        let router = drivebox_api::build_router(state);

        Self {
            router,
            db_pool,
            config,
            blob,
            _blob_dir: blob_dir,
        }
    }

    async fn clean_database(pool: &PgPool) {
        for table in ["file_shares", "files", "folders"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Mint a session token for a test user, signed with the fixture
    /// secret.
    pub fn session_token(&self, user_id: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iss: None,
            exp: now + 3600,
            iat: Some(now),
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(
                self.config.auth.session_secret.as_bytes(),
            ),
        )
        .expect("Failed to encode session token")
    }

    /// Issue a request against the router and parse the JSON response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Issue a request and return the raw response for header/byte
    /// assertions.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
    ) -> http::Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("Failed to build request"))
            .await
            .expect("Request failed")
    }

    /// Onboard a user and return their root folder id.
    pub async fn onboard(&self, token: &str) -> Uuid {
        let response = self.request("POST", "/api/drive", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK, "onboarding failed");
        response.body["data"]["id"]
            .as_str()
            .expect("root id")
            .parse()
            .expect("root id is a uuid")
    }

    /// Create a folder through the API and return its id.
    pub async fn create_folder(&self, token: &str, parent_id: Uuid, name: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "create folder failed");
        response.body["data"]["id"]
            .as_str()
            .expect("folder id")
            .parse()
            .expect("folder id is a uuid")
    }

    /// Seed a file: store a real blob of `size` zero bytes and insert the
    /// record directly, appended at the end of sibling order.
    pub async fn seed_file(
        &self,
        owner_id: &str,
        parent_id: Uuid,
        name: &str,
        size: i64,
    ) -> Uuid {
        let blob = self
            .blob
            .store(name, Bytes::from(vec![0u8; size as usize]))
            .await
            .expect("Failed to store blob");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO files (owner_id, name, size_bytes, url, position, parent_id) \
             VALUES ($1, $2, $3, $4, \
                     (SELECT COALESCE(MAX(position), 0) + 1 FROM files WHERE parent_id = $5), \
                     $5) \
             RETURNING id",
        )
        .bind(owner_id)
        .bind(name)
        .bind(size)
        .bind(&blob.url)
        .bind(parent_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert file")
    }

    /// Count rows matching a parent in one of the tree tables.
    pub async fn count_rows(&self, table: &str, column: &str, id: Uuid) -> i64 {
        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE {column} = $1"
        ))
        .bind(id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to count rows")
    }
}
