//! Persisted key-value store
//!
//! SQLite-backed local storage for client-side values such as the bearer
//! token. The API client only ever reads from it; writes come from the CLI
//! or the embedding application.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::TokenProvider;
use crate::config::default_store_path;
use crate::error::{ApiError, ApiResult};

/// Key under which the bearer token is stored
pub const TOKEN_KEY: &str = "token";

/// Local key-value storage backed by SQLite
#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> ApiResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::TokenStore(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open the store in the default location (user data directory)
    pub fn open_default() -> ApiResult<Self> {
        Self::open(default_store_path())
    }

    /// Open a throwaway store that lives only in memory
    pub fn open_in_memory() -> ApiResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> ApiResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ApiError::TokenStore("store lock poisoned".to_string()))
    }

    /// Read a value
    pub fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a value
    pub fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Delete a value, returning whether it existed
    pub fn remove(&self, key: &str) -> ApiResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    pub fn token(&self) -> ApiResult<Option<String>> {
        self.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> ApiResult<()> {
        self.set(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> ApiResult<bool> {
        self.remove(TOKEN_KEY)
    }
}

/// Token provider that reads the `token` key from a [`LocalStore`] on every request
#[derive(Clone)]
pub struct StoredToken {
    store: LocalStore,
}

impl StoredToken {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }
}

#[async_trait]
impl TokenProvider for StoredToken {
    async fn token(&self) -> ApiResult<Option<String>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.token())
            .await
            .map_err(|e| ApiError::TokenStore(format!("Token lookup task failed: {}", e)))?
    }
}
