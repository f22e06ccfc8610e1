// SPDX-License-Identifier: PMPL-1.0-or-later
//! SQLite persistence for users and chirps

use crate::models::{Chirp, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Database connection wrapper
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and make sure the schema exists.
    ///
    /// An in-memory URL is pinned to a single long-lived connection, since
    /// every new SQLite connection would otherwise open an empty database.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        Self::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Initialize database schema
    async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BLOB PRIMARY KEY NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chirps (
                id BLOB PRIMARY KEY NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                body TEXT NOT NULL,
                user_id BLOB NOT NULL REFERENCES users (id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS chirps_created_at_idx ON chirps (created_at)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Create a new user
    pub async fn create_user(&self, email: &str) -> Result<User, sqlx::Error> {
        let user = User::new(email.to_string());

        sqlx::query("INSERT INTO users (id, created_at, updated_at, email) VALUES (?, ?, ?, ?)")
            .bind(user.id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(&user.email)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, email FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete every user. Their chirps go with them.
    pub async fn delete_all_users(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        debug!(deleted = result.rows_affected(), "Users deleted");
        Ok(result.rows_affected())
    }

    /// Create a new chirp. Fails with a foreign-key violation when the
    /// author does not exist.
    pub async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, sqlx::Error> {
        let chirp = Chirp::new(body.to_string(), user_id);

        sqlx::query(
            "INSERT INTO chirps (id, created_at, updated_at, body, user_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chirp.id)
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .bind(&chirp.body)
        .bind(chirp.user_id)
        .execute(&self.pool)
        .await?;

        debug!(chirp_id = %chirp.id, user_id = %user_id, "Chirp created");
        Ok(chirp)
    }

    /// Get chirp by ID
    pub async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, sqlx::Error> {
        sqlx::query_as::<_, Chirp>(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All chirps, oldest first
    pub async fn list_chirps(&self) -> Result<Vec<Chirp>, sqlx::Error> {
        sqlx::query_as::<_, Chirp>(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Count stored users
    pub async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    /// Close the pool. Later calls fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
