// SPDX-License-Identifier: PMPL-1.0-or-later
//! Data models for users and chirps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Email address (unique)
    pub email: String,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email,
        }
    }
}

/// Short post owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chirp {
    /// Unique chirp identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Sanitized body text
    pub body: String,
    /// Author reference
    pub user_id: Uuid,
}

impl Chirp {
    /// Create a new chirp with a fresh identifier
    pub fn new(body: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body,
            user_id,
        }
    }
}
