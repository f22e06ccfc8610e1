// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Integration tests for the chirp pipeline below the HTTP layer.

use chirpy::{
    config::ValidationConfig,
    db::Database,
    metrics::HitCounter,
    validator::{ChirpValidator, ValidationError},
};
use std::sync::Arc;
use tokio_test::assert_err;

#[tokio::test]
async fn test_full_chirp_flow() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let validator = ChirpValidator::new(&ValidationConfig::default());

    let user = db.create_user("flow@example.com").await.unwrap();
    let cleaned = validator.validate("Fornax is a kerfuffle").unwrap();
    assert_eq!(cleaned, "**** is a ****");

    let chirp = db.create_chirp(&cleaned, user.id).await.unwrap();
    let stored = db.get_chirp(chirp.id).await.unwrap().unwrap();

    assert_eq!(stored.body, "**** is a ****");
    assert_eq!(stored.user_id, user.id);
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn test_custom_validation_config() {
    let validator = ChirpValidator::new(&ValidationConfig {
        max_chirp_length: 10,
        banned_words: vec!["Darn".to_string()],
    });

    assert_eq!(validator.validate("oh DARN it").unwrap(), "oh **** it");
    assert_eq!(
        validator.validate("eleven char"),
        Err(ValidationError::TooLong { length: 11, max: 10 })
    );
    // Default words no longer apply
    assert_eq!(validator.validate("kerfuffle").unwrap(), "kerfuffle");
}

#[tokio::test]
async fn test_clean_bodies_pass_through_untouched() {
    let validator = ChirpValidator::new(&ValidationConfig::default());

    for body in [
        "",
        "kerfufflebomb",
        "Double  spaced\ttabs\nand newlines stay as they are",
        "fornax, with a comma",
    ] {
        assert_eq!(validator.validate(body).unwrap(), body);
    }
}

#[tokio::test]
async fn test_orphan_chirp_rejected() {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    assert_err!(db.create_chirp("nobody wrote this", uuid::Uuid::new_v4()).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_from_tasks() {
    let counter = Arc::new(HitCounter::new().unwrap());

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move {
                for _ in 0..100 {
                    counter.increment();
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(counter.read(), 10_000);

    counter.reset();
    assert_eq!(counter.read(), 0);
}

#[tokio::test]
async fn test_reset_leaves_no_users() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let mut old_ids = Vec::new();
    for i in 0..5 {
        let user = db.create_user(&format!("user{i}@example.com")).await.unwrap();
        old_ids.push(user.id);
    }

    assert_eq!(db.delete_all_users().await.unwrap(), 5);
    assert_eq!(db.count_users().await.unwrap(), 0);

    // Same email, new identity
    let fresh = db.create_user("user0@example.com").await.unwrap();
    assert!(!old_ids.contains(&fresh.id));
    for id in old_ids {
        assert!(db.get_user(id).await.unwrap().is_none());
    }
}
