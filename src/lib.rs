// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirpy
//!
//! A small chirp service covering the request pipeline around short posts:
//!
//! - Chirp length limit (140 characters default)
//! - Whole-token profanity masking
//! - User and chirp persistence in SQLite
//! - Asset hit counter with an admin page and reset

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod profanity;
pub mod server;
pub mod validator;

pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use metrics::HitCounter;
pub use profanity::ProfanityFilter;
pub use validator::{ChirpValidator, ValidationError};
