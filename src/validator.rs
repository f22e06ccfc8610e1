// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirp body validator.
//!
//! Implements the checks applied to every chirp before it is stored:
//! - Length limit, measured in characters on the raw body
//! - Profanity masking of whole-token matches

use crate::config::{ValidationConfig, MAX_CHIRP_LENGTH};
use crate::profanity::ProfanityFilter;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("too long")]
    TooLong { length: usize, max: usize },
}

/// Chirp body validator.
#[derive(Debug, Clone)]
pub struct ChirpValidator {
    max_length: usize,
    filter: ProfanityFilter,
}

impl ChirpValidator {
    /// Create a new validator with the given configuration.
    ///
    /// The configured limit is clamped to [`MAX_CHIRP_LENGTH`].
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            max_length: config.max_chirp_length.min(MAX_CHIRP_LENGTH),
            filter: ProfanityFilter::new(&config.banned_words),
        }
    }

    /// Check the length of `raw` and return its sanitized form.
    ///
    /// The body is returned untouched when the filter detects nothing.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let length = raw.chars().count();
        if length > self.max_length {
            debug!(length, max = self.max_length, "Chirp too long");
            return Err(ValidationError::TooLong {
                length,
                max: self.max_length,
            });
        }

        if self.filter.detect(raw) {
            debug!("Chirp contains banned words, masking");
            Ok(self.filter.sanitize(raw))
        } else {
            Ok(raw.to_string())
        }
    }
}
