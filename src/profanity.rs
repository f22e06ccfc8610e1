// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Banned-word masking for chirp bodies.
//!
//! Text is split on single spaces only. A token is banned when its
//! lowercase form equals a configured word exactly, so `"Fornax"` matches
//! but `"fornax,"` and `"fornaxx"` do not.

use std::collections::HashSet;

/// Replacement for every banned token.
pub const MASK: &str = "****";

/// Exact-token profanity filter.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    banned: HashSet<String>,
}

impl ProfanityFilter {
    /// Create a filter from a word list. Words are lower-cased on the way in.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            banned: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_banned(&self, token: &str) -> bool {
        self.banned.contains(&token.to_lowercase())
    }

    /// True if any space-delimited token is a banned word.
    pub fn detect(&self, text: &str) -> bool {
        text.split(' ').any(|token| self.is_banned(token))
    }

    /// Copy of `text` with each banned token replaced by [`MASK`].
    pub fn sanitize(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| if self.is_banned(token) { MASK } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
