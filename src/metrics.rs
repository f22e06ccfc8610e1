// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Asset hit counter.
//!
//! The counter lives in a private Prometheus registry so the same value can
//! back both the admin page and the `/metrics` exposition endpoint.

use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

/// Lock-free counter of requests served through the asset path.
#[derive(Clone)]
pub struct HitCounter {
    hits: IntCounter,
    registry: Registry,
}

impl HitCounter {
    /// Create a zeroed counter registered in its own registry.
    pub fn new() -> prometheus::Result<Self> {
        let hits = IntCounter::with_opts(Opts::new(
            "chirpy_fileserver_hits",
            "Requests routed through the asset file server since the last reset",
        ))?;
        let registry = Registry::new();
        registry.register(Box::new(hits.clone()))?;

        Ok(Self { hits, registry })
    }

    /// Add one hit.
    pub fn increment(&self) {
        self.hits.inc();
    }

    /// Current number of hits.
    pub fn read(&self) -> u64 {
        self.hits.get()
    }

    /// Set the counter back to zero.
    pub fn reset(&self) {
        self.hits.reset();
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
