// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Runtime knobs for signal acquisition.
//!
//! Scoring weights and thresholds are fixed and deliberately absent here.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Detector configuration, usually passed as JSON from the host app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Bytes read from each `/proc` driver file
    pub proc_read_limit: usize,
    /// Maximum number of running services requested from the host
    pub running_service_limit: usize,
    pub getprop_path: String,
    pub getprop_timeout_ms: u64,
    pub log_level: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            proc_read_limit: 2048,
            running_service_limit: 50,
            getprop_path: "getprop".to_string(),
            getprop_timeout_ms: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl DetectorConfig {
    /// Parse a JSON config, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed detector config: {}", e);
                Self::default()
            }
        }
    }

    pub fn getprop_timeout(&self) -> Duration {
        Duration::from_millis(self.getprop_timeout_ms)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
