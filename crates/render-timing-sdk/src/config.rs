// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Render timing configuration.

use anyhow::{Context, Result};
use render_timing_core::CapabilityPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Report period used when the configured one is unusable.
pub const DEFAULT_REPORT_INTERVAL_SECS: f64 = 1.0;

/// Everything a [`RenderTimingContext`](crate::RenderTimingContext) can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTimingConfig {
    /// Periodically log the collected timings. Honored only when an agent is created.
    pub log_timing: bool,
    /// Seconds between two timing reports.
    pub report_interval_secs: f64,
    /// When the real timer may be used.
    pub policy: CapabilityPolicy,
    /// `env_logger` filter applied by [`init_logging`](crate::init_logging).
    pub log_filter: Option<String>,
}

impl Default for RenderTimingConfig {
    fn default() -> Self {
        Self {
            log_timing: true,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            policy: CapabilityPolicy::default(),
            log_filter: None,
        }
    }
}

impl RenderTimingConfig {
    /// Parses a JSON configuration. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse render timing configuration")
    }

    /// Loads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read render timing configuration {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write render timing configuration {}", path.display()))
    }

    /// The report period, falling back to one second for non-positive or
    /// non-finite settings.
    pub fn report_interval(&self) -> Duration {
        let secs = self.report_interval_secs;
        if secs.is_finite() && secs > 0.0 {
            Duration::try_from_secs_f64(secs)
                .unwrap_or(Duration::from_secs_f64(DEFAULT_REPORT_INTERVAL_SECS))
        } else {
            log::warn!(
                "Ignoring report interval of {secs}s, using {DEFAULT_REPORT_INTERVAL_SECS}s"
            );
            Duration::from_secs_f64(DEFAULT_REPORT_INTERVAL_SECS)
        }
    }
}
