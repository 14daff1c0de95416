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

//! Aggregate frame timing and the per-frame snapshot handed to consumers.

use super::record::ShaderTimingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The measured GPU time of the most recently completed frame.
///
/// Holds NaN when timing is unsupported or the native layer had nothing to
/// report. Two unavailable values compare equal. Serialized as an optional
/// number, `null` when unavailable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub struct FrameGpuTime(f64);

impl FrameGpuTime {
    /// The designated "unavailable" value.
    pub const UNAVAILABLE: FrameGpuTime = FrameGpuTime(f64::NAN);

    /// Wraps a duration in milliseconds. Negative and non-finite inputs are unavailable.
    pub fn from_millis(ms: f64) -> Self {
        if ms.is_finite() && ms >= 0.0 {
            Self(ms)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Interprets the value returned by the native `get_last_frame_gpu_time` entry point.
    pub fn from_native(ms: f32) -> Self {
        Self::from_millis(f64::from(ms))
    }

    /// Returns `true` if a measurement is present.
    pub fn is_available(self) -> bool {
        !self.0.is_nan()
    }

    /// Returns the measurement in milliseconds, if present.
    pub fn as_millis(self) -> Option<f64> {
        self.is_available().then_some(self.0)
    }

    /// Returns the raw value, NaN when unavailable.
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Default for FrameGpuTime {
    fn default() -> Self {
        Self::UNAVAILABLE
    }
}

impl From<Option<f64>> for FrameGpuTime {
    fn from(ms: Option<f64>) -> Self {
        ms.map_or(Self::UNAVAILABLE, Self::from_millis)
    }
}

impl From<FrameGpuTime> for Option<f64> {
    fn from(time: FrameGpuTime) -> Self {
        time.as_millis()
    }
}

impl PartialEq for FrameGpuTime {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_millis(), other.as_millis()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FrameGpuTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_millis() {
            Some(ms) => write!(f, "{ms}ms"),
            None => f.write_str("unavailable"),
        }
    }
}

/// Everything collected for one completed frame.
///
/// Consumers always receive an owned copy; mutating it has no effect on the
/// collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTimings {
    /// Number of native collections performed when this snapshot was taken.
    /// Zero means nothing has been collected yet.
    pub sequence: u64,
    /// Aggregate GPU time of the frame.
    pub gpu_time: FrameGpuTime,
    /// Per-shader records, in the order the native layer reported them.
    pub shaders: Vec<ShaderTimingRecord>,
}

impl FrameTimings {
    /// Sum of all per-shader times, in milliseconds.
    pub fn total_shader_time_ms(&self) -> f64 {
        self.shaders.iter().map(|s| s.time_ms).sum()
    }

    /// The most expensive shader record of the frame, if any.
    pub fn slowest(&self) -> Option<&ShaderTimingRecord> {
        self.shaders
            .iter()
            .max_by(|a, b| a.time_ms.total_cmp(&b.time_ms))
    }

    /// Returns `true` if the frame carries neither a GPU time nor shader records.
    pub fn is_empty(&self) -> bool {
        !self.gpu_time.is_available() && self.shaders.is_empty()
    }
}
