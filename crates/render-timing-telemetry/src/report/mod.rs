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

//! Textual summaries of collected frame timings and where they are sent.

mod reporter;
mod sink;

pub use self::reporter::TimingReporter;
pub use self::sink::{JsonLinesSink, LogSink, MemorySink, ReportSink, LOG_TARGET};

use render_timing_core::FrameTimings;
use serde::{Deserialize, Serialize};

/// One periodic report, built from a [`FrameTimings`] snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Collection sequence number of the snapshot.
    pub sequence: u64,
    /// GPU time of the frame, when available.
    pub gpu_time_ms: Option<f64>,
    /// One summary line per shader record, in collection order.
    pub shaders: Vec<String>,
}

impl TimingReport {
    /// Builds the report for `timings`.
    pub fn from_timings(timings: &FrameTimings) -> Self {
        Self {
            sequence: timings.sequence,
            gpu_time_ms: timings.gpu_time.as_millis(),
            shaders: timings.shaders.iter().map(ToString::to_string).collect(),
        }
    }

    /// The report as console lines: the shader lines, then the GPU time line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.shaders.clone();
        if let Some(ms) = self.gpu_time_ms {
            lines.push(format!("GPU took {ms}ms last frame"));
        }
        lines
    }

    /// Returns `true` if the report would print nothing.
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty() && self.gpu_time_ms.is_none()
    }
}

/// The console lines summarising `timings`.
pub fn summary_lines(timings: &FrameTimings) -> Vec<String> {
    TimingReport::from_timings(timings).lines()
}
