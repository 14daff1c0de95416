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

use super::{ReportSink, TimingReport};
use render_timing_core::FrameTimings;
use std::sync::Arc;

/// Turns cached frame timings into reports for a [`ReportSink`].
///
/// The reporter only reads snapshots handed to it; it never triggers a
/// collection.
#[derive(Debug, Clone)]
pub struct TimingReporter {
    sink: Arc<dyn ReportSink>,
}

impl TimingReporter {
    /// A reporter writing to `sink`.
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }

    /// Reports `timings`. Returns `false` when there was nothing to report.
    pub fn report(&self, timings: &FrameTimings) -> bool {
        let report = TimingReport::from_timings(timings);
        if report.is_empty() {
            log::trace!("No frame timings to report (sequence {})", timings.sequence);
            return false;
        }
        self.sink.emit(&report);
        true
    }
}
