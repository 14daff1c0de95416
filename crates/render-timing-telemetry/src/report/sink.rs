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

use super::TimingReport;
use std::fmt::Debug;
use std::io::Write;
use std::sync::Mutex;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "render_timing";

/// Destination of periodic timing reports.
pub trait ReportSink: Send + Sync + Debug {
    /// Delivers one report.
    fn emit(&self, report: &TimingReport);
}

/// Writes every report line through the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&self, report: &TimingReport) {
        for line in report.lines() {
            log::info!(target: LOG_TARGET, "{line}");
        }
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<TimingReport>>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far.
    pub fn reports(&self) -> Vec<TimingReport> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// All lines received so far, flattened across reports.
    pub fn lines(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .flat_map(TimingReport::lines)
            .collect()
    }

    /// Forgets every stored report.
    pub fn clear(&self) {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, report: &TimingReport) {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(report.clone());
    }
}

/// Serialises each report as one JSON object per line, flushing after each.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn emit(&self, report: &TimingReport) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let result = serde_json::to_writer(&mut *writer, report)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());
        if let Err(e) = result {
            log::warn!("Failed to write timing report #{}: {}", report.sequence, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TimingReport {
        TimingReport {
            sequence: 7,
            gpu_time_ms: Some(1.5),
            shaders: vec!["Shader(Fragment=F) took 1ms this frame".to_string()],
        }
    }

    #[test]
    fn memory_sink_keeps_reports() {
        let sink = MemorySink::new();
        sink.emit(&report());
        sink.emit(&report());

        assert_eq!(sink.reports().len(), 2);
        assert_eq!(sink.lines().len(), 4);

        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn json_lines_sink_writes_one_object_per_report() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.emit(&report());
        sink.emit(&report());

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: TimingReport = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, report());
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_lines_sink_flushes_buffered_writers() {
        let target = SharedBuffer::default();
        let sink = JsonLinesSink::new(std::io::BufWriter::new(target.clone()));

        sink.emit(&report());

        let written = String::from_utf8(target.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written.lines().count(), 1, "report visible before the sink is dropped");
    }
}
