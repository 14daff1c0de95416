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

use render_timing_core::testing::{noop_log_callback, FakeNativeApi, RecordingStream};
use render_timing_core::{
    BuildFlavor, CapabilityPolicy, CapabilitySelector, FrameTimer, GraphicsApi, NativeTimingApi,
    Platform, PlatformInfo, ShaderStage, ShaderTimingRecord, TimerBackend,
};
use render_timing_telemetry::{FrameTimingCollector, MemorySink, TimingReporter};
use std::sync::Arc;

fn selector(info: PlatformInfo, fake: &Arc<FakeNativeApi>) -> CapabilitySelector {
    CapabilitySelector::new(
        Box::new(info),
        CapabilityPolicy::default(),
        Some(fake.clone() as Arc<dyn NativeTimingApi>),
        noop_log_callback,
    )
}

fn record(vertex: &str, fragment: &str, time_ms: f64) -> ShaderTimingRecord {
    ShaderTimingRecord::default()
        .with_stage(ShaderStage::Vertex, vertex)
        .with_stage(ShaderStage::Fragment, fragment)
        .with_time_ms(time_ms)
}

#[test]
fn real_pipeline_from_selection_to_report() {
    let _ = env_logger::builder().is_test(true).try_init();

    // --- ARRANGE ---
    let fake = Arc::new(FakeNativeApi::new());
    let selector = selector(
        PlatformInfo::device(Platform::Android, GraphicsApi::OpenGlEs3).with_api_level(26),
        &fake,
    );
    let mut collector = FrameTimingCollector::from_selector(&selector);
    let stream = RecordingStream::new();
    let sink = Arc::new(MemorySink::new());
    let reporter = TimingReporter::new(sink.clone());

    // --- ACT ---
    // First frame: the plugin has nothing yet.
    collector.signal_frame_end(&stream);
    let first = collector.fetch_results();

    fake.set_frame(&[record("V", "F", 1.0), record("", "Frag1", 0.5)], 1.75);
    collector.signal_frame_end(&stream);
    let second = collector.fetch_results();
    reporter.report(collector.latest());

    // --- ASSERT ---
    assert_eq!(collector.backend(), TimerBackend::RealTimer);
    assert!(first.is_empty(), "no data before the first completed frame");
    assert_eq!(second.shaders.len(), 2);
    assert_eq!(second.total_shader_time_ms(), 1.5);
    assert_eq!(second.slowest(), Some(&record("V", "F", 1.0)));
    assert_eq!(
        sink.lines(),
        vec![
            "Shader(Vertex=V, Fragment=F) took 1ms this frame",
            "Shader(Fragment=Frag1) took 0.5ms this frame",
            "GPU took 1.75ms last frame",
        ]
    );
    assert_eq!(stream.issued(), 2);
}

#[test]
fn editor_build_collects_nothing_and_never_touches_native() {
    let fake = Arc::new(FakeNativeApi::new());
    let selector = selector(
        PlatformInfo::device(Platform::Windows, GraphicsApi::Direct3D11)
            .with_build(BuildFlavor::Editor),
        &fake,
    );
    let mut collector = FrameTimingCollector::from_selector(&selector);
    let stream = RecordingStream::new();

    for _ in 0..3 {
        collector.signal_frame_end(&stream);
        let timings = collector.fetch_results();
        assert!(timings.shaders.is_empty());
        assert!(!timings.gpu_time.is_available());
    }

    assert_eq!(collector.backend(), TimerBackend::NullTimer);
    assert_eq!(fake.total_calls(), 0);
    assert_eq!(stream.issued(), 0);
}
