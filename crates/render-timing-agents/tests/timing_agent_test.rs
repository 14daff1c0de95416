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

use render_timing_agents::{InstanceSlot, ManualScheduler, RenderTimingAgent};
use render_timing_core::testing::{noop_log_callback, FakeNativeApi, RecordingStream};
use render_timing_core::{NativeSession, Platform, ShaderStage, ShaderTimingRecord};
use render_timing_telemetry::{FrameTimingCollector, MemorySink, TimingReporter};
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(1);

struct Harness {
    agent: RenderTimingAgent<FrameTimingCollector>,
    scheduler: Arc<ManualScheduler>,
    stream: Arc<RecordingStream>,
    sink: Arc<MemorySink>,
    fake: Arc<FakeNativeApi>,
}

fn harness(slot: &'static InstanceSlot) -> Harness {
    let _ = env_logger::builder().is_test(true).try_init();

    let fake = Arc::new(FakeNativeApi::new());
    let session = NativeSession::open(fake.clone(), noop_log_callback, Platform::Android);
    let scheduler = Arc::new(ManualScheduler::new());
    let stream = Arc::new(RecordingStream::new());
    let sink = Arc::new(MemorySink::new());

    let agent = RenderTimingAgent::new(
        FrameTimingCollector::real(Arc::new(session)),
        scheduler.clone(),
        stream.clone(),
    )
    .with_reporting(TimingReporter::new(sink.clone()), INTERVAL)
    .with_slot(slot);

    Harness {
        agent,
        scheduler,
        stream,
        sink,
        fake,
    }
}

fn frag(name: &str, time_ms: f64) -> ShaderTimingRecord {
    ShaderTimingRecord::default()
        .with_stage(ShaderStage::Fragment, name)
        .with_time_ms(time_ms)
}

#[test]
fn active_agent_collects_every_frame_and_reports_every_interval() {
    static SLOT: InstanceSlot = InstanceSlot::new();

    // --- ARRANGE ---
    let mut h = harness(&SLOT);
    h.fake.set_frame(&[frag("Frag1", 2.5)], 3.0);

    // --- ACT ---
    h.agent.on_enable();
    for _ in 0..10 {
        h.scheduler.end_frame();
    }
    h.scheduler.advance(INTERVAL);

    // --- ASSERT ---
    assert_eq!(h.stream.issued(), 10, "one frame-end event per frame");
    assert_eq!(h.fake.shader_queries(), 10, "one fetch per frame");
    assert_eq!(
        h.sink.lines(),
        vec![
            "Shader(Fragment=Frag1) took 2.5ms this frame",
            "GPU took 3ms last frame",
        ]
    );
}

#[test]
fn report_tick_only_reads_cached_results() {
    static SLOT: InstanceSlot = InstanceSlot::new();

    let mut h = harness(&SLOT);
    h.fake.set_frame(&[frag("A", 1.0)], 1.0);
    h.agent.on_enable();
    h.scheduler.end_frame();
    let queries_before = h.fake.total_calls();

    for _ in 0..3 {
        h.scheduler.advance(INTERVAL);
    }

    assert_eq!(h.sink.reports().len(), 3);
    assert_eq!(
        h.fake.total_calls(),
        queries_before,
        "the report tick must not query the native layer"
    );
}

#[test]
fn deactivated_agent_logs_nothing_and_makes_no_native_calls() {
    static SLOT: InstanceSlot = InstanceSlot::new();

    // --- ARRANGE ---
    let mut h = harness(&SLOT);
    h.fake.set_frame(&[frag("A", 1.0)], 1.0);
    h.agent.on_enable();
    h.scheduler.end_frame();
    h.scheduler.advance(INTERVAL);
    assert!(!h.sink.lines().is_empty(), "reporting works while active");

    // --- ACT ---
    h.agent.on_disable();
    h.sink.clear();
    let calls_before = h.fake.total_calls();
    let events_before = h.stream.issued();
    for _ in 0..5 {
        h.scheduler.end_frame();
    }
    h.scheduler.advance(INTERVAL * 5);

    // --- ASSERT ---
    assert!(h.sink.lines().is_empty(), "no report after deactivation");
    assert_eq!(h.fake.total_calls(), calls_before);
    assert_eq!(h.stream.issued(), events_before);
}

#[test]
fn reactivation_resumes_collection() {
    static SLOT: InstanceSlot = InstanceSlot::new();

    let mut h = harness(&SLOT);
    h.agent.on_enable();
    h.agent.on_disable();
    h.fake.set_frame(&[frag("B", 4.0)], 4.0);

    h.agent.on_enable();
    h.scheduler.end_frame();

    assert_eq!(h.agent.timings().shaders, vec![frag("B", 4.0)]);
}
