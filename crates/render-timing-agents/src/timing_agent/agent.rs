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

use super::slot::InstanceSlot;
use crate::scheduler::{FrameScheduler, TaskId};
use render_timing_core::{FrameTimer, FrameTimings, RenderCommandStream, TimerBackend};
use render_timing_telemetry::TimingReporter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default period of the reporting tick.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Handles of one activation period.
#[derive(Debug)]
struct Activation {
    alive: Arc<AtomicBool>,
    frame_task: TaskId,
    report_task: Option<TaskId>,
}

/// Drives a [`FrameTimer`] from the host's frame schedule.
///
/// While active, the agent signals the frame end and fetches results once per
/// frame, and, if a reporter was configured, forwards the cached results every
/// report interval. Deactivation cancels both callbacks; nothing they would
/// have done happens afterwards.
///
/// At most one agent sharing the same [`InstanceSlot`] may be active at a
/// time. Activating a second one panics.
pub struct RenderTimingAgent<T: FrameTimer + 'static> {
    timer: Arc<Mutex<T>>,
    scheduler: Arc<dyn FrameScheduler>,
    stream: Arc<dyn RenderCommandStream>,
    reporter: Option<TimingReporter>,
    report_interval: Duration,
    slot: &'static InstanceSlot,
    activation: Option<Activation>,
}

impl<T: FrameTimer + 'static> RenderTimingAgent<T> {
    /// Creates an inactive agent bound to the process-wide slot, without
    /// periodic reporting.
    pub fn new(
        timer: T,
        scheduler: Arc<dyn FrameScheduler>,
        stream: Arc<dyn RenderCommandStream>,
    ) -> Self {
        Self {
            timer: Arc::new(Mutex::new(timer)),
            scheduler,
            stream,
            reporter: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
            slot: InstanceSlot::process(),
            activation: None,
        }
    }

    /// Enables periodic reporting through `reporter` every `interval`.
    ///
    /// Only taken into account by the next activation.
    pub fn with_reporting(mut self, reporter: TimingReporter, interval: Duration) -> Self {
        self.reporter = Some(reporter);
        self.report_interval = interval;
        self
    }

    /// Uses `slot` instead of the process-wide one for the single-instance rule.
    pub fn with_slot(mut self, slot: &'static InstanceSlot) -> Self {
        self.slot = slot;
        self
    }

    fn timer(&self) -> MutexGuard<'_, T> {
        lock(&self.timer)
    }

    /// Starts per-frame collection and, if configured, periodic reporting.
    /// Does nothing if already active.
    ///
    /// # Panics
    ///
    /// Panics if another agent holding the same slot is active.
    pub fn on_enable(&mut self) {
        if self.activation.is_some() {
            return;
        }
        assert!(
            self.slot.claim(),
            "only one RenderTimingAgent may be active at a time"
        );

        let alive = Arc::new(AtomicBool::new(true));

        let frame_task = {
            let alive = alive.clone();
            let timer = self.timer.clone();
            let stream = self.stream.clone();
            self.scheduler.at_end_of_frame(Box::new(move || {
                if !alive.load(Ordering::Acquire) {
                    return;
                }
                let mut timer = lock(&timer);
                timer.signal_frame_end(stream.as_ref());
                timer.fetch_results();
            }))
        };

        let report_task = self.reporter.clone().map(|reporter| {
            let alive = alive.clone();
            let timer = self.timer.clone();
            self.scheduler.every(
                self.report_interval,
                Box::new(move || {
                    if !alive.load(Ordering::Acquire) {
                        return;
                    }
                    let snapshot = lock(&timer).latest().clone();
                    reporter.report(&snapshot);
                }),
            )
        });

        log::debug!(
            "RenderTimingAgent enabled ({} timer, reporting {})",
            self.timer().backend(),
            if report_task.is_some() { "on" } else { "off" }
        );
        self.activation = Some(Activation {
            alive,
            frame_task,
            report_task,
        });
    }

    /// Stops every scheduled callback and releases the slot. Does nothing if
    /// inactive.
    pub fn on_disable(&mut self) {
        let Some(activation) = self.activation.take() else {
            return;
        };
        activation.alive.store(false, Ordering::Release);
        self.scheduler.cancel(activation.frame_task);
        if let Some(report_task) = activation.report_task {
            self.scheduler.cancel(report_task);
        }
        self.slot.release();
        log::debug!("RenderTimingAgent disabled");
    }

    /// Returns `true` between [`on_enable`](Self::on_enable) and
    /// [`on_disable`](Self::on_disable).
    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    /// The backend of the driven timer.
    pub fn backend(&self) -> TimerBackend {
        self.timer().backend()
    }

    /// A copy of the most recently collected results.
    pub fn timings(&self) -> FrameTimings {
        self.timer().latest().clone()
    }
}

fn lock<T>(timer: &Mutex<T>) -> MutexGuard<'_, T> {
    timer.lock().unwrap_or_else(|e| e.into_inner())
}

impl<T: FrameTimer + 'static> Drop for RenderTimingAgent<T> {
    fn drop(&mut self) {
        self.on_disable();
    }
}

impl<T: FrameTimer + 'static> std::fmt::Debug for RenderTimingAgent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTimingAgent")
            .field("active", &self.is_active())
            .field("reporting", &self.reporter.is_some())
            .field("report_interval", &self.report_interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use render_timing_core::testing::RecordingStream;
    use render_timing_telemetry::{FrameTimingCollector, MemorySink};

    fn agent(
        slot: &'static InstanceSlot,
    ) -> (
        RenderTimingAgent<FrameTimingCollector>,
        Arc<ManualScheduler>,
        Arc<MemorySink>,
    ) {
        let scheduler = Arc::new(ManualScheduler::new());
        let sink = Arc::new(MemorySink::new());
        let agent = RenderTimingAgent::new(
            FrameTimingCollector::null(),
            scheduler.clone(),
            Arc::new(RecordingStream::new()),
        )
        .with_reporting(TimingReporter::new(sink.clone()), DEFAULT_REPORT_INTERVAL)
        .with_slot(slot);
        (agent, scheduler, sink)
    }

    #[test]
    fn enable_registers_both_tasks() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        let (mut agent, scheduler, _) = agent(&SLOT);

        agent.on_enable();
        agent.on_enable();

        assert!(agent.is_active());
        assert_eq!(scheduler.pending_tasks(), 2);
        assert!(SLOT.is_claimed());
    }

    #[test]
    fn disable_cancels_everything_and_releases_the_slot() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        let (mut agent, scheduler, _) = agent(&SLOT);

        agent.on_enable();
        agent.on_disable();

        assert!(!agent.is_active());
        assert_eq!(scheduler.pending_tasks(), 0);
        assert!(!SLOT.is_claimed());
    }

    #[test]
    fn drop_releases_the_slot() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        {
            let (mut agent, _, _) = agent(&SLOT);
            agent.on_enable();
        }
        assert!(!SLOT.is_claimed());
    }

    #[test]
    fn frames_are_collected_while_active() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        let (mut agent, scheduler, _) = agent(&SLOT);

        agent.on_enable();
        scheduler.end_frame();
        scheduler.end_frame();

        assert_eq!(agent.timings().sequence, 2);
    }

    #[test]
    #[should_panic(expected = "only one RenderTimingAgent")]
    fn second_active_agent_panics() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        let (mut first, _, _) = agent(&SLOT);
        let (mut second, _, _) = agent(&SLOT);

        first.on_enable();
        second.on_enable();
    }

    #[test]
    fn reactivation_after_disable_is_allowed() {
        static SLOT: InstanceSlot = InstanceSlot::new();
        let (mut first, _, _) = agent(&SLOT);
        let (mut second, _, _) = agent(&SLOT);

        first.on_enable();
        first.on_disable();
        second.on_enable();

        assert!(second.is_active());
    }
}
