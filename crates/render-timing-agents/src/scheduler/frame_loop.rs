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

use super::{FrameScheduler, ManualScheduler, ScheduledTask, TaskId};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A scheduler for hosts with a plain game loop.
///
/// The host calls [`frame_completed`](Self::frame_completed) once per frame,
/// after submitting the frame's GPU work. Periodic tasks follow wall-clock time
/// measured between those calls.
#[derive(Debug)]
pub struct FrameLoopScheduler {
    inner: ManualScheduler,
    last_frame: Mutex<Instant>,
}

impl FrameLoopScheduler {
    /// A scheduler whose clock starts now.
    pub fn new() -> Self {
        Self {
            inner: ManualScheduler::new(),
            last_frame: Mutex::new(Instant::now()),
        }
    }

    /// Runs end-of-frame tasks, then any periodic task that came due.
    pub fn frame_completed(&self) {
        self.inner.end_frame();

        let elapsed = {
            let mut last = self.last_frame.lock().unwrap_or_else(|e| e.into_inner());
            let now = Instant::now();
            let elapsed = now.duration_since(*last);
            *last = now;
            elapsed
        };
        self.inner.advance(elapsed);
    }

    /// Wall-clock time accounted so far.
    pub fn elapsed(&self) -> Duration {
        self.inner.now()
    }
}

impl Default for FrameLoopScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameLoopScheduler {
    fn at_end_of_frame(&self, task: ScheduledTask) -> TaskId {
        self.inner.at_end_of_frame(task)
    }

    fn every(&self, interval: Duration, task: ScheduledTask) -> TaskId {
        self.inner.every(interval, task)
    }

    fn cancel(&self, id: TaskId) -> bool {
        self.inner.cancel(id)
    }
}
