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

//! The host scheduling seam: "run at end of frame" and "run every N seconds"
//! callbacks with explicit cancellation.

mod frame_loop;
mod manual;

pub use self::frame_loop::FrameLoopScheduler;
pub use self::manual::ManualScheduler;

use std::time::Duration;

/// A callback registered with a [`FrameScheduler`].
pub type ScheduledTask = Box<dyn FnMut() + Send>;

/// Identifies a registered task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

/// The host's per-frame execution points.
pub trait FrameScheduler: Send + Sync {
    /// Runs `task` at the end of every frame, after all GPU work of the frame
    /// has been submitted.
    fn at_end_of_frame(&self, task: ScheduledTask) -> TaskId;

    /// Runs `task` every `interval` of host time.
    fn every(&self, interval: Duration, task: ScheduledTask) -> TaskId;

    /// Unregisters a task. It will not run again, even if cancelled from
    /// inside another task of the same batch. Returns `false` for unknown ids.
    fn cancel(&self, id: TaskId) -> bool;
}
