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

//! # Render Timing Agents
//!
//! Wires a [`FrameTimer`](render_timing_core::FrameTimer) to the host's
//! per-frame execution points.
//!
//! - [`scheduler`]: the "end of frame" / "every N seconds" seam, with a manual
//!   scheduler for simulations and tests and a wall-clock one for game loops.
//! - [`timing_agent`]: the agent activating and cancelling those callbacks,
//!   guarded by a single-instance slot.

#![warn(missing_docs)]

pub mod scheduler;
pub mod timing_agent;

pub use scheduler::{FrameLoopScheduler, FrameScheduler, ManualScheduler, ScheduledTask, TaskId};
pub use timing_agent::{InstanceSlot, RenderTimingAgent, DEFAULT_REPORT_INTERVAL};
