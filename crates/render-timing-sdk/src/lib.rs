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

//! The public-facing API for measuring per-frame GPU render time.
//!
//! Build a [`RenderTimingContext`] once, then create an agent bound to the
//! host's frame scheduler and render command stream:
//!
//! ```no_run
//! use render_timing_sdk::prelude::*;
//! use std::sync::Arc;
//!
//! init_logging(None);
//! let context = RenderTimingContext::new(
//!     RenderTimingConfig::default(),
//!     GraphicsApi::Direct3D11,
//!     BuildFlavor::Device,
//! );
//! let scheduler = Arc::new(FrameLoopScheduler::new());
//! let mut agent = context.agent(scheduler.clone(), Arc::new(ImmediateCommandStream::new()));
//! agent.on_enable();
//! loop {
//!     // ... submit the frame ...
//!     scheduler.frame_completed();
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod logging;

pub use config::{RenderTimingConfig, DEFAULT_REPORT_INTERVAL_SECS};
pub use context::RenderTimingContext;
pub use logging::init_logging;

/// The types most hosts need.
pub mod prelude {
    pub use crate::{init_logging, RenderTimingConfig, RenderTimingContext};
    pub use render_timing_agents::{
        FrameLoopScheduler, FrameScheduler, InstanceSlot, ManualScheduler, RenderTimingAgent,
    };
    pub use render_timing_core::{
        BuildFlavor, CapabilityPolicy, FrameGpuTime, FrameTimer, FrameTimings, GraphicsApi,
        Platform, PlatformInfo, RenderCommandStream, ShaderStage, ShaderTimingRecord,
        TimerBackend,
    };
    pub use render_timing_infra::ImmediateCommandStream;
    pub use render_timing_telemetry::{
        FrameTimingCollector, JsonLinesSink, LogSink, MemorySink, ReportSink, TimingReporter,
    };
}
