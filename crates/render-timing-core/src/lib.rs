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

//! # Render Timing Core
//!
//! Foundational crate containing the data model, the capability policy and the
//! interface contracts shared by every render timing crate.
//!
//! The actual GPU timer lives in a native plugin. This crate only describes the
//! boundary toward it ([`native::NativeTimingApi`]), how its fixed-layout records
//! are decoded ([`native::decode_records`]), and how the timer backend is chosen
//! for the running platform ([`capability`]).

#![warn(missing_docs)]

pub mod capability;
pub mod error;
pub mod native;
pub mod stream;
pub mod timer;
pub mod timing;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use capability::{
    BuildFlavor, CapabilityPolicy, CapabilitySelector, GraphicsApi, Platform, PlatformInfo,
    PlatformProbe, TimerBackend,
};
pub use error::{ParseError, TimingError, TimingResult};
pub use native::{FrameEndToken, NativeSession, NativeTimingApi, NativeTimingArray};
pub use stream::{RenderCommandStream, FRAME_END_EVENT_ID};
pub use timer::FrameTimer;
pub use timing::{FrameGpuTime, FrameTimings, ShaderStage, ShaderTimingRecord};
