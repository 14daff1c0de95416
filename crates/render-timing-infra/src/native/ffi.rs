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

//! Raw declarations of the plugin's exported entry points.

#![allow(non_snake_case)]

use render_timing_core::native::{LogCallbackFn, NativeShaderTime, RenderingEventFn};

// iOS links the plugin statically into the application binary.
#[cfg_attr(not(target_os = "ios"), link(name = "RenderTimingPlugin"))]
extern "C" {
    pub fn SetDebugFunction(callback: Option<LogCallbackFn>);

    #[cfg(target_os = "ios")]
    pub fn InitializeRenderTiming();

    pub fn GetOnFrameEndFunction() -> Option<RenderingEventFn>;

    pub fn GetLastFrameShaderTimings(
        out_times: *mut *const NativeShaderTime,
        out_count: *mut i32,
    ) -> bool;

    pub fn GetLastFrameGpuTime() -> f32;
}
