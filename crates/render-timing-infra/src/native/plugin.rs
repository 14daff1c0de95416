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

use super::ffi;
use super::snapshot::snapshot_records;
use render_timing_core::native::{
    FrameEndToken, LogCallbackFn, NativeShaderTime, NativeTimingApi, NativeTimingArray,
};
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// The linked `RenderTimingPlugin` library.
///
/// There is one plugin per process; obtain it through
/// [`native_plugin`](super::native_plugin).
#[derive(Debug, Default)]
pub struct NativePlugin {
    registered: AtomicBool,
}

static SHARED: OnceLock<Arc<NativePlugin>> = OnceLock::new();

impl NativePlugin {
    pub(super) fn shared() -> Arc<NativePlugin> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(NativePlugin::default())))
    }

    fn assert_registered(&self, entry_point: &str) {
        assert!(
            self.registered.load(Ordering::Acquire),
            "RenderTimingPlugin::{entry_point} called before the log callback was registered"
        );
    }
}

impl NativeTimingApi for NativePlugin {
    fn register_log_callback(&self, callback: LogCallbackFn) {
        let already = self.registered.swap(true, Ordering::AcqRel);
        assert!(!already, "RenderTimingPlugin log callback registered twice");
        // SAFETY: the callback is a plain C function with the expected signature.
        unsafe { ffi::SetDebugFunction(Some(callback)) };
        log::debug!("RenderTimingPlugin log callback registered");
    }

    fn initialize(&self) {
        self.assert_registered("initialize");
        #[cfg(target_os = "ios")]
        {
            // SAFETY: no arguments; the plugin only sets up its Metal state.
            unsafe { ffi::InitializeRenderTiming() };
        }
    }

    fn frame_end_signal_token(&self) -> FrameEndToken {
        self.assert_registered("frame_end_signal_token");
        // SAFETY: returns a static function pointer owned by the plugin.
        let event = unsafe { ffi::GetOnFrameEndFunction() };
        if event.is_none() {
            log::warn!("RenderTimingPlugin returned no frame-end event");
        }
        FrameEndToken::new(event)
    }

    fn last_frame_shader_timings(&self) -> Option<NativeTimingArray> {
        self.assert_registered("last_frame_shader_timings");
        let mut times: *const NativeShaderTime = ptr::null();
        let mut count: i32 = 0;
        // SAFETY: both out-pointers reference live locals.
        let ok = unsafe { ffi::GetLastFrameShaderTimings(&mut times, &mut count) };
        if !ok {
            return None;
        }

        // A negative count is passed through for the decoder to reject.
        let len = usize::try_from(count).unwrap_or(0);
        if len == 0 {
            return Some(NativeTimingArray::new(Vec::new(), i64::from(count)));
        }
        if times.is_null() {
            log::warn!("RenderTimingPlugin reported {count} records but no array");
            return None;
        }

        // SAFETY: the plugin guarantees `count` contiguous records at `times`,
        // and NUL-terminated names behind their non-null pointers, all valid
        // until the next query. Both are copied out before returning.
        Some(unsafe { snapshot_records(slice::from_raw_parts(times, len)) })
    }

    fn last_frame_gpu_time(&self) -> f32 {
        self.assert_registered("last_frame_gpu_time");
        // SAFETY: no arguments, plain value return.
        unsafe { ffi::GetLastFrameGpuTime() }
    }
}
