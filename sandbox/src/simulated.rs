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

//! A stand-in for the native plugin producing plausible, slowly varying timings.

use render_timing_core::native::{
    encode_records, FrameEndToken, LogCallbackFn, NativeShaderTime, NativeTimingApi,
    NativeTimingArray, RenderingEventFn,
};
use std::collections::HashMap;
use std::ffi::{c_char, c_int, CString};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static FRAMES_ENDED: AtomicU64 = AtomicU64::new(0);

extern "C" fn on_frame_end(_event_id: c_int) {
    FRAMES_ENDED.fetch_add(1, Ordering::Relaxed);
}

/// `(vertex, fragment, base cost in ms)` of each simulated draw.
const PROGRAMS: [(&str, &str, f64); 3] = [
    ("Standard_VS", "Standard_PS", 1.2),
    ("Skybox_VS", "Skybox_PS", 0.3),
    ("UI_VS", "UI_PS", 0.15),
];

const FIXED_OVERHEAD_MS: f64 = 0.4;

#[derive(Debug)]
pub struct SimulatedPlugin {
    registered: AtomicBool,
    names: HashMap<usize, String>,
    addresses: Vec<(usize, usize)>,
}

impl SimulatedPlugin {
    pub fn new() -> Self {
        let mut names = HashMap::new();
        let mut addresses = Vec::new();
        for (i, (vertex, fragment, _)) in PROGRAMS.iter().enumerate() {
            let vertex_address = 0x100 * (i + 1);
            let fragment_address = vertex_address + 0x10;
            names.insert(vertex_address, vertex.to_string());
            names.insert(fragment_address, fragment.to_string());
            addresses.push((vertex_address, fragment_address));
        }
        Self {
            registered: AtomicBool::new(false),
            names,
            addresses,
        }
    }

    /// Completed frames, accounting for one frame of GPU latency.
    fn completed_frames(&self) -> u64 {
        FRAMES_ENDED.load(Ordering::Relaxed).saturating_sub(1)
    }

    fn frame_times(&self, frame: u64) -> Vec<f64> {
        let wobble = 1.0 + 0.05 * (frame % 7) as f64;
        PROGRAMS.iter().map(|(_, _, base)| base * wobble).collect()
    }

    fn assert_registered(&self) {
        assert!(
            self.registered.load(Ordering::Acquire),
            "simulated plugin used before the log callback was registered"
        );
    }
}

impl NativeTimingApi for SimulatedPlugin {
    fn register_log_callback(&self, callback: LogCallbackFn) {
        assert!(
            !self.registered.swap(true, Ordering::AcqRel),
            "simulated plugin log callback registered twice"
        );
        if let Ok(message) = CString::new("simulated GPU timer ready") {
            // SAFETY: the message is NUL-terminated and outlives the call.
            unsafe { callback(message.as_ptr()) };
        }
    }

    fn frame_end_signal_token(&self) -> FrameEndToken {
        self.assert_registered();
        FrameEndToken::new(Some(on_frame_end as RenderingEventFn))
    }

    fn last_frame_shader_timings(&self) -> Option<NativeTimingArray> {
        self.assert_registered();
        let frame = self.completed_frames();
        if frame == 0 {
            return None;
        }

        let mut records: Vec<NativeShaderTime> = self
            .addresses
            .iter()
            .zip(self.frame_times(frame))
            .map(|(&(vertex, fragment), time_ms)| NativeShaderTime {
                vertex_name: vertex as *const c_char,
                geometry_name: std::ptr::null(),
                hull_name: std::ptr::null(),
                domain_name: std::ptr::null(),
                fragment_name: fragment as *const c_char,
                time_ms,
            })
            .collect();
        records.sort_by(|a, b| b.time_ms.total_cmp(&a.time_ms));

        Some(
            NativeTimingArray::new(encode_records(&records), records.len() as i64)
                .with_names(self.names.clone()),
        )
    }

    fn last_frame_gpu_time(&self) -> f32 {
        self.assert_registered();
        let frame = self.completed_frames();
        if frame == 0 {
            return -1.0;
        }
        (self.frame_times(frame).iter().sum::<f64>() + FIXED_OVERHEAD_MS) as f32
    }
}
