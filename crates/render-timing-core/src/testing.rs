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

//! In-memory stand-ins for the native plugin and the render command stream.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! downstream crates.

use crate::native::{
    encode_records, FrameEndToken, LogCallbackFn, NativeShaderTime, NativeTimingApi,
    NativeTimingArray, RenderingEventFn,
};
use crate::stream::RenderCommandStream;
use crate::timing::{ShaderStage, ShaderTimingRecord};
use std::collections::HashMap;
use std::ffi::{c_char, c_int};
use std::sync::Mutex;

/// A log callback that discards every message.
pub unsafe extern "C" fn noop_log_callback(_message: *const c_char) {}

extern "C" fn fake_frame_end(_event_id: c_int) {}

/// The token handed out by [`FakeNativeApi`].
pub fn fake_frame_end_token() -> FrameEndToken {
    FrameEndToken::new(Some(fake_frame_end as RenderingEventFn))
}

const FIRST_NAME_ADDRESS: usize = 0x1000;
const NAME_ADDRESS_STEP: usize = 0x10;

#[derive(Debug, Default)]
struct FakeState {
    registered: bool,
    registrations: usize,
    initializations: usize,
    token_requests: usize,
    shader_queries: usize,
    gpu_time_queries: usize,
    records: Option<(Vec<u8>, i64)>,
    names: HashMap<usize, String>,
    gpu_time_ms: f32,
}

/// A [`NativeTimingApi`] serving whatever frame the test last configured.
///
/// It enforces the plugin protocol: any query before the log callback is
/// registered, or a second registration, panics.
#[derive(Debug)]
pub struct FakeNativeApi {
    state: Mutex<FakeState>,
}

impl Default for FakeNativeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeNativeApi {
    /// A fake with no frame data and an unavailable GPU time.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                gpu_time_ms: -1.0,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn assert_registered(state: &FakeState, call: &str) {
        assert!(
            state.registered,
            "{call} called before the log callback was registered"
        );
    }

    /// Makes `records` and `gpu_time_ms` the plugin's last completed frame.
    ///
    /// Each non-empty name gets its own fake address; empty names are laid
    /// out as null pointers.
    pub fn set_frame(&self, records: &[ShaderTimingRecord], gpu_time_ms: f32) {
        let mut names = HashMap::new();
        let mut next = FIRST_NAME_ADDRESS;
        let mut address_of = |name: &str| -> usize {
            if name.is_empty() {
                return 0;
            }
            let address = next;
            next += NAME_ADDRESS_STEP;
            names.insert(address, name.to_string());
            address
        };

        let native: Vec<NativeShaderTime> = records
            .iter()
            .map(|record| {
                let [v, g, h, d, f] = ShaderStage::ALL.map(|stage| address_of(record.name(stage)));
                NativeShaderTime {
                    vertex_name: v as *const c_char,
                    geometry_name: g as *const c_char,
                    hull_name: h as *const c_char,
                    domain_name: d as *const c_char,
                    fragment_name: f as *const c_char,
                    time_ms: record.time_ms,
                }
            })
            .collect();

        let mut state = self.state();
        state.records = Some((encode_records(&native), native.len() as i64));
        state.names = names;
        state.gpu_time_ms = gpu_time_ms;
    }

    /// Serves raw record bytes as-is, for malformed-array scenarios.
    pub fn set_raw_frame(&self, bytes: Vec<u8>, count: i64, gpu_time_ms: f32) {
        let mut state = self.state();
        state.records = Some((bytes, count));
        state.names.clear();
        state.gpu_time_ms = gpu_time_ms;
    }

    /// Makes the plugin report no data at all.
    pub fn set_unavailable(&self) {
        let mut state = self.state();
        state.records = None;
        state.names.clear();
        state.gpu_time_ms = -1.0;
    }

    /// Number of log callback registrations.
    pub fn registrations(&self) -> usize {
        self.state().registrations
    }

    /// Number of initialisation calls.
    pub fn initializations(&self) -> usize {
        self.state().initializations
    }

    /// Number of frame-end token requests.
    pub fn token_requests(&self) -> usize {
        self.state().token_requests
    }

    /// Number of shader timing array queries.
    pub fn shader_queries(&self) -> usize {
        self.state().shader_queries
    }

    /// Number of GPU time queries.
    pub fn gpu_time_queries(&self) -> usize {
        self.state().gpu_time_queries
    }

    /// Total number of calls across the whole API surface.
    pub fn total_calls(&self) -> usize {
        let state = self.state();
        state.registrations
            + state.initializations
            + state.token_requests
            + state.shader_queries
            + state.gpu_time_queries
    }
}

impl NativeTimingApi for FakeNativeApi {
    fn register_log_callback(&self, _callback: LogCallbackFn) {
        let mut state = self.state();
        assert!(!state.registered, "log callback registered twice");
        state.registered = true;
        state.registrations += 1;
    }

    fn initialize(&self) {
        let mut state = self.state();
        Self::assert_registered(&state, "initialize");
        state.initializations += 1;
    }

    fn frame_end_signal_token(&self) -> FrameEndToken {
        let mut state = self.state();
        Self::assert_registered(&state, "frame_end_signal_token");
        state.token_requests += 1;
        fake_frame_end_token()
    }

    fn last_frame_shader_timings(&self) -> Option<NativeTimingArray> {
        let mut state = self.state();
        Self::assert_registered(&state, "last_frame_shader_timings");
        state.shader_queries += 1;
        let names = state.names.clone();
        state
            .records
            .as_ref()
            .map(|(bytes, count)| NativeTimingArray::new(bytes.clone(), *count).with_names(names))
    }

    fn last_frame_gpu_time(&self) -> f32 {
        let mut state = self.state();
        Self::assert_registered(&state, "last_frame_gpu_time");
        state.gpu_time_queries += 1;
        state.gpu_time_ms
    }
}

/// A command stream that records the events issued into it without running them.
#[derive(Debug, Default)]
pub struct RecordingStream {
    events: Mutex<Vec<(bool, i32)>>,
}

impl RecordingStream {
    /// An empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events issued so far.
    pub fn issued(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Issued events as `(token_was_null, event_id)` pairs, in issue order.
    pub fn events(&self) -> Vec<(bool, i32)> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RenderCommandStream for RecordingStream {
    fn issue_plugin_event(&self, token: FrameEndToken, event_id: i32) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((token.is_null(), event_id));
    }
}
