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

use super::decode::decode_records;
use crate::error::TimingResult;
use crate::timing::ShaderTimingRecord;
use std::collections::HashMap;
use std::ffi::{c_char, c_int};
use std::fmt;

/// Signature of the diagnostic logging callback handed to the plugin.
pub type LogCallbackFn = unsafe extern "C" fn(message: *const c_char);

/// Signature of a render-thread plugin event, as enqueued into the GPU command stream.
pub type RenderingEventFn = unsafe extern "C" fn(event_id: c_int);

/// An opaque handle to the plugin's "frame ended" render event.
///
/// The token is stable for the process lifetime. It is meant to be enqueued
/// into the host's render command stream, never called from the game thread.
#[derive(Clone, Copy)]
pub struct FrameEndToken(Option<RenderingEventFn>);

impl FrameEndToken {
    /// A token that does nothing when issued.
    pub const NULL: FrameEndToken = FrameEndToken(None);

    /// Wraps the event function returned by the plugin.
    pub fn new(event: Option<RenderingEventFn>) -> Self {
        Self(event)
    }

    /// Returns the wrapped event function, if any.
    pub fn event(self) -> Option<RenderingEventFn> {
        self.0
    }

    /// Returns `true` if the plugin returned no event function.
    pub fn is_null(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for FrameEndToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(event) => write!(f, "FrameEndToken({:p})", event as *const ()),
            None => f.write_str("FrameEndToken(null)"),
        }
    }
}

/// An owned copy of the plugin's array of fixed-layout shader timing records.
///
/// Name pointers inside `bytes` are plain addresses: they are only looked up
/// in `names`, which the producer filled while the plugin memory was valid.
/// Nothing in the array refers to plugin memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeTimingArray {
    /// The record memory, expected to be at least `count * RECORD_STRIDE` bytes long.
    pub bytes: Vec<u8>,
    /// Number of records the plugin reported.
    pub count: i64,
    /// Shader names keyed by the address stored in the records.
    pub names: HashMap<usize, String>,
}

impl NativeTimingArray {
    /// An array without any resolved name.
    pub fn new(bytes: Vec<u8>, count: i64) -> Self {
        Self {
            bytes,
            count,
            names: HashMap::new(),
        }
    }

    /// Sets the name table, returning the updated array.
    pub fn with_names(mut self, names: HashMap<usize, String>) -> Self {
        self.names = names;
        self
    }

    /// The name stored for `address`, or an empty name if none was resolved.
    pub fn name(&self, address: usize) -> String {
        self.names.get(&address).cloned().unwrap_or_default()
    }

    /// Decodes the records, resolving names through the array's own table.
    pub fn decode(&self) -> TimingResult<Vec<ShaderTimingRecord>> {
        decode_records(&self.bytes, self.count, |address| self.name(address))
    }
}

/// The C-ABI surface of the native timing plugin.
///
/// Implementations must require [`register_log_callback`](Self::register_log_callback)
/// to be the first call, made exactly once; anything else is a caller defect
/// and should panic.
pub trait NativeTimingApi: Send + Sync + fmt::Debug {
    /// Registers the function the plugin uses for diagnostic messages.
    fn register_log_callback(&self, callback: LogCallbackFn);

    /// Performs platform-specific plugin initialisation. Only iOS builds need it.
    fn initialize(&self) {}

    /// Returns the render event to enqueue at the end of each frame.
    fn frame_end_signal_token(&self) -> FrameEndToken;

    /// Returns a copy of the last completed frame's shader records, or `None`
    /// if the plugin has nothing to report.
    ///
    /// Every non-null name referenced by the copied records must be present in
    /// the returned name table.
    fn last_frame_shader_timings(&self) -> Option<NativeTimingArray>;

    /// Returns the last completed frame's GPU time in milliseconds, or a
    /// negative / non-finite sentinel when unavailable.
    fn last_frame_gpu_time(&self) -> f32;
}
