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

//! The frame timing collector: one object per process owning the per-frame
//! collection protocol against the selected backend.

use render_timing_core::{
    CapabilitySelector, FrameGpuTime, FrameTimer, FrameTimings, NativeSession,
    RenderCommandStream, ShaderTimingRecord, TimerBackend, FRAME_END_EVENT_ID,
};
use std::sync::Arc;

/// The backend a collector is bound to. Chosen once, never changed.
#[derive(Debug)]
enum Backend {
    Real(Arc<NativeSession>),
    Null,
}

/// Collects the GPU time and per-shader records of the last completed frame.
///
/// The cached [`FrameTimings`] is only replaced by
/// [`fetch_results`](FrameTimer::fetch_results), and only when a frame end has
/// been signalled since the previous collection (or nothing was collected yet).
/// Consumers receive clones.
#[derive(Debug)]
pub struct FrameTimingCollector {
    backend: Backend,
    latest: FrameTimings,
    awaiting_fetch: bool,
    collections: u64,
}

impl FrameTimingCollector {
    /// A collector on the real backend, talking to the plugin through `session`.
    pub fn real(session: Arc<NativeSession>) -> Self {
        Self::with_backend(Backend::Real(session))
    }

    /// A collector that measures nothing.
    pub fn null() -> Self {
        Self::with_backend(Backend::Null)
    }

    /// A collector bound to whatever `selector` picked.
    pub fn from_selector(selector: &CapabilitySelector) -> Self {
        match selector.session() {
            Some(session) => Self::real(session),
            None => Self::null(),
        }
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            latest: FrameTimings::default(),
            awaiting_fetch: false,
            collections: 0,
        }
    }

    fn collect(&mut self) {
        let (shaders, gpu_time) = match &self.backend {
            Backend::Real(session) => (read_shader_timings(session), read_gpu_time(session)),
            Backend::Null => (Vec::new(), FrameGpuTime::UNAVAILABLE),
        };
        self.collections += 1;
        self.latest = FrameTimings {
            sequence: self.collections,
            gpu_time,
            shaders,
        };
        self.awaiting_fetch = false;
        log::trace!(
            "Collected frame timings #{}: {} shaders, GPU {}",
            self.collections,
            self.latest.shaders.len(),
            self.latest.gpu_time
        );
    }
}

fn read_shader_timings(session: &NativeSession) -> Vec<ShaderTimingRecord> {
    let Some(array) = session.api().last_frame_shader_timings() else {
        return Vec::new();
    };
    match array.decode() {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Discarding malformed shader timings: {e}");
            Vec::new()
        }
    }
}

fn read_gpu_time(session: &NativeSession) -> FrameGpuTime {
    FrameGpuTime::from_native(session.api().last_frame_gpu_time())
}

impl FrameTimer for FrameTimingCollector {
    fn backend(&self) -> TimerBackend {
        match self.backend {
            Backend::Real(_) => TimerBackend::RealTimer,
            Backend::Null => TimerBackend::NullTimer,
        }
    }

    fn signal_frame_end(&mut self, stream: &dyn RenderCommandStream) {
        if let Backend::Real(session) = &self.backend {
            stream.issue_plugin_event(session.frame_end_token(), FRAME_END_EVENT_ID);
        }
        self.awaiting_fetch = true;
    }

    fn fetch_results(&mut self) -> FrameTimings {
        if self.awaiting_fetch || self.collections == 0 {
            self.collect();
        }
        self.latest.clone()
    }

    fn latest(&self) -> &FrameTimings {
        &self.latest
    }
}
