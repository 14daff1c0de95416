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

//! A command stream that runs plugin events on the calling thread.

use render_timing_core::{FrameEndToken, RenderCommandStream};
use std::sync::atomic::{AtomicU64, Ordering};

/// Runs each plugin event as soon as it is issued.
///
/// Only correct when the caller already sits on the render thread after the
/// frame's GPU work was submitted, which is where hosts without a deferred
/// command buffer call frame-end hooks.
#[derive(Debug, Default)]
pub struct ImmediateCommandStream {
    issued: AtomicU64,
}

impl ImmediateCommandStream {
    /// A fresh stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events run so far, null tokens excluded.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

impl RenderCommandStream for ImmediateCommandStream {
    fn issue_plugin_event(&self, token: FrameEndToken, event_id: i32) {
        let Some(event) = token.event() else {
            log::trace!("Skipping null plugin event {event_id}");
            return;
        };
        // SAFETY: the token wraps a render event exported by the plugin, which
        // accepts any event id.
        unsafe { event(event_id) };
        self.issued.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_timing_core::native::RenderingEventFn;
    use std::ffi::c_int;
    use std::sync::atomic::AtomicI32;

    static LAST_EVENT_ID: AtomicI32 = AtomicI32::new(-1);

    extern "C" fn record_event(event_id: c_int) {
        LAST_EVENT_ID.store(event_id, Ordering::SeqCst);
    }

    #[test]
    fn runs_events_immediately() {
        let stream = ImmediateCommandStream::new();
        let token = FrameEndToken::new(Some(record_event as RenderingEventFn));

        stream.issue_plugin_event(token, 7);

        assert_eq!(LAST_EVENT_ID.load(Ordering::SeqCst), 7);
        assert_eq!(stream.issued(), 1);
    }

    #[test]
    fn null_tokens_are_skipped() {
        let stream = ImmediateCommandStream::new();
        stream.issue_plugin_event(FrameEndToken::NULL, 0);
        assert_eq!(stream.issued(), 0);
    }
}
