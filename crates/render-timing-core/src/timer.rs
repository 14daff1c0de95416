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

//! The per-frame collection protocol shared by every timer backend.

use crate::capability::TimerBackend;
use crate::stream::RenderCommandStream;
use crate::timing::FrameTimings;

/// The two operations a timer backend offers once per frame.
pub trait FrameTimer: Send {
    /// Which backend this timer runs on.
    fn backend(&self) -> TimerBackend;

    /// Marks the frame boundary by enqueueing the backend's frame-end event
    /// into `stream`. Must be called after all GPU work of the frame has been
    /// submitted.
    fn signal_frame_end(&mut self, stream: &dyn RenderCommandStream);

    /// Refreshes and returns the results of the most recently completed frame.
    ///
    /// Never fails: missing data shows up as an empty record list and/or an
    /// unavailable GPU time. Calling it again before the next
    /// [`signal_frame_end`](Self::signal_frame_end) returns the same data.
    fn fetch_results(&mut self) -> FrameTimings;

    /// The results cached by the last [`fetch_results`](Self::fetch_results).
    fn latest(&self) -> &FrameTimings;
}
