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

//! The seam toward the host's GPU command stream.

use crate::native::FrameEndToken;

/// Event id passed along with the frame-end render event. The plugin ignores it.
pub const FRAME_END_EVENT_ID: i32 = 0;

/// A host render command stream able to carry plugin events.
///
/// Issuing an event does not run it: it is enqueued behind every draw and
/// dispatch already submitted for the frame and executes on the render thread
/// in command-stream order.
pub trait RenderCommandStream: Send + Sync {
    /// Enqueues the plugin event identified by `token`.
    fn issue_plugin_event(&self, token: FrameEndToken, event_id: i32);
}
