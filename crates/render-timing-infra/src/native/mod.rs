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

//! Binding to the native `RenderTimingPlugin` library.

mod log_bridge;
mod snapshot;

#[cfg(feature = "native-plugin")]
mod ffi;
#[cfg(feature = "native-plugin")]
mod plugin;

pub use self::log_bridge::{plugin_log_callback, plugin_message};
#[cfg(feature = "native-plugin")]
pub use self::plugin::NativePlugin;

use render_timing_core::NativeTimingApi;
use std::sync::Arc;

/// Returns the process-wide handle to the native plugin, or `None` when this
/// build was compiled without the `native-plugin` feature.
///
/// The same handle is returned on every call, so the plugin's
/// "register once" rule holds across the whole process.
pub fn native_plugin() -> Option<Arc<dyn NativeTimingApi>> {
    #[cfg(feature = "native-plugin")]
    {
        Some(plugin::NativePlugin::shared() as Arc<dyn NativeTimingApi>)
    }
    #[cfg(not(feature = "native-plugin"))]
    {
        log::debug!("render-timing-infra built without the `native-plugin` feature");
        None
    }
}
