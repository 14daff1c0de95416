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

//! Probing of the running platform.

mod android;

pub use self::android::{android_sdk_level, parse_sdk_level};

use render_timing_core::{BuildFlavor, GraphicsApi, Platform, PlatformInfo, PlatformProbe};

/// Describes the running process from compile-time target information and,
/// on Android, the `ro.build.version.sdk` system property.
///
/// The graphics API and build flavor are not discoverable from here; the host
/// engine supplies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemProbe {
    graphics_api: GraphicsApi,
    build: BuildFlavor,
}

impl SystemProbe {
    /// A probe for a device build using `graphics_api`.
    pub fn new(graphics_api: GraphicsApi) -> Self {
        Self {
            graphics_api,
            build: BuildFlavor::Device,
        }
    }

    /// Sets the build flavor reported by the probe.
    pub fn with_build(mut self, build: BuildFlavor) -> Self {
        self.build = build;
        self
    }
}

impl PlatformProbe for SystemProbe {
    fn probe(&self) -> PlatformInfo {
        let platform = Platform::current();
        let os_api_level = match platform {
            Platform::Android => android_sdk_level(),
            _ => None,
        };
        if platform == Platform::Android && os_api_level.is_none() {
            log::warn!("Could not read the Android SDK level; GPU timing stays disabled");
        }
        PlatformInfo {
            platform,
            graphics_api: self.graphics_api,
            os_api_level,
            build: self.build,
        }
    }
}
