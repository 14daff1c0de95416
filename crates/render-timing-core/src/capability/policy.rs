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

//! The allow-list policy deciding between the real and the null timer.

use super::platform::{BuildFlavor, GraphicsApi, Platform, PlatformInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which timer implementation is active for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerBackend {
    /// The native plugin's hardware timer queries.
    RealTimer,
    /// A stand-in that measures nothing.
    NullTimer,
}

impl fmt::Display for TimerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerBackend::RealTimer => f.write_str("real"),
            TimerBackend::NullTimer => f.write_str("null"),
        }
    }
}

/// The allow-list deciding when the real timer may be used.
///
/// The default reproduces the native plugin's supported matrix: OpenGL ES 3 on
/// Android from SDK level 18, Metal on iOS, Direct3D 11 anywhere, and never in
/// editor or standalone builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityPolicy {
    /// Minimum Android SDK level exposing disjoint timer queries.
    pub android_min_api_level: u32,
    /// Graphics APIs eligible on Android.
    pub android_apis: Vec<GraphicsApi>,
    /// Graphics APIs eligible on iOS.
    pub ios_apis: Vec<GraphicsApi>,
    /// Graphics APIs eligible on every platform.
    pub any_platform_apis: Vec<GraphicsApi>,
    /// Build flavors that always get the null timer.
    pub force_null_builds: Vec<BuildFlavor>,
}

impl Default for CapabilityPolicy {
    fn default() -> Self {
        Self {
            android_min_api_level: 18,
            android_apis: vec![GraphicsApi::OpenGlEs3],
            ios_apis: vec![GraphicsApi::Metal],
            any_platform_apis: vec![GraphicsApi::Direct3D11],
            force_null_builds: vec![BuildFlavor::Editor, BuildFlavor::Standalone],
        }
    }
}

impl CapabilityPolicy {
    /// Decides which backend `info` is entitled to.
    ///
    /// The forced-null build check wins over every API rule. An unknown
    /// Android API level counts as below the threshold.
    pub fn select(&self, info: &PlatformInfo) -> TimerBackend {
        if self.force_null_builds.contains(&info.build) {
            return TimerBackend::NullTimer;
        }

        let api = info.graphics_api;
        let eligible = match info.platform {
            Platform::Android => {
                let sdk_allowed = info
                    .os_api_level
                    .is_some_and(|level| level >= self.android_min_api_level);
                sdk_allowed && self.android_apis.contains(&api)
            }
            Platform::Ios => self.ios_apis.contains(&api),
            _ => false,
        } || self.any_platform_apis.contains(&api);

        if eligible {
            TimerBackend::RealTimer
        } else {
            TimerBackend::NullTimer
        }
    }
}
