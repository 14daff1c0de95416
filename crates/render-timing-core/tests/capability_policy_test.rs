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

use render_timing_core::{
    BuildFlavor, CapabilityPolicy, GraphicsApi, Platform, PlatformInfo, TimerBackend,
};

use BuildFlavor::{Device, Editor, Standalone};
use GraphicsApi::*;
use TimerBackend::{NullTimer, RealTimer};

/// `(platform, api, api level, build, expected)`
const MATRIX: &[(Platform, GraphicsApi, Option<u32>, BuildFlavor, TimerBackend)] = &[
    // Android: GLES3 from SDK 18 only.
    (Platform::Android, OpenGlEs3, Some(18), Device, RealTimer),
    (Platform::Android, OpenGlEs3, Some(30), Device, RealTimer),
    (Platform::Android, OpenGlEs3, Some(17), Device, NullTimer),
    (Platform::Android, OpenGlEs3, None, Device, NullTimer),
    (Platform::Android, OpenGlEs2, Some(30), Device, NullTimer),
    (Platform::Android, Vulkan, Some(30), Device, NullTimer),
    // iOS: Metal only.
    (Platform::Ios, Metal, None, Device, RealTimer),
    (Platform::Ios, OpenGlEs3, None, Device, NullTimer),
    // Direct3D 11 anywhere.
    (Platform::Windows, Direct3D11, None, Device, RealTimer),
    (Platform::Linux, Direct3D11, None, Device, RealTimer),
    (Platform::Windows, Direct3D12, None, Device, NullTimer),
    (Platform::MacOs, Metal, None, Device, NullTimer),
    (Platform::Linux, OpenGlCore, None, Device, NullTimer),
    (Platform::Other, Null, None, Device, NullTimer),
    // Iteration builds are always null.
    (Platform::Windows, Direct3D11, None, Editor, NullTimer),
    (Platform::Windows, Direct3D11, None, Standalone, NullTimer),
    (Platform::Android, OpenGlEs3, Some(30), Editor, NullTimer),
    (Platform::Ios, Metal, None, Standalone, NullTimer),
];

#[test]
fn default_policy_matches_the_supported_matrix() {
    let policy = CapabilityPolicy::default();

    for &(platform, api, level, build, expected) in MATRIX {
        let mut info = PlatformInfo::device(platform, api).with_build(build);
        info.os_api_level = level;

        assert_eq!(
            policy.select(&info),
            expected,
            "{platform:?} / {api} / level {level:?} / {build:?}"
        );
    }
}

#[test]
fn selection_is_deterministic() {
    let policy = CapabilityPolicy::default();
    for &(platform, api, level, build, _) in MATRIX {
        let mut info = PlatformInfo::device(platform, api).with_build(build);
        info.os_api_level = level;
        let first = policy.select(&info);
        assert!((0..10).all(|_| policy.select(&info) == first));
    }
}

#[test]
fn policy_round_trips_through_serde() {
    let policy = CapabilityPolicy {
        android_min_api_level: 24,
        ..Default::default()
    };
    let json = serde_json::to_string(&policy).unwrap();
    assert_eq!(serde_json::from_str::<CapabilityPolicy>(&json).unwrap(), policy);

    let partial: CapabilityPolicy = serde_json::from_str(r#"{ "ios_apis": [] }"#).unwrap();
    assert!(partial.ios_apis.is_empty());
    assert_eq!(partial.android_min_api_level, 18);
}
