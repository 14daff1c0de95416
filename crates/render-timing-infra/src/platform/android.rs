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

/// Parses the value of the `ro.build.version.sdk` property.
pub fn parse_sdk_level(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Reads the Android SDK level of the running device.
///
/// Always `None` on other targets.
#[cfg(target_os = "android")]
pub fn android_sdk_level() -> Option<u32> {
    use std::ffi::{c_char, c_int, CStr};

    const PROP_VALUE_MAX: usize = 92;

    extern "C" {
        fn __system_property_get(name: *const c_char, value: *mut c_char) -> c_int;
    }

    let mut buffer = [0 as c_char; PROP_VALUE_MAX];
    // SAFETY: the name is NUL-terminated and the buffer has the
    // PROP_VALUE_MAX bytes bionic writes at most.
    let len = unsafe { __system_property_get(c"ro.build.version.sdk".as_ptr(), buffer.as_mut_ptr()) };
    if len <= 0 {
        return None;
    }
    // SAFETY: bionic NUL-terminates the value it wrote into `buffer`.
    let value = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    parse_sdk_level(&value.to_string_lossy())
}

/// Reads the Android SDK level of the running device.
///
/// Always `None` on other targets.
#[cfg(not(target_os = "android"))]
pub fn android_sdk_level() -> Option<u32> {
    None
}
