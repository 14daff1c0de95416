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

use std::borrow::Cow;
use std::ffi::{c_char, CStr};

/// Reads a diagnostic message handed over by the plugin.
///
/// Returns `None` for a null pointer. Invalid UTF-8 is replaced lossily.
///
/// # Safety
///
/// `message` must be null or point to a NUL-terminated string that stays
/// valid for the lifetime `'a`.
pub unsafe fn plugin_message<'a>(message: *const c_char) -> Option<Cow<'a, str>> {
    if message.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Some(unsafe { CStr::from_ptr(message) }.to_string_lossy())
}

/// The log callback registered with the native plugin.
///
/// Forwards every plugin message to the `log` facade at `warn` level.
///
/// # Safety
///
/// Called by the plugin with a null pointer or a NUL-terminated string valid
/// for the duration of the call.
pub unsafe extern "C" fn plugin_log_callback(message: *const c_char) {
    // SAFETY: the plugin upholds `plugin_message`'s contract for the call.
    match unsafe { plugin_message(message) } {
        Some(text) => log::warn!("RenderTimingPlugin: {}", text),
        None => log::trace!("RenderTimingPlugin sent a null message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr;

    #[test]
    fn null_message_is_none() {
        assert!(unsafe { plugin_message(ptr::null()) }.is_none());
        // Must not crash.
        unsafe { plugin_log_callback(ptr::null()) };
    }

    #[test]
    fn reads_message_text() {
        let text = CString::new("query pool exhausted").unwrap();
        let message = unsafe { plugin_message(text.as_ptr()) };
        assert_eq!(message.as_deref(), Some("query pool exhausted"));
        unsafe { plugin_log_callback(text.as_ptr()) };
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"bad \xff byte\0";
        let message = unsafe { plugin_message(bytes.as_ptr().cast()) };
        assert_eq!(message.as_deref(), Some("bad \u{FFFD} byte"));
    }
}
