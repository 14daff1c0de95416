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

use super::api::{FrameEndToken, LogCallbackFn, NativeTimingApi};
use crate::capability::Platform;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// An open connection to the native plugin.
///
/// Opening a session registers the log callback before anything else, so every
/// call made through the session honours the plugin's calling protocol. The
/// frame-end token is fetched once and reused for the process lifetime.
pub struct NativeSession {
    api: Arc<dyn NativeTimingApi>,
    frame_end_token: OnceLock<FrameEndToken>,
}

impl NativeSession {
    /// Registers `log_callback` with `api` and performs the platform's
    /// initialisation step.
    pub fn open(api: Arc<dyn NativeTimingApi>, log_callback: LogCallbackFn, platform: Platform) -> Self {
        api.register_log_callback(log_callback);
        if platform == Platform::Ios {
            api.initialize();
        }
        log::debug!("Native render timing session opened ({platform:?})");
        Self {
            api,
            frame_end_token: OnceLock::new(),
        }
    }

    /// The underlying native API.
    pub fn api(&self) -> &dyn NativeTimingApi {
        self.api.as_ref()
    }

    /// The render event to enqueue at the end of each frame.
    pub fn frame_end_token(&self) -> FrameEndToken {
        *self
            .frame_end_token
            .get_or_init(|| self.api.frame_end_signal_token())
    }
}

impl fmt::Debug for NativeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeSession")
            .field("api", &self.api)
            .field("frame_end_token", &self.frame_end_token.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{noop_log_callback, FakeNativeApi};

    #[test]
    fn open_registers_callback_first() {
        let fake = Arc::new(FakeNativeApi::new());
        let session = NativeSession::open(fake.clone(), noop_log_callback, Platform::Android);

        assert_eq!(fake.registrations(), 1);
        assert_eq!(fake.initializations(), 0);
        assert!(!session.frame_end_token().is_null());
    }

    #[test]
    fn ios_sessions_initialize_the_plugin() {
        let fake = Arc::new(FakeNativeApi::new());
        let _session = NativeSession::open(fake.clone(), noop_log_callback, Platform::Ios);
        assert_eq!(fake.initializations(), 1);
    }

    #[test]
    fn frame_end_token_is_fetched_once() {
        let fake = Arc::new(FakeNativeApi::new());
        let session = NativeSession::open(fake.clone(), noop_log_callback, Platform::Windows);

        for _ in 0..3 {
            session.frame_end_token();
        }
        assert_eq!(fake.token_requests(), 1);
    }
}
