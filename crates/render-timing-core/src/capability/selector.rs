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

use super::platform::{PlatformInfo, PlatformProbe};
use super::policy::{CapabilityPolicy, TimerBackend};
use crate::native::{LogCallbackFn, NativeSession, NativeTimingApi};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// The outcome of a backend selection.
#[derive(Debug)]
struct Selection {
    info: PlatformInfo,
    backend: TimerBackend,
    session: Option<Arc<NativeSession>>,
}

/// Decides once which timer backend is active.
///
/// The first call to [`backend`](Self::backend) or [`session`](Self::session)
/// probes the platform, applies the policy and, when the real timer is chosen,
/// opens the native session (which registers the log callback). Later calls
/// return the cached outcome.
///
/// When the policy allows the real timer but no native plugin was supplied,
/// the selector silently settles on the null timer.
pub struct CapabilitySelector {
    probe: Box<dyn PlatformProbe>,
    policy: CapabilityPolicy,
    native: Option<Arc<dyn NativeTimingApi>>,
    log_callback: LogCallbackFn,
    selection: OnceLock<Selection>,
}

impl CapabilitySelector {
    /// Creates a selector. Nothing is probed until first use.
    pub fn new(
        probe: Box<dyn PlatformProbe>,
        policy: CapabilityPolicy,
        native: Option<Arc<dyn NativeTimingApi>>,
        log_callback: LogCallbackFn,
    ) -> Self {
        Self {
            probe,
            policy,
            native,
            log_callback,
            selection: OnceLock::new(),
        }
    }

    /// The active backend.
    pub fn backend(&self) -> TimerBackend {
        self.selection().backend
    }

    /// The native session, present only for the real backend.
    pub fn session(&self) -> Option<Arc<NativeSession>> {
        self.selection().session.clone()
    }

    /// The platform description the decision was based on.
    pub fn platform_info(&self) -> PlatformInfo {
        self.selection().info
    }

    /// The policy applied by this selector.
    pub fn policy(&self) -> &CapabilityPolicy {
        &self.policy
    }

    /// Returns `true` once the selection has been made.
    pub fn is_resolved(&self) -> bool {
        self.selection.get().is_some()
    }

    fn selection(&self) -> &Selection {
        self.selection.get_or_init(|| self.select())
    }

    fn select(&self) -> Selection {
        let info = self.probe.probe();
        let eligible = self.policy.select(&info);
        log::debug!(
            "GPU timer capability: {:?} / {} / api level {:?} / {:?} -> {}",
            info.platform,
            info.graphics_api,
            info.os_api_level,
            info.build,
            eligible
        );

        let session = match (eligible, &self.native) {
            (TimerBackend::RealTimer, Some(api)) => Some(Arc::new(NativeSession::open(
                Arc::clone(api),
                self.log_callback,
                info.platform,
            ))),
            (TimerBackend::RealTimer, None) => {
                log::debug!("Native render timing plugin not available, using the null timer");
                None
            }
            (TimerBackend::NullTimer, _) => None,
        };

        let backend = if session.is_some() {
            log::info!("Creating a real GPU timer");
            TimerBackend::RealTimer
        } else {
            log::info!("Creating a null GPU timer");
            TimerBackend::NullTimer
        };

        Selection {
            info,
            backend,
            session,
        }
    }
}

impl fmt::Debug for CapabilitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySelector")
            .field("policy", &self.policy)
            .field("native", &self.native)
            .field("selection", &self.selection.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{BuildFlavor, GraphicsApi, Platform};
    use crate::testing::{noop_log_callback, FakeNativeApi};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProbe {
        info: PlatformInfo,
        calls: Arc<AtomicUsize>,
    }

    impl PlatformProbe for CountingProbe {
        fn probe(&self) -> PlatformInfo {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.info
        }
    }

    fn selector(
        info: PlatformInfo,
        native: Option<Arc<FakeNativeApi>>,
    ) -> (CapabilitySelector, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = CountingProbe {
            info,
            calls: calls.clone(),
        };
        let native = native.map(|n| n as Arc<dyn NativeTimingApi>);
        let selector = CapabilitySelector::new(
            Box::new(probe),
            CapabilityPolicy::default(),
            native,
            noop_log_callback,
        );
        (selector, calls)
    }

    #[test]
    fn selection_is_lazy_and_cached() {
        let fake = Arc::new(FakeNativeApi::new());
        let info = PlatformInfo::device(Platform::Windows, GraphicsApi::Direct3D11);
        let (selector, calls) = selector(info, Some(fake.clone()));

        assert!(!selector.is_resolved());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        for _ in 0..5 {
            assert_eq!(selector.backend(), TimerBackend::RealTimer);
        }
        assert!(selector.session().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1, "probe must run once");
        assert_eq!(fake.registrations(), 1, "log callback must be registered once");
    }

    #[test]
    fn null_selection_never_touches_native() {
        let fake = Arc::new(FakeNativeApi::new());
        let info = PlatformInfo::device(Platform::Android, GraphicsApi::OpenGlEs2).with_api_level(30);
        let (selector, _) = selector(info, Some(fake.clone()));

        assert_eq!(selector.backend(), TimerBackend::NullTimer);
        assert!(selector.session().is_none());
        assert_eq!(fake.registrations(), 0);
        assert_eq!(fake.total_calls(), 0);
    }

    #[test]
    fn forced_null_build_never_touches_native() {
        let fake = Arc::new(FakeNativeApi::new());
        let info = PlatformInfo::device(Platform::Windows, GraphicsApi::Direct3D11)
            .with_build(BuildFlavor::Editor);
        let (selector, _) = selector(info, Some(fake.clone()));

        assert_eq!(selector.backend(), TimerBackend::NullTimer);
        assert_eq!(fake.total_calls(), 0);
    }

    #[test]
    fn missing_plugin_falls_back_to_null() {
        let info = PlatformInfo::device(Platform::Ios, GraphicsApi::Metal);
        let (selector, _) = selector(info, None);

        assert_eq!(selector.backend(), TimerBackend::NullTimer);
        assert_eq!(selector.platform_info(), info);
    }
}
