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

//! The explicit process context replacing a hidden timer singleton.

use crate::config::RenderTimingConfig;
use render_timing_agents::{FrameScheduler, RenderTimingAgent};
use render_timing_core::native::LogCallbackFn;
use render_timing_core::{
    BuildFlavor, CapabilitySelector, GraphicsApi, NativeTimingApi, PlatformInfo, PlatformProbe,
    RenderCommandStream, TimerBackend,
};
use render_timing_infra::{native_plugin, plugin_log_callback, SystemProbe};
use render_timing_telemetry::{FrameTimingCollector, LogSink, ReportSink, TimingReporter};
use std::sync::Arc;

/// Owns the backend decision and hands out collectors and agents bound to it.
///
/// Build one per process and pass it around. The backend is selected on first
/// use: the platform is probed, the policy applied and, for the real timer,
/// the plugin's log callback registered. Later calls reuse that decision.
///
/// The native plugin accepts a single registration per process, so only one
/// context selecting the real timer may exist. Create every collector and
/// agent from that one context.
#[derive(Debug)]
pub struct RenderTimingContext {
    config: RenderTimingConfig,
    selector: CapabilitySelector,
}

impl RenderTimingContext {
    /// A context for the running platform, using the linked native plugin when
    /// the `native-plugin` feature is enabled.
    ///
    /// # Panics
    ///
    /// Selection is lazy: the first call selecting the real timer
    /// ([`backend`](Self::backend), [`collector`](Self::collector) or
    /// [`agent`](Self::agent)) panics if another context of this process
    /// already registered with the native plugin.
    pub fn new(config: RenderTimingConfig, graphics_api: GraphicsApi, build: BuildFlavor) -> Self {
        let probe = SystemProbe::new(graphics_api).with_build(build);
        Self::with_parts(config, Box::new(probe), native_plugin())
    }

    /// A context built from explicit parts.
    pub fn with_parts(
        config: RenderTimingConfig,
        probe: Box<dyn PlatformProbe>,
        native: Option<Arc<dyn NativeTimingApi>>,
    ) -> Self {
        Self::with_log_callback(config, probe, native, plugin_log_callback)
    }

    /// Like [`with_parts`](Self::with_parts), with a custom native log callback.
    pub fn with_log_callback(
        config: RenderTimingConfig,
        probe: Box<dyn PlatformProbe>,
        native: Option<Arc<dyn NativeTimingApi>>,
        log_callback: LogCallbackFn,
    ) -> Self {
        let selector = CapabilitySelector::new(probe, config.policy.clone(), native, log_callback);
        Self { config, selector }
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> &RenderTimingConfig {
        &self.config
    }

    /// The selected backend, selecting it on first use.
    ///
    /// # Panics
    ///
    /// Panics with "log callback registered twice" if the real timer is
    /// selected while another context already registered with the same
    /// native plugin.
    pub fn backend(&self) -> TimerBackend {
        self.selector.backend()
    }

    /// The platform description the selection was based on.
    pub fn platform_info(&self) -> PlatformInfo {
        self.selector.platform_info()
    }

    /// A collector bound to the selected backend.
    pub fn collector(&self) -> FrameTimingCollector {
        FrameTimingCollector::from_selector(&self.selector)
    }

    /// An inactive agent driving a new collector, reporting to the log when
    /// `log_timing` is set.
    pub fn agent(
        &self,
        scheduler: Arc<dyn FrameScheduler>,
        stream: Arc<dyn RenderCommandStream>,
    ) -> RenderTimingAgent<FrameTimingCollector> {
        self.agent_with_sink(scheduler, stream, Arc::new(LogSink))
    }

    /// Like [`agent`](Self::agent), reporting to `sink`.
    pub fn agent_with_sink(
        &self,
        scheduler: Arc<dyn FrameScheduler>,
        stream: Arc<dyn RenderCommandStream>,
        sink: Arc<dyn ReportSink>,
    ) -> RenderTimingAgent<FrameTimingCollector> {
        let agent = RenderTimingAgent::new(self.collector(), scheduler, stream);
        if self.config.log_timing {
            agent.with_reporting(TimingReporter::new(sink), self.config.report_interval())
        } else {
            agent
        }
    }
}
