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

// Render timing sandbox
// Drives a simulated host frame loop for manual testing.

mod simulated;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use render_timing_core::NativeTimingApi;
use render_timing_infra::{native_plugin, SystemProbe};
use render_timing_sdk::prelude::*;

use simulated::SimulatedPlugin;

/// Runs a host frame loop with render timing attached.
#[derive(Parser, Debug)]
#[command(name = "sandbox", about = "Render timing sandbox", version)]
struct Args {
    /// Graphics API reported to the capability policy (d3d11, gles3, metal, vulkan, ...).
    #[arg(long, default_value = "d3d11")]
    api: GraphicsApi,

    /// Build flavor reported to the capability policy (device, editor, standalone).
    #[arg(long, default_value = "device")]
    build: BuildFlavor,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value = "180")]
    frames: u64,

    /// Simulated frame duration in milliseconds.
    #[arg(long, default_value = "16.6")]
    frame_ms: f64,

    /// Use a simulated plugin instead of the linked native one.
    #[arg(long)]
    simulate: bool,

    /// Sleep for each frame and follow the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,

    /// Write periodic reports to this file as JSON lines instead of the log.
    #[arg(long)]
    json_report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderTimingConfig::from_path(path)?,
        None => RenderTimingConfig::default(),
    };
    init_logging(config.log_filter.as_deref());

    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        bail!("--frame-ms must be a positive number, got {}", args.frame_ms);
    }
    let frame_time = Duration::from_secs_f64(args.frame_ms / 1000.0);

    let native: Option<Arc<dyn NativeTimingApi>> = if args.simulate {
        Some(Arc::new(SimulatedPlugin::new()))
    } else {
        native_plugin()
    };
    let probe = SystemProbe::new(args.api).with_build(args.build);
    let context = RenderTimingContext::with_parts(config, Box::new(probe), native);
    log::info!(
        "Render timing on {:?} / {}: {} timer",
        context.platform_info().platform,
        args.api,
        context.backend()
    );

    let sink: Arc<dyn ReportSink> = match &args.json_report {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file {}", path.display()))?;
            Arc::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Arc::new(LogSink),
    };

    let stream = Arc::new(ImmediateCommandStream::new());
    let timings = if args.realtime {
        let scheduler = Arc::new(FrameLoopScheduler::new());
        let mut agent = context.agent_with_sink(scheduler.clone(), stream.clone(), sink.clone());
        agent.on_enable();
        for _ in 0..args.frames {
            thread::sleep(frame_time);
            scheduler.frame_completed();
        }
        agent.on_disable();
        agent.timings()
    } else {
        let scheduler = Arc::new(ManualScheduler::new());
        let mut agent = context.agent_with_sink(scheduler.clone(), stream.clone(), sink.clone());
        agent.on_enable();
        for _ in 0..args.frames {
            scheduler.end_frame();
            scheduler.advance(frame_time);
        }
        agent.on_disable();
        agent.timings()
    };

    log::info!(
        "Ran {} frames, {} frame-end events issued, {} collections",
        args.frames,
        stream.issued(),
        timings.sequence
    );
    log::info!(
        "Last frame: GPU {}, {} shaders totalling {:.3}ms",
        timings.gpu_time,
        timings.shaders.len(),
        timings.total_shader_time_ms()
    );
    if let Some(slowest) = timings.slowest() {
        log::info!("Slowest: {slowest}");
    }
    Ok(())
}
