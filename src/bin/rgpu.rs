// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

use clap::Parser;
use log::{error, info};
use rgpu::core::config::Scenario;
use rgpu::core::error::Result;
use rgpu::core::gpu::GpuCore;
use rgpu::core::trace::ProbeTracer;
use std::fs;
use std::path::PathBuf;

/// Cycle-accurate raster GPU model
#[derive(Parser)]
#[command(name = "rgpu")]
#[command(about = "Cycle-accurate raster GPU model", long_about = None)]
struct Args {
    /// Scenario file (.toml); runs the built-in demo when omitted
    scenario: Option<PathBuf>,

    /// Write one JSON line per rasterizer probe to this file
    #[arg(short = 't', long)]
    trace: Option<PathBuf>,

    /// Write the final framebuffer as raw 8-bit RGB (320×240×3 bytes)
    #[arg(long = "dump-rgb888")]
    dump_rgb888: Option<PathBuf>,

    /// Override the system clock used for duration reports
    #[arg(long)]
    clock_hz: Option<u32>,

    /// Allocate the probe overlay and report how many pixels were probed
    #[arg(long)]
    overlay: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (RUST_LOG and friends)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("rgpu v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path).inspect_err(|e| {
            error!("Failed to load scenario: {}", e);
        })?,
        None => {
            info!("No scenario given, running built-in demo");
            Scenario::demo()
        }
    };

    if let Some(clock_hz) = args.clock_hz {
        scenario.model.clock_hz = clock_hz;
    }
    scenario.model.overlay |= args.overlay;
    let mut gpu = GpuCore::with_config(&scenario.model)?;

    let total = match &args.trace {
        Some(path) => {
            let mut tracer = ProbeTracer::create(path)?;
            let total = scenario.run(&mut gpu, |gpu| tracer.trace(gpu))?;
            tracer.flush()?;
            info!("Trace records: {}", tracer.records());
            total
        }
        None => scenario.run(&mut gpu, |_| Ok(()))?,
    };

    for report in gpu.take_reports() {
        println!("{}", report);
    }

    let counters = gpu.counters();
    println!(
        "Total: {} cycles, {} framebuffer writes ({} cycles run by scenario)",
        counters.cycle, counters.framebuffer_writes, total
    );
    if gpu.is_busy() {
        println!("Warning: model still busy at end of scenario");
    }
    if let Some(overlay) = gpu.overlay() {
        println!("Probed pixels: {}", overlay.marked_count());
    }

    if let Some(path) = &args.dump_rgb888 {
        fs::write(path, gpu.framebuffer().to_rgb888())?;
        info!("Framebuffer written to: {}", path.display());
    }

    Ok(())
}
