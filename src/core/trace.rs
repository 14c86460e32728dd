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

//! Rasterizer probe tracer
//!
//! Writes one JSON object per rasterizer probe so a run can be diffed line by
//! line against the log of an HDL simulation.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::Result;
use crate::core::gpu::{GpuCore, Probe};

/// One line of the trace file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeRecord {
    pub cycle: u64,
    pub x: i16,
    pub y: i16,
    pub inside: bool,
    pub written: bool,
    pub e0: i32,
    pub e1: i32,
    pub e2: i32,
    /// Scan flags after the step, as the raw status bits
    pub flags: u8,
}

impl ProbeRecord {
    pub fn new(cycle: u64, probe: &Probe) -> Self {
        Self {
            cycle,
            x: probe.x,
            y: probe.y,
            inside: probe.inside,
            written: probe.written,
            e0: probe.edges[0],
            e1: probe.edges[1],
            e2: probe.edges[2],
            flags: probe.flags.bits(),
        }
    }
}

/// Probe tracer
///
/// Records every rasterizer probe as a JSON line:
///
/// ```text
/// {"cycle":1,"x":5,"y":5,"inside":true,"written":true,"e0":0,"e1":0,"e2":4,"flags":7}
/// ```
///
/// # Example
/// ```no_run
/// use rgpu::core::gpu::{GpuCore, Rgb565, Triangle};
/// use rgpu::core::trace::ProbeTracer;
///
/// let mut gpu = GpuCore::new();
/// let mut tracer = ProbeTracer::create("probes.jsonl").unwrap();
///
/// gpu.draw_triangle(&Triangle::new((5, 5), (6, 7), (7, 5)), Rgb565::WHITE).unwrap();
/// while gpu.is_busy() {
///     gpu.run_cycle();
///     tracer.trace(&gpu).unwrap();
/// }
/// tracer.flush().unwrap();
/// ```
pub struct ProbeTracer<W: Write> {
    /// Enable/disable tracing
    enabled: bool,
    /// Output sink
    output: W,
    /// Records written so far
    records: u64,
}

impl ProbeTracer<BufWriter<File>> {
    /// Create a tracer writing to a file
    ///
    /// If the file exists, it will be overwritten.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        log::info!("Tracing probes to: {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ProbeTracer<W> {
    pub fn new(output: W) -> Self {
        Self {
            enabled: true,
            output,
            records: 0,
        }
    }

    /// Enable or disable tracing
    ///
    /// When disabled, trace() calls return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of records written
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Record the probe of the cycle that just ran, if there was one
    pub fn trace(&mut self, gpu: &GpuCore) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if let Some(probe) = gpu.last_probe() {
            let record = ProbeRecord::new(gpu.counters().cycle, probe);
            serde_json::to_writer(&mut self.output, &record)?;
            self.output.write_all(b"\n")?;
            self.records += 1;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Consume the tracer and return its sink
    pub fn into_inner(self) -> W {
        self.output
    }
}
