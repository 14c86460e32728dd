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

//! GPU core: cycle-stepped fill and triangle units over a shared framebuffer
//!
//! This module is the golden model of the raster block. It is responsible for:
//! - Owning 150KB of framebuffer memory (320×240 pixels, RGB565)
//! - Running the clear unit (one pixel per cycle, raster order)
//! - Running the triangle rasterizer (one probe per cycle, edge functions)
//! - Counting cycles and writes and turning them into duration reports
//!
//! # Cycle Ordering
//!
//! Each call to [`GpuCore::run_cycle`] is one clock edge:
//! 1. The cycle counter increments
//! 2. The clear unit steps (if active)
//! 3. The rasterizer steps (if active)
//!
//! Both units may write in the same cycle. Because the rasterizer steps last,
//! its value is the one retained when both target the same pixel.
//!
//! # Color Format
//!
//! Framebuffer pixels are 16-bit RGB565:
//! - Bits 11-15: Red (5 bits)
//! - Bits 5-10: Green (6 bits)
//! - Bits 0-4: Blue (5 bits)

mod clear;
mod counters;
mod framebuffer;
mod rasterizer;
#[cfg(test)]
mod tests;
mod types;

// Public re-exports
pub use clear::{ClearJob, ClearUnit};
pub use counters::{DurationReport, PerfCounters, FRAME_TIME_US, SYSTEM_CLOCK_HZ};
pub use framebuffer::{Framebuffer, OverlayBuffer, FB_HEIGHT, FB_PIXELS, FB_WIDTH};
pub use rasterizer::{Probe, RasterizerUnit, ScanFlags, ScanState, ScanStep};
pub use types::*;

use crate::core::config::ModelConfig;
use crate::core::error::{self, GpuError};

/// The raster GPU block
///
/// An explicit context object owned by whichever collaborator drives it. All
/// progress happens inside [`run_cycle`](Self::run_cycle); nothing runs in the
/// background.
///
/// # Examples
///
/// ```
/// use rgpu::core::gpu::{GpuCore, Rgb565, Triangle};
///
/// let mut gpu = GpuCore::new();
/// let red = Rgb565::from_rgb(255, 0, 0);
///
/// gpu.draw_triangle(&Triangle::new((5, 5), (6, 7), (7, 5)), red).unwrap();
/// gpu.run_until_idle(1_000);
///
/// assert_eq!(gpu.framebuffer().get(6, 6), red);
/// assert_eq!(gpu.counters().cycle, 11);
/// ```
pub struct GpuCore {
    /// Framebuffer memory (also counts writes)
    framebuffer: Framebuffer,

    /// Diagnostic overlay of rasterizer probes
    ///
    /// Only allocated when enabled in the config.
    overlay: Option<OverlayBuffer>,

    /// Solid-fill unit
    clear: ClearUnit,

    /// Triangle rasterizer unit
    rasterizer: RasterizerUnit,

    /// Cycles since creation
    cycle: u64,

    /// Clock used for cycle → µs conversion in reports
    clock_hz: u32,

    /// Background written by `new`/`reset`
    background: Rgb565,

    /// Rasterizer probe taken in the most recent cycle
    last_probe: Option<Probe>,

    /// Reports of completed operations not yet collected
    ///
    /// Grows by one entry per completed operation until the driver drains it
    /// with [`take_reports`](Self::take_reports).
    reports: Vec<DurationReport>,
}

impl GpuCore {
    /// Framebuffer width in pixels
    pub const WIDTH: usize = FB_WIDTH;

    /// Framebuffer height in pixels
    pub const HEIGHT: usize = FB_HEIGHT;

    /// Neutral background the framebuffer starts with
    pub const BACKGROUND: Rgb565 = Rgb565::from_rgb(40, 40, 40);

    /// Create a model with the default configuration
    ///
    /// The framebuffer is filled with [`Self::BACKGROUND`], both units are idle
    /// and all counters are zero.
    pub fn new() -> Self {
        Self::build(&ModelConfig::default())
    }

    /// Create a model from an explicit configuration
    ///
    /// # Errors
    ///
    /// [`ModelError::Config`](crate::core::error::ModelError::Config) if the
    /// configuration is invalid, e.g. a zero clock.
    pub fn with_config(config: &ModelConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &ModelConfig) -> Self {
        let background = config.background_color();
        log::debug!(
            "GPU init: {}x{} background=0x{:04X} clock={}Hz overlay={}",
            FB_WIDTH,
            FB_HEIGHT,
            background.raw(),
            config.clock_hz,
            config.overlay
        );

        Self {
            framebuffer: Framebuffer::new(background),
            overlay: config.overlay.then(OverlayBuffer::new),
            clear: ClearUnit::Idle,
            rasterizer: RasterizerUnit::Idle,
            cycle: 0,
            clock_hz: config.clock_hz,
            background,
            last_probe: None,
            reports: Vec::new(),
        }
    }

    /// Return to the freshly-initialized state
    ///
    /// Refills the framebuffer with the background, idles both units and
    /// zeroes the counters. The overlay (if any) is kept but cleared.
    pub fn reset(&mut self) {
        self.framebuffer = Framebuffer::new(self.background);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.clear();
        }
        self.clear = ClearUnit::Idle;
        self.rasterizer = RasterizerUnit::Idle;
        self.cycle = 0;
        self.last_probe = None;
        self.reports.clear();
    }

    /// Advance the model by one clock cycle
    pub fn run_cycle(&mut self) {
        self.cycle += 1;
        self.last_probe = None;

        if let Some(start) = self.clear.step(&mut self.framebuffer) {
            self.complete("clear", start);
        }

        if let Some(step) = self
            .rasterizer
            .step(&mut self.framebuffer, self.overlay.as_mut())
        {
            self.last_probe = Some(step.probe);
            if let Some(start) = step.finished {
                self.complete("triangle", start);
            }
        }
    }

    /// Run `cycles` cycles back to back
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.run_cycle();
        }
    }

    /// Run until both units are idle or `max_cycles` have elapsed
    ///
    /// # Returns
    ///
    /// Number of cycles actually run
    pub fn run_until_idle(&mut self, max_cycles: u64) -> u64 {
        let mut ran = 0;
        while self.is_busy() && ran < max_cycles {
            self.run_cycle();
            ran += 1;
        }
        ran
    }

    /// Start a full-screen clear
    ///
    /// # Errors
    ///
    /// [`GpuError::UnitBusy`] if a clear is already running; the running clear
    /// is left untouched.
    pub fn start_clear(&mut self, color: Rgb565) -> Result<(), GpuError> {
        if self.clear.is_active() {
            log::warn!(
                "Clear requested at cycle {} while a clear is active; ignored",
                self.cycle
            );
            return Err(GpuError::UnitBusy { unit: "clear" });
        }

        self.clear.start(color, self.counters());
        Ok(())
    }

    /// Start rasterizing a triangle
    ///
    /// # Errors
    ///
    /// - [`GpuError::VertexOutOfBounds`] if a vertex lies outside the framebuffer
    /// - [`GpuError::UnitBusy`] if a triangle is already being drawn; the running
    ///   triangle is left untouched
    pub fn draw_triangle(&mut self, triangle: &Triangle, color: Rgb565) -> Result<(), GpuError> {
        if let Some(v) = triangle.vertices.iter().find(|v| !Self::in_bounds(v)) {
            log::warn!("Triangle vertex ({}, {}) outside framebuffer", v.x, v.y);
            return Err(GpuError::VertexOutOfBounds { x: v.x, y: v.y });
        }

        if self.rasterizer.is_active() {
            log::warn!(
                "Triangle requested at cycle {} while a triangle is active; ignored",
                self.cycle
            );
            return Err(GpuError::UnitBusy { unit: "rasterizer" });
        }

        self.rasterizer.start(triangle, color, self.counters());
        Ok(())
    }

    /// Build a duration report relative to an earlier counter snapshot
    pub fn report(&self, label: &str, snapshot: &PerfCounters) -> DurationReport {
        DurationReport::new(label, snapshot, &self.counters(), self.clock_hz)
    }

    /// Current counters
    pub fn counters(&self) -> PerfCounters {
        PerfCounters {
            cycle: self.cycle,
            framebuffer_writes: self.framebuffer.writes(),
        }
    }

    /// Read-only framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Read-only overlay, if enabled
    pub fn overlay(&self) -> Option<&OverlayBuffer> {
        self.overlay.as_ref()
    }

    pub fn clear_unit(&self) -> &ClearUnit {
        &self.clear
    }

    pub fn rasterizer(&self) -> &RasterizerUnit {
        &self.rasterizer
    }

    /// Whether either unit is active
    pub fn is_busy(&self) -> bool {
        self.clear.is_active() || self.rasterizer.is_active()
    }

    /// Rasterizer probe of the most recent cycle
    pub fn last_probe(&self) -> Option<&Probe> {
        self.last_probe.as_ref()
    }

    /// Collect reports of operations completed since the last call
    ///
    /// The queue is unbounded: long-running drivers should call this
    /// periodically (e.g. after each `run_until_idle`). `reset` also empties it.
    pub fn take_reports(&mut self) -> Vec<DurationReport> {
        std::mem::take(&mut self.reports)
    }

    /// System clock used for reports
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn complete(&mut self, label: &str, start: PerfCounters) {
        let report = self.report(label, &start);
        log::info!("{}", report);
        self.reports.push(report);
    }

    fn in_bounds(v: &Vertex) -> bool {
        v.x >= 0 && v.y >= 0 && (v.x as usize) < FB_WIDTH && (v.y as usize) < FB_HEIGHT
    }
}

impl Default for GpuCore {
    fn default() -> Self {
        Self::new()
    }
}
