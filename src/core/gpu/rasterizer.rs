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

//! Cycle-stepped triangle rasterizer
//!
//! Implements incremental edge-function rasterization (Pineda) walked as a
//! boustrophedon scan that probes exactly one pixel per cycle.
//!
//! # Algorithm
//!
//! 1. Start at the top vertex (minimum Y, first vertex on ties) with the three
//!    edge functions evaluated there once, using multiplies.
//! 2. Every later position is reached by adding or subtracting a per-edge delta:
//!    a column step adds `dy` (forward) or subtracts it (backward), a row step
//!    subtracts `dx`. No multiplies or divides happen after `start`.
//! 3. While seeking, the scan moves in the current direction until the inside
//!    test changes; leaving the triangle while seeking means the row was entered
//!    from the wrong side, so the direction flips.
//! 4. Once the edge is found the interior run is written until the first
//!    outside probe, where the scan flips direction and drops to the next row.
//!
//! A horizontal step that would leave the framebuffer counts as an exit from
//! the triangle. Scans that stay clear of the screen edge never hit this rule.
//!
//! # References
//!
//! - [Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)](https://www.cs.drexel.edu/~deb39/Classes/Papers/comp175-06-pineda.pdf)
//! - [Scratchapixel: Rasterization](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation)

use bitflags::bitflags;

use super::counters::PerfCounters;
use super::framebuffer::{Framebuffer, OverlayBuffer, FB_HEIGHT, FB_WIDTH};
use super::types::{is_inside, EdgeDeltas, Rgb565, Triangle};

bitflags! {
    /// Scan control bits, laid out like the hardware status vector
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScanFlags: u8 {
        /// Traversing toward +X
        const FORWARD = 1 << 0;
        /// The row's first boundary crossing has been seen
        const FOUND_EDGE = 1 << 1;
        /// Inside-test result of the previous probe
        const PREVIOUS_INSIDE = 1 << 2;
        /// No horizontal step taken since the last row step
        const NEW_ROW = 1 << 3;
    }
}

/// Registers of an in-flight triangle scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    /// Cursor X
    pub x: i16,
    /// Cursor Y
    pub y: i16,
    /// Edge function values at the cursor
    pub edges: [i32; 3],
    pub deltas: EdgeDeltas,
    pub flags: ScanFlags,
    /// Last scanline of the triangle
    pub max_y: i16,
    pub color: Rgb565,
    /// Counters captured at `start`
    pub start: PerfCounters,
}

impl ScanState {
    /// Step one column in the current direction
    ///
    /// # Returns
    ///
    /// `false` if the step would leave the framebuffer, in which case nothing
    /// changes.
    fn advance(&mut self) -> bool {
        let forward = self.flags.contains(ScanFlags::FORWARD);
        let next = if forward { self.x + 1 } else { self.x - 1 };

        if next < 0 || next as usize >= FB_WIDTH {
            log::trace!("Scan reached screen edge at ({}, {})", self.x, self.y);
            return false;
        }

        self.x = next;
        for (edge, value) in self.edges.iter_mut().enumerate() {
            if forward {
                *value += self.deltas.dy(edge);
            } else {
                *value -= self.deltas.dy(edge);
            }
        }
        self.flags.remove(ScanFlags::NEW_ROW);
        true
    }

    /// Leave the current row: reverse direction and step down
    ///
    /// # Returns
    ///
    /// `true` if this was the last scanline and the scan is complete.
    fn end_row(&mut self) -> bool {
        self.flags.remove(ScanFlags::FOUND_EDGE);
        self.flags.insert(ScanFlags::NEW_ROW);
        self.flags.toggle(ScanFlags::FORWARD);

        if self.y == self.max_y {
            return true;
        }

        self.y += 1;
        for (edge, value) in self.edges.iter_mut().enumerate() {
            *value -= self.deltas.dx(edge);
        }
        false
    }
}

/// What the rasterizer observed at one probed pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub x: i16,
    pub y: i16,
    /// Edge function values at the probed pixel
    pub edges: [i32; 3],
    pub inside: bool,
    /// Whether the pixel was written this cycle
    pub written: bool,
    /// Flags after the step completed
    pub flags: ScanFlags,
}

/// Outcome of one rasterizer cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    pub probe: Probe,

    /// Start snapshot, present when this cycle finished the triangle
    pub finished: Option<PerfCounters>,
}

/// Triangle rasterizer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerUnit {
    #[default]
    Idle,
    Active(ScanState),
}

impl RasterizerUnit {
    /// Load a triangle and begin scanning from its top vertex
    ///
    /// # Arguments
    ///
    /// * `triangle` - Vertices in any winding; must lie inside the framebuffer
    /// * `color` - Fill color
    /// * `snapshot` - Counters at the moment the command is accepted
    ///
    /// # Panics
    ///
    /// In debug builds, if a vertex lies outside the framebuffer. Bounds are
    /// checked by [`GpuCore::draw_triangle`](super::GpuCore::draw_triangle),
    /// the only caller outside this module.
    pub(super) fn start(&mut self, triangle: &Triangle, color: Rgb565, snapshot: PerfCounters) {
        debug_assert!(
            triangle.vertices.iter().all(|v| v.x >= 0
                && v.y >= 0
                && (v.x as usize) < FB_WIDTH
                && (v.y as usize) < FB_HEIGHT),
            "triangle vertex outside framebuffer: {:?}",
            triangle.vertices
        );
        let top = triangle.top_vertex();
        let edges = triangle.edge_values(top.x, top.y);
        let inside = is_inside(&edges);

        let mut flags = ScanFlags::FORWARD;
        flags.set(ScanFlags::FOUND_EDGE, inside);
        flags.set(ScanFlags::PREVIOUS_INSIDE, inside);

        log::debug!(
            "Triangle start: {:?} color=0x{:04X} top=({}, {}) edges={:?}",
            triangle.vertices,
            color.raw(),
            top.x,
            top.y,
            edges
        );

        *self = RasterizerUnit::Active(ScanState {
            x: top.x,
            y: top.y,
            edges,
            deltas: triangle.edge_deltas(),
            flags,
            max_y: triangle.max_y(),
            color,
            start: snapshot,
        });
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RasterizerUnit::Active(_))
    }

    /// Scan registers, if active
    pub fn state(&self) -> Option<&ScanState> {
        match self {
            RasterizerUnit::Active(scan) => Some(scan),
            RasterizerUnit::Idle => None,
        }
    }

    /// Current cursor, if active
    pub fn cursor(&self) -> Option<(i16, i16)> {
        self.state().map(|scan| (scan.x, scan.y))
    }

    /// Probe one pixel and advance the scan
    ///
    /// # Arguments
    ///
    /// * `framebuffer` - Write target for inside pixels
    /// * `overlay` - Optional diagnostic buffer marked with every probe
    ///
    /// # Returns
    ///
    /// `None` when idle, otherwise the probe taken this cycle.
    pub fn step(
        &mut self,
        framebuffer: &mut Framebuffer,
        overlay: Option<&mut OverlayBuffer>,
    ) -> Option<ScanStep> {
        let RasterizerUnit::Active(scan) = self else {
            return None;
        };

        let (x, y) = (scan.x, scan.y);
        let edges = scan.edges;
        let inside = is_inside(&edges);

        if let Some(overlay) = overlay {
            overlay.mark(x as u16, y as u16);
        }

        let mut written = false;
        let row_done = if !scan.flags.contains(ScanFlags::FOUND_EDGE) {
            // Seeking the row's first boundary crossing
            let crossed = inside != scan.flags.contains(ScanFlags::PREVIOUS_INSIDE);
            if crossed && !scan.flags.contains(ScanFlags::NEW_ROW) {
                scan.flags.insert(ScanFlags::FOUND_EDGE);
                if !inside {
                    scan.flags.toggle(ScanFlags::FORWARD);
                }
            }
            if inside {
                framebuffer.set(x as u16, y as u16, scan.color);
                written = true;
            }
            !scan.advance()
        } else if inside {
            framebuffer.set(x as u16, y as u16, scan.color);
            written = true;
            !scan.advance()
        } else {
            true
        };

        scan.flags.set(ScanFlags::PREVIOUS_INSIDE, inside);

        let finished = if row_done && scan.end_row() {
            Some(scan.start)
        } else {
            None
        };

        let probe = Probe {
            x,
            y,
            edges,
            inside,
            written,
            flags: scan.flags,
        };

        log::trace!(
            "Probe ({}, {}) inside={} written={} edges={:?}",
            x,
            y,
            inside,
            written,
            edges
        );

        if finished.is_some() {
            *self = RasterizerUnit::Idle;
        }

        Some(ScanStep { probe, finished })
    }
}
