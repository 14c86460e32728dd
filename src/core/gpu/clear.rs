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

//! Solid-fill (clear) unit
//!
//! Walks the framebuffer in raster order writing one pixel per cycle, which
//! models a single framebuffer write port. A full clear takes exactly
//! `FB_WIDTH × FB_HEIGHT` cycles from `start` to idle.

use super::counters::PerfCounters;
use super::framebuffer::{Framebuffer, FB_HEIGHT, FB_WIDTH};
use super::types::Rgb565;

/// State of an in-flight clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearJob {
    pub x: u16,
    pub y: u16,
    pub color: Rgb565,

    /// Counters captured at `start`
    pub start: PerfCounters,
}

/// Clear unit state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearUnit {
    #[default]
    Idle,
    Active(ClearJob),
}

impl ClearUnit {
    /// Begin filling the framebuffer with `color` from the top-left pixel
    pub fn start(&mut self, color: Rgb565, snapshot: PerfCounters) {
        log::debug!(
            "Clear start: color=0x{:04X} at cycle {}",
            color.raw(),
            snapshot.cycle
        );

        *self = ClearUnit::Active(ClearJob {
            x: 0,
            y: 0,
            color,
            start: snapshot,
        });
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ClearUnit::Active(_))
    }

    /// Current cursor, if active
    pub fn cursor(&self) -> Option<(u16, u16)> {
        match self {
            ClearUnit::Active(job) => Some((job.x, job.y)),
            ClearUnit::Idle => None,
        }
    }

    /// Advance one cycle
    ///
    /// # Returns
    ///
    /// The start snapshot when this cycle wrote the last pixel and the unit
    /// went idle, `None` otherwise.
    pub fn step(&mut self, framebuffer: &mut Framebuffer) -> Option<PerfCounters> {
        let ClearUnit::Active(job) = self else {
            return None;
        };

        framebuffer.set(job.x, job.y, job.color);

        if job.x as usize == FB_WIDTH - 1 {
            job.x = 0;
            if job.y as usize == FB_HEIGHT - 1 {
                let start = job.start;
                *self = ClearUnit::Idle;
                return Some(start);
            }
            job.y += 1;
        } else {
            job.x += 1;
        }

        None
    }
}
