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

//! Performance counters and duration reports
//!
//! The model has no timer of its own. Every unit snapshots the counters when
//! it starts and the difference at completion gives the elapsed cycles, which
//! are converted to wall time through the fixed system clock.

use serde::Serialize;
use std::fmt;

/// System clock frequency of the modelled block (50 MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 50_000_000;

/// Duration of one 60 Hz video frame in microseconds
pub const FRAME_TIME_US: f64 = 16666.66;

/// Monotonic cycle and write counters
///
/// Cheap to copy; units keep a copy as their start snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerfCounters {
    /// Cycles since the model was created (+1 per `run_cycle`)
    pub cycle: u64,

    /// Total framebuffer pixel writes
    pub framebuffer_writes: u64,
}

impl PerfCounters {
    /// Counters elapsed since `earlier`
    pub fn since(&self, earlier: &PerfCounters) -> PerfCounters {
        PerfCounters {
            cycle: self.cycle.saturating_sub(earlier.cycle),
            framebuffer_writes: self
                .framebuffer_writes
                .saturating_sub(earlier.framebuffer_writes),
        }
    }
}

/// Timing summary of one completed (or in-progress) operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    pub label: String,

    /// Elapsed clock cycles
    pub cycles: u64,

    /// Framebuffer writes performed in the interval
    pub writes: u64,

    /// Elapsed wall time at the system clock
    pub microseconds: f64,

    /// Share of a 60 Hz frame, in percent
    pub frame_percent: f64,

    /// Writes per cycle, in percent
    ///
    /// Computed from the shared write counter, so an interval in which both
    /// units were writing can exceed 100% (up to 200%). This is not the
    /// utilization of a single write port.
    pub bandwidth_percent: f64,
}

impl DurationReport {
    /// Build a report from a start snapshot and the current counters
    ///
    /// # Arguments
    ///
    /// * `label` - Operation name shown in logs
    /// * `start` - Counters captured when the operation started
    /// * `now` - Current counters
    /// * `clock_hz` - System clock used for the cycle → µs conversion
    pub fn new(label: &str, start: &PerfCounters, now: &PerfCounters, clock_hz: u32) -> Self {
        let elapsed = now.since(start);
        let microseconds = elapsed.cycle as f64 * 1_000_000.0 / clock_hz as f64;
        let bandwidth_percent = if elapsed.cycle == 0 {
            0.0
        } else {
            elapsed.framebuffer_writes as f64 * 100.0 / elapsed.cycle as f64
        };

        Self {
            label: label.to_string(),
            cycles: elapsed.cycle,
            writes: elapsed.framebuffer_writes,
            microseconds,
            frame_percent: microseconds * 100.0 / FRAME_TIME_US,
            bandwidth_percent,
        }
    }
}

impl fmt::Display for DurationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} cycles, {:.2} us ({:.2}% of frame), {} writes ({:.2}% bandwidth)",
            self.label,
            self.cycles,
            self.microseconds,
            self.frame_percent,
            self.writes,
            self.bandwidth_percent
        )
    }
}
