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

//! Custom assertions for GPU model testing

use rgpu::core::gpu::{GpuCore, Rgb565};

/// Assert framebuffer pixel has expected color
#[allow(dead_code)]
pub fn assert_pixel(gpu: &GpuCore, x: u16, y: u16, expected: Rgb565) {
    let actual = gpu.framebuffer().get(x, y);
    assert_eq!(
        actual,
        expected,
        "Pixel at ({}, {}) mismatch: expected 0x{:04X}, got 0x{:04X}",
        x,
        y,
        expected.raw(),
        actual.raw()
    );
}

/// Assert the model is idle with the expected counters
#[allow(dead_code)]
pub fn assert_idle_at(gpu: &GpuCore, cycle: u64, writes: u64) {
    assert!(!gpu.is_busy(), "Model still busy at cycle {}", gpu.counters().cycle);
    let counters = gpu.counters();
    assert_eq!(
        (counters.cycle, counters.framebuffer_writes),
        (cycle, writes),
        "Counter mismatch: expected {} cycles / {} writes, got {} / {}",
        cycle,
        writes,
        counters.cycle,
        counters.framebuffer_writes
    );
}
