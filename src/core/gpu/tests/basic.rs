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

//! Basic GPU functionality tests
//! Tests for initialization, reset, counters and idle behavior

use super::super::*;
use crate::core::config::ModelConfig;
use crate::core::error::ModelError;

#[test]
fn test_gpu_initialization() {
    let gpu = GpuCore::new();

    assert_eq!(gpu.framebuffer().pixels().len(), GpuCore::WIDTH * GpuCore::HEIGHT);
    assert_eq!(gpu.framebuffer().count(GpuCore::BACKGROUND), FB_PIXELS);
    assert_eq!(gpu.counters(), PerfCounters::default());
    assert!(!gpu.is_busy());
    assert!(gpu.overlay().is_none());
    assert_eq!(gpu.clock_hz(), SYSTEM_CLOCK_HZ);
}

#[test]
fn test_background_is_neutral_grey() {
    assert_eq!(GpuCore::BACKGROUND.to_rgb888(), (40, 40, 40));
}

#[test]
fn test_with_config() {
    let config = ModelConfig {
        clock_hz: 100_000_000,
        background: [255, 0, 0],
        overlay: true,
    };
    let gpu = GpuCore::with_config(&config).unwrap();

    assert_eq!(gpu.clock_hz(), 100_000_000);
    assert_eq!(gpu.framebuffer().get(0, 0), Rgb565::from_rgb(255, 0, 0));
    assert_eq!(gpu.overlay().map(|o| o.marked_count()), Some(0));
}

#[test]
fn test_with_config_rejects_zero_clock() {
    let result = GpuCore::with_config(&ModelConfig {
        clock_hz: 0,
        ..ModelConfig::default()
    });

    assert!(matches!(result, Err(ModelError::Config(_))));
}

#[test]
fn test_reports_are_finite_for_valid_config() {
    let mut gpu = GpuCore::with_config(&ModelConfig {
        clock_hz: 1,
        ..ModelConfig::default()
    })
    .unwrap();
    gpu.start_clear(Rgb565::BLACK).unwrap();
    gpu.run_until_idle(1_000_000);

    let report = &gpu.take_reports()[0];
    assert!(report.microseconds.is_finite());
    assert!(report.frame_percent.is_finite());

    let empty = gpu.report("empty", &gpu.counters());
    assert_eq!(empty.microseconds, 0.0);
    assert_eq!(empty.bandwidth_percent, 0.0);
}

#[test]
fn test_idle_cycles_only_count() {
    let mut gpu = GpuCore::new();

    gpu.run_cycles(100);

    let counters = gpu.counters();
    assert_eq!(counters.cycle, 100);
    assert_eq!(counters.framebuffer_writes, 0);
    assert!(gpu.last_probe().is_none());
    assert_eq!(gpu.framebuffer().count(GpuCore::BACKGROUND), FB_PIXELS);
}

#[test]
fn test_counters_are_monotonic() {
    let mut gpu = GpuCore::new();
    gpu.start_clear(Rgb565::BLACK).unwrap();
    gpu.draw_triangle(&Triangle::new((10, 10), (10, 20), (20, 10)), Rgb565::WHITE)
        .unwrap();

    let mut previous = gpu.counters();
    for _ in 0..500 {
        gpu.run_cycle();
        let now = gpu.counters();
        assert_eq!(now.cycle, previous.cycle + 1);
        assert!(now.framebuffer_writes >= previous.framebuffer_writes);
        // At most one write per unit per cycle
        assert!(now.framebuffer_writes - previous.framebuffer_writes <= 2);
        previous = now;
    }
}

#[test]
fn test_run_until_idle_when_idle() {
    let mut gpu = GpuCore::new();
    assert_eq!(gpu.run_until_idle(1_000), 0);
    assert_eq!(gpu.counters().cycle, 0);
}

#[test]
fn test_run_until_idle_respects_budget() {
    let mut gpu = GpuCore::new();
    gpu.start_clear(Rgb565::BLACK).unwrap();

    assert_eq!(gpu.run_until_idle(1_000), 1_000);
    assert!(gpu.is_busy());
    assert_eq!(gpu.clear_unit().cursor(), Some((1_000 % 320, 1_000 / 320)));
}

#[test]
fn test_reset() {
    let mut gpu = GpuCore::with_config(&ModelConfig {
        overlay: true,
        ..ModelConfig::default()
    })
    .unwrap();
    gpu.start_clear(Rgb565::BLACK).unwrap();
    gpu.draw_triangle(&Triangle::new((5, 5), (6, 7), (7, 5)), Rgb565::WHITE)
        .unwrap();
    gpu.run_cycles(50);

    gpu.reset();

    assert_eq!(gpu.counters(), PerfCounters::default());
    assert!(!gpu.is_busy());
    assert_eq!(*gpu.clear_unit(), ClearUnit::Idle);
    assert_eq!(*gpu.rasterizer(), RasterizerUnit::Idle);
    assert_eq!(gpu.framebuffer().count(GpuCore::BACKGROUND), FB_PIXELS);
    assert_eq!(gpu.overlay().map(|o| o.marked_count()), Some(0));
    assert!(gpu.last_probe().is_none());
    assert!(gpu.take_reports().is_empty());
}
