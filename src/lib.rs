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

//! Cycle-accurate behavioral model of a small raster GPU
//!
//! This library is the golden model for a hardware raster block: a 320×240
//! RGB565 framebuffer, a solid-fill clear unit and a triangle rasterizer that
//! probes one pixel per clock using edge functions.
//!
//! # Example
//!
//! ```
//! use rgpu::core::gpu::{GpuCore, Rgb565};
//!
//! let mut gpu = GpuCore::new();
//! gpu.start_clear(Rgb565::BLACK).unwrap();
//! gpu.run_until_idle(100_000);
//!
//! let reports = gpu.take_reports();
//! assert_eq!(reports[0].cycles, 320 * 240);
//! ```

pub mod core;
