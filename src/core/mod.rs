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

//! Core model components
//!
//! This module contains the raster block and the pieces that drive it:
//! - GPU core (framebuffer, clear unit, triangle rasterizer, counters)
//! - Model configuration and stimulus scenarios
//! - Rasterizer probe tracing
//! - Error types

pub mod config;
pub mod error;
pub mod gpu;
pub mod trace;

// Re-export commonly used types
pub use config::{ModelConfig, Scenario, Step};
pub use error::{GpuError, ModelError, Result};
pub use gpu::GpuCore;
pub use trace::ProbeTracer;
