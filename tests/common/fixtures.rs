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

//! Test fixtures for common test scenarios

use rgpu::core::config::ModelConfig;
use rgpu::core::gpu::{GpuCore, Triangle};

/// The triangle used throughout the model's documentation
#[allow(dead_code)]
pub fn reference_triangle() -> Triangle {
    Triangle::new((160, 25), (25, 215), (295, 120))
}

/// Create a model with the diagnostic overlay enabled
#[allow(dead_code)]
pub fn create_gpu_with_overlay() -> GpuCore {
    GpuCore::with_config(&ModelConfig {
        overlay: true,
        ..ModelConfig::default()
    })
    .unwrap()
}
