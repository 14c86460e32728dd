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

//! Model configuration and stimulus scenarios
//!
//! Scenarios are TOML files describing a headless run of the model: an
//! optional `[model]` table followed by an ordered list of `[[step]]` entries.
//!
//! # Example
//!
//! ```toml
//! [model]
//! clock_hz = 50000000
//! background = [40, 40, 40]
//! overlay = true
//!
//! [[step]]
//! op = "clear"
//! color = [0, 0, 128]
//!
//! [[step]]
//! op = "triangle"
//! vertices = [[160, 25], [25, 215], [295, 120]]
//! color = [255, 200, 0]
//!
//! [[step]]
//! op = "run_until_idle"
//! max_cycles = 200000
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ModelError, Result};
use crate::core::gpu::{GpuCore, Rgb565, Triangle, Vertex, SYSTEM_CLOCK_HZ};

/// Static parameters of a model instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// System clock used to convert cycles to time
    pub clock_hz: u32,

    /// Framebuffer fill color at init, 8-bit `[r, g, b]`
    pub background: [u8; 3],

    /// Allocate the diagnostic probe overlay
    pub overlay: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            clock_hz: SYSTEM_CLOCK_HZ,
            background: [40, 40, 40],
            overlay: false,
        }
    }
}

impl ModelConfig {
    /// Background packed to RGB565
    pub fn background_color(&self) -> Rgb565 {
        Rgb565::from(self.background)
    }

    /// Reject values the model cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.clock_hz == 0 {
            return Err(ModelError::Config("clock_hz must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// One stimulus applied to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Start a full-screen clear
    Clear { color: [u8; 3] },

    /// Start a triangle
    Triangle {
        vertices: [[i16; 2]; 3],
        color: [u8; 3],
    },

    /// Clock the model a fixed number of cycles
    Run { cycles: u64 },

    /// Clock the model until both units are idle
    RunUntilIdle { max_cycles: u64 },
}

impl Step {
    /// Triangle described by a `Triangle` step
    pub fn triangle(vertices: &[[i16; 2]; 3]) -> Triangle {
        Triangle::from_vertices(vertices.map(|[x, y]| Vertex::new(x, y)))
    }
}

/// A model configuration plus an ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.model.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading scenario from: {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Built-in demo: clear to dark blue, then the reference triangle
    pub fn demo() -> Self {
        Self {
            model: ModelConfig::default(),
            steps: vec![
                Step::Clear { color: [0, 0, 128] },
                Step::Triangle {
                    vertices: [[160, 25], [25, 215], [295, 120]],
                    color: [255, 200, 0],
                },
                Step::RunUntilIdle {
                    max_cycles: 1_000_000,
                },
            ],
        }
    }

    /// Apply every step to `gpu`, calling `on_cycle` after each clock cycle
    ///
    /// Start requests rejected by a busy unit are logged and skipped, matching
    /// the model's own contract handling. A `run_until_idle` that exhausts its
    /// budget is an error.
    ///
    /// # Returns
    ///
    /// Total cycles run
    pub fn run<F>(&self, gpu: &mut GpuCore, mut on_cycle: F) -> Result<u64>
    where
        F: FnMut(&GpuCore) -> Result<()>,
    {
        let mut total = 0;

        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("Step {}: {:?}", index, step);
            match step {
                Step::Clear { color } => {
                    if let Err(e) = gpu.start_clear(Rgb565::from(*color)) {
                        log::warn!("Step {}: {}", index, e);
                    }
                }
                Step::Triangle { vertices, color } => {
                    let triangle = Step::triangle(vertices);
                    if let Err(e) = gpu.draw_triangle(&triangle, Rgb565::from(*color)) {
                        log::warn!("Step {}: {}", index, e);
                    }
                }
                Step::Run { cycles } => {
                    for _ in 0..*cycles {
                        gpu.run_cycle();
                        on_cycle(gpu)?;
                    }
                    total += cycles;
                }
                Step::RunUntilIdle { max_cycles } => {
                    let mut ran = 0;
                    while gpu.is_busy() {
                        if ran == *max_cycles {
                            return Err(ModelError::Timeout { cycles: ran });
                        }
                        gpu.run_cycle();
                        on_cycle(gpu)?;
                        ran += 1;
                    }
                    total += ran;
                }
            }
        }

        Ok(total)
    }
}
