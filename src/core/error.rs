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

/// Model error types
use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Main error type for the model and its drivers
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Trace encode error: {0}")]
    Trace(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Scenario did not finish: still busy after {cycles} cycles")]
    Timeout { cycles: u64 },

    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

/// GPU-specific error types
///
/// None of these are fatal: the model state is unchanged when they are
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    #[error("{unit} unit is busy")]
    UnitBusy { unit: &'static str },

    #[error("Vertex ({x}, {y}) outside framebuffer")]
    VertexOutOfBounds { x: i16, y: i16 },
}
