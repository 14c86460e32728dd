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

//! Scenario files used by integration tests

/// Clear, then draw a small triangle while the clear is running
#[allow(dead_code)]
pub const CLEAR_AND_TRIANGLE: &str = r#"
[model]
background = [0, 0, 0]

[[step]]
op = "clear"
color = [0, 0, 255]

[[step]]
op = "triangle"
vertices = [[5, 5], [6, 7], [7, 5]]
color = [255, 255, 255]

[[step]]
op = "run_until_idle"
max_cycles = 100000
"#;

/// Back-to-back triangles sharing a diagonal edge
#[allow(dead_code)]
pub const SHARED_EDGE_QUAD: &str = r#"
[[step]]
op = "triangle"
vertices = [[40, 40], [40, 180], [200, 40]]
color = [255, 0, 0]

[[step]]
op = "run_until_idle"
max_cycles = 100000

[[step]]
op = "triangle"
vertices = [[200, 40], [40, 180], [200, 180]]
color = [0, 255, 0]

[[step]]
op = "run_until_idle"
max_cycles = 100000
"#;

/// A second triangle issued while the first is still running
#[allow(dead_code)]
pub const BUSY_TRIANGLE: &str = r#"
[[step]]
op = "triangle"
vertices = [[10, 10], [10, 20], [20, 10]]
color = [255, 255, 255]

[[step]]
op = "run"
cycles = 10

[[step]]
op = "triangle"
vertices = [[100, 100], [100, 130], [101, 100]]
color = [255, 0, 0]

[[step]]
op = "run_until_idle"
max_cycles = 100000
"#;
