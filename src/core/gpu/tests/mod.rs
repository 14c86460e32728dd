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

//! GPU module tests
//!
//! Tests are organized into the following modules:
//! - `basic`: Initialization, reset, counters and idle behavior
//! - `clear`: Full-screen fill order and completion
//! - `rendering`: Triangle coverage against the edge-function reference
//! - `timing`: Cycle counts and duration reports
//! - `collision`: Clear and rasterizer writing in the same cycle
//! - `contract`: Busy and out-of-bounds rejections
//! - `properties`: Property-based checks over random triangles

mod basic;
