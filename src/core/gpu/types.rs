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

//! GPU type definitions
//!
//! Value types shared by the fill and rasterizer units: the packed framebuffer
//! color, screen-space vertices, triangles and their edge deltas.

use serde::{Deserialize, Serialize};

/// A 16-bit packed framebuffer color in 5-6-5 RGB format
///
/// Bit layout:
/// - Bits 11-15: Red (5 bits)
/// - Bits 5-10: Green (6 bits)
/// - Bits 0-4: Blue (5 bits)
///
/// This is the only place 8-bit channels are narrowed or widened, so every
/// collaborator that exports or compares pixels goes through the same formula
/// the hardware uses.
///
/// # Examples
///
/// ```
/// use rgpu::core::gpu::Rgb565;
///
/// let color = Rgb565::from_rgb(255, 128, 64);
/// assert_eq!(color.raw(), 0xFC08);
/// assert_eq!(color.to_rgb888(), (0xF8, 0x80, 0x40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb565(u16);

impl Rgb565 {
    /// Black (0x0000)
    pub const BLACK: Self = Self(0x0000);

    /// White (0xFFFF)
    pub const WHITE: Self = Self(0xFFFF);

    /// Pack 8-bit channels into 5-6-5 format
    ///
    /// Low bits that do not fit the field are dropped:
    /// `((r & 0xF8) << 8) | ((g & 0xFC) << 3) | ((b & 0xF8) >> 3)`
    #[inline(always)]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0xF8) << 8;
        let g = (g as u16 & 0xFC) << 3;
        let b = (b as u16 & 0xF8) >> 3;
        Self(r | g | b)
    }

    /// Wrap a raw 16-bit framebuffer word
    #[inline(always)]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw 16-bit framebuffer word
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Widen back to 8-bit channels
    ///
    /// Each field lands in the high bits of its channel and the freed low bits
    /// are zero, so the conversion is lossy for unaligned inputs.
    ///
    /// # Returns
    ///
    /// `(r, g, b)` tuple
    #[inline(always)]
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 8) & 0xF8) as u8;
        let g = ((self.0 >> 3) & 0xFC) as u8;
        let b = ((self.0 << 3) & 0xF8) as u8;
        (r, g, b)
    }
}

impl From<[u8; 3]> for Rgb565 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// A screen-space vertex position
///
/// Coordinates are signed 16-bit, origin at the top-left corner, X to the right
/// and Y downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// X coordinate
    pub x: i16,
    /// Y coordinate
    pub y: i16,
}

impl Vertex {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for Vertex {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// A triangle given by three vertices in any winding
///
/// No degeneracy validation is done. The inside test only accepts pixels for
/// which all three edge functions are non-negative, so the winding decides
/// whether the triangle has an interior at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: (i16, i16), v1: (i16, i16), v2: (i16, i16)) -> Self {
        Self::from_vertices([v0.into(), v1.into(), v2.into()])
    }

    pub const fn from_vertices(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    /// Vertex the scan starts from: minimum Y, earliest index on ties
    pub fn top_vertex(&self) -> Vertex {
        let mut top = self.vertices[0];
        for v in &self.vertices[1..] {
            if v.y < top.y {
                top = *v;
            }
        }
        top
    }

    /// Largest vertex Y (last scanline of the scan)
    pub fn max_y(&self) -> i16 {
        self.vertices.iter().map(|v| v.y).max().unwrap_or(0)
    }

    /// Edge deltas in hardware order
    pub fn edge_deltas(&self) -> EdgeDeltas {
        EdgeDeltas::new(self)
    }

    /// Evaluate the three edge functions directly at `(x, y)`
    ///
    /// `e_i = (x - v_i.x) * dy_i - (y - v_i.y) * dx_i`, computed in 32 bits since
    /// the products of 16-bit differences do not fit in 16.
    pub fn edge_values(&self, x: i16, y: i16) -> [i32; 3] {
        let deltas = self.edge_deltas();
        let mut values = [0i32; 3];
        for (i, value) in values.iter_mut().enumerate() {
            let v = self.vertices[i];
            let (dx, dy) = deltas.0[i];
            *value = (x as i32 - v.x as i32) * dy - (y as i32 - v.y as i32) * dx;
        }
        values
    }

    /// Inclusive inside test at `(x, y)`
    pub fn contains(&self, x: i16, y: i16) -> bool {
        is_inside(&self.edge_values(x, y))
    }
}

/// Per-edge `(dx, dy)` deltas
///
/// Entry `i` is the edge ending at vertex `i`: `(v0 - v2)`, `(v1 - v0)`,
/// `(v2 - v1)`. The order is part of the hardware contract since entry `i`
/// pairs with vertex `i` when the edge functions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeDeltas(pub [(i32, i32); 3]);

impl EdgeDeltas {
    pub fn new(triangle: &Triangle) -> Self {
        let [v0, v1, v2] = triangle.vertices;
        let delta = |to: Vertex, from: Vertex| {
            (to.x as i32 - from.x as i32, to.y as i32 - from.y as i32)
        };
        Self([delta(v0, v2), delta(v1, v0), delta(v2, v1)])
    }

    #[inline(always)]
    pub fn dx(&self, edge: usize) -> i32 {
        self.0[edge].0
    }

    #[inline(always)]
    pub fn dy(&self, edge: usize) -> i32 {
        self.0[edge].1
    }
}

/// Inside-or-on-edge test shared by the rasterizer and reference checks
#[inline(always)]
pub fn is_inside(edges: &[i32; 3]) -> bool {
    edges[0] >= 0 && edges[1] >= 0 && edges[2] >= 0
}
