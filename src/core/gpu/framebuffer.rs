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

//! Framebuffer memory and the diagnostic overlay
//!
//! The framebuffer is a fixed 320×240 grid of RGB565 words stored row-major.
//! It is the only persistent visual state of the model and it counts every
//! pixel write, which is what the bandwidth figures in duration reports are
//! derived from.

use super::types::Rgb565;

/// Framebuffer width in pixels
pub const FB_WIDTH: usize = 320;

/// Framebuffer height in pixels
pub const FB_HEIGHT: usize = 240;

/// Total framebuffer size in pixels
pub const FB_PIXELS: usize = FB_WIDTH * FB_HEIGHT;

/// Framebuffer memory with a single write port
///
/// # Examples
///
/// ```
/// use rgpu::core::gpu::{Framebuffer, Rgb565};
///
/// let mut fb = Framebuffer::new(Rgb565::BLACK);
/// fb.set(10, 20, Rgb565::WHITE);
/// assert_eq!(fb.get(10, 20), Rgb565::WHITE);
/// assert_eq!(fb.writes(), 1);
/// ```
pub struct Framebuffer {
    /// Pixels in row-major order (left-to-right, top-to-bottom)
    pixels: Vec<Rgb565>,

    /// Total pixel writes since creation
    writes: u64,
}

impl Framebuffer {
    /// Allocate a framebuffer filled with `background`
    ///
    /// The initial fill does not count as writes. Allocation failure aborts
    /// through the global allocator, as the model cannot exist without storage.
    pub fn new(background: Rgb565) -> Self {
        Self {
            pixels: vec![background; FB_PIXELS],
            writes: 0,
        }
    }

    /// Read the pixel at `(x, y)`
    #[inline(always)]
    pub fn get(&self, x: u16, y: u16) -> Rgb565 {
        self.pixels[Self::index(x, y)]
    }

    /// Write the pixel at `(x, y)` and bump the write counter
    #[inline(always)]
    pub fn set(&mut self, x: u16, y: u16, color: Rgb565) {
        let index = Self::index(x, y);
        self.pixels[index] = color;
        self.writes += 1;
    }

    /// Total pixel writes since creation
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Row-major view of every pixel
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Count of pixels currently holding `color`
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Unpack the whole framebuffer to packed RGB888 bytes
    ///
    /// Output is `FB_WIDTH × FB_HEIGHT × 3` bytes, row-major, using the lossy
    /// widening of [`Rgb565::to_rgb888`].
    pub fn to_rgb888(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(FB_PIXELS * 3);
        for pixel in &self.pixels {
            let (r, g, b) = pixel.to_rgb888();
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    /// Linear index of `(x, y)`
    ///
    /// Coordinates are a caller contract; out-of-range values are a bug in the
    /// unit that produced them.
    #[inline(always)]
    fn index(x: u16, y: u16) -> usize {
        debug_assert!(
            (x as usize) < FB_WIDTH && (y as usize) < FB_HEIGHT,
            "framebuffer access out of range: ({}, {})",
            x,
            y
        );
        y as usize * FB_WIDTH + x as usize
    }
}

/// Diagnostic overlay recording which pixels the rasterizer probed
///
/// Purely observational: marking never touches the framebuffer or counters.
pub struct OverlayBuffer {
    marks: Vec<bool>,
}

impl OverlayBuffer {
    pub fn new() -> Self {
        Self {
            marks: vec![false; FB_PIXELS],
        }
    }

    /// Mark `(x, y)` as probed
    #[inline(always)]
    pub fn mark(&mut self, x: u16, y: u16) {
        let index = Framebuffer::index(x, y);
        self.marks[index] = true;
    }

    /// Whether `(x, y)` has been probed
    pub fn is_marked(&self, x: u16, y: u16) -> bool {
        self.marks[Framebuffer::index(x, y)]
    }

    /// Number of distinct probed pixels
    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    /// Forget all marks
    pub fn clear(&mut self) {
        self.marks.fill(false);
    }

    /// Row-major view of every mark
    pub fn marks(&self) -> &[bool] {
        &self.marks
    }
}

impl Default for OverlayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
