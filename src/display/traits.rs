/*
 *  display/traits.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing-surface and commit-target contracts
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::display::color::Tone;
use crate::display::error::DisplayError;

/// Reference point of a text string, relative to the position it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    TopLeft,
    TopCentre,
    TopRight,
    MiddleLeft,
    MiddleCentre,
    MiddleRight,
    BottomLeft,
    BottomCentre,
    BottomRight,
}

/// Panel waveform used when a committed region is refreshed.
///
/// Grayscale waveforms are slow and flash; the direct-update ones are fast
/// but only resolve a few levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RefreshMode {
    /// Full clear to white
    Init,
    /// Direct update, black/white only
    Du,
    /// 16-level grayscale with flashing
    #[default]
    Gc16,
    /// 16-level grayscale, no flashing
    Gl16,
    /// Direct update, 4 levels
    Du4,
    /// Fastest, black/white, ghosting
    A2,
}

impl RefreshMode {
    /// Number of distinct gray levels the waveform resolves
    pub fn gray_levels(self) -> u8 {
        match self {
            RefreshMode::Init => 1,
            RefreshMode::Du | RefreshMode::A2 => 2,
            RefreshMode::Du4 => 4,
            RefreshMode::Gc16 | RefreshMode::Gl16 => 16,
        }
    }
}

/// Canvas surface contract consumed by every renderer.
///
/// All coordinates are canvas pixels; primitives falling outside the surface
/// are clipped, never rejected. Radii follow the usual convention of a circle
/// spanning `2r + 1` pixels.
pub trait Surface {
    /// Surface dimensions
    fn size(&self) -> Size;

    fn set_text_size(&mut self, size: u8);

    fn text_size(&self) -> u8;

    /// Foreground tone for glyphs and optional background fill behind them
    fn set_text_color(&mut self, fg: Tone, bg: Option<Tone>);

    /// Anchor used by [`Surface::draw_string`]
    fn set_text_anchor(&mut self, anchor: TextAnchor);

    fn text_anchor(&self) -> TextAnchor;

    fn draw_pixel(&mut self, p: Point, tone: Tone);

    fn draw_line(&mut self, from: Point, to: Point, tone: Tone);

    fn draw_rect(&mut self, rect: Rectangle, tone: Tone);

    fn fill_rect(&mut self, rect: Rectangle, tone: Tone);

    fn draw_circle(&mut self, center: Point, radius: u32, tone: Tone);

    fn fill_circle(&mut self, center: Point, radius: u32, tone: Tone);

    fn draw_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone);

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone);

    /// Draw `text` at the current text size with an explicit anchor
    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor);

    /// Draw `text` using the current text anchor
    fn draw_string(&mut self, text: &str, at: Point) {
        let anchor = self.text_anchor();
        self.draw_text(text, at, anchor);
    }

    /// Draw `text` horizontally centred on `at`, top aligned
    fn draw_centred_string(&mut self, text: &str, at: Point) {
        self.draw_text(text, at, TextAnchor::TopCentre);
    }

    /// Draw `text` ending at `at`, top aligned
    fn draw_right_string(&mut self, text: &str, at: Point) {
        self.draw_text(text, at, TextAnchor::TopRight);
    }
}

/// Display capabilities and metadata
#[derive(Debug, Clone)]
pub struct DisplayCapabilities {
    /// Panel width in pixels
    pub width: u32,

    /// Panel height in pixels
    pub height: u32,

    /// Whether a sub-rectangle of the panel can be refreshed on its own
    pub supports_partial_refresh: bool,
}

/// Commit target for a finished canvas.
///
/// Buffers are packed 4bpp ink levels, two pixels per byte with the left
/// pixel in the high nibble, rows padded to a whole byte.
pub trait DisplayDriver {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the panel for the first commit
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Clear the whole panel to paper white
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Push a packed region and trigger a physical refresh of it.
    ///
    /// No acknowledgement beyond the returned status is expected; the call
    /// is fire-and-forget from the renderer's point of view.
    fn write_region(
        &mut self,
        origin: Point,
        size: Size,
        buffer: &[u8],
        mode: RefreshMode,
    ) -> Result<(), DisplayError>;

    /// Validate that a region fits on the panel; shared by implementations
    fn check_region(&self, origin: Point, size: Size, buffer: &[u8]) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        let fits = origin.x >= 0
            && origin.y >= 0
            && origin.x as u64 + size.width as u64 <= w as u64
            && origin.y as u64 + size.height as u64 <= h as u64;
        if !fits {
            return Err(DisplayError::RegionOutOfBounds {
                x: origin.x,
                y: origin.y,
                width: size.width,
                height: size.height,
            });
        }
        if !self.capabilities().supports_partial_refresh && (origin != Point::zero() || size != Size::new(w, h)) {
            return Err(DisplayError::UnsupportedOperation);
        }
        let expected = packed_len(size);
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }
        Ok(())
    }
}

/// Bytes needed for a packed 4bpp region
pub fn packed_len(size: Size) -> usize {
    ((size.width as usize + 1) / 2) * size.height as usize
}
