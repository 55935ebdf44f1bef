/*
 *  display/canvas.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory 4bpp canvas implementing the drawing-surface contract
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

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::info;

use crate::display::color::Tone;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayDriver, RefreshMode, Surface, TextAnchor};
use crate::vframebuf::VarFrameBuf;

/// Font used for a given text size.
///
/// Size 1 is the small label font, 2 the body font (15 px tall), 3 the panel
/// title font and anything larger the headline font.
pub fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 => &profont::PROFONT_12_POINT,
        3 => &profont::PROFONT_18_POINT,
        _ => &profont::PROFONT_24_POINT,
    }
}

/// The raster buffer a draw pass accumulates into before a single commit.
#[derive(Debug, Clone)]
pub struct Canvas {
    fb: VarFrameBuf<Gray4>,
    text_size: u8,
    text_fg: Tone,
    text_bg: Option<Tone>,
    anchor: TextAnchor,
}

impl Canvas {
    /// Create a blank (paper white) canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fb: VarFrameBuf::new(width, height, Tone::PAPER.to_gray4()),
            text_size: 1,
            text_fg: Tone::INK,
            text_bg: None,
            anchor: TextAnchor::TopLeft,
        }
    }

    pub fn pixel(&self, p: Point) -> Option<Tone> {
        self.fb.pixel(p).map(Tone::from_gray4)
    }

    /// Number of pixels carrying any ink
    pub fn ink_count(&self) -> usize {
        self.fb.as_slice().iter().filter(|g| g.luma() > 0).count()
    }

    /// Pack to 4bpp, left pixel in the high nibble, rows padded to a byte
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let (w, h) = (self.fb.width(), self.fb.height());
        let row_bytes = (w + 1) / 2;
        let mut bytes = vec![0u8; row_bytes * h];
        let pixels = self.fb.as_slice();

        for y in 0..h {
            for x in 0..w {
                let value = pixels[y * w + x].luma() & 0x0F;
                let byte_idx = y * row_bytes + x / 2;
                if x % 2 == 0 {
                    bytes[byte_idx] |= value << 4;
                } else {
                    bytes[byte_idx] |= value;
                }
            }
        }
        bytes
    }

    /// Push the whole canvas to `driver` with its top-left at `origin`
    pub fn commit<D>(&self, driver: &mut D, origin: Point, mode: RefreshMode) -> Result<(), DisplayError>
    where
        D: DisplayDriver + ?Sized,
    {
        let size = OriginDimensions::size(&self.fb);
        info!(
            "committing {}x{} canvas at ({}, {}) with {:?}",
            size.width, size.height, origin.x, origin.y, mode
        );
        driver.write_region(origin, size, &self.to_packed_bytes(), mode)
    }

    fn text_layout(anchor: TextAnchor) -> (Alignment, Baseline) {
        match anchor {
            TextAnchor::TopLeft => (Alignment::Left, Baseline::Top),
            TextAnchor::TopCentre => (Alignment::Center, Baseline::Top),
            TextAnchor::TopRight => (Alignment::Right, Baseline::Top),
            TextAnchor::MiddleLeft => (Alignment::Left, Baseline::Middle),
            TextAnchor::MiddleCentre => (Alignment::Center, Baseline::Middle),
            TextAnchor::MiddleRight => (Alignment::Right, Baseline::Middle),
            TextAnchor::BottomLeft => (Alignment::Left, Baseline::Bottom),
            TextAnchor::BottomCentre => (Alignment::Center, Baseline::Bottom),
            TextAnchor::BottomRight => (Alignment::Right, Baseline::Bottom),
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        OriginDimensions::size(&self.fb)
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn text_size(&self) -> u8 {
        self.text_size
    }

    fn set_text_color(&mut self, fg: Tone, bg: Option<Tone>) {
        self.text_fg = fg;
        self.text_bg = bg;
    }

    fn set_text_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    fn text_anchor(&self) -> TextAnchor {
        self.anchor
    }

    fn draw_pixel(&mut self, p: Point, tone: Tone) {
        self.fb.set_pixel(p, tone.to_gray4());
    }

    fn draw_line(&mut self, from: Point, to: Point, tone: Tone) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(tone.to_gray4(), 1))
            .draw(&mut self.fb)
            .ok();
    }

    fn draw_rect(&mut self, rect: Rectangle, tone: Tone) {
        rect.into_styled(PrimitiveStyle::with_stroke(tone.to_gray4(), 1))
            .draw(&mut self.fb)
            .ok();
    }

    fn fill_rect(&mut self, rect: Rectangle, tone: Tone) {
        rect.into_styled(PrimitiveStyle::with_fill(tone.to_gray4()))
            .draw(&mut self.fb)
            .ok();
    }

    fn draw_circle(&mut self, center: Point, radius: u32, tone: Tone) {
        Circle::with_center(center, 2 * radius + 1)
            .into_styled(PrimitiveStyle::with_stroke(tone.to_gray4(), 1))
            .draw(&mut self.fb)
            .ok();
    }

    fn fill_circle(&mut self, center: Point, radius: u32, tone: Tone) {
        Circle::with_center(center, 2 * radius + 1)
            .into_styled(PrimitiveStyle::with_fill(tone.to_gray4()))
            .draw(&mut self.fb)
            .ok();
    }

    fn draw_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone) {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_stroke(tone.to_gray4(), 1))
            .draw(&mut self.fb)
            .ok();
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone) {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_fill(tone.to_gray4()))
            .draw(&mut self.fb)
            .ok();
    }

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor) {
        let mut builder = MonoTextStyleBuilder::new()
            .font(font_for_size(self.text_size))
            .text_color(self.text_fg.to_gray4());
        if let Some(bg) = self.text_bg {
            builder = builder.background_color(bg.to_gray4());
        }
        let (alignment, baseline) = Self::text_layout(anchor);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();
        Text::with_text_style(text, at, builder.build(), text_style)
            .draw(&mut self.fb)
            .ok();
    }
}
