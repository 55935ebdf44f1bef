/*
 *  display/drivers/mock.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver and recording surface for testing without hardware
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

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use std::sync::{Arc, Mutex};

use crate::display::canvas::Canvas;
use crate::display::color::Tone;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver, RefreshMode, Surface, TextAnchor};
use crate::vframebuf::VarFrameBuf;

/// One committed region as seen by the mock panel
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub origin: Point,
    pub size: Size,
    pub mode: RefreshMode,
    pub bytes: usize,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Every region written, in order
    pub commits: Vec<CommitRecord>,

    /// Simulate failures (for error testing)
    pub simulate_write_failure: bool,
}

/// Mock e-paper panel.
///
/// Unpacks every committed region into its own panel image so tests can
/// check what would physically be shown.
#[derive(Debug, Clone)]
pub struct MockDriver {
    panel: VarFrameBuf<Gray4>,
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

impl MockDriver {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            panel: VarFrameBuf::new(width, height, Tone::PAPER.to_gray4()),
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_partial_refresh: true,
            },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Panel that only accepts full-screen commits
    pub fn without_partial_refresh(width: u32, height: u32) -> Self {
        let mut driver = Self::new(width, height);
        driver.capabilities.supports_partial_refresh = false;
        driver
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    pub fn commits(&self) -> Vec<CommitRecord> {
        self.lock().commits.clone()
    }

    pub fn pixel(&self, p: Point) -> Option<Tone> {
        self.panel.pixel(p).map(Tone::from_gray4)
    }

    /// Count pixels carrying ink on the panel
    pub fn count_ink_pixels(&self) -> usize {
        self.panel.as_slice().iter().filter(|g| g.luma() > 0).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockDriverState> {
        // a test that panicked while holding the lock still leaves usable state
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.lock().init_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lock().clear_count += 1;
        self.panel.clear_color(Tone::PAPER.to_gray4());
        Ok(())
    }

    fn write_region(
        &mut self,
        origin: Point,
        size: Size,
        buffer: &[u8],
        mode: RefreshMode,
    ) -> Result<(), DisplayError> {
        if self.lock().simulate_write_failure {
            return Err(DisplayError::Other("Simulated write failure".to_string()));
        }
        self.check_region(origin, size, buffer)?;

        let row_bytes = (size.width as usize + 1) / 2;
        for y in 0..size.height as usize {
            for x in 0..size.width as usize {
                let byte = buffer[y * row_bytes + x / 2];
                let level = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                self.panel.set_pixel(origin + Point::new(x as i32, y as i32), Gray4::new(level));
            }
        }

        self.lock().commits.push(CommitRecord { origin, size, mode, bytes: buffer.len() });
        Ok(())
    }
}

/// A single primitive call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Pixel(Point, Tone),
    Line(Point, Point, Tone),
    Rect(Rectangle, Tone),
    FillRect(Rectangle, Tone),
    Circle(Point, u32, Tone),
    FillCircle(Point, u32, Tone),
    Triangle([Point; 3], Tone),
    FillTriangle([Point; 3], Tone),
    Text { text: String, at: Point, anchor: TextAnchor, size: u8 },
}

/// Surface that forwards to a real [`Canvas`] and logs every call
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    canvas: Canvas,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { canvas: Canvas::new(width, height), ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn pixels(&self) -> Vec<Point> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Pixel(p, _) => Some(*p),
            _ => None,
        }).collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point, Tone)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line(a, b, t) => Some((*a, *b, *t)),
            _ => None,
        }).collect()
    }

    pub fn texts(&self) -> Vec<(String, Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, at, .. } => Some((text.clone(), *at)),
            _ => None,
        }).collect()
    }

    pub fn fill_rects(&self) -> Vec<Rectangle> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect(r, _) => Some(*r),
            _ => None,
        }).collect()
    }

    pub fn fill_circles(&self) -> Vec<(Point, u32, Tone)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillCircle(c, r, t) => Some((*c, *r, *t)),
            _ => None,
        }).collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.canvas.size()
    }

    fn set_text_size(&mut self, size: u8) {
        self.canvas.set_text_size(size);
    }

    fn text_size(&self) -> u8 {
        self.canvas.text_size()
    }

    fn set_text_color(&mut self, fg: Tone, bg: Option<Tone>) {
        self.canvas.set_text_color(fg, bg);
    }

    fn set_text_anchor(&mut self, anchor: TextAnchor) {
        self.canvas.set_text_anchor(anchor);
    }

    fn text_anchor(&self) -> TextAnchor {
        self.canvas.text_anchor()
    }

    fn draw_pixel(&mut self, p: Point, tone: Tone) {
        self.ops.push(DrawOp::Pixel(p, tone));
        self.canvas.draw_pixel(p, tone);
    }

    fn draw_line(&mut self, from: Point, to: Point, tone: Tone) {
        self.ops.push(DrawOp::Line(from, to, tone));
        self.canvas.draw_line(from, to, tone);
    }

    fn draw_rect(&mut self, rect: Rectangle, tone: Tone) {
        self.ops.push(DrawOp::Rect(rect, tone));
        self.canvas.draw_rect(rect, tone);
    }

    fn fill_rect(&mut self, rect: Rectangle, tone: Tone) {
        self.ops.push(DrawOp::FillRect(rect, tone));
        self.canvas.fill_rect(rect, tone);
    }

    fn draw_circle(&mut self, center: Point, radius: u32, tone: Tone) {
        self.ops.push(DrawOp::Circle(center, radius, tone));
        self.canvas.draw_circle(center, radius, tone);
    }

    fn fill_circle(&mut self, center: Point, radius: u32, tone: Tone) {
        self.ops.push(DrawOp::FillCircle(center, radius, tone));
        self.canvas.fill_circle(center, radius, tone);
    }

    fn draw_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone) {
        self.ops.push(DrawOp::Triangle([a, b, c], tone));
        self.canvas.draw_triangle(a, b, c, tone);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, tone: Tone) {
        self.ops.push(DrawOp::FillTriangle([a, b, c], tone));
        self.canvas.fill_triangle(a, b, c, tone);
    }

    fn draw_text(&mut self, text: &str, at: Point, anchor: TextAnchor) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            anchor,
            size: self.canvas.text_size(),
        });
        self.canvas.draw_text(text, at, anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_driver_init_and_clear() {
        let mut driver = MockDriver::new(64, 32);
        driver.init().unwrap();
        DisplayDriver::clear(&mut driver).unwrap();
        let state = driver.state();
        assert_eq!(state.lock().unwrap().init_count, 1);
        assert_eq!(state.lock().unwrap().clear_count, 1);
        assert_eq!(driver.count_ink_pixels(), 0);
    }

    #[test]
    fn test_mock_driver_rejects_region_off_panel() {
        let mut driver = MockDriver::new(8, 8);
        let buffer = vec![0u8; 8];
        let err = driver.write_region(Point::new(6, 0), Size::new(4, 4), &buffer, RefreshMode::Gc16);
        assert!(matches!(err, Err(DisplayError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn test_mock_driver_buffer_size_mismatch() {
        let mut driver = MockDriver::new(8, 8);
        let buffer = vec![0xFF; 5];
        let err = driver.write_region(Point::zero(), Size::new(4, 4), &buffer, RefreshMode::Gc16);
        assert!(matches!(err, Err(DisplayError::BufferSizeMismatch { expected: 8, actual: 5 })));
    }

    #[test]
    fn test_mock_driver_partial_refresh_unsupported() {
        let mut driver = MockDriver::without_partial_refresh(8, 8);
        let buffer = vec![0u8; 8];
        let err = driver.write_region(Point::new(2, 2), Size::new(4, 4), &buffer, RefreshMode::Du);
        assert!(matches!(err, Err(DisplayError::UnsupportedOperation)));
    }

    #[test]
    fn test_mock_driver_simulated_failure() {
        let mut driver = MockDriver::new(8, 8);
        driver.state().lock().unwrap().simulate_write_failure = true;
        let buffer = vec![0u8; 32];
        assert!(driver.write_region(Point::zero(), Size::new(8, 8), &buffer, RefreshMode::Gc16).is_err());
        assert!(driver.commits().is_empty());
    }

    #[test]
    fn test_recording_surface_logs_and_draws() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.draw_line(Point::new(0, 0), Point::new(9, 0), Tone::INK);
        surface.draw_pixel(Point::new(5, 5), Tone::new(4));
        assert_eq!(surface.lines().len(), 1);
        assert_eq!(surface.pixels(), vec![Point::new(5, 5)]);
        assert_eq!(surface.canvas().pixel(Point::new(9, 0)), Some(Tone::INK));
    }
}
