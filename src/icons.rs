/*
 *  icons.rs
 *
 *  wxpaper - weather on paper
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::display::canvas::Canvas;
use crate::display::color::Tone;
use crate::display::error::DisplayError;
use crate::display::traits::{Surface, TextAnchor};

/// Icons are square, this many pixels a side
pub const ICON_SIZE: u32 = 64;

/// Named bitmaps of the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    ClearDay,
    FewCloudsDay,
    FewCloudsNight,
    ScatteredClouds,
    /// Shared night cloud, also used by night codes with no asset of their own
    Cloud,
    BrokenClouds,
    ShowerRainDay,
    ShowerRainNight,
    RainDay,
    ThunderDay,
    ThunderNight,
    SnowDay,
    SnowNight,
    MistDay,
    MistNight,
    Unknown,
    Sunrise,
    Sunset,
    Temperature,
    Humidity,
}

impl IconId {
    pub const ALL: [IconId; 20] = [
        IconId::ClearDay,
        IconId::FewCloudsDay,
        IconId::FewCloudsNight,
        IconId::ScatteredClouds,
        IconId::Cloud,
        IconId::BrokenClouds,
        IconId::ShowerRainDay,
        IconId::ShowerRainNight,
        IconId::RainDay,
        IconId::ThunderDay,
        IconId::ThunderNight,
        IconId::SnowDay,
        IconId::SnowNight,
        IconId::MistDay,
        IconId::MistNight,
        IconId::Unknown,
        IconId::Sunrise,
        IconId::Sunset,
        IconId::Temperature,
        IconId::Humidity,
    ];

    /// File stem of the bitmap in an icon directory
    pub fn stem(self) -> &'static str {
        match self {
            IconId::ClearDay => "01d",
            IconId::FewCloudsDay => "02d",
            IconId::FewCloudsNight => "02n",
            IconId::ScatteredClouds => "03d",
            IconId::Cloud => "03n",
            IconId::BrokenClouds => "04d",
            IconId::ShowerRainDay => "09d",
            IconId::ShowerRainNight => "09n",
            IconId::RainDay => "10d",
            IconId::ThunderDay => "11d",
            IconId::ThunderNight => "11n",
            IconId::SnowDay => "13d",
            IconId::SnowNight => "13n",
            IconId::MistDay => "50d",
            IconId::MistNight => "50n",
            IconId::Unknown => "unknown",
            IconId::Sunrise => "sunrise",
            IconId::Sunset => "sunset",
            IconId::Temperature => "temperature",
            IconId::Humidity => "humidity",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|id| *id == self).unwrap_or(0)
    }
}

/// Condition code to bitmap.
///
/// `01n`, `04n` and `10n` have no night artwork and reuse the shared cloud.
pub const CONDITION_CODES: [(&str, IconId); 18] = [
    ("01d", IconId::ClearDay),
    ("01n", IconId::Cloud),
    ("02d", IconId::FewCloudsDay),
    ("02n", IconId::FewCloudsNight),
    ("03d", IconId::ScatteredClouds),
    ("03n", IconId::Cloud),
    ("04d", IconId::BrokenClouds),
    ("04n", IconId::Cloud),
    ("09d", IconId::ShowerRainDay),
    ("09n", IconId::ShowerRainNight),
    ("10d", IconId::RainDay),
    ("10n", IconId::Cloud),
    ("11d", IconId::ThunderDay),
    ("11n", IconId::ThunderNight),
    ("13d", IconId::SnowDay),
    ("13n", IconId::SnowNight),
    ("50d", IconId::MistDay),
    ("50n", IconId::MistNight),
];

/// Bitmap for a condition code; anything unlisted (including "") is `Unknown`
pub fn select(code: &str) -> IconId {
    CONDITION_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, id)| *id)
        .unwrap_or(IconId::Unknown)
}

/// Packed 16-bit grayscale bitmap.
///
/// The top nibble of each value is an inverted gray level: `0xF...` is
/// paper, `0x0...` full ink. Only built through [`IconBitmap::new`] or
/// [`IconBitmap::from_le_bytes`], so the pixel count always matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl IconBitmap {
    /// Wrap raw values; `pixels` must hold `width * height` entries
    pub fn new(width: u32, height: u32, pixels: Vec<u16>) -> Result<Self, DisplayError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Parse little-endian `u16` values of an `ICON_SIZE` square icon
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, DisplayError> {
        let expected = (ICON_SIZE * ICON_SIZE * 2) as usize;
        if bytes.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: bytes.len() });
        }
        let pixels = bytes.chunks_exact(2).map(|b| u16::from_le_bytes([b[0], b[1]])).collect();
        Self::new(ICON_SIZE, ICON_SIZE, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw values, row-major
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Ink level (0 paper, 15 darkest) at `(x, y)`
    pub fn level(&self, x: u32, y: u32) -> u8 {
        let v = self.pixels[(y * self.width + x) as usize];
        15 - (v >> 12) as u8
    }

    /// Pack a canvas into bitmap values
    fn from_canvas(canvas: &Canvas) -> Self {
        let size = canvas.size();
        let pixels = (0..size.height as i32)
            .flat_map(|y| (0..size.width as i32).map(move |x| Point::new(x, y)))
            .map(|p| {
                let level = canvas.pixel(p).unwrap_or(Tone::PAPER).level();
                ((15 - level) as u16) << 12
            })
            .collect();
        Self { width: size.width, height: size.height, pixels }
    }
}

/// Source of icon bitmaps
pub trait IconAtlas {
    fn bitmap(&self, id: IconId) -> &IconBitmap;

    /// Bitmap for a condition code, with the unknown fallback
    fn lookup(&self, code: &str) -> &IconBitmap {
        self.bitmap(select(code))
    }
}

/// Stamp `bitmap` with its top-left at `origin`.
///
/// Normal mode plots every pixel at its gray level, paper included. High
/// contrast plots only inked pixels, all at full ink, leaving the
/// background untouched.
pub fn draw_icon<S>(surface: &mut S, origin: Point, bitmap: &IconBitmap, high_contrast: bool)
where
    S: Surface + ?Sized,
{
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let level = bitmap.level(x, y);
            let p = origin + Point::new(x as i32, y as i32);
            if high_contrast {
                if level > 0 {
                    surface.draw_pixel(p, Tone::INK);
                }
            } else {
                surface.draw_pixel(p, Tone::new(level));
            }
        }
    }
}

/// A full set of bitmaps, one per [`IconId`]
#[derive(Debug, Clone)]
pub struct IconSet {
    bitmaps: Vec<IconBitmap>,
}

impl IconSet {
    /// Procedurally drawn icons, always available
    pub fn builtin() -> Self {
        Self { bitmaps: IconId::ALL.iter().map(|id| render_builtin(*id)).collect() }
    }

    /// Load `<dir>/<stem>.bin` for every icon.
    ///
    /// A missing or malformed file falls back to the built-in drawing of that
    /// icon alone.
    pub fn load_dir(dir: &Path) -> Self {
        let bitmaps = IconId::ALL
            .iter()
            .map(|id| {
                let path = dir.join(format!("{}.bin", id.stem()));
                match fs::read(&path).map_err(DisplayError::from).and_then(|b| IconBitmap::from_le_bytes(&b)) {
                    Ok(bitmap) => {
                        debug!("loaded icon {}", path.display());
                        bitmap
                    }
                    Err(e) => {
                        warn!("icon {} unusable ({}), using built-in", path.display(), e);
                        render_builtin(*id)
                    }
                }
            })
            .collect();
        Self { bitmaps }
    }
}

impl IconAtlas for IconSet {
    fn bitmap(&self, id: IconId) -> &IconBitmap {
        &self.bitmaps[id.index()]
    }
}

fn render_builtin(id: IconId) -> IconBitmap {
    let mut c = Canvas::new(ICON_SIZE, ICON_SIZE);
    match id {
        IconId::ClearDay => sun(&mut c, Point::new(32, 32), 14),
        IconId::FewCloudsDay => {
            sun(&mut c, Point::new(22, 22), 9);
            cloud(&mut c, Point::new(6, 10), Tone::new(6));
        }
        IconId::FewCloudsNight => {
            moon(&mut c, Point::new(22, 22), 11);
            cloud(&mut c, Point::new(6, 10), Tone::new(6));
        }
        IconId::ScatteredClouds => cloud(&mut c, Point::zero(), Tone::new(6)),
        IconId::Cloud => cloud(&mut c, Point::zero(), Tone::new(9)),
        IconId::BrokenClouds => {
            cloud(&mut c, Point::new(8, -8), Tone::new(5));
            cloud(&mut c, Point::new(-4, 4), Tone::new(10));
        }
        IconId::ShowerRainDay | IconId::ShowerRainNight => {
            if id == IconId::ShowerRainDay {
                sun(&mut c, Point::new(20, 16), 8);
            } else {
                moon(&mut c, Point::new(20, 16), 8);
            }
            cloud(&mut c, Point::new(4, -6), Tone::new(9));
            rain(&mut c, 3);
        }
        IconId::RainDay => {
            sun(&mut c, Point::new(20, 16), 8);
            cloud(&mut c, Point::new(4, -6), Tone::new(7));
            rain(&mut c, 5);
        }
        IconId::ThunderDay | IconId::ThunderNight => {
            cloud(&mut c, Point::new(0, -8), Tone::new(if id == IconId::ThunderDay { 8 } else { 11 }));
            c.fill_triangle(Point::new(34, 38), Point::new(24, 52), Point::new(32, 50), Tone::INK);
            c.fill_triangle(Point::new(32, 48), Point::new(40, 48), Point::new(28, 62), Tone::INK);
        }
        IconId::SnowDay | IconId::SnowNight => {
            cloud(&mut c, Point::new(0, -8), Tone::new(if id == IconId::SnowDay { 5 } else { 9 }));
            for x in [20, 32, 44] {
                flake(&mut c, Point::new(x, 52));
            }
        }
        IconId::MistDay | IconId::MistNight => {
            let tone = Tone::new(if id == IconId::MistDay { 7 } else { 11 });
            for (i, y) in [20, 30, 40, 50].into_iter().enumerate() {
                let inset = if i % 2 == 0 { 8 } else { 14 };
                c.fill_rect(Rectangle::new(Point::new(inset, y), Size::new(64 - 2 * inset as u32, 4)), tone);
            }
        }
        IconId::Unknown => {
            c.draw_rect(Rectangle::new(Point::new(8, 8), Size::new(48, 48)), Tone::INK);
            c.set_text_size(3);
            c.draw_text("?", Point::new(32, 32), TextAnchor::MiddleCentre);
        }
        IconId::Sunrise | IconId::Sunset => {
            sun(&mut c, Point::new(32, 44), 10);
            c.fill_rect(Rectangle::new(Point::new(0, 44), Size::new(64, 20)), Tone::PAPER);
            c.draw_line(Point::new(4, 44), Point::new(60, 44), Tone::INK);
            let (tip, base) = if id == IconId::Sunrise { (4, 16) } else { (16, 4) };
            c.fill_triangle(Point::new(32, tip), Point::new(25, base), Point::new(39, base), Tone::INK);
        }
        IconId::Temperature => {
            c.draw_rect(Rectangle::new(Point::new(27, 6), Size::new(10, 38)), Tone::INK);
            c.fill_rect(Rectangle::new(Point::new(30, 24), Size::new(4, 22)), Tone::new(12));
            c.fill_circle(Point::new(32, 50), 8, Tone::new(12));
            for y in [12, 20, 28, 36] {
                c.draw_line(Point::new(38, y), Point::new(43, y), Tone::INK);
            }
        }
        IconId::Humidity => {
            c.fill_circle(Point::new(32, 40), 14, Tone::new(8));
            c.fill_triangle(Point::new(32, 6), Point::new(19, 34), Point::new(45, 34), Tone::new(8));
        }
    }
    IconBitmap::from_canvas(&c)
}

fn sun(c: &mut Canvas, center: Point, radius: i32) {
    c.fill_circle(center, radius as u32, Tone::new(10));
    for step in 0..8 {
        let deg = step as f64 * 45.0;
        let (ix, iy) = crate::trig::polar_offset((radius + 4) as f64, deg);
        let (ox, oy) = crate::trig::polar_offset((radius + 9) as f64, deg);
        c.draw_line(
            center + crate::trig::to_pixel(ix, iy),
            center + crate::trig::to_pixel(ox, oy),
            Tone::INK,
        );
    }
}

fn moon(c: &mut Canvas, center: Point, radius: i32) {
    c.fill_circle(center, radius as u32, Tone::new(9));
    c.fill_circle(center + Point::new(radius / 2, -radius / 2), radius as u32 * 3 / 4, Tone::PAPER);
}

/// Three overlapping puffs over a flat base, offset from the icon centre
fn cloud(c: &mut Canvas, offset: Point, tone: Tone) {
    let o = offset;
    c.fill_circle(o + Point::new(22, 38), 10, tone);
    c.fill_circle(o + Point::new(36, 32), 13, tone);
    c.fill_circle(o + Point::new(48, 40), 8, tone);
    c.fill_rect(Rectangle::new(o + Point::new(12, 38), Size::new(44, 10)), tone);
}

fn rain(c: &mut Canvas, drops: i32) {
    for i in 0..drops {
        let x = 16 + i * 32 / drops.max(1);
        c.draw_line(Point::new(x + 4, 46), Point::new(x, 58), Tone::INK);
    }
}

fn flake(c: &mut Canvas, center: Point) {
    for (dx, dy) in [(4, 0), (2, 3), (2, -3)] {
        c.draw_line(center + Point::new(-dx, -dy), center + Point::new(dx, dy), Tone::INK);
    }
}
