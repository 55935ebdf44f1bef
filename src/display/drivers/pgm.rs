/*
 *  display/drivers/pgm.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop stand-in for the panel: every commit rewrites a PGM image
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
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::display::color::Tone;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver, RefreshMode};
use crate::vframebuf::VarFrameBuf;

/// File-backed panel.
///
/// Holds the full panel image, merges each committed region into it and
/// writes the result as a binary (P5) PGM. Reduced-level waveforms are
/// emulated by quantising the committed region.
pub struct PgmDriver {
    path: PathBuf,
    panel: VarFrameBuf<Gray4>,
    capabilities: DisplayCapabilities,
    /// Load the existing image on init so partial commits land on the last frame
    resume: bool,
}

impl PgmDriver {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            panel: VarFrameBuf::new(width, height, Tone::PAPER.to_gray4()),
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_partial_refresh: true,
            },
            resume: false,
        }
    }

    /// Start from the image already on disk (if it matches the panel size)
    pub fn resuming(mut self) -> Self {
        self.resume = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode the current panel image
    pub fn encode(&self) -> Vec<u8> {
        let (w, h) = (self.panel.width(), self.panel.height());
        let mut out = format!("P5\n{} {}\n255\n", w, h).into_bytes();
        out.extend(self.panel.as_slice().iter().map(|g| Tone::from_gray4(*g).luminance()));
        out
    }

    fn load_existing(&mut self) -> Result<(), DisplayError> {
        let data = match fs::read(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let header = format!("P5\n{} {}\n255\n", self.panel.width(), self.panel.height());
        let body = match data.strip_prefix(header.as_bytes()) {
            Some(body) if body.len() == self.panel.as_slice().len() => body,
            _ => {
                debug!("ignoring {}: not a matching P5 image", self.path.display());
                return Ok(());
            }
        };
        for (dst, &lum) in self.panel.as_mut_slice().iter_mut().zip(body) {
            *dst = Gray4::new((255 - lum) / 17);
        }
        Ok(())
    }

    fn quantise(level: u8, mode: RefreshMode) -> u8 {
        match mode.gray_levels() {
            1 => 0,
            2 => if level >= 8 { 15 } else { 0 },
            4 => (level / 5) * 5,
            _ => level,
        }
    }

    fn flush(&self) -> Result<(), DisplayError> {
        fs::write(&self.path, self.encode())?;
        Ok(())
    }
}

impl DisplayDriver for PgmDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if self.resume {
            self.load_existing()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.panel.clear_color(Tone::PAPER.to_gray4());
        self.flush()
    }

    fn write_region(
        &mut self,
        origin: Point,
        size: Size,
        buffer: &[u8],
        mode: RefreshMode,
    ) -> Result<(), DisplayError> {
        self.check_region(origin, size, buffer)?;

        let row_bytes = (size.width as usize + 1) / 2;
        for y in 0..size.height as usize {
            for x in 0..size.width as usize {
                let byte = buffer[y * row_bytes + x / 2];
                let level = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                let level = Self::quantise(level, mode);
                self.panel.set_pixel(origin + Point::new(x as i32, y as i32), Gray4::new(level));
            }
        }

        self.flush()?;
        info!("wrote {} ({}x{} region, {:?})", self.path.display(), size.width, size.height, mode);
        Ok(())
    }
}
