/*
 *  display/color.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Ink tones for the 4-bit grayscale e-paper canvas
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

/// A 4-bit ink level: 0 is bare paper, 15 is the darkest the panel can show.
///
/// The canvas stores tones as [`Gray4`] values carrying the ink level rather
/// than brightness, which is the panel's native 4bpp order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Tone(u8);

impl Tone {
    /// Bare paper (G0)
    pub const PAPER: Tone = Tone(0);

    /// Full ink (G15)
    pub const INK: Tone = Tone(15);

    /// Create a tone, saturating levels above 15.
    pub const fn new(level: u8) -> Self {
        if level > 15 { Tone(15) } else { Tone(level) }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub fn to_gray4(self) -> Gray4 {
        Gray4::new(self.0)
    }

    pub fn from_gray4(gray: Gray4) -> Self {
        Tone::new(gray.luma())
    }

    /// 8-bit brightness for image viewers (255 = paper white).
    pub fn luminance(self) -> u8 {
        255 - self.0 * 17
    }
}

impl From<Tone> for Gray4 {
    fn from(tone: Tone) -> Self {
        tone.to_gray4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_saturate() {
        assert_eq!(Tone::new(42), Tone::INK);
        assert_eq!(Tone::new(7).level(), 7);
    }

    #[test]
    fn gray4_round_trips_ink_level() {
        assert_eq!(Tone::INK.to_gray4(), Gray4::new(15));
        assert_eq!(Tone::from_gray4(Gray4::new(3)), Tone::new(3));
    }

    #[test]
    fn luminance_inverts_ink() {
        assert_eq!(Tone::PAPER.luminance(), 255);
        assert_eq!(Tone::INK.luminance(), 0);
    }
}
