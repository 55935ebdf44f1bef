/*
 *  trig.rs
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
//! Degree-based helpers for the polar drawing primitives.
//! Screen coordinates: +x right, +y down, so positive angles turn clockwise.

use embedded_graphics::prelude::Point;

pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

#[inline]
pub fn sin_deg(x: f64) -> f64 { (x * DEG_TO_RAD).sin() }
#[inline]
pub fn cos_deg(x: f64) -> f64 { (x * DEG_TO_RAD).cos() }

/// Offset of a point `radius` away at `deg` (0° = +x axis, clockwise on screen).
#[inline]
pub fn polar_offset(radius: f64, deg: f64) -> (f64, f64) {
    (radius * cos_deg(deg), radius * sin_deg(deg))
}

/// Offset for a compass bearing: 0° = north (up), 90° = east, clockwise.
#[inline]
pub fn bearing_offset(radius: f64, bearing: f64) -> (f64, f64) {
    polar_offset(radius, bearing - 90.0)
}

/// Rotate `(x, y)` by `deg` with the standard rotation matrix.
#[inline]
pub fn rotate(x: f64, y: f64, deg: f64) -> (f64, f64) {
    let (s, c) = (sin_deg(deg), cos_deg(deg));
    (x * c - y * s, y * c + x * s)
}

/// Snap an analytic position to the nearest pixel.
#[inline]
pub fn to_pixel(x: f64, y: f64) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}
