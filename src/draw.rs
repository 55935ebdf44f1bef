/*
 *  draw.rs
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
//! Polar and vector primitives built on the canvas surface: per-degree arcs,
//! the rotated wind arrow, the compass rose and the head-strip gauges.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::color::Tone;
use crate::display::traits::Surface;
use crate::trig::{bearing_offset, polar_offset, rotate, to_pixel};

/// Points of an arc, one per whole degree in `deg_from..deg_to`.
///
/// The step is fixed at 1° whatever the radius, so large circles come out
/// faceted (gaps between dots) and small ones overplot. Kept as is: it is the
/// look the dashboard was designed with.
pub fn arc_points(center: Point, radius: i32, deg_from: i32, deg_to: i32) -> impl Iterator<Item = Point> {
    (deg_from..deg_to).map(move |deg| {
        let (dx, dy) = polar_offset(radius as f64, deg as f64);
        to_pixel(center.x as f64 + dx, center.y as f64 + dy)
    })
}

pub fn draw_arc<S>(surface: &mut S, center: Point, radius: i32, tone: Tone, deg_from: i32, deg_to: i32)
where
    S: Surface + ?Sized,
{
    for p in arc_points(center, radius, deg_from, deg_to) {
        surface.draw_pixel(p, tone);
    }
}

/// Vertices of the wind arrowhead.
///
/// The triangle is pushed `displacement + 21` pixels out from `center` along
/// the compass `bearing`, then its local vertices `(0, length)`,
/// `(w/2, w/2)`, `(-w/2, w/2)` are rotated by `bearing`. The tip therefore
/// points back towards the centre. Returned as `[tip, left, right]`.
pub fn arrow_vertices(center: Point, displacement: i32, bearing: f64, base_width: i32, length: i32) -> [Point; 3] {
    let (ox, oy) = bearing_offset((displacement + 21) as f64, bearing);
    let (cx, cy) = (center.x as f64 + ox, center.y as f64 + oy);
    let half = (base_width / 2) as f64;

    let local = [(0.0, length as f64), (-half, half), (half, half)];
    local.map(|(x, y)| {
        let (rx, ry) = rotate(x, y, bearing);
        to_pixel(cx + rx, cy + ry)
    })
}

pub fn draw_rotated_arrow<S>(surface: &mut S, center: Point, displacement: i32, bearing: f64, base_width: i32, length: i32)
where
    S: Surface + ?Sized,
{
    let [tip, left, right] = arrow_vertices(center, displacement, bearing, base_width, length);
    surface.fill_triangle(tip, left, right, Tone::INK);
}

/// Radial tick segments of the compass rose, relative to its centre.
///
/// 16 bearings at 22.5° steps, each giving an outer segment (0.9–1.0 r) and
/// an inner one (0.63–0.7 r). Offsets truncate towards zero at every scaling
/// step, which is what keeps the inner ticks tucked against the inner ring.
pub fn compass_ticks(radius: i32) -> Vec<(Point, Point)> {
    let mut ticks = Vec::with_capacity(32);
    for step in 0..16 {
        let bearing = step as f64 * 22.5;
        let (fx, fy) = bearing_offset(radius as f64, bearing);
        let (dxo, dyo) = (fx as i32, fy as i32);
        let outer = Point::new(dxo, dyo);
        ticks.push((outer, scale_toward_zero(outer, 0.9)));

        let inner = scale_toward_zero(outer, 0.7);
        ticks.push((inner, scale_toward_zero(inner, 0.9)));
    }
    ticks
}

fn scale_toward_zero(p: Point, factor: f64) -> Point {
    Point::new((p.x as f64 * factor) as i32, (p.y as f64 * factor) as i32)
}

/// Compass rose with wind speed and direction.
///
/// Text is drawn at size 2. `speed` is printed with one decimal above
/// `unit`, both centred on the rose.
pub fn draw_compass_rose<S>(surface: &mut S, center: Point, radius: i32, bearing: f32, speed: f32, unit: &str)
where
    S: Surface + ?Sized,
{
    surface.set_text_size(2);

    draw_arc(surface, center, radius, Tone::INK, 0, 360);
    draw_arc(surface, center, radius + 1, Tone::INK, 0, 360);
    draw_arc(surface, center, (radius as f64 * 0.7) as i32, Tone::INK, 0, 360);

    for (from, to) in compass_ticks(radius) {
        surface.draw_line(center + from, center + to, Tone::INK);
    }

    // ordinal labels sit just outside the diagonal ticks
    let ordinals = [("NE", 45.0, 15, -15), ("SE", 135.0, 15, 5), ("SW", 225.0, -15, 5), ("NW", 315.0, -15, -15)];
    for (label, deg, nudge_x, nudge_y) in ordinals {
        let (fx, fy) = bearing_offset(radius as f64, deg);
        let at = center + Point::new(fx as i32 + nudge_x, fy as i32 + nudge_y);
        surface.draw_centred_string(label, at);
    }

    surface.draw_centred_string("N", center + Point::new(0, -radius - 20));
    surface.draw_centred_string("S", center + Point::new(0, radius + 5));
    surface.draw_centred_string("W", center + Point::new(-radius - 15, -3));
    surface.draw_centred_string("E", center + Point::new(radius + 15, -3));

    surface.draw_centred_string(&format!("{:.1}", speed), center + Point::new(0, -20));
    surface.draw_centred_string(unit, center);

    draw_rotated_arrow(surface, center, radius - 17, bearing as f64, 15, 27);
}

/// Signal indicator: concentric 90° arcs opening upwards, one more per tier.
///
/// `origin` is the left edge of the indicator; the arcs are centred 12 px to
/// its right.
pub fn draw_signal_arcs<S>(surface: &mut S, origin: Point, quality: u8)
where
    S: Surface + ?Sized,
{
    let center = origin + Point::new(12, 0);
    for radius in signal_arc_radii(quality) {
        draw_arc(surface, center, radius, Tone::INK, 225, 315);
    }
}

/// Radii of the arcs shown for a 0–100 link quality, largest first
pub fn signal_arc_radii(quality: u8) -> Vec<i32> {
    const TIERS: [(u8, i32); 4] = [(80, 16), (40, 12), (20, 8), (10, 4)];
    let mut radii: Vec<i32> = TIERS.iter()
        .filter(|(threshold, _)| quality >= *threshold)
        .map(|(_, r)| *r)
        .collect();
    radii.push(2);
    radii
}

pub const BATTERY_WIDTH: i32 = 40;
pub const BATTERY_HEIGHT: i32 = 16;

/// Battery outline with a nub on the right, filled left to right.
pub fn draw_battery<S>(surface: &mut S, origin: Point, capacity: u8)
where
    S: Surface + ?Sized,
{
    surface.draw_rect(Rectangle::new(origin, Size::new(BATTERY_WIDTH as u32, BATTERY_HEIGHT as u32)), Tone::INK);
    surface.draw_rect(Rectangle::new(origin + Point::new(BATTERY_WIDTH, 3), Size::new(4, 10)), Tone::INK);
    for i in 0..battery_fill_columns(capacity) {
        let x = origin.x + i;
        surface.draw_line(Point::new(x, origin.y), Point::new(x, origin.y + BATTERY_HEIGHT - 1), Tone::INK);
    }
}

/// Filled columns for a capacity: every column up to and including the
/// first one whose share of the width exceeds the capacity.
pub fn battery_fill_columns(capacity: u8) -> i32 {
    let capacity = capacity.min(100) as f32;
    let mut columns = 0;
    for i in 0..BATTERY_WIDTH {
        columns += 1;
        if i as f32 * 100.0 / BATTERY_WIDTH as f32 > capacity {
            break;
        }
    }
    columns
}

/// Dashed horizontal line: 5 px dashes every 10 px, stopping short of the
/// right end so the last dash never touches the frame.
pub fn draw_dashed_hline<S>(surface: &mut S, x: i32, width: i32, y: i32, tone: Tone)
where
    S: Surface + ?Sized,
{
    let mut dash = x;
    while dash < x + width - 10 {
        surface.draw_line(Point::new(dash, y), Point::new(dash + 5, y), tone);
        dash += 10;
    }
}
