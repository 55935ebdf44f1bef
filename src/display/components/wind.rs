/*
 *  display/components/wind.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Wind panel - compass rose with speed and direction
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

use crate::display::components::{Panel, PanelContext};
use crate::display::error::RenderError;
use crate::display::layout::PanelRegion;
use crate::display::traits::Surface;
use crate::draw::draw_compass_rose;

pub const WIND_UNIT: &str = "m/s";

pub struct WindPanel {
    region: PanelRegion,
    radius: i32,
}

impl WindPanel {
    pub fn new(region: PanelRegion, radius: i32) -> Self {
        Self { region, radius }
    }

    /// Rose centre: middle of the panel, pushed down clear of the header
    pub fn centre(&self) -> Point {
        let r = &self.region;
        Point::new(r.x + r.width / 2, r.y + r.height / 2 + 20)
    }
}

impl Panel for WindPanel {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let weather = &ctx.input.weather;
        let bearing = weather.wind_direction.rem_euclid(360.0);
        draw_compass_rose(surface, self.centre(), self.radius, bearing, weather.wind_speed, WIND_UNIT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::components::testing::{context, expanded_geometry};
    use crate::display::drivers::mock::{DrawOp, RecordingSurface};
    use crate::draw::arrow_vertices;
    use crate::icons::IconSet;
    use crate::weather::fixtures::sample_input;

    #[test]
    fn rose_is_centred_below_header() {
        let g = expanded_geometry();
        let panel = WindPanel::new(g.wind.clone(), g.compass_radius);
        assert_eq!(panel.centre(), Point::new(596, 180));
    }

    #[test]
    fn arrow_follows_wind_direction() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let panel = WindPanel::new(g.wind.clone(), g.compass_radius);
        let mut surface = RecordingSurface::new(960, 540);
        panel.render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();

        let expected = arrow_vertices(panel.centre(), 75 - 17, 225.0, 15, 27);
        assert!(surface.ops().contains(&DrawOp::FillTriangle(expected, crate::display::color::Tone::INK)));
        let texts: Vec<String> = surface.texts().into_iter().map(|(t, _)| t).collect();
        assert!(texts.contains(&"3.4".to_string()));
        assert!(texts.contains(&"m/s".to_string()));
    }
}
