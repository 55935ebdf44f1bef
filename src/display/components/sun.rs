/*
 *  display/components/sun.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Sunrise and sunset panel
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

use crate::display::components::{Panel, PanelContext, body_top};
use crate::display::error::RenderError;
use crate::display::layout::PanelRegion;
use crate::display::traits::{Surface, TextAnchor};
use crate::icons::{IconId, draw_icon};

pub struct SunPanel {
    region: PanelRegion,
}

impl SunPanel {
    pub fn new(region: PanelRegion) -> Self {
        Self { region }
    }
}

impl Panel for SunPanel {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let weather = &ctx.input.weather;
        let x = self.region.x;
        let top = body_top(&self.region, &ctx.style);

        surface.set_text_size(3);
        let rows = [(IconId::Sunrise, weather.sunrise, 20), (IconId::Sunset, weather.sunset, 115)];
        for (icon, at, dy) in rows {
            // grayscale stamp, these icons are not condition icons
            draw_icon(surface, Point::new(x + 25, top + dy), ctx.atlas.bitmap(icon), false);
            let hhmm = at.format("%H:%M").to_string();
            surface.draw_text(&hhmm, Point::new(x + 105, top + dy + 25), TextAnchor::TopLeft);
        }
        Ok(())
    }
}
