/*
 *  display/components/weather.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Current conditions panel
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

use arrayvec::ArrayString;
use core::fmt::Write;
use embedded_graphics::prelude::*;

use crate::display::components::{Panel, PanelContext, body_top};
use crate::display::error::RenderError;
use crate::display::layout::PanelRegion;
use crate::display::traits::{Surface, TextAnchor};
use crate::icons::{ICON_SIZE, draw_icon};

/// Icon, description, temperature and rain of the current hour
pub struct CurrentWeatherPanel {
    region: PanelRegion,
}

impl CurrentWeatherPanel {
    pub fn new(region: PanelRegion) -> Self {
        Self { region }
    }
}

impl Panel for CurrentWeatherPanel {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let weather = &ctx.input.weather;
        let r = &self.region;
        let top = body_top(r, &ctx.style);
        let centre_x = r.x + r.width / 2;

        let icon = ctx.atlas.lookup(&weather.icon);
        draw_icon(surface, Point::new(centre_x - ICON_SIZE as i32 / 2, top + 10), icon, ctx.high_contrast);

        surface.set_text_size(3);
        surface.draw_centred_string(&weather.description, Point::new(centre_x, top + 75));

        let mut line = ArrayString::<24>::new();
        let _ = write!(&mut line, "{:.1} C", weather.temperature);
        surface.draw_text(&line, Point::new(r.x + 30, top + 135), TextAnchor::TopLeft);

        line.clear();
        let _ = write!(&mut line, "{:.1} mm", weather.rain);
        surface.draw_text(&line, Point::new(r.x + 30, top + 175), TextAnchor::TopLeft);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::color::Tone;
    use crate::display::components::testing::{context, expanded_geometry};
    use crate::display::drivers::mock::{DrawOp, RecordingSurface};
    use crate::icons::IconSet;
    use crate::weather::fixtures::sample_input;

    #[test]
    fn weather_panel_rows() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let panel = CurrentWeatherPanel::new(g.weather.clone());
        let mut surface = RecordingSurface::new(960, 540);
        panel.render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();

        assert_eq!(
            surface.texts(),
            vec![
                ("Weather".to_string(), Point::new(131, 42)),
                ("light rain".to_string(), Point::new(131, 145)),
                ("4.5 C".to_string(), Point::new(45, 205)),
                ("0.8 mm".to_string(), Point::new(45, 245)),
            ]
        );
        // high contrast icon: ink only, inside the 64px box at (99, 80)
        let icon_px: Vec<_> = surface.ops().iter().filter_map(|op| match op {
            DrawOp::Pixel(p, t) => Some((*p, *t)),
            _ => None,
        }).collect();
        assert!(!icon_px.is_empty());
        assert!(icon_px.iter().all(|(p, t)| *t == Tone::INK && p.x >= 99 && p.x < 163 && p.y >= 80 && p.y < 144));
    }
}
