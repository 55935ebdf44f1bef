/*
 *  display/components/sensor.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Indoor sensor panel - pass time, temperature, humidity
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
use crate::icons::{IconId, draw_icon};

/// Panel redrawn on its own between full passes
pub struct SensorPanel {
    region: PanelRegion,
}

impl SensorPanel {
    pub fn new(region: PanelRegion) -> Self {
        Self { region }
    }
}

impl Panel for SensorPanel {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let r = &self.region;
        let status = &ctx.input.status;
        let top = body_top(r, &ctx.style);
        let centre_x = r.x + r.width / 2;

        surface.set_text_size(3);
        surface.draw_centred_string(&ctx.input.now.format("%d.%m.%Y").to_string(), Point::new(centre_x, top + 20));
        surface.draw_centred_string(&ctx.input.now.format("%H:%M").to_string(), Point::new(centre_x, top + 60));
        surface.set_text_size(2);
        surface.draw_centred_string("updated", Point::new(centre_x, top + 85));

        surface.set_text_size(3);
        let mut value = ArrayString::<16>::new();
        draw_icon(surface, Point::new(r.x + 35, top + 105), ctx.atlas.bitmap(IconId::Temperature), false);
        let _ = write!(&mut value, "{} C", status.indoor_temperature);
        surface.draw_text(&value, Point::new(r.x + 35, top + 175), TextAnchor::TopLeft);

        value.clear();
        draw_icon(surface, Point::new(r.x + 145, top + 105), ctx.atlas.bitmap(IconId::Humidity), false);
        let _ = write!(&mut value, "{}%", status.indoor_humidity);
        surface.draw_text(&value, Point::new(r.x + 150, top + 175), TextAnchor::TopLeft);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::components::testing::{context, expanded_geometry};
    use crate::display::drivers::mock::RecordingSurface;
    use crate::icons::IconSet;
    use crate::weather::fixtures::sample_input;

    #[test]
    fn sensor_rows() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let mut surface = RecordingSurface::new(960, 540);
        SensorPanel::new(g.sensor.clone()).render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();

        assert_eq!(
            surface.texts(),
            vec![
                ("Indoor".to_string(), Point::new(828, 42)),
                ("18.10.2026".to_string(), Point::new(828, 90)),
                ("09:30".to_string(), Point::new(828, 130)),
                ("updated".to_string(), Point::new(828, 155)),
                ("21 C".to_string(), Point::new(747, 245)),
                ("48%".to_string(), Point::new(862, 245)),
            ]
        );
    }

    #[test]
    fn sensor_panel_draws_at_any_origin() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let region = g.sensor.at(Point::zero());
        let mut surface = RecordingSurface::new(234, 252);
        SensorPanel::new(region).render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();
        assert_eq!(surface.texts()[0].1, Point::new(116, 7));
        assert!(surface.canvas().ink_count() > 0);
    }
}
