/*
 *  display/components/daily.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  One day of the forecast strip
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

use crate::display::components::{Panel, PanelContext};
use crate::display::error::RenderError;
use crate::display::layout::PanelRegion;
use crate::display::traits::Surface;
use crate::icons::{ICON_SIZE, draw_icon};

pub struct DailyCell {
    region: PanelRegion,
    index: usize,
}

impl DailyCell {
    /// Cell for forecast day `index`, 0 being today
    pub fn new(region: PanelRegion, index: usize) -> Self {
        Self { region, index }
    }
}

impl Panel for DailyCell {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    /// Day cells are headed by their weekday instead
    fn titled(&self) -> bool {
        false
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let day = ctx.input.weather.daily.get(self.index).ok_or_else(|| {
            RenderError::MissingSamples(format!("no daily sample for day {}", self.index))
        })?;
        let r = &self.region;
        let centre_x = r.x + r.width / 2;

        surface.set_text_size(2);
        let label = if self.index == 0 {
            "Today".to_string()
        } else {
            day.date.format("%a").to_string()
        };
        surface.draw_centred_string(&label, Point::new(centre_x, r.y + 5));

        let icon = ctx.atlas.lookup(&day.icon);
        draw_icon(surface, Point::new(centre_x - ICON_SIZE as i32 / 2, r.y + 20), icon, ctx.high_contrast);

        // whole degrees and percent, truncated toward zero
        let mut text = ArrayString::<24>::new();
        let _ = write!(&mut text, "{}/{}", day.temp_min as i32, day.temp_max as i32);
        surface.draw_centred_string(&text, Point::new(centre_x, r.y + 84));

        text.clear();
        let _ = write!(&mut text, "{}%", day.pop as i32);
        surface.draw_centred_string(&text, Point::new(centre_x, r.y + 102));
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

    fn texts_for(index: usize) -> Vec<(String, Point)> {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let mut surface = RecordingSurface::new(960, 540);
        DailyCell::new(g.daily[index].clone(), index)
            .render(&mut surface, &context(&input, &atlas, g.panel))
            .unwrap();
        surface.texts()
    }

    #[test]
    fn first_cell_is_today() {
        assert_eq!(
            texts_for(0),
            vec![
                ("Today".to_string(), Point::new(73, 291)),
                ("-2/8".to_string(), Point::new(73, 370)),
                ("0%".to_string(), Point::new(73, 388)),
            ]
        );
    }

    #[test]
    fn later_cells_show_weekday() {
        // 2026-10-18 is a Sunday
        let texts = texts_for(1);
        assert_eq!(texts[0].0, "Mon");
        assert_eq!(texts[1].0, "-1/9");
        assert_eq!(texts[2].0, "10%");
        assert_eq!(texts_for(6)[0].0, "Sat");
    }

    #[test]
    fn values_truncate_toward_zero() {
        let mut input = sample_input();
        let day = &mut input.weather.daily[2];
        day.temp_min = -1.7;
        day.temp_max = 7.6;
        day.pop = 49.9;
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let mut surface = RecordingSurface::new(960, 540);
        DailyCell::new(g.daily[2].clone(), 2).render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();
        let texts = surface.texts();
        assert_eq!(texts[1].0, "-1/7");
        assert_eq!(texts[2].0, "49%");
    }

    #[test]
    fn missing_day_is_an_error() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let mut surface = RecordingSurface::new(960, 540);
        let err = DailyCell::new(g.daily[0].clone(), 20).render(&mut surface, &context(&input, &atlas, g.panel));
        assert!(matches!(err, Err(RenderError::MissingSamples(_))));
    }
}
