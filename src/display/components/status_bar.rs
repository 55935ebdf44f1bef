/*
 *  display/components/status_bar.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Head strip - version, city, link quality and battery
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
use crate::display::traits::{Surface, TextAnchor};
use crate::draw::{draw_battery, draw_signal_arcs};

/// Head strip component
pub struct StatusBar {
    region: PanelRegion,
    version_label: String,
    city: String,
}

impl StatusBar {
    /// Create a head strip spanning `region`
    pub fn new(region: PanelRegion, version_label: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            region,
            version_label: version_label.into(),
            city: city.into(),
        }
    }

    /// Format a percentage to a stack-allocated string
    pub fn format_percent(value: u8) -> ArrayString<8> {
        let mut buf = ArrayString::new();
        let _ = write!(&mut buf, "{}%", value);
        buf
    }
}

impl Panel for StatusBar {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    fn titled(&self) -> bool {
        false
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let status = &ctx.input.status;
        let (x, y) = (self.region.x, self.region.y);
        let right = self.region.right();

        surface.set_text_size(2);
        surface.draw_text(&self.version_label, Point::new(x + 20, y + 10), TextAnchor::TopLeft);
        surface.draw_centred_string(&self.city, Point::new(x + self.region.width / 2, y + 10));

        let quality = status.wifi_quality();
        surface.draw_text(&Self::format_percent(quality), Point::new(right - 200, y + 10), TextAnchor::TopLeft);
        draw_signal_arcs(surface, Point::new(right - 155, y + 25), quality);

        let capacity = status.battery_percent.min(100);
        surface.draw_text(&Self::format_percent(capacity), Point::new(right - 110, y + 10), TextAnchor::TopLeft);
        draw_battery(surface, Point::new(right - 65, y + 10), capacity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::components::testing::{context, expanded_geometry};
    use crate::display::drivers::mock::{DrawOp, RecordingSurface};
    use crate::icons::IconSet;
    use crate::weather::fixtures::sample_input;

    #[test]
    fn head_strip_places_every_item() {
        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let bar = StatusBar::new(g.head.clone(), "v0.3.1", "Bremen");
        let mut surface = RecordingSurface::new(960, 540);
        bar.render(&mut surface, &context(&input, &atlas, g.panel)).unwrap();

        let texts = surface.texts();
        assert_eq!(
            texts,
            vec![
                ("v0.3.1".to_string(), Point::new(20, 10)),
                ("Bremen".to_string(), Point::new(480, 10)),
                ("66%".to_string(), Point::new(760, 10)),
                ("71%".to_string(), Point::new(850, 10)),
            ]
        );
        // quality 66: arcs of radius 12, 8, 4 and 2, each 90 dots
        assert_eq!(surface.pixels().len(), 4 * 90);
        let outline = surface.ops().iter().find_map(|op| match op {
            DrawOp::Rect(r, _) => Some(*r),
            _ => None,
        });
        assert_eq!(outline.map(|r| r.top_left), Some(Point::new(895, 10)));
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(StatusBar::format_percent(0).as_str(), "0%");
        assert_eq!(StatusBar::format_percent(100).as_str(), "100%");
    }
}
