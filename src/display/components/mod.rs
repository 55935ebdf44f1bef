/*
 *  display/components/mod.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dashboard panels
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

pub mod status_bar;
pub mod weather;
pub mod sun;
pub mod wind;
pub mod sensor;
pub mod daily;
pub mod graph;

// Re-exports
pub use status_bar::StatusBar;
pub use weather::CurrentWeatherPanel;
pub use sun::SunPanel;
pub use wind::WindPanel;
pub use sensor::SensorPanel;
pub use daily::DailyCell;
pub use graph::{AxisRange, GraphCell, GraphKind, GraphMode, GraphSpec, PlotArea, draw_graph};

use embedded_graphics::prelude::*;
use log::debug;

use crate::display::color::Tone;
use crate::display::error::RenderError;
use crate::display::layout::{PanelRegion, PanelStyle};
use crate::display::traits::Surface;
use crate::icons::IconAtlas;
use crate::weather::DashboardInput;

/// Everything a panel may read during a pass
pub struct PanelContext<'a> {
    pub input: &'a DashboardInput,
    pub atlas: &'a dyn IconAtlas,
    pub style: PanelStyle,
    /// Draw condition icons as ink silhouettes
    pub high_contrast: bool,
}

/// One rectangular piece of the dashboard
pub trait Panel {
    fn region(&self) -> &PanelRegion;

    /// Whether the shared title + separator header is drawn
    fn titled(&self) -> bool {
        true
    }

    /// Content below the header
    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError>;

    fn render(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let r = self.region();
        debug!("panel '{}' at ({}, {}) {}x{}", r.title, r.x, r.y, r.width, r.height);
        if self.titled() {
            draw_panel_header(surface, r, &ctx.style);
        }
        self.draw_body(surface, ctx)
    }
}

/// Centred title and the separator line under it
pub fn draw_panel_header(surface: &mut dyn Surface, region: &PanelRegion, style: &PanelStyle) {
    surface.set_text_size(style.title_size);
    surface.draw_centred_string(&region.title, Point::new(region.x + region.width / 2, region.y + style.title_offset));
    let y = region.y + style.separator_offset;
    surface.draw_line(Point::new(region.x, y), Point::new(region.right(), y), Tone::INK);
}

/// First content row of a titled panel
pub(crate) fn body_top(region: &PanelRegion, style: &PanelStyle) -> i32 {
    region.y + style.separator_offset
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::display::layout::{DashboardGeometry, LayoutConfig, LayoutVariant};
    use crate::icons::IconSet;

    pub fn expanded_geometry() -> DashboardGeometry {
        DashboardGeometry::compute(&LayoutConfig::new(LayoutVariant::Expanded, 960, 540)).unwrap()
    }

    pub fn context<'a>(input: &'a DashboardInput, atlas: &'a IconSet, style: PanelStyle) -> PanelContext<'a> {
        PanelContext { input, atlas, style, high_contrast: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::RecordingSurface;

    #[test]
    fn header_title_and_separator_follow_style() {
        let region = PanelRegion::new("Wind", 480, 35, 232, 251);
        let style = PanelStyle { title_size: 3, title_offset: 7, separator_offset: 35 };
        let mut surface = RecordingSurface::new(960, 540);
        draw_panel_header(&mut surface, &region, &style);

        assert_eq!(surface.texts(), vec![("Wind".to_string(), Point::new(596, 42))]);
        assert_eq!(surface.lines(), vec![(Point::new(480, 70), Point::new(712, 70), Tone::INK)]);
        assert_eq!(body_top(&region, &style), 70);
    }
}
