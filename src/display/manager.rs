/*
 *  display/manager.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dashboard renderer - composes every panel into one draw pass
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

use crate::display::canvas::Canvas;
use crate::display::color::Tone;
use crate::display::components::{
    CurrentWeatherPanel,
    DailyCell,
    GraphCell,
    GraphKind,
    Panel,
    PanelContext,
    SensorPanel,
    StatusBar,
    SunPanel,
    WindPanel,
};
use crate::display::error::{DisplayError, RenderError};
use crate::display::layout::{DashboardGeometry, LayoutConfig};
use crate::display::traits::{DisplayDriver, RefreshMode, Surface, TextAnchor};
use crate::icons::IconAtlas;
use crate::weather::DashboardInput;

use embedded_graphics::prelude::*;
use log::{debug, info};
use std::time::Instant;

/// Labels and refresh behaviour that are not part of the geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RendererOptions {
    /// Left end of the head strip, usually the firmware version
    pub version_label: String,

    /// Centred in the head strip
    pub city: String,

    /// Draw condition icons as ink silhouettes
    pub high_contrast: bool,

    /// Waveform for the full-screen pass
    pub refresh_mode: RefreshMode,

    /// Waveform for the sensor-panel pass
    pub sensor_refresh_mode: RefreshMode,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            version_label: format!("v{}", env!("CARGO_PKG_VERSION")),
            city: String::new(),
            high_contrast: true,
            refresh_mode: RefreshMode::Gc16,
            sensor_refresh_mode: RefreshMode::Gc16,
        }
    }
}

/// Timing of the last committed pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassMetrics {
    /// Time spent drawing into the canvas
    pub render_time_us: u64,

    /// Time spent handing the packed canvas to the driver
    pub transfer_time_us: u64,

    /// Passes committed so far
    pub pass_count: u64,
}

/// Composes the whole dashboard from its panels.
///
/// Owns the resolved geometry and the icon atlas; every pass draws into a
/// fresh canvas that is committed only once it is complete.
pub struct DashboardRenderer {
    layout: LayoutConfig,
    geometry: DashboardGeometry,
    atlas: Box<dyn IconAtlas>,
    options: RendererOptions,
    metrics: PassMetrics,
}

impl DashboardRenderer {
    /// Resolve `layout` and take ownership of the atlas.
    ///
    /// Fails when the canvas is too small for the requested layout.
    pub fn new(
        layout: LayoutConfig,
        atlas: Box<dyn IconAtlas>,
        options: RendererOptions,
    ) -> Result<Self, RenderError> {
        let geometry = DashboardGeometry::compute(&layout)?;
        info!(
            "dashboard {}x{} ({:?}), {} daily cells, compass r={}",
            layout.width,
            layout.height,
            layout.variant,
            geometry.daily.len(),
            geometry.compass_radius
        );
        Ok(Self {
            layout,
            geometry,
            atlas,
            options,
            metrics: PassMetrics::default(),
        })
    }

    pub fn geometry(&self) -> &DashboardGeometry {
        &self.geometry
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn metrics(&self) -> PassMetrics {
        self.metrics
    }

    fn context<'a>(&'a self, input: &'a DashboardInput) -> PanelContext<'a> {
        PanelContext {
            input,
            atlas: self.atlas.as_ref(),
            style: self.geometry.panel,
            high_contrast: self.options.high_contrast,
        }
    }

    /// Every panel of the full pass, head strip first
    fn panels(&self) -> Vec<Box<dyn Panel>> {
        let g = &self.geometry;
        let mut panels: Vec<Box<dyn Panel>> = vec![
            Box::new(StatusBar::new(g.head.clone(), &self.options.version_label, &self.options.city)),
            Box::new(CurrentWeatherPanel::new(g.weather.clone())),
            Box::new(SunPanel::new(g.sun.clone())),
            Box::new(WindPanel::new(g.wind.clone(), g.compass_radius)),
            Box::new(SensorPanel::new(g.sensor.clone())),
        ];
        for (index, region) in g.daily.iter().enumerate() {
            panels.push(Box::new(DailyCell::new(region.clone(), index)));
        }
        if let Some(region) = &g.forecast_graph {
            panels.push(Box::new(GraphCell::new(region.clone(), GraphKind::DailyTemperature)));
        }
        for (region, kind) in g.graphs.iter().zip(GraphKind::STRIP) {
            panels.push(Box::new(GraphCell::new(region.clone(), kind)));
        }
        panels
    }

    fn reset_text(surface: &mut dyn Surface) {
        surface.set_text_size(2);
        surface.set_text_color(Tone::INK, None);
        surface.set_text_anchor(TextAnchor::TopLeft);
    }

    /// Draw the complete dashboard onto `surface`.
    ///
    /// The snapshot is checked before anything is drawn, so a rejected
    /// input leaves the surface untouched.
    pub fn draw_dashboard(&self, surface: &mut dyn Surface, input: &DashboardInput) -> Result<(), RenderError> {
        input.weather.validate()?;
        let ctx = self.context(input);

        Self::reset_text(surface);
        surface.draw_rect(self.geometry.frame, Tone::INK);
        for region in self.geometry.regions() {
            surface.draw_rect(region.border_rect(), Tone::INK);
        }
        for panel in self.panels() {
            panel.render(surface, &ctx)?;
        }
        Ok(())
    }

    /// Full-screen pass into a new canvas
    pub fn render(&self, input: &DashboardInput) -> Result<Canvas, RenderError> {
        let mut canvas = Canvas::new(self.layout.width, self.layout.height);
        self.draw_dashboard(&mut canvas, input)?;
        debug!("full pass inked {} pixels", canvas.ink_count());
        Ok(canvas)
    }

    /// Sensor panel alone, drawn at the canvas origin.
    ///
    /// Returns the canvas together with the screen position it belongs at.
    pub fn render_sensor(&self, input: &DashboardInput) -> Result<(Canvas, Point), RenderError> {
        let screen = &self.geometry.sensor;
        let local = screen.at(Point::zero());
        let border = local.border_rect();
        let mut canvas = Canvas::new(border.size.width, border.size.height);

        Self::reset_text(&mut canvas);
        canvas.draw_rect(border, Tone::INK);
        SensorPanel::new(local).render(&mut canvas, &self.context(input))?;
        Ok((canvas, screen.origin()))
    }

    /// Render and commit the full dashboard
    pub fn show<D>(&mut self, driver: &mut D, input: &DashboardInput) -> Result<(), DisplayError>
    where
        D: DisplayDriver + ?Sized,
    {
        let start = Instant::now();
        let canvas = self.render(input)?;
        let drawn = Instant::now();
        canvas.commit(driver, Point::zero(), self.options.refresh_mode)?;
        self.record(start, drawn);
        info!(
            "full pass #{} committed, render {}us transfer {}us",
            self.metrics.pass_count, self.metrics.render_time_us, self.metrics.transfer_time_us
        );
        Ok(())
    }

    /// Render and commit only the sensor panel
    pub fn show_sensor<D>(&mut self, driver: &mut D, input: &DashboardInput) -> Result<(), DisplayError>
    where
        D: DisplayDriver + ?Sized,
    {
        let start = Instant::now();
        let (canvas, origin) = self.render_sensor(input)?;
        let drawn = Instant::now();
        canvas.commit(driver, origin, self.options.sensor_refresh_mode)?;
        self.record(start, drawn);
        info!(
            "sensor pass #{} committed at ({}, {}), render {}us transfer {}us",
            self.metrics.pass_count, origin.x, origin.y, self.metrics.render_time_us, self.metrics.transfer_time_us
        );
        Ok(())
    }

    fn record(&mut self, start: Instant, drawn: Instant) {
        self.metrics.render_time_us = drawn.duration_since(start).as_micros() as u64;
        self.metrics.transfer_time_us = drawn.elapsed().as_micros() as u64;
        self.metrics.pass_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::{MockDriver, RecordingSurface};
    use crate::display::layout::LayoutVariant;
    use crate::icons::IconSet;
    use crate::weather::fixtures::sample_input;
    use embedded_graphics::primitives::Rectangle;

    fn renderer(variant: LayoutVariant) -> DashboardRenderer {
        let options = RendererOptions {
            version_label: "v1.2".to_string(),
            city: "Bergen".to_string(),
            ..RendererOptions::default()
        };
        DashboardRenderer::new(LayoutConfig::new(variant, 960, 540), Box::new(IconSet::builtin()), options).unwrap()
    }

    #[test]
    fn too_small_canvas_is_rejected() {
        let err = DashboardRenderer::new(
            LayoutConfig::new(LayoutVariant::Expanded, 320, 240),
            Box::new(IconSet::builtin()),
            RendererOptions::default(),
        );
        assert!(matches!(err, Err(RenderError::RegionTooSmall { .. })));
    }

    #[test]
    fn every_region_is_outlined() {
        let r = renderer(LayoutVariant::Expanded);
        let mut surface = RecordingSurface::new(960, 540);
        r.draw_dashboard(&mut surface, &sample_input()).unwrap();

        let rects: Vec<Rectangle> = surface.ops().iter().filter_map(|op| match op {
            crate::display::drivers::mock::DrawOp::Rect(rect, _) => Some(*rect),
            _ => None,
        }).collect();
        assert!(rects.contains(&r.geometry().frame));
        for region in r.geometry().regions() {
            assert!(rects.contains(&region.border_rect()), "missing border for {}", region.title);
        }
    }

    #[test]
    fn full_pass_draws_every_panel() {
        let r = renderer(LayoutVariant::Expanded);
        let mut surface = RecordingSurface::new(960, 540);
        r.draw_dashboard(&mut surface, &sample_input()).unwrap();

        let texts: Vec<String> = surface.texts().into_iter().map(|(t, _)| t).collect();
        for expected in ["v1.2", "Bergen", "Weather", "Sun", "Wind", "Indoor", "Today", "light rain", "m/s"] {
            assert!(texts.iter().any(|t| t == expected), "missing '{}'", expected);
        }
        for title in ["Temp 12h (C)", "Rain 12h (mm/%)", "Temp 7days (C)", "Rain 7days (mm/%)"] {
            assert!(texts.iter().any(|t| t == title), "missing graph '{}'", title);
        }
    }

    #[test]
    fn compact_pass_adds_forecast_graph() {
        let r = renderer(LayoutVariant::Compact);
        let mut surface = RecordingSurface::new(960, 540);
        r.draw_dashboard(&mut surface, &sample_input()).unwrap();

        let titles = surface.texts().into_iter().filter(|(t, _)| t == "Temp 7days (C)").count();
        assert_eq!(titles, 2);
        let days = surface.texts().into_iter().filter(|(t, _)| t == "Today").count();
        assert_eq!(days, 1);
    }

    #[test]
    fn invalid_snapshot_draws_nothing() {
        let r = renderer(LayoutVariant::Expanded);
        let mut input = sample_input();
        input.weather.hourly.truncate(5);
        let mut surface = RecordingSurface::new(960, 540);
        let err = r.draw_dashboard(&mut surface, &input);
        assert!(matches!(err, Err(RenderError::MissingSamples(_))));
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn show_commits_full_canvas() {
        let mut r = renderer(LayoutVariant::Expanded);
        let mut driver = MockDriver::new(960, 540);
        r.show(&mut driver, &sample_input()).unwrap();

        let commits = driver.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].origin, Point::zero());
        assert_eq!(commits[0].size, Size::new(960, 540));
        assert_eq!(commits[0].mode, RefreshMode::Gc16);
        assert_eq!(driver.pixel(Point::new(14, 34)), Some(Tone::INK));
        assert_eq!(r.metrics().pass_count, 1);
    }

    #[test]
    fn sensor_pass_commits_only_the_panel() {
        let mut r = renderer(LayoutVariant::Expanded);
        r.options.sensor_refresh_mode = RefreshMode::Du4;
        let mut driver = MockDriver::new(960, 540);
        r.show_sensor(&mut driver, &sample_input()).unwrap();

        let commits = driver.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].origin, Point::new(712, 35));
        assert_eq!(commits[0].size, Size::new(234, 252));
        assert_eq!(commits[0].mode, RefreshMode::Du4);
        // border corners land on the shared edges of the full layout
        assert_eq!(driver.pixel(Point::new(712, 35)), Some(Tone::INK));
        assert_eq!(driver.pixel(Point::new(945, 286)), Some(Tone::INK));
        assert_eq!(driver.pixel(Point::new(14, 34)), Some(Tone::PAPER));
    }

    #[test]
    fn sensor_pass_matches_full_pass() {
        let r = renderer(LayoutVariant::Expanded);
        let input = sample_input();
        let full = r.render(&input).unwrap();
        let (partial, origin) = r.render_sensor(&input).unwrap();

        let size = partial.size();
        for y in 0..size.height as i32 {
            for x in 0..size.width as i32 {
                let local = Point::new(x, y);
                assert_eq!(partial.pixel(local), full.pixel(local + origin), "pixel {:?}", local);
            }
        }
    }

    #[test]
    fn sensor_pass_needs_partial_refresh() {
        let mut r = renderer(LayoutVariant::Expanded);
        let mut driver = MockDriver::without_partial_refresh(960, 540);
        let err = r.show_sensor(&mut driver, &sample_input());
        assert!(matches!(err, Err(DisplayError::UnsupportedOperation)));
    }

    #[test]
    fn render_errors_surface_through_show() {
        let mut r = renderer(LayoutVariant::Expanded);
        let mut input = sample_input();
        input.weather.daily.clear();
        let mut driver = MockDriver::new(960, 540);
        let err = r.show(&mut driver, &input);
        assert!(matches!(err, Err(DisplayError::Render(RenderError::MissingSamples(_)))));
        assert!(driver.commits().is_empty());
    }
}
