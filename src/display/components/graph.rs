/*
 *  display/components/graph.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Line and bar+line graphs scaled into a panel
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
use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};

use crate::display::color::Tone;
use crate::display::components::{Panel, PanelContext};
use crate::display::error::RenderError;
use crate::display::layout::PanelRegion;
use crate::display::traits::{Surface, TextAnchor};
use crate::draw::draw_dashed_hline;
use crate::weather::{DAILY_SAMPLES, HOURLY_SAMPLES};

/// A validated y-axis range, `max > min`, both finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f32,
    max: f32,
}

impl AxisRange {
    /// Rejects a collapsed or inverted range, which would divide by zero
    /// when scaling.
    pub fn new(min: f32, max: f32) -> Result<Self, RenderError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RenderError::NonFiniteRange);
        }
        if max <= min {
            return Err(RenderError::ZeroRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// True when a zero baseline falls strictly inside the range
    pub fn straddles_zero(&self) -> bool {
        self.min < 0.0 && self.max > 0.0
    }

    pub fn min_label(&self) -> AxisLabel {
        axis_label(self.min)
    }

    pub fn max_label(&self) -> AxisLabel {
        axis_label(self.max)
    }
}

/// Room for any finite `f32` printed with one decimal, sign included
pub type AxisLabel = ArrayString<48>;

/// Whole numbers print bare, anything else with one decimal
pub fn axis_label(value: f32) -> AxisLabel {
    let mut buf = ArrayString::new();
    if value.fract() == 0.0 {
        let _ = write!(&mut buf, "{:.0}", value);
    } else {
        let _ = write!(&mut buf, "{:.1}", value);
    }
    buf
}

/// What is plotted and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphMode<'a> {
    /// One or two line series sharing the y range. The secondary series is
    /// drawn two-tone so it stays legible over the primary.
    Lines {
        primary: &'a [f32],
        secondary: Option<&'a [f32]>,
    },
    /// Filled bars scaled against their own range under a line series.
    ///
    /// `bars[0]` sits at `x_min`. The line is indexed by absolute x and
    /// starts at `x_min + line_offset`.
    BarsWithLine {
        line: &'a [f32],
        line_offset: usize,
        bars: &'a [f32],
        bar_range: AxisRange,
    },
}

/// Domain description of one plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSpec<'a> {
    pub title: &'a str,
    pub x_min: i32,
    pub x_max: i32,
    pub y_range: AxisRange,
    pub mode: GraphMode<'a>,
}

impl GraphSpec<'_> {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.x_min < 0 || self.x_max <= 0 || self.x_max <= self.x_min {
            return Err(RenderError::EmptyDomain { x_min: self.x_min, x_max: self.x_max });
        }
        let last = self.x_max as usize;
        match self.mode {
            GraphMode::Lines { primary, secondary } => {
                check_len("primary", primary, last)?;
                if let Some(secondary) = secondary {
                    check_len("secondary", secondary, last)?;
                }
            }
            GraphMode::BarsWithLine { line, line_offset, bars, .. } => {
                self.overlay_start(line_offset)?;
                check_len("line", line, last)?;
                check_len("bars", bars, (self.x_max - self.x_min - 1) as usize)?;
            }
        }
        Ok(())
    }

    /// First x of the overlay line; the offset must land inside the domain
    fn overlay_start(&self, line_offset: usize) -> Result<i32, RenderError> {
        i32::try_from(line_offset)
            .ok()
            .and_then(|offset| self.x_min.checked_add(offset))
            .filter(|first| *first <= self.x_max)
            .ok_or(RenderError::OffsetOutsideDomain { offset: line_offset, x_min: self.x_min, x_max: self.x_max })
    }

    /// Range the y-axis labels are printed from
    fn label_range(&self) -> AxisRange {
        match self.mode {
            GraphMode::Lines { .. } => self.y_range,
            GraphMode::BarsWithLine { bar_range, .. } => bar_range,
        }
    }
}

fn check_len(series: &'static str, values: &[f32], needed: usize) -> Result<(), RenderError> {
    if values.len() <= needed {
        return Err(RenderError::SeriesTooShort { series, len: values.len(), needed });
    }
    Ok(())
}

/// The framed plot rectangle inside a graph panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlotArea {
    /// Plot rectangle for `region`, leaving `label_width` for the y labels
    pub fn within(region: &PanelRegion, label_width: i32) -> Self {
        Self {
            x: region.x + 5 + label_width + 5,
            y: region.y + 35,
            width: region.width - label_width - 20,
            height: region.height - 35 - 20,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Pixel row of `value`, clamped into `[y, bottom]`
    pub fn map_y(&self, value: f32, range: &AxisRange) -> i32 {
        let per_unit = self.height as f32 / range.span();
        let y = (self.bottom() as f32 - (value - range.min()) * per_unit) as i32;
        y.clamp(self.y, self.bottom())
    }

    /// Pixel column of `x` for a domain ending at `x_max`.
    ///
    /// The step is integer divided first, so the last tick can fall short of
    /// the right edge.
    pub fn map_x(&self, x: i32, x_max: i32) -> i32 {
        self.x + self.width / x_max * x
    }
}

/// Width reserved for the y labels: 3.5 px per character plus padding.
///
/// Label glyphs are narrower than the font cell at this size, so this is an
/// estimate rather than a measurement. It is a fixed layout constant.
pub fn label_width(range: &AxisRange) -> i32 {
    let chars = range.min_label().len().max(range.max_label().len());
    (5.0 + chars as f32 * 3.5) as i32
}

/// Draw `spec` into `region`, returning the plot rectangle used
pub fn draw_graph<S>(surface: &mut S, region: &PanelRegion, spec: &GraphSpec) -> Result<PlotArea, RenderError>
where
    S: Surface + ?Sized,
{
    spec.validate()?;

    let labels = spec.label_range();
    let area = PlotArea::within(region, label_width(&labels));
    if area.width < spec.x_max || area.height <= 0 {
        return Err(RenderError::RegionTooSmall {
            width: region.width.max(0) as u32,
            height: region.height.max(0) as u32,
        });
    }
    debug!("graph '{}' plot area {:?}", spec.title, area);

    draw_frame(surface, region, spec, &labels, &area);

    match spec.mode {
        GraphMode::Lines { primary, secondary } => {
            draw_primary_line(surface, &area, spec, primary);
            if let Some(values) = secondary {
                draw_secondary_line(surface, &area, spec, values);
            }
        }
        GraphMode::BarsWithLine { line, line_offset, bars, bar_range } => {
            draw_bars(surface, &area, spec, bars, &bar_range);
            let first = spec.overlay_start(line_offset)?;
            draw_overlay_line(surface, &area, spec, line, first);
        }
    }
    Ok(area)
}

/// Title, y labels, x ticks, plot outline and the optional zero baseline
fn draw_frame<S>(surface: &mut S, region: &PanelRegion, spec: &GraphSpec, labels: &AxisRange, area: &PlotArea)
where
    S: Surface + ?Sized,
{
    surface.set_text_size(2);
    surface.draw_centred_string(spec.title, Point::new(region.x + region.width / 2, region.y + 10));

    surface.set_text_size(1);
    surface.draw_text(&labels.max_label(), Point::new(region.x + 5, area.y - 5), TextAnchor::TopLeft);
    surface.draw_text(&labels.min_label(), Point::new(region.x + 5, area.bottom() - 3), TextAnchor::TopLeft);

    let step = area.width / spec.x_max;
    for i in 0..=spec.x_max {
        let mut tick = ArrayString::<12>::new();
        let _ = write!(&mut tick, "{}", i);
        surface.draw_text(&tick, Point::new(area.x + i * step, area.bottom() + 5), TextAnchor::TopLeft);
    }

    surface.draw_rect(
        Rectangle::new(Point::new(area.x, area.y), Size::new(area.width as u32, area.height as u32)),
        Tone::INK,
    );

    if spec.y_range.straddles_zero() {
        let zero = area.map_y(0.0, &spec.y_range);
        surface.draw_text("0", Point::new(area.x - 20, zero), TextAnchor::TopLeft);
        draw_dashed_hline(surface, area.x, area.width, zero, Tone::INK);
    }
}

fn draw_primary_line<S>(surface: &mut S, area: &PlotArea, spec: &GraphSpec, values: &[f32])
where
    S: Surface + ?Sized,
{
    let mut prev = None;
    for i in spec.x_min..=spec.x_max {
        let p = Point::new(area.map_x(i, spec.x_max), area.map_y(values[i as usize], &spec.y_range));
        surface.fill_circle(p, 2, Tone::INK);
        if let Some(from) = prev {
            surface.draw_line(from, p, Tone::INK);
        }
        prev = Some(p);
    }
}

/// Ink line with a paper shadow one pixel below, hollow dots
fn draw_secondary_line<S>(surface: &mut S, area: &PlotArea, spec: &GraphSpec, values: &[f32])
where
    S: Surface + ?Sized,
{
    let mut prev = None;
    for i in spec.x_min..=spec.x_max {
        let p = Point::new(area.map_x(i, spec.x_max), area.map_y(values[i as usize], &spec.y_range));
        if let Some(from) = prev {
            draw_two_tone_segment(surface, from, p);
        }
        surface.fill_circle(p, 3, Tone::INK);
        surface.fill_circle(p, 2, Tone::PAPER);
        prev = Some(p);
    }
}

fn draw_bars<S>(surface: &mut S, area: &PlotArea, spec: &GraphSpec, bars: &[f32], range: &AxisRange)
where
    S: Surface + ?Sized,
{
    let width = area.width / (spec.x_max - spec.x_min);
    for i in spec.x_min..spec.x_max {
        let top = area.map_y(bars[(i - spec.x_min) as usize], range);
        let height = area.bottom() - top;
        if height > 0 {
            let x = area.x + width * i;
            surface.fill_rect(Rectangle::new(Point::new(x, top), Size::new(width as u32, height as u32)), Tone::INK);
        }
    }
}

/// Line over the bars: paper-rimmed dots so they show on a filled bar
fn draw_overlay_line<S>(surface: &mut S, area: &PlotArea, spec: &GraphSpec, values: &[f32], first: i32)
where
    S: Surface + ?Sized,
{
    let mut prev = None;
    for i in first..=spec.x_max {
        let p = Point::new(area.map_x(i, spec.x_max), area.map_y(values[i as usize], &spec.y_range));
        if let Some(from) = prev {
            draw_two_tone_segment(surface, from, p);
        }
        surface.fill_circle(p, 3, Tone::PAPER);
        surface.fill_circle(p, 2, Tone::INK);
        prev = Some(p);
    }
}

fn draw_two_tone_segment<S>(surface: &mut S, from: Point, to: Point)
where
    S: Surface + ?Sized,
{
    surface.draw_line(from, to, Tone::INK);
    surface.draw_line(from + Point::new(0, 1), to + Point::new(0, 1), Tone::PAPER);
}

/// Temperature axis on whole degrees around the series extremes.
///
/// A flat series would give an empty range; it is opened up by a degree
/// either side.
pub fn temperature_axis(lowest: f32, highest: f32) -> Result<AxisRange, RenderError> {
    let (mut min, mut max) = (lowest.floor(), highest.ceil());
    if max <= min {
        warn!("flat temperature series at {}, widening axis", min);
        min -= 1.0;
        max += 1.0;
    }
    AxisRange::new(min, max)
}

/// Rain axis from zero to the wettest sample, at least 1 mm
pub fn rain_axis(wettest: f32) -> Result<AxisRange, RenderError> {
    let mut max = wettest.ceil();
    if max < 1.0 {
        warn!("no rain above {} mm, axis set to 0..1", wettest);
        max = 1.0;
    }
    AxisRange::new(0.0, max)
}

/// Probability of precipitation is always plotted as a percentage
const POP_RANGE: (f32, f32) = (0.0, 100.0);

/// The four weather graphs the dashboard knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Next 12 hours, single line
    HourlyTemperature,
    /// Next 12 hours, rain bars under the pop line
    HourlyRain,
    /// Next 7 days, min and max lines
    DailyTemperature,
    /// Next 7 days, rain bars under the pop line
    DailyRain,
}

impl GraphKind {
    /// Left to right order of the graph strip
    pub const STRIP: [GraphKind; 4] = [
        GraphKind::HourlyTemperature,
        GraphKind::HourlyRain,
        GraphKind::DailyTemperature,
        GraphKind::DailyRain,
    ];
}

/// A graph drawn into one cell of the dashboard
pub struct GraphCell {
    region: PanelRegion,
    kind: GraphKind,
}

impl GraphCell {
    pub fn new(region: PanelRegion, kind: GraphKind) -> Self {
        Self { region, kind }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }
}

impl Panel for GraphCell {
    fn region(&self) -> &PanelRegion {
        &self.region
    }

    /// Graphs carry their own smaller title
    fn titled(&self) -> bool {
        false
    }

    fn draw_body(&self, surface: &mut dyn Surface, ctx: &PanelContext) -> Result<(), RenderError> {
        let w = &ctx.input.weather;
        let hours = HOURLY_SAMPLES as i32 - 1;
        let days = DAILY_SAMPLES as i32 - 1;
        let title = self.region.title.as_str();
        let pop_range = AxisRange::new(POP_RANGE.0, POP_RANGE.1)?;

        match self.kind {
            GraphKind::HourlyTemperature => {
                let temps = w.hourly_temps();
                let (lo, hi) = w
                    .hourly_temp_range()
                    .ok_or_else(|| RenderError::MissingSamples("hourly temperatures".to_string()))?;
                let spec = GraphSpec {
                    title,
                    x_min: 0,
                    x_max: hours,
                    y_range: temperature_axis(lo, hi)?,
                    mode: GraphMode::Lines { primary: &temps, secondary: None },
                };
                draw_graph(surface, &self.region, &spec)?;
            }
            GraphKind::HourlyRain => {
                let (pop, rain) = (w.hourly_pop(), w.hourly_rain());
                let spec = GraphSpec {
                    title,
                    x_min: 0,
                    x_max: hours,
                    y_range: pop_range,
                    mode: GraphMode::BarsWithLine {
                        line: &pop,
                        line_offset: 1,
                        bars: &rain,
                        bar_range: rain_axis(w.hourly_max_rain())?,
                    },
                };
                draw_graph(surface, &self.region, &spec)?;
            }
            GraphKind::DailyTemperature => {
                let (mins, maxs) = (w.daily_min_temps(), w.daily_max_temps());
                let (lo, hi) = w
                    .daily_temp_range()
                    .ok_or_else(|| RenderError::MissingSamples("daily temperatures".to_string()))?;
                let spec = GraphSpec {
                    title,
                    x_min: 0,
                    x_max: days,
                    y_range: temperature_axis(lo, hi)?,
                    mode: GraphMode::Lines { primary: &mins, secondary: Some(&maxs) },
                };
                draw_graph(surface, &self.region, &spec)?;
            }
            GraphKind::DailyRain => {
                let (pop, rain) = (w.daily_pop(), w.daily_rain());
                let spec = GraphSpec {
                    title,
                    x_min: 0,
                    x_max: days,
                    y_range: pop_range,
                    mode: GraphMode::BarsWithLine {
                        line: &pop,
                        line_offset: 0,
                        bars: &rain,
                        bar_range: rain_axis(w.daily_max_rain())?,
                    },
                };
                draw_graph(surface, &self.region, &spec)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::{DrawOp, RecordingSurface};

    fn cell() -> PanelRegion {
        PanelRegion::new("Temp 12h (C)", 15, 408, 232, 122)
    }

    fn range(min: f32, max: f32) -> AxisRange {
        AxisRange::new(min, max).unwrap()
    }

    #[test]
    fn collapsed_or_inverted_range_is_rejected() {
        assert_eq!(AxisRange::new(5.0, 5.0), Err(RenderError::ZeroRange { min: 5.0, max: 5.0 }));
        assert!(matches!(AxisRange::new(6.0, 5.0), Err(RenderError::ZeroRange { .. })));
        assert_eq!(AxisRange::new(f32::NAN, 5.0), Err(RenderError::NonFiniteRange));
        assert_eq!(AxisRange::new(0.0, f32::INFINITY), Err(RenderError::NonFiniteRange));
    }

    #[test]
    fn labels_drop_trailing_zero() {
        assert_eq!(axis_label(25.0).as_str(), "25");
        assert_eq!(axis_label(-5.0).as_str(), "-5");
        assert_eq!(axis_label(2.5).as_str(), "2.5");
        assert_eq!(label_width(&range(-5.0, 25.0)), 12);
        assert_eq!(label_width(&range(0.0, 100.0)), 15);
    }

    #[test]
    fn mapped_values_stay_inside_plot() {
        let area = PlotArea::within(&cell(), 12);
        let r = range(-5.0, 25.0);
        for v in [-5.0, -4.9, 0.0, 7.3, 24.99, 25.0] {
            let y = area.map_y(v, &r);
            assert!(y >= area.y && y <= area.bottom(), "{} -> {}", v, y);
        }
        assert_eq!(area.map_y(r.min() - 100.0, &r), area.bottom());
        assert_eq!(area.map_y(r.max() + 100.0, &r), area.y);
        assert_eq!(area.map_y(r.min(), &r), area.bottom());
        assert_eq!(area.map_y(r.max(), &r), area.y);
    }

    #[test]
    fn first_point_is_not_connected() {
        let values: Vec<f32> = (0..=12).map(|i| i as f32).collect();
        let spec = GraphSpec {
            title: "t",
            x_min: 3,
            x_max: 12,
            y_range: range(0.0, 12.0),
            mode: GraphMode::Lines { primary: &values, secondary: Some(&values) },
        };
        let mut surface = RecordingSurface::new(960, 540);
        let area = draw_graph(&mut surface, &cell(), &spec).unwrap();

        let first = Point::new(area.map_x(3, 12), area.map_y(3.0, &spec.y_range));
        let lines = surface.lines();
        // 9 primary segments, 9 secondary segments each with a paper shadow
        assert_eq!(lines.len(), 9 + 2 * 9);
        assert!(lines.iter().all(|(_, to, _)| *to != first));
        assert!(lines.iter().any(|(from, _, _)| *from == first));
        // one dot per x for the primary, two per x for the secondary
        assert_eq!(surface.fill_circles().len(), 10 + 2 * 10);
    }

    #[test]
    fn bars_tile_the_plot_width() {
        let bars = [1.0, 2.0, 0.5, 3.0, 1.0, 2.5, 0.2];
        let pop = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let spec = GraphSpec {
            title: "Rain 7days (mm/%)",
            x_min: 0,
            x_max: 7,
            y_range: range(0.0, 100.0),
            mode: GraphMode::BarsWithLine { line: &pop, line_offset: 0, bars: &bars, bar_range: range(0.0, 3.0) },
        };
        let mut surface = RecordingSurface::new(960, 540);
        let area = draw_graph(&mut surface, &PanelRegion::new("", 712, 408, 233, 122), &spec).unwrap();

        let rects = surface.fill_rects();
        assert_eq!(rects.len(), 7);
        let total: u32 = rects.iter().map(|r| r.size.width).sum();
        assert!(area.width as u32 - total < 7, "bars cover {} of {}", total, area.width);
        for pair in rects.windows(2) {
            assert_eq!(pair[0].top_left.x + pair[0].size.width as i32, pair[1].top_left.x);
        }
        assert!(rects.iter().all(|r| r.top_left.y + r.size.height as i32 == area.bottom()));
    }

    #[test]
    fn overlay_line_starts_at_offset() {
        let bars = [0.4; 12];
        let pop: Vec<f32> = (0..=12).map(|i| (i * 8) as f32).collect();
        let spec = GraphSpec {
            title: "Rain 12h (mm/%)",
            x_min: 0,
            x_max: 12,
            y_range: range(0.0, 100.0),
            mode: GraphMode::BarsWithLine { line: &pop, line_offset: 1, bars: &bars, bar_range: range(0.0, 1.0) },
        };
        let mut surface = RecordingSurface::new(960, 540);
        let area = draw_graph(&mut surface, &cell(), &spec).unwrap();

        let ink: Vec<_> = surface.lines().into_iter().filter(|(_, _, t)| *t == Tone::INK).collect();
        assert_eq!(ink.len(), 11);
        assert_eq!(ink[0].0.x, area.map_x(1, 12));
        // bars use the bar range for their labels
        let texts: Vec<String> = surface.texts().into_iter().map(|(t, _)| t).collect();
        assert!(texts.contains(&"1".to_string()));
        assert!(!texts.contains(&"100".to_string()));
    }

    #[test]
    fn zero_baseline_is_dashed_between_labels() {
        let temps: Vec<f32> = (0..=12).map(|i| -5.0 + i as f32 * 2.5).collect();
        let spec = GraphSpec {
            title: "Temp 12h (C)",
            x_min: 0,
            x_max: 12,
            y_range: range(-5.0, 25.0),
            mode: GraphMode::Lines { primary: &temps, secondary: None },
        };
        let mut surface = RecordingSurface::new(960, 540);
        let area = draw_graph(&mut surface, &cell(), &spec).unwrap();

        assert_eq!(area, PlotArea { x: 37, y: 443, width: 200, height: 67 });
        let zero_y = area.map_y(0.0, &spec.y_range);
        assert_eq!(zero_y, 498);

        let dashes: Vec<_> = surface.lines().into_iter().filter(|(a, b, _)| a.y == zero_y && b.y == zero_y).collect();
        assert_eq!(dashes.len(), 19);
        assert!(dashes.iter().all(|(a, b, _)| b.x - a.x == 5));

        let texts = surface.texts();
        assert!(texts.contains(&("0".to_string(), Point::new(17, zero_y))));
        let max_label = texts.iter().find(|(t, _)| t == "25").unwrap().1;
        let min_label = texts.iter().find(|(t, _)| t == "-5").unwrap().1;
        assert_eq!(max_label, Point::new(20, 438));
        assert_eq!(min_label, Point::new(20, 507));
        assert!(zero_y != max_label.y && zero_y != min_label.y);
        assert!(zero_y > area.y && zero_y < area.bottom());
    }

    #[test]
    fn tick_labels_cover_whole_domain() {
        let values = [1.0; 8];
        let spec = GraphSpec {
            title: "t",
            x_min: 2,
            x_max: 7,
            y_range: range(0.0, 2.0),
            mode: GraphMode::Lines { primary: &values, secondary: None },
        };
        let mut surface = RecordingSurface::new(960, 540);
        draw_graph(&mut surface, &cell(), &spec).unwrap();
        let ticks = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { size: 1, .. }))
            .count();
        // 8 tick labels plus the two y labels, no baseline
        assert_eq!(ticks, 8 + 2);
    }

    #[test]
    fn bad_specs_are_rejected() {
        let values = [0.0; 5];
        let mut spec = GraphSpec {
            title: "t",
            x_min: 0,
            x_max: 0,
            y_range: range(0.0, 1.0),
            mode: GraphMode::Lines { primary: &values, secondary: None },
        };
        let mut surface = RecordingSurface::new(960, 540);
        assert_eq!(draw_graph(&mut surface, &cell(), &spec), Err(RenderError::EmptyDomain { x_min: 0, x_max: 0 }));

        spec.x_max = 12;
        assert_eq!(
            draw_graph(&mut surface, &cell(), &spec),
            Err(RenderError::SeriesTooShort { series: "primary", len: 5, needed: 12 })
        );

        spec.x_max = 4;
        let tiny = PanelRegion::new("", 0, 0, 30, 50);
        assert!(matches!(draw_graph(&mut surface, &tiny, &spec), Err(RenderError::RegionTooSmall { .. })));
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn overlay_offset_must_land_in_domain() {
        let line = [10.0; 3];
        let bars = [0.5; 12];
        let mut surface = RecordingSurface::new(960, 540);
        for offset in [13, 1 << 32, usize::MAX] {
            let spec = GraphSpec {
                title: "t",
                x_min: 0,
                x_max: 12,
                y_range: range(0.0, 100.0),
                mode: GraphMode::BarsWithLine { line: &line, line_offset: offset, bars: &bars, bar_range: range(0.0, 1.0) },
            };
            assert_eq!(
                draw_graph(&mut surface, &cell(), &spec),
                Err(RenderError::OffsetOutsideDomain { offset, x_min: 0, x_max: 12 })
            );
        }
        assert!(surface.ops().is_empty());

        // an offset inside the domain still needs a full-length line
        let spec = GraphSpec {
            title: "t",
            x_min: 0,
            x_max: 12,
            y_range: range(0.0, 100.0),
            mode: GraphMode::BarsWithLine { line: &line, line_offset: 12, bars: &bars, bar_range: range(0.0, 1.0) },
        };
        assert_eq!(
            draw_graph(&mut surface, &cell(), &spec),
            Err(RenderError::SeriesTooShort { series: "line", len: 3, needed: 12 })
        );
    }

    #[test]
    fn huge_bounds_still_print() {
        let r = rain_axis(1.0e17).unwrap();
        assert!(!r.max_label().is_empty());
        assert!(label_width(&r) > 5 + 4 * 3);
        assert!(!axis_label(f32::MAX).is_empty());
        assert!(!axis_label(-f32::MAX).is_empty());
    }

    #[test]
    fn temperature_axis_rounds_outwards_and_widens_flat_series() {
        assert_eq!(temperature_axis(-3.2, 14.1).unwrap(), range(-4.0, 15.0));
        assert_eq!(temperature_axis(7.0, 7.0).unwrap(), range(6.0, 8.0));
        assert_eq!(temperature_axis(f32::NAN, 7.0), Err(RenderError::NonFiniteRange));
    }

    #[test]
    fn rain_axis_is_at_least_one_millimetre() {
        assert_eq!(rain_axis(0.0).unwrap(), range(0.0, 1.0));
        assert_eq!(rain_axis(0.3).unwrap(), range(0.0, 1.0));
        assert_eq!(rain_axis(3.5).unwrap(), range(0.0, 4.0));
    }

    #[test]
    fn graph_cells_draw_from_snapshot() {
        use crate::display::components::testing::{context, expanded_geometry};
        use crate::icons::IconSet;
        use crate::weather::fixtures::sample_input;

        let input = sample_input();
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let ctx = context(&input, &atlas, g.panel);
        for (region, kind) in g.graphs.iter().zip(GraphKind::STRIP) {
            let mut surface = RecordingSurface::new(960, 540);
            GraphCell::new(region.clone(), kind).render(&mut surface, &ctx).unwrap();
            let texts = surface.texts();
            assert_eq!(texts[0].0, region.title);
            assert!(surface.canvas().ink_count() > 0);
        }
    }

    #[test]
    fn dry_day_still_plots() {
        use crate::display::components::testing::{context, expanded_geometry};
        use crate::icons::IconSet;
        use crate::weather::fixtures::sample_input;

        let mut input = sample_input();
        for h in input.weather.hourly.iter_mut() {
            h.rain = 0.0;
            h.temp = 5.0;
        }
        let atlas = IconSet::builtin();
        let g = expanded_geometry();
        let ctx = context(&input, &atlas, g.panel);
        let mut surface = RecordingSurface::new(960, 540);
        for kind in [GraphKind::HourlyTemperature, GraphKind::HourlyRain] {
            GraphCell::new(g.graphs[0].clone(), kind).render(&mut surface, &ctx).unwrap();
        }
    }
}
