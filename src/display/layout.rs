/*
 *  display/layout.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dashboard geometry, parameterised by layout variant
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
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::display::error::RenderError;
use crate::icons::ICON_SIZE;

/// Spacing preset for the dashboard.
///
/// Both variants share one layout function; they only differ in the
/// parameters fed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Smaller panel titles, six daily cells and a temperature graph in the
    /// forecast strip
    Compact,
    /// Large panel titles and eight daily cells
    #[default]
    Expanded,
}

/// Header pattern shared by every titled panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    /// Text size of the centred title
    pub title_size: u8,
    /// Title top, relative to the panel top
    pub title_offset: i32,
    /// Separator line, relative to the panel top; content starts below it
    pub separator_offset: i32,
}

/// Layout parameters for the whole dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub variant: LayoutVariant,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Left and right margin of the framed area
    pub margin_x: i32,

    /// Height of the head strip; the framed area starts below it
    pub head_height: i32,

    /// Space left below the framed area
    pub margin_bottom: i32,

    /// Height of the weather/sun/wind/sensor row
    pub current_row_height: i32,

    /// Height of the daily forecast strip
    pub forecast_height: i32,

    /// Number of daily cells in the forecast strip
    pub daily_cells: i32,

    /// Slots of the forecast strip given to the graph cell (0 = no graph cell)
    pub forecast_graph_slots: i32,

    /// Height of the graph strip
    pub graph_height: i32,

    pub panel: PanelStyle,

    /// Outer radius of the wind compass rose
    pub compass_radius: i32,

    /// Title of the indoor sensor panel
    pub sensor_title: String,
}

/// Columns in the current-conditions row and cells in the graph strip
pub const ROW_COLUMNS: i32 = 4;

impl LayoutConfig {
    pub fn new(variant: LayoutVariant, width: u32, height: u32) -> Self {
        match variant {
            LayoutVariant::Expanded => Self::expanded(width, height),
            LayoutVariant::Compact => Self::compact(width, height),
        }
    }

    fn expanded(width: u32, height: u32) -> Self {
        Self {
            variant: LayoutVariant::Expanded,
            width,
            height,
            margin_x: 15,
            head_height: 35,
            margin_bottom: 10,
            current_row_height: 251,
            forecast_height: 122,
            daily_cells: 8,
            forecast_graph_slots: 0,
            graph_height: 122,
            panel: PanelStyle {
                title_size: 3,
                title_offset: 7,
                separator_offset: 35,
            },
            compass_radius: 75,
            sensor_title: "Indoor".to_string(),
        }
    }

    fn compact(width: u32, height: u32) -> Self {
        Self {
            variant: LayoutVariant::Compact,
            current_row_height: 231,
            forecast_height: 142,
            daily_cells: 6,
            forecast_graph_slots: 2,
            panel: PanelStyle {
                title_size: 2,
                title_offset: 5,
                separator_offset: 25,
            },
            compass_radius: 65,
            ..Self::expanded(width, height)
        }
    }

    pub fn with_sensor_title(mut self, title: impl Into<String>) -> Self {
        self.sensor_title = title.into();
        self
    }

    /// Width of the framed area
    pub fn inner_width(&self) -> i32 {
        self.width as i32 - 2 * self.margin_x
    }

    /// Height used by the three strips
    pub fn content_height(&self) -> i32 {
        self.current_row_height + self.forecast_height + self.graph_height
    }
}

/// A titled, half-open rectangle `[x, x+width) × [y, y+height)`.
///
/// Sibling regions share their edge coordinate: the right border of one is
/// drawn on the same column as the left border of the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRegion {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PanelRegion {
    pub fn new(title: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { title: title.into(), x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The region itself
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.origin(), Size::new(self.width.max(0) as u32, self.height.max(0) as u32))
    }

    /// Outline including the shared right/bottom edge
    pub fn border_rect(&self) -> Rectangle {
        Rectangle::new(self.origin(), Size::new(self.width.max(0) as u32 + 1, self.height.max(0) as u32 + 1))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn overlaps(&self, other: &PanelRegion) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Same size and title, moved to `origin`
    pub fn at(&self, origin: Point) -> PanelRegion {
        PanelRegion { x: origin.x, y: origin.y, ..self.clone() }
    }
}

/// Every region of one dashboard, derived from a [`LayoutConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardGeometry {
    pub head: PanelRegion,
    /// Outline around the three strips
    pub frame: Rectangle,
    pub weather: PanelRegion,
    pub sun: PanelRegion,
    pub wind: PanelRegion,
    pub sensor: PanelRegion,
    pub daily: Vec<PanelRegion>,
    /// Graph cell inside the forecast strip (compact only)
    pub forecast_graph: Option<PanelRegion>,
    pub graphs: [PanelRegion; 4],
    pub panel: PanelStyle,
    pub compass_radius: i32,
}

pub const GRAPH_TITLES: [&str; 4] = ["Temp 12h (C)", "Rain 12h (mm/%)", "Temp 7days (C)", "Rain 7days (mm/%)"];

/// Split `total` pixels starting at `start` into `n` slot edges.
///
/// Edges are `start + floor(k * total / n)`, so widths differ by at most one
/// pixel and the last edge lands exactly on `start + total`.
pub fn slot_edges(start: i32, total: i32, n: i32) -> Vec<i32> {
    (0..=n).map(|k| start + (k as i64 * total as i64 / n as i64) as i32).collect()
}

impl DashboardGeometry {
    pub fn compute(layout: &LayoutConfig) -> Result<Self, RenderError> {
        Self::check_fits(layout)?;

        let x0 = layout.margin_x;
        let inner = layout.inner_width();
        let row_y = layout.head_height;
        let forecast_y = row_y + layout.current_row_height;
        let graph_y = forecast_y + layout.forecast_height;

        let cols = slot_edges(x0, inner, ROW_COLUMNS);
        let column = |i: usize, title: &str, y: i32, h: i32| {
            PanelRegion::new(title, cols[i], y, cols[i + 1] - cols[i], h)
        };

        let titles = ["Weather", "Sun", "Wind", layout.sensor_title.as_str()];
        let [weather, sun, wind, sensor] =
            [0, 1, 2, 3].map(|i| column(i, titles[i], row_y, layout.current_row_height));
        let graphs = [0, 1, 2, 3].map(|i| column(i, GRAPH_TITLES[i], graph_y, layout.graph_height));

        let slots = slot_edges(x0, inner, layout.daily_cells + layout.forecast_graph_slots);
        let daily = (0..layout.daily_cells as usize)
            .map(|i| PanelRegion::new("", slots[i], forecast_y, slots[i + 1] - slots[i], layout.forecast_height))
            .collect();
        let forecast_graph = (layout.forecast_graph_slots > 0).then(|| {
            let left = slots[layout.daily_cells as usize];
            PanelRegion::new(GRAPH_TITLES[2], left, forecast_y, x0 + inner - left, layout.forecast_height)
        });

        let frame_h = layout.height as i32 - layout.head_height - layout.margin_bottom;
        let frame = Rectangle::new(
            Point::new(x0 - 1, row_y - 1),
            Size::new((inner + 2) as u32, (frame_h + 2) as u32),
        );

        Ok(Self {
            head: PanelRegion::new("", 0, 0, layout.width as i32, layout.head_height),
            frame,
            weather,
            sun,
            wind,
            sensor,
            daily,
            forecast_graph,
            graphs,
            panel: layout.panel,
            compass_radius: layout.compass_radius,
        })
    }

    fn check_fits(layout: &LayoutConfig) -> Result<(), RenderError> {
        let too_small = Err(RenderError::RegionTooSmall {
            width: layout.width,
            height: layout.height,
        });
        let used_h = layout.head_height + layout.content_height() + layout.margin_bottom;
        if layout.daily_cells < 1 || used_h > layout.height as i32 {
            return too_small;
        }
        let inner = layout.inner_width();
        let min_column = 2 * (layout.compass_radius + 30);
        let slots = layout.daily_cells + layout.forecast_graph_slots;
        if inner < ROW_COLUMNS * min_column || inner / slots < ICON_SIZE as i32 {
            return too_small;
        }
        Ok(())
    }

    /// The four current-conditions panels, left to right
    pub fn current_row(&self) -> [&PanelRegion; 4] {
        [&self.weather, &self.sun, &self.wind, &self.sensor]
    }

    /// Every tiled region below the head strip
    pub fn regions(&self) -> Vec<&PanelRegion> {
        let mut all: Vec<&PanelRegion> = self.current_row().to_vec();
        all.extend(self.daily.iter());
        all.extend(self.forecast_graph.iter());
        all.extend(self.graphs.iter());
        all
    }
}
