/*
 *  display/mod.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - canvas, layout, panels and commit targets
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// In-memory drawing surface
pub mod canvas;

// Parameterised dashboard geometry
pub mod layout;

// Panel renderers
pub mod components;

// Dashboard renderer
pub mod manager;

// Commit targets
pub mod drivers;

// Re-exports for convenience
pub use traits::{DisplayCapabilities, DisplayDriver, RefreshMode, Surface, TextAnchor};
pub use error::{DisplayError, RenderError};
pub use color::Tone;
pub use canvas::Canvas;
pub use layout::{DashboardGeometry, LayoutConfig, LayoutVariant, PanelRegion, PanelStyle};
pub use manager::{DashboardRenderer, PassMetrics, RendererOptions};
pub use drivers::{MockDriver, PgmDriver, RecordingSurface};
