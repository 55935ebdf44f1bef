/*
 *  lib.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dashboard rendering engine for grayscale e-paper panels
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

pub mod vframebuf;
pub mod trig;
pub mod draw;
pub mod icons;
pub mod weather;
pub mod config;
pub mod display;

pub use display::{DashboardRenderer, RendererOptions};
pub use icons::{IconAtlas, IconSet};
pub use weather::{DashboardInput, DeviceStatus, WeatherSnapshot};
