/*
 *  display/error.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for committing canvases and for renderer preconditions
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

use std::fmt;
use std::error::Error;
use thiserror::Error as ThisError;

/// Errors raised while pushing a canvas to a display
#[derive(Debug)]
pub enum DisplayError {
    /// Unsupported operation for this display
    UnsupportedOperation,

    /// Committed buffer does not match the region it claims to cover
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Committed region does not fit on the panel
    RegionOutOfBounds { x: i32, y: i32, width: u32, height: u32 },

    /// File-backed sink failed
    Io(std::io::Error),

    /// Nothing was committed because the pass could not be drawn
    Render(RenderError),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::UnsupportedOperation =>
                write!(f, "Operation not supported by this display"),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} bytes, got {}", expected, actual),
            DisplayError::RegionOutOfBounds { x, y, width, height } =>
                write!(f, "Region {}x{} at ({}, {}) does not fit on the panel", width, height, x, y),
            DisplayError::Io(err) =>
                write!(f, "Display I/O error: {}", err),
            DisplayError::Render(err) =>
                write!(f, "Render failed: {}", err),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            DisplayError::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}

impl From<RenderError> for DisplayError {
    fn from(err: RenderError) -> Self {
        DisplayError::Render(err)
    }
}

/// Renderer precondition failures.
///
/// Drawing itself cannot fail; these are raised before any pixel is touched
/// when the data handed to a renderer cannot be mapped onto the canvas.
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum RenderError {
    #[error("axis range {min}..{max} is empty or inverted")]
    ZeroRange { min: f32, max: f32 },
    #[error("axis bound is not a finite number")]
    NonFiniteRange,
    #[error("x domain {x_min}..={x_max} is empty")]
    EmptyDomain { x_min: i32, x_max: i32 },
    #[error("line offset {offset} falls outside x domain {x_min}..={x_max}")]
    OffsetOutsideDomain { offset: usize, x_min: i32, x_max: i32 },
    #[error("series '{series}' has {len} values but index {needed} is plotted")]
    SeriesTooShort { series: &'static str, len: usize, needed: usize },
    #[error("region {width}x{height} is too small")]
    RegionTooSmall { width: u32, height: u32 },
    #[error("snapshot is missing data: {0}")]
    MissingSamples(String),
}
