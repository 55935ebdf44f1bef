/*
 *  config.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  YAML configuration layered under command line overrides
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

use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::layout::{DashboardGeometry, LayoutConfig, LayoutVariant};
use crate::display::manager::RendererOptions;
use crate::display::traits::RefreshMode;

pub const DEFAULT_WIDTH: u32 = 960;
pub const DEFAULT_HEIGHT: u32 = 540;
pub const DEFAULT_OUTPUT: &str = "wxpaper.pgm";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. Every field is optional so files and flags can
/// be layered; the accessors fill in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub layout: Option<LayoutVariant>,
    pub header: Option<HeaderConfig>,
    /// Title of the indoor sensor panel
    pub sensor_title: Option<String>,
    pub icons: Option<IconConfig>,
    /// Image written by the PGM display
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub refresh_mode: Option<RefreshMode>,
    pub sensor_refresh_mode: Option<RefreshMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HeaderConfig {
    pub version_label: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IconConfig {
    /// Directory of raw `.bin` icons; built-in icons when unset
    pub dir: Option<PathBuf>,
    pub high_contrast: Option<bool>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn width(&self) -> u32 {
        self.display.as_ref().and_then(|d| d.width).unwrap_or(DEFAULT_WIDTH)
    }

    pub fn height(&self) -> u32 {
        self.display.as_ref().and_then(|d| d.height).unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn icon_dir(&self) -> Option<&Path> {
        self.icons.as_ref().and_then(|i| i.dir.as_deref())
    }

    pub fn output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn layout_config(&self) -> LayoutConfig {
        let layout = LayoutConfig::new(self.layout.unwrap_or_default(), self.width(), self.height());
        match &self.sensor_title {
            Some(title) => layout.with_sensor_title(title.as_str()),
            None => layout,
        }
    }

    pub fn renderer_options(&self) -> RendererOptions {
        let mut options = RendererOptions::default();
        if let Some(header) = &self.header {
            if let Some(label) = &header.version_label { options.version_label = label.clone(); }
            if let Some(city) = &header.city { options.city = city.clone(); }
        }
        if let Some(display) = &self.display {
            if let Some(mode) = display.refresh_mode { options.refresh_mode = mode; }
            if let Some(mode) = display.sensor_refresh_mode { options.sensor_refresh_mode = mode; }
        }
        if let Some(hc) = self.icons.as_ref().and_then(|i| i.high_contrast) {
            options.high_contrast = hc;
        }
        options
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "wxpaper", about = "Weather dashboard for e-paper panels", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// JSON snapshot to render
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub layout: Option<LayoutVariant>,
    /// redraw only the indoor sensor panel
    #[arg(long, action = ArgAction::SetTrue)]
    pub sensor_only: bool,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, value_enum)]
    pub refresh_mode: Option<RefreshMode>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub icons_dir: Option<PathBuf>,
    #[arg(long, action = ArgAction::Set)]
    pub high_contrast: Option<bool>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = resolve(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok((cfg, cli))
}

/// Defaults, then YAML (explicit path or search), then CLI, then validate
pub fn resolve(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    apply_cli_overrides(&mut cfg, cli);
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/wxpaper/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/wxpaper/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/wxpaper.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["wxpaper.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    if src.layout.is_some()         { dst.layout = src.layout; }
    if src.sensor_title.is_some()   { dst.sensor_title = src.sensor_title; }
    if src.output.is_some()         { dst.output = src.output; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.header, src.header) {
        (None, Some(c)) => dst.header = Some(c),
        (Some(d), Some(s)) => {
            if s.version_label.is_some() { d.version_label = s.version_label; }
            if s.city.is_some()          { d.city = s.city; }
        }
        _ => {}
    }
    match (&mut dst.icons, src.icons) {
        (None, Some(c)) => dst.icons = Some(c),
        (Some(d), Some(s)) => {
            if s.dir.is_some()           { d.dir = s.dir; }
            if s.high_contrast.is_some() { d.high_contrast = s.high_contrast; }
        }
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()               { dst.width = src.width; }
    if src.height.is_some()              { dst.height = src.height; }
    if src.refresh_mode.is_some()        { dst.refresh_mode = src.refresh_mode; }
    if src.sensor_refresh_mode.is_some() { dst.sensor_refresh_mode = src.sensor_refresh_mode; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if cli.layout.is_some()     { cfg.layout = cli.layout; }
    if cli.output.is_some()     { cfg.output = cli.output.clone(); }

    if cli.display_width.is_some() || cli.display_height.is_some() || cli.refresh_mode.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()  { display.width = cli.display_width; }
        if cli.display_height.is_some() { display.height = cli.display_height; }
        if cli.refresh_mode.is_some()   { display.refresh_mode = cli.refresh_mode; }
    }
    if cli.city.is_some() {
        cfg.header.get_or_insert_with(HeaderConfig::default).city = cli.city.clone();
    }
    if cli.icons_dir.is_some() || cli.high_contrast.is_some() {
        let icons = cfg.icons.get_or_insert_with(IconConfig::default);
        if cli.icons_dir.is_some()     { icons.dir = cli.icons_dir.clone(); }
        if cli.high_contrast.is_some() { icons.high_contrast = cli.high_contrast; }
    }
}

/// Non-zero panel, and room for every region of the chosen layout
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.width() == 0 || cfg.height() == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    DashboardGeometry::compute(&cfg.layout_config()).map_err(|e| {
        ConfigError::Validation(format!(
            "{}x{} cannot hold the {:?} layout: {}",
            cfg.width(),
            cfg.height(),
            cfg.layout.unwrap_or_default(),
            e
        ))
    })?;
    Ok(())
}
