/*
 *  main.rs
 *
 *  wxpaper - weather on paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Render one dashboard pass from a snapshot file
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

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use std::fs;
use std::path::Path;

use wxpaper::config;
use wxpaper::display::{DashboardRenderer, DisplayDriver, PgmDriver};
use wxpaper::icons::{IconAtlas, IconSet};
use wxpaper::weather::DashboardInput;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn read_input(path: &Path) -> Result<DashboardInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let input_path = cli.input.as_deref().context("no snapshot given, use --input <file.json>")?;
    let input = read_input(input_path)?;

    let atlas: Box<dyn IconAtlas> = match cfg.icon_dir() {
        Some(dir) => {
            info!("loading icons from {}", dir.display());
            Box::new(IconSet::load_dir(dir))
        }
        None => Box::new(IconSet::builtin()),
    };

    let mut renderer = DashboardRenderer::new(cfg.layout_config(), atlas, cfg.renderer_options())
        .context("resolving dashboard layout")?;

    let output = cfg.output();
    let mut driver = PgmDriver::new(output.clone(), cfg.width(), cfg.height());
    if cli.sensor_only {
        // the sensor pass paints over the last full image
        driver = driver.resuming();
    }
    driver.init().with_context(|| format!("opening {}", output.display()))?;

    if cli.sensor_only {
        renderer.show_sensor(&mut driver, &input).context("sensor pass")?;
    } else {
        renderer.show(&mut driver, &input).context("full pass")?;
    }
    info!("wrote {}", output.display());
    Ok(())
}
