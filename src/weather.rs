/*
 *  weather.rs
 *
 *  wxpaper - weather on paper
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::display::error::RenderError;

/// Hourly samples plotted by the 12h graphs (hours 0..=12)
pub const HOURLY_SAMPLES: usize = 13;

/// Daily samples plotted by the 7 day graphs and the forecast strip (days 0..=7)
pub const DAILY_SAMPLES: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    #[serde(default)]
    pub icon: String,
    pub temp: f32,
    /// Rain in mm
    #[serde(default)]
    pub rain: f32,
    /// Probability of precipitation, percent
    #[serde(default)]
    pub pop: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub icon: String,
    pub temp_min: f32,
    pub temp_max: f32,
    /// Probability of precipitation, percent
    #[serde(default)]
    pub pop: f32,
    /// Rain in mm
    #[serde(default)]
    pub rain: f32,
}

/// Everything the renderer needs from the weather service for one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Condition code of the current weather, e.g. "10d"
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub temperature: f32,
    pub temp_min: f32,
    pub temp_max: f32,
    #[serde(default)]
    pub rain: f32,
    /// Compass degrees the wind blows from, 0 = north
    pub wind_direction: f32,
    /// Metres per second
    pub wind_speed: f32,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub hourly: Vec<HourlySample>,
    pub daily: Vec<DailySample>,
}

impl WeatherSnapshot {
    /// Check there are enough samples for every graph and daily cell
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.hourly.len() < HOURLY_SAMPLES {
            return Err(RenderError::MissingSamples(format!(
                "{} hourly samples, {} needed",
                self.hourly.len(),
                HOURLY_SAMPLES
            )));
        }
        if self.daily.len() < DAILY_SAMPLES {
            return Err(RenderError::MissingSamples(format!(
                "{} daily samples, {} needed",
                self.daily.len(),
                DAILY_SAMPLES
            )));
        }
        Ok(())
    }

    pub fn hourly_temps(&self) -> Vec<f32> {
        self.hourly.iter().map(|h| h.temp).collect()
    }

    pub fn hourly_rain(&self) -> Vec<f32> {
        self.hourly.iter().map(|h| h.rain).collect()
    }

    pub fn hourly_pop(&self) -> Vec<f32> {
        self.hourly.iter().map(|h| h.pop).collect()
    }

    pub fn daily_min_temps(&self) -> Vec<f32> {
        self.daily.iter().map(|d| d.temp_min).collect()
    }

    pub fn daily_max_temps(&self) -> Vec<f32> {
        self.daily.iter().map(|d| d.temp_max).collect()
    }

    pub fn daily_rain(&self) -> Vec<f32> {
        self.daily.iter().map(|d| d.rain).collect()
    }

    pub fn daily_pop(&self) -> Vec<f32> {
        self.daily.iter().map(|d| d.pop).collect()
    }

    /// Lowest and highest of the first `HOURLY_SAMPLES` temperatures
    pub fn hourly_temp_range(&self) -> Option<(f32, f32)> {
        extremes(self.hourly.iter().take(HOURLY_SAMPLES).map(|h| h.temp))
    }

    /// Lowest minimum and highest maximum over the forecast days
    pub fn daily_temp_range(&self) -> Option<(f32, f32)> {
        let days = self.daily.iter().take(DAILY_SAMPLES);
        extremes(days.flat_map(|d| [d.temp_min, d.temp_max]))
    }

    pub fn hourly_max_rain(&self) -> f32 {
        self.hourly.iter().take(HOURLY_SAMPLES).map(|h| h.rain).fold(0.0, f32::max)
    }

    pub fn daily_max_rain(&self) -> f32 {
        self.daily.iter().take(DAILY_SAMPLES).map(|d| d.rain).fold(0.0, f32::max)
    }
}

fn extremes(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Readings from the device itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Raw Wi-Fi RSSI in dBm
    pub rssi: i32,
    /// Already clamped to 0..=100 by the battery reader
    pub battery_percent: u8,
    pub indoor_temperature: i32,
    pub indoor_humidity: i32,
}

impl DeviceStatus {
    /// RSSI mapped to a 0..=100 link quality
    pub fn wifi_quality(&self) -> u8 {
        rssi_to_quality(self.rssi)
    }
}

pub fn rssi_to_quality(rssi: i32) -> u8 {
    match rssi {
        r if r <= -100 => 0,
        r if r >= -50 => 100,
        r => (2 * (r + 100)) as u8,
    }
}

/// One complete input for a draw pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInput {
    /// Time of the pass, shown in the sensor panel
    pub now: DateTime<FixedOffset>,
    pub weather: WeatherSnapshot,
    pub status: DeviceStatus,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{Duration, TimeZone};

    /// A plausible autumn day with a frosty start
    pub fn sample_input() -> DashboardInput {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let codes = ["01d", "02d", "03d", "04d", "09d", "10d", "11d", "13d"];
        let hourly = (0..HOURLY_SAMPLES)
            .map(|h| HourlySample {
                icon: codes[h % codes.len()].to_string(),
                temp: -3.0 + h as f32 * 1.5,
                rain: if h % 3 == 0 { 0.8 } else { 0.0 },
                pop: (h * 7) as f32,
            })
            .collect();
        let daily = (0..DAILY_SAMPLES)
            .map(|d| DailySample {
                date: now + Duration::days(d as i64),
                icon: codes[d].to_string(),
                temp_min: -2.0 + d as f32,
                temp_max: 8.0 + d as f32 * 1.5,
                pop: (d * 10) as f32,
                rain: d as f32 * 0.5,
            })
            .collect();
        DashboardInput {
            now,
            weather: WeatherSnapshot {
                icon: "10d".to_string(),
                description: "light rain".to_string(),
                temperature: 4.5,
                temp_min: -3.0,
                temp_max: 15.0,
                rain: 0.8,
                wind_direction: 225.0,
                wind_speed: 3.4,
                sunrise: tz.with_ymd_and_hms(2026, 10, 18, 7, 41, 0).unwrap(),
                sunset: tz.with_ymd_and_hms(2026, 10, 18, 18, 22, 0).unwrap(),
                hourly,
                daily,
            },
            status: DeviceStatus {
                rssi: -67,
                battery_percent: 71,
                indoor_temperature: 21,
                indoor_humidity: 48,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_input;
    use super::*;

    #[test]
    fn rssi_quality_is_clamped_and_linear() {
        assert_eq!(rssi_to_quality(-120), 0);
        assert_eq!(rssi_to_quality(-100), 0);
        assert_eq!(rssi_to_quality(-99), 2);
        assert_eq!(rssi_to_quality(-67), 66);
        assert_eq!(rssi_to_quality(-50), 100);
        assert_eq!(rssi_to_quality(-20), 100);
    }

    #[test]
    fn status_takes_battery_percent_as_given() {
        let json = r#"{"rssi": -67, "battery_percent": 71, "indoor_temperature": 21, "indoor_humidity": 48}"#;
        let status: DeviceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.battery_percent, 71);
        assert_eq!(status.wifi_quality(), 66);

        // raw readings from the battery reader are not part of the input
        let json = r#"{"rssi": -67, "battery_volts": 4.05, "battery_percent": 71, "indoor_temperature": 21, "indoor_humidity": 48}"#;
        let with_volts: DeviceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(with_volts, status);
    }

    #[test]
    fn ranges_cover_the_plotted_samples() {
        let input = sample_input();
        assert_eq!(input.weather.hourly_temp_range(), Some((-3.0, 15.0)));
        assert_eq!(input.weather.daily_temp_range(), Some((-2.0, 18.5)));
        assert_eq!(input.weather.hourly_max_rain(), 0.8);
        assert_eq!(input.weather.daily_max_rain(), 3.5);
    }

    #[test]
    fn short_series_fail_validation() {
        let mut input = sample_input();
        assert!(input.weather.validate().is_ok());
        input.weather.daily.truncate(5);
        assert!(matches!(input.weather.validate(), Err(RenderError::MissingSamples(_))));
    }

    #[test]
    fn input_survives_json() {
        let input = sample_input();
        let json = serde_json::to_string(&input).unwrap();
        let back: DashboardInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
