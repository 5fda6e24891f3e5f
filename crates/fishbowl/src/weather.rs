//! Weather data fetching for the header widget.
//!
//! Fetches current conditions from the open-meteo API on a fixed
//! interval and shares them with the render loop. The animation core has
//! no dependency on this module; a failed fetch just leaves the widget
//! in its skeleton state.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use fishbowl_config::Location;
use ratatui::style::Color;
use serde::Deserialize;

/// How often to fetch new weather data (10 minutes).
const FETCH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current conditions as rendered by the widget.
#[derive(Debug, Clone)]
pub struct WeatherData {
    /// Temperature in Celsius, rounded.
    pub temp_c: i32,
    /// WMO weather code.
    pub weather_code: u16,
    /// Wind speed in km/h, rounded.
    pub wind_kmph: i32,
    /// Wind direction in degrees.
    pub wind_dir_deg: u16,
    /// Timestamp when this data was fetched.
    pub fetched_at: Instant,
}

impl WeatherData {
    /// Check if this data is still fresh (less than one interval old).
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < FETCH_INTERVAL
    }
}

/// open-meteo JSON response structure (partial - only fields we need).
#[derive(Debug, Deserialize)]
struct MeteoResponse {
    current: MeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct MeteoCurrent {
    temperature_2m: f64,
    weather_code: u16,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}

/// Weather monitor that fetches data in a background thread.
#[derive(Debug)]
pub struct WeatherMonitor {
    /// Current weather data (if available).
    weather_data: Arc<RwLock<Option<WeatherData>>>,
    /// Cached copy for when the lock is contended.
    cached_data: Arc<RwLock<Option<WeatherData>>>,
    /// Coordinates to fetch for.
    location: Location,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
}

impl WeatherMonitor {
    pub fn new(location: Location) -> Self {
        Self {
            weather_data: Arc::new(RwLock::new(None)),
            cached_data: Arc::new(RwLock::new(None)),
            location,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background fetching thread.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return; // Already running
            }
            *running = true;
        }

        let weather_data = self.weather_data.clone();
        let cached_data = self.cached_data.clone();
        let location = self.location.clone();
        let running = self.running.clone();

        thread::spawn(move || {
            // Fetch immediately on start
            fetch_and_update(&location, &weather_data, &cached_data);

            let mut last_fetch = Instant::now();

            loop {
                // Check if we should stop
                if let Ok(is_running) = running.read()
                    && !*is_running
                {
                    break;
                }

                // Fetch new data if the interval elapsed
                if last_fetch.elapsed() >= FETCH_INTERVAL {
                    fetch_and_update(&location, &weather_data, &cached_data);
                    last_fetch = Instant::now();
                }

                thread::sleep(Duration::from_secs(30));
            }
        });
    }

    /// Stop the background thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    /// Get the current weather data (if available).
    /// Uses try_read with fallback to the cached copy to avoid blocking.
    pub fn get_current(&self) -> Option<WeatherData> {
        if let Ok(data) = self.weather_data.try_read() {
            return data.clone();
        }
        if let Ok(cached) = self.cached_data.read() {
            return cached.clone();
        }
        None
    }
}

impl Drop for WeatherMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Fetch weather data and update shared state.
fn fetch_and_update(
    location: &Location,
    weather_data: &Arc<RwLock<Option<WeatherData>>>,
    cached_data: &Arc<RwLock<Option<WeatherData>>>,
) {
    match fetch_weather(location) {
        Ok(data) => {
            if let Ok(mut wd) = weather_data.write() {
                *wd = Some(data.clone());
            }
            if let Ok(mut cd) = cached_data.write() {
                *cd = Some(data);
            }
        }
        Err(_e) => {
            // On error keep existing data while fresh, otherwise drop back
            // to the skeleton.
            let stale = weather_data
                .read()
                .map(|wd| wd.as_ref().map(|d| !d.is_fresh()).unwrap_or(true))
                .unwrap_or(true);

            if stale {
                if let Ok(mut wd) = weather_data.write() {
                    *wd = None;
                }
                if let Ok(mut cd) = cached_data.write() {
                    *cd = None;
                }
            }
        }
    }
}

/// Fetch current conditions from the open-meteo API.
fn fetch_weather(location: &Location) -> Result<WeatherData, String> {
    let url = format!(
        "https://api.open-meteo.com/v1/forecast?latitude={:.4}&longitude={:.4}&current=temperature_2m,weather_code,wind_speed_10m,wind_direction_10m",
        location.latitude, location.longitude,
    );

    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .new_agent();

    let response: MeteoResponse = agent
        .get(&url)
        .call()
        .map_err(|e| format!("HTTP error: {e}"))?
        .body_mut()
        .read_json()
        .map_err(|e| format!("JSON parse error: {e}"))?;

    Ok(WeatherData {
        temp_c: response.current.temperature_2m.round() as i32,
        weather_code: response.current.weather_code,
        wind_kmph: response.current.wind_speed_10m.round() as i32,
        wind_dir_deg: response.current.wind_direction_10m.rem_euclid(360.0) as u16,
        fetched_at: Instant::now(),
    })
}

/// Map a WMO weather code to the widget glyph.
pub fn weather_icon(code: u16) -> char {
    match code {
        // Clear
        0 => '☀',
        // Partly cloudy
        1..=3 => '⛅',
        // Fog
        45 | 48 => '≋',
        // Rain / drizzle / showers
        51..=67 | 80..=82 => '☂',
        // Snow
        71..=77 => '❄',
        // Thunderstorm
        95.. => '⚡',
        // Fallback: overcast
        _ => '☁',
    }
}

/// Condition color for a WMO weather code.
pub fn weather_color(code: u16) -> Color {
    match code {
        0 => Color::Rgb(245, 158, 11),              // clear -> amber
        1..=3 => Color::Rgb(249, 115, 22),          // partly cloudy -> orange
        45 | 48 => Color::Rgb(148, 163, 184),       // fog -> slate
        51..=67 | 80..=82 => Color::Rgb(59, 130, 246), // rain -> blue
        71..=77 => Color::Rgb(125, 211, 252),       // snow -> sky
        95.. => Color::Rgb(234, 179, 8),            // thunder -> yellow
        _ => Color::Rgb(113, 113, 122),             // fallback
    }
}

/// Compass direction for wind degrees.
pub fn deg_to_cardinal(deg: u16) -> &'static str {
    const DIRS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    DIRS[((deg as f32 / 45.0).round() as usize) % 8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_icon_mapping() {
        assert_eq!(weather_icon(0), '☀');
        assert_eq!(weather_icon(2), '⛅');
        assert_eq!(weather_icon(45), '≋');
        assert_eq!(weather_icon(61), '☂');
        assert_eq!(weather_icon(81), '☂');
        assert_eq!(weather_icon(73), '❄');
        assert_eq!(weather_icon(96), '⚡');
        assert_eq!(weather_icon(4), '☁'); // Unknown
    }

    #[test]
    fn test_deg_to_cardinal() {
        assert_eq!(deg_to_cardinal(0), "N");
        assert_eq!(deg_to_cardinal(45), "NE");
        assert_eq!(deg_to_cardinal(90), "E");
        assert_eq!(deg_to_cardinal(180), "S");
        assert_eq!(deg_to_cardinal(270), "W");
        assert_eq!(deg_to_cardinal(337), "NW");
        assert_eq!(deg_to_cardinal(350), "N");
    }

    #[test]
    fn test_parse_meteo_response() {
        let raw = r#"{
            "latitude": 12.875,
            "longitude": 80.25,
            "current": {
                "time": "2026-02-11T09:30",
                "temperature_2m": 30.6,
                "weather_code": 2,
                "wind_speed_10m": 11.4,
                "wind_direction_10m": 138.0
            }
        }"#;
        let response: MeteoResponse = serde_json::from_str(raw).expect("valid response");
        assert!((response.current.temperature_2m - 30.6).abs() < 1e-9);
        assert_eq!(response.current.weather_code, 2);
    }

    #[test]
    fn test_monitor_starts_empty() {
        let monitor = WeatherMonitor::new(Location::default());
        assert!(monitor.get_current().is_none());
    }
}
