use std::fmt;

use crate::error::FetchError;

/// A validated city name: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyInput);
        }

        Ok(Self(city.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one city, built fresh from each successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// "City, CC"
    pub location: String,
    pub temperature_c: i64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::reading_lines(self).join("\n"))
    }
}

/// Rounds half up, the way `Math.round` does: 21.5 -> 22, -2.5 -> -2.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}
