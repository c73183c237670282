//! Station readings, their mean summary and the presentation rows

use serde::Serialize;

/// One weather station observation. Missing numbers are NaN, never dropped.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Observation time as reported by the station
    pub timestamp: Option<String>,
    pub station_name: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in knots
    pub wind_speed: f64,
    pub cloud_cover: String,
    pub lat: f64,
    pub lng: f64,
}

/// Mean of every station's readings, each rounded to one decimal
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct WeatherSummary {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl WeatherSummary {
    #[must_use]
    pub fn from_readings(readings: &[WeatherReading]) -> Self {
        Self {
            temperature: rounded_mean(readings.iter().map(|r| r.temperature)),
            humidity: rounded_mean(readings.iter().map(|r| r.humidity)),
            wind_speed: rounded_mean(readings.iter().map(|r| r.wind_speed)),
        }
    }

    #[must_use]
    pub fn has_temperature(&self) -> bool {
        !self.temperature.is_nan()
    }

    /// The summary in row form: metrics filled in, everything else blank
    #[must_use]
    pub fn as_row(&self) -> WeatherReading {
        WeatherReading {
            timestamp: None,
            station_name: String::new(),
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            cloud_cover: String::new(),
            lat: f64::NAN,
            lng: f64::NAN,
        }
    }
}

/// Per-station readings plus the derived summary
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReadingTable {
    readings: Vec<WeatherReading>,
    summary: WeatherSummary,
}

impl ReadingTable {
    #[must_use]
    pub fn new(readings: Vec<WeatherReading>) -> Self {
        let summary = WeatherSummary::from_readings(&readings);
        Self { readings, summary }
    }

    #[must_use]
    pub fn station_readings(&self) -> &[WeatherReading] {
        &self.readings
    }

    #[must_use]
    pub fn summary(&self) -> &WeatherSummary {
        &self.summary
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.readings.len()
    }

    /// All station rows followed by the summary row, which is always last
    #[must_use]
    pub fn rows(&self) -> Vec<WeatherReading> {
        let mut rows = Vec::with_capacity(self.readings.len() + 1);
        rows.extend(self.readings.iter().cloned());
        rows.push(self.summary.as_row());
        rows
    }

    /// Presentation rows: stations only, coordinates left out
    #[must_use]
    pub fn station_rows(&self) -> Vec<StationRow> {
        self.readings.iter().map(StationRow::from).collect()
    }
}

/// Tabular view of a reading for the results page
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StationRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Temp.")]
    pub temperature: f64,
    #[serde(rename = "Humid.")]
    pub humidity: f64,
    #[serde(rename = "Wind")]
    pub wind_speed: f64,
    #[serde(rename = "Clouds")]
    pub clouds: String,
}

impl From<&WeatherReading> for StationRow {
    fn from(reading: &WeatherReading) -> Self {
        Self {
            date: reading.timestamp.clone().unwrap_or_default(),
            name: reading.station_name.clone(),
            temperature: reading.temperature,
            humidity: reading.humidity,
            wind_speed: reading.wind_speed,
            clouds: reading.cloud_cover.clone(),
        }
    }
}

/// Round the stored value to one decimal place, exact ties to even.
///
/// Goes through the decimal formatter, which works on the exact binary
/// value: 1.45 is stored just below the tie and becomes 1.4.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Mean of the non-NaN values, rounded; NaN when there are none
fn rounded_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        round_one_decimal(sum / count as f64)
    }
}

/// Format a metric for hover text, with `n/a` for missing values
#[must_use]
pub fn format_metric(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.1}")
    }
}
