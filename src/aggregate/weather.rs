//! Raw station observations to the reading table

use crate::geonames::{RawObservation, RawWeatherResponse};
use crate::models::{ReadingTable, WeatherReading};

/// One reading per observation, summary computed once over the finished rows
#[must_use]
pub fn build_reading_table(raw: &RawWeatherResponse) -> ReadingTable {
    let readings = raw.weather_observations.iter().map(reading_from).collect();
    ReadingTable::new(readings)
}

#[must_use]
pub fn reading_from(observation: &RawObservation) -> WeatherReading {
    WeatherReading {
        timestamp: observation.datetime().map(str::to_string),
        station_name: observation.station_name().unwrap_or_default().to_string(),
        temperature: observation.temperature().unwrap_or(f64::NAN),
        humidity: observation.humidity().unwrap_or(f64::NAN),
        wind_speed: observation.wind_speed().unwrap_or(f64::NAN),
        cloud_cover: observation.clouds().unwrap_or_default().to_string(),
        lat: observation.lat().unwrap_or(f64::NAN),
        lng: observation.lng().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn response(observations: Value) -> RawWeatherResponse {
        serde_json::from_value(json!({ "weatherObservations": observations })).unwrap()
    }

    #[test]
    fn test_rows_are_stations_plus_summary() {
        let raw = response(json!([
            {"stationName": "A", "temperature": "10", "humidity": 40, "windSpeed": "04"},
            {"stationName": "B", "temperature": "20", "humidity": 60, "windSpeed": "06"},
            {"stationName": "C", "temperature": "12", "humidity": 50, "windSpeed": "02"}
        ]));

        let table = build_reading_table(&raw);
        let rows = table.rows();
        assert_eq!(rows.len(), 4);

        let summary = &rows[3];
        assert_eq!(summary.temperature, 14.0);
        assert_eq!(summary.humidity, 50.0);
        assert_eq!(summary.wind_speed, 4.0);
    }

    #[test]
    fn test_missing_numbers_are_nan_and_row_kept() {
        let raw = response(json!([
            {"stationName": "Quiet", "temperature": "", "clouds": "n/a"},
            {"stationName": "Loud", "temperature": "7", "humidity": "90"}
        ]));

        let table = build_reading_table(&raw);
        let readings = table.station_readings();
        assert_eq!(readings.len(), 2);
        assert!(readings[0].temperature.is_nan());
        assert!(readings[0].humidity.is_nan());
        assert!(readings[0].lat.is_nan());
        assert!(readings[0].timestamp.is_none());
        assert_eq!(readings[0].cloud_cover, "n/a");
        assert_eq!(readings[1].cloud_cover, "");

        assert_eq!(table.summary().temperature, 7.0);
        assert_eq!(table.summary().humidity, 90.0);
        assert!(table.summary().wind_speed.is_nan());
    }

    #[test]
    fn test_all_temperatures_missing_gives_nan_summary() {
        let raw = response(json!([
            {"stationName": "A", "humidity": 40},
            {"stationName": "B", "temperature": null, "humidity": 60}
        ]));

        let table = build_reading_table(&raw);
        assert!(table.summary().temperature.is_nan());
        assert_eq!(table.summary().humidity, 50.0);
    }

    #[test]
    fn test_no_observations() {
        let table = build_reading_table(&RawWeatherResponse::default());
        assert_eq!(table.station_count(), 0);
        assert_eq!(table.rows().len(), 1);
        assert!(table.summary().temperature.is_nan());
    }

    #[test]
    fn test_summary_matches_mean_of_rows() {
        let temperatures = [3.5, -1.25, 18.0, 7.75, 11.0];
        let observations: Vec<Value> = temperatures
            .iter()
            .enumerate()
            .map(|(i, t)| json!({"stationName": format!("S{i}"), "temperature": t}))
            .collect();

        let table = build_reading_table(&response(Value::Array(observations)));
        let rows = table.rows();
        let stations = &rows[..rows.len() - 1];
        let mean = stations.iter().map(|r| r.temperature).sum::<f64>() / stations.len() as f64;

        assert_eq!(rows.last().unwrap().temperature, (mean * 10.0).round() / 10.0);
    }
}
