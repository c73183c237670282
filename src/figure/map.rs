//! Map figure: chosen location, nearby stations and the temperature gauge

use tracing::debug;

use super::{Figure, Font, MapCenter, Mapbox, Margin, ScatterMapbox, Title, XAnchor, draw_gauge};
use crate::config::MapConfig;
use crate::models::weather::format_metric;
use crate::models::{LocationCandidate, ReadingTable, WeatherReading, WeatherSummary};
use crate::{Result, WeatherMapError};

pub const CENTRAL_MARKER_SIZE: u32 = 25;
pub const CENTRAL_MARKER_COLOR: &str = "royalblue";
pub const STATION_MARKER_SIZE: u32 = 13;
pub const STATION_MARKER_COLOR: &str = "lightgreen";
pub const NO_WEATHER_TEXT: &str = "No weather information<br>available";

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub style: String,
    pub zoom: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapConfig::default().into()
    }
}

impl From<MapConfig> for MapSettings {
    fn from(config: MapConfig) -> Self {
        Self {
            style: config.style,
            zoom: config.zoom,
        }
    }
}

/// Build the map for `candidates[chosen]` and the stations around it.
///
/// The central marker is always drawn. Station markers are added when there
/// is at least one station, and the gauge when the mean temperature is known.
pub fn compose(
    candidates: &[LocationCandidate],
    table: &ReadingTable,
    chosen: usize,
    settings: &MapSettings,
) -> Result<Figure> {
    let candidate = candidates.get(chosen).ok_or_else(|| {
        WeatherMapError::validation(format!(
            "candidate index {chosen} is out of range for {} candidates",
            candidates.len()
        ))
    })?;

    let mut figure = Figure::default();
    let summary = table.summary();

    let central_text = if summary.has_temperature() {
        let text = summary_text(candidate, summary);
        draw_gauge(&mut figure, summary.temperature, &text);
        text
    } else {
        NO_WEATHER_TEXT.to_string()
    };

    figure.add_trace(ScatterMapbox::markers(
        vec![(candidate.lat, candidate.lng)],
        vec![central_text],
        CENTRAL_MARKER_SIZE,
        CENTRAL_MARKER_COLOR,
    ));

    let stations = table.station_readings();
    let station_trace = ScatterMapbox::markers(
        stations.iter().map(|s| (s.lat, s.lng)).collect(),
        stations.iter().map(station_text).collect(),
        STATION_MARKER_SIZE,
        STATION_MARKER_COLOR,
    );
    let station_markers = station_trace.len();
    if !station_trace.is_empty() {
        figure.add_trace(station_trace);
    }

    let layout = &mut figure.layout;
    layout.title = Some(Title {
        text: format!(
            "{}<br>{}/{}",
            candidate.name, candidate.admin_area, candidate.country
        ),
        x: 0.5,
        y: 0.95,
        xanchor: XAnchor::Center,
        yanchor: "auto",
        font: Font::colored("red"),
    });
    layout.autosize = true;
    layout.margin = Margin::default();
    layout.mapbox = Some(Mapbox {
        style: settings.style.clone(),
        center: MapCenter {
            lat: candidate.lat,
            lon: candidate.lng,
        },
        zoom: settings.zoom,
    });
    layout.showlegend = false;

    debug!(
        "Composed map for {} with {} station markers",
        candidate.name, station_markers
    );
    Ok(figure)
}

fn summary_text(candidate: &LocationCandidate, summary: &WeatherSummary) -> String {
    format!(
        "{} (mean):<br>Temp: {} °C<br>Humidity: {} %<br>Wind: {} knots",
        candidate.name,
        format_metric(summary.temperature),
        format_metric(summary.humidity),
        format_metric(summary.wind_speed)
    )
}

fn station_text(reading: &WeatherReading) -> String {
    format!(
        "Station: {}<br>Temperature: {} °C<br>Humidity: {} %<br>Wind: {} knots",
        reading.station_name,
        format_metric(reading.temperature),
        format_metric(reading.humidity),
        format_metric(reading.wind_speed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::ShapeKind;
    use crate::models::BBox;

    fn candidate(name: &str) -> LocationCandidate {
        LocationCandidate {
            name: name.to_string(),
            bounding_box: BBox::new(40.6, 40.3, -3.5, -3.9),
            admin_area: "Madrid".to_string(),
            country: "Spain".to_string(),
            score: 0.9,
            lat: 40.4165,
            lng: -3.70256,
            wiki_link: None,
        }
    }

    fn station(name: &str, temperature: f64) -> WeatherReading {
        WeatherReading {
            timestamp: None,
            station_name: name.to_string(),
            temperature,
            humidity: 50.0,
            wind_speed: 4.0,
            cloud_cover: String::new(),
            lat: 40.45,
            lng: -3.55,
        }
    }

    #[test]
    fn test_central_and_station_markers_with_gauge() {
        let table = ReadingTable::new(vec![station("Barajas", 10.0), station("Getafe", 20.0)]);
        let figure = compose(&[candidate("Madrid")], &table, 0, &MapSettings::default()).unwrap();

        assert_eq!(figure.data.len(), 2);
        let central = &figure.data[0];
        assert_eq!(central.len(), 1);
        assert_eq!(central.marker.size, CENTRAL_MARKER_SIZE);
        assert_eq!(central.marker.color, CENTRAL_MARKER_COLOR);
        assert_eq!(
            central.text[0],
            "Madrid (mean):<br>Temp: 15.0 °C<br>Humidity: 50.0 %<br>Wind: 4.0 knots"
        );

        let stations = &figure.data[1];
        assert_eq!(stations.len(), 2);
        assert_eq!(stations.marker.size, STATION_MARKER_SIZE);
        assert!(stations.text[1].starts_with("Station: Getafe<br>Temperature: 20.0 °C"));

        let filled = figure
            .layout
            .shapes
            .iter()
            .filter(|s| s.kind == ShapeKind::Rect && s.fillcolor.as_deref() != Some("white"))
            .count();
        assert_eq!(filled, 5);
    }

    #[test]
    fn test_no_stations_renders_only_central_marker() {
        let table = ReadingTable::new(Vec::new());
        let figure = compose(&[candidate("Madrid")], &table, 0, &MapSettings::default()).unwrap();

        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0].text[0], NO_WEATHER_TEXT);
        assert!(figure.layout.shapes.is_empty());
        assert!(figure.layout.annotations.is_empty());
    }

    #[test]
    fn test_stations_without_temperature_skip_gauge() {
        let table = ReadingTable::new(vec![station("Barajas", f64::NAN)]);
        let figure = compose(&[candidate("Madrid")], &table, 0, &MapSettings::default()).unwrap();

        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0].text[0], NO_WEATHER_TEXT);
        assert!(figure.data[1].text[0].contains("Temperature: n/a °C"));
        assert!(figure.layout.shapes.is_empty());
    }

    #[test]
    fn test_layout_centres_on_chosen_candidate() {
        let mut second = candidate("Madrid, Iowa");
        second.lat = 41.87;
        second.lng = -93.82;
        second.admin_area = "Iowa".to_string();
        second.country = "United States".to_string();

        let settings = MapSettings {
            style: "carto-positron".to_string(),
            zoom: 10.0,
        };
        let figure = compose(
            &[candidate("Madrid"), second],
            &ReadingTable::new(Vec::new()),
            1,
            &settings,
        )
        .unwrap();

        let mapbox = figure.layout.mapbox.as_ref().unwrap();
        assert_eq!(mapbox.center.lat, 41.87);
        assert_eq!(mapbox.center.lon, -93.82);
        assert_eq!(mapbox.zoom, 10.0);
        assert_eq!(mapbox.style, "carto-positron");
        assert!(!figure.layout.showlegend);
        assert_eq!(
            figure.layout.title.as_ref().unwrap().text,
            "Madrid, Iowa<br>Iowa/United States"
        );
    }

    #[test]
    fn test_out_of_range_candidate() {
        let err = compose(
            &[candidate("Madrid")],
            &ReadingTable::new(Vec::new()),
            3,
            &MapSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WeatherMapError::Validation { .. }));
    }
}
