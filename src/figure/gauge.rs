//! Vertical thermometer drawn at the right edge of the map.
//!
//! The scale spans -15 °C to 45 °C in ten 6 °C bands stacked from the bottom
//! of the figure. Bands up to the current temperature are filled from a
//! blue-to-red ramp; the rest stay white. A red line marks the exact
//! (clamped) temperature and carries the caller's annotation.

use tracing::warn;

use super::{Annotation, Figure, Line, Shape, ShapeKind, XAnchor, YAnchor};

pub const MIN_TEMPERATURE: f64 = -15.0;
pub const MAX_TEMPERATURE: f64 = 45.0;
pub const BAND_COUNT: usize = 10;
pub const BAND_WIDTH: f64 = (MAX_TEMPERATURE - MIN_TEMPERATURE) / BAND_COUNT as f64;

/// Paper height of one band; the whole scale takes 90% of the figure
const BAND_HEIGHT: f64 = 0.09;
const SCALE_HEIGHT: f64 = BAND_HEIGHT * BAND_COUNT as f64;
const BAR_LEFT: f64 = 0.92;
const BAR_RIGHT: f64 = 0.96;
const LABEL_X: f64 = 1.0;
const LABEL_COLOR: &str = "darkblue";
const EMPTY_BAND_COLOR: &str = "white";

/// Cold end of the reversed ColorBrewer RdYlBu ramp, coldest first
pub const BAND_COLORS: [&str; BAND_COUNT] = [
    "rgb(49,54,149)",
    "rgb(69,117,180)",
    "rgb(116,173,209)",
    "rgb(171,217,233)",
    "rgb(224,243,248)",
    "rgb(255,255,191)",
    "rgb(254,224,144)",
    "rgb(253,174,97)",
    "rgb(244,109,67)",
    "rgb(215,48,39)",
];

/// Temperature as positioned on the scale
#[must_use]
pub fn clamp_temperature(temperature: f64) -> f64 {
    temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// Number of coloured bands for a temperature, 0..=10
#[must_use]
pub fn filled_bands(temperature: f64) -> usize {
    let steps = ((clamp_temperature(temperature) - MIN_TEMPERATURE) / BAND_WIDTH).ceil();
    (steps.max(0.0) as usize).min(BAND_COUNT)
}

/// Paper y of the marker line
#[must_use]
pub fn marker_height(temperature: f64) -> f64 {
    (clamp_temperature(temperature) - MIN_TEMPERATURE) / (MAX_TEMPERATURE - MIN_TEMPERATURE)
        * SCALE_HEIGHT
}

/// Keeps the annotation box inside the figure near either end of the scale
#[must_use]
pub fn annotation_anchor(temperature: f64) -> YAnchor {
    let position = clamp_temperature(temperature);
    if position > 40.0 {
        YAnchor::Top
    } else if position < -10.0 {
        YAnchor::Bottom
    } else {
        YAnchor::Middle
    }
}

/// Draw the thermometer for `temperature` into `figure`, with `annotation`
/// shown next to the marker line. NaN draws nothing.
pub fn draw_gauge(figure: &mut Figure, temperature: f64, annotation: &str) {
    if temperature.is_nan() {
        warn!("Skipping temperature gauge: temperature is not a number");
        return;
    }

    let filled = filled_bands(temperature);
    for (band, &ramp_color) in BAND_COLORS.iter().enumerate() {
        let color = if band < filled {
            ramp_color
        } else {
            EMPTY_BAND_COLOR
        };
        let bottom = BAND_HEIGHT * band as f64;
        figure.add_shape(
            Shape::paper(
                ShapeKind::Rect,
                (BAR_LEFT, bottom),
                (BAR_RIGHT, bottom + BAND_HEIGHT),
                Line::new(color, 2),
            )
            .filled(color),
        );
    }

    for step in 0..=BAND_COUNT {
        let degrees = MIN_TEMPERATURE + BAND_WIDTH * step as f64;
        figure.add_annotation(Annotation::label(
            LABEL_X,
            BAND_HEIGHT * step as f64,
            format!("{degrees} °C"),
            LABEL_COLOR,
        ));
    }

    figure.add_annotation(Annotation::label(
        LABEL_X,
        0.95,
        "Temperature",
        LABEL_COLOR,
    ));

    let y = marker_height(temperature);
    figure.add_shape(Shape::paper(
        ShapeKind::Line,
        (BAR_LEFT, y),
        (BAR_RIGHT, y),
        Line::new("red", 2),
    ));

    let mut note = Annotation::label(BAR_LEFT, y, annotation, "white");
    note.showarrow = true;
    note.arrowcolor = Some("royalblue".to_string());
    note.align = Some("left");
    note.xanchor = Some(XAnchor::Right);
    note.yanchor = Some(annotation_anchor(temperature));
    note.bgcolor = Some("royalblue".to_string());
    note.bordercolor = Some("white".to_string());
    figure.add_annotation(note);
}
