//! Serializable plotly.js figure description
//!
//! The browser hands `data` and `layout` straight to `Plotly.newPlot`, so
//! field names follow plotly.js attribute names. Optional attributes are
//! skipped when unset, and NaN coordinates serialize as `null`.

use serde::Serialize;

pub mod gauge;
pub mod map;

pub use gauge::draw_gauge;
pub use map::{MapSettings, compose};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<ScatterMapbox>,
    pub layout: Layout,
}

impl Figure {
    pub fn add_trace(&mut self, trace: ScatterMapbox) {
        self.data.push(trace);
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.layout.shapes.push(shape);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }
}

/// Marker layer drawn on the map subplot
#[derive(Debug, Clone, Serialize)]
pub struct ScatterMapbox {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub mode: &'static str,
    pub textposition: &'static str,
    pub marker: Marker,
    pub textfont: Font,
    pub text: Vec<String>,
    pub hoverinfo: &'static str,
    pub subplot: &'static str,
}

impl ScatterMapbox {
    /// Markers with hover text at the given points
    #[must_use]
    pub fn markers(points: Vec<(f64, f64)>, text: Vec<String>, size: u32, color: &str) -> Self {
        let (lat, lon) = points.into_iter().unzip();
        Self {
            kind: "scattermapbox",
            lat,
            lon,
            mode: "markers+text",
            textposition: "top right",
            marker: Marker {
                color: color.to_string(),
                size,
            },
            textfont: Font {
                family: Some("sans serif".to_string()),
                size: Some(18),
                color: "LightSeaGreen".to_string(),
            },
            text,
            hoverinfo: "text",
            subplot: "mapbox",
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lat.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub color: String,
}

impl Font {
    #[must_use]
    pub fn colored(color: &str) -> Self {
        Self {
            family: None,
            size: None,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub autosize: bool,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<Mapbox>,
    pub showlegend: bool,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xanchor: XAnchor,
    pub yanchor: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Margin {
    pub l: u32,
    pub t: u32,
    pub b: u32,
    pub r: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: MapCenter,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Line,
}

/// Rectangle or line in paper coordinates (0..1 across the plot area)
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
}

impl Shape {
    #[must_use]
    pub fn paper(kind: ShapeKind, (x0, y0): (f64, f64), (x1, y1): (f64, f64), line: Line) -> Self {
        Self {
            kind,
            xref: "paper",
            yref: "paper",
            x0,
            y0,
            x1,
            y1,
            line,
            fillcolor: None,
        }
    }

    #[must_use]
    pub fn filled(mut self, color: &str) -> Self {
        self.fillcolor = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

impl Line {
    #[must_use]
    pub fn new(color: &str, width: u32) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YAnchor {
    Top,
    Middle,
    Bottom,
}

/// Text placed in paper coordinates, optionally with an arrow and a box
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub showarrow: bool,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<XAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<YAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowcolor: Option<String>,
}

impl Annotation {
    /// Plain label without arrow
    #[must_use]
    pub fn label(x: f64, y: f64, text: impl Into<String>, color: &str) -> Self {
        Self {
            xref: "paper",
            yref: "paper",
            x,
            y,
            text: text.into(),
            showarrow: false,
            font: Font::colored(color),
            xanchor: None,
            yanchor: None,
            align: None,
            bgcolor: None,
            bordercolor: None,
            arrowcolor: None,
        }
    }
}
