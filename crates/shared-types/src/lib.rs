//! Shared types for the chart tooltip workspace
//!
//! This crate contains the data model that flows between the config-system,
//! the tooltip core and the wasm-bridge crates: data points and selected sets,
//! chart geometry, pointer events, cached render state and the error taxonomy.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub mod errors;
pub mod events;
pub mod tooltip;

pub use errors::{ErrorResponse, TooltipError, TooltipResult};
pub use events::{InputType, PhysicalPosition};
pub use tooltip::{fingerprint, RenderState, TooltipPosition};

/// Default format used to parse time-series x values given as strings
pub const DEFAULT_X_FORMAT: &str = "%Y-%m-%d";

/// A value on the x axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XValue {
    Number(f64),
    Time(NaiveDateTime),
    Category(String),
}

impl XValue {
    /// Numeric projection used by scales. Times map to epoch milliseconds.
    pub fn as_f64(&self) -> f64 {
        match self {
            XValue::Number(n) => *n,
            XValue::Time(t) => t.and_utc().timestamp_millis() as f64,
            XValue::Category(_) => f64::NAN,
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, XValue::Time(_))
    }

    /// Parse a time string with a `chrono` format, accepting date-only formats too
    pub fn parse_time(input: &str, format: &str) -> TooltipResult<XValue> {
        if let Ok(t) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(XValue::Time(t));
        }

        NaiveDate::parse_from_str(input, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(XValue::Time)
            .ok_or_else(|| TooltipError::InvalidTime {
                input: input.to_string(),
                format: format.to_string(),
            })
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(n) => f.write_str(&format_number(*n)),
            XValue::Time(t) => write!(f, "{}", t.format(DEFAULT_X_FORMAT)),
            XValue::Category(c) => f.write_str(c),
        }
    }
}

/// Shortest textual form of a number: `10`, `1.5`, `NaN`, `Infinity`.
/// Magnitudes below `1e-6` or from `1e21` up use exponent form (`1e-7`, `1e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 1e-6 || value.abs() >= 1e21 {
        let exp = format!("{value:e}");
        if exp.contains("e-") {
            exp
        } else {
            exp.replacen('e', "e+", 1)
        }
    } else {
        value.to_string()
    }
}

/// High/low pair carried by range-typed series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaRange {
    pub high: f64,
    pub low: f64,
}

/// One series' value at one x position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub x: XValue,
    pub value: Option<f64>,
    #[serde(default)]
    pub ratio: Option<f64>,
    pub id: String,
    pub index: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<AreaRange>,
}

impl DataPoint {
    pub fn new(id: impl Into<String>, index: usize, x: XValue, value: Option<f64>) -> Self {
        let id = id.into();
        Self {
            x,
            value,
            ratio: None,
            name: Some(id.clone()),
            id,
            index,
            range: None,
        }
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    pub fn with_range(mut self, high: f64, low: f64) -> Self {
        self.range = Some(AreaRange { high, low });
        self
    }

    /// Whether the point carries a displayable value. Zero counts, NaN does not.
    pub fn has_value(&self) -> bool {
        self.value.map_or(false, |v| !v.is_nan())
    }

    pub fn is_area_range(&self) -> bool {
        self.range.is_some()
    }
}

/// One slot per series at a given x position
pub type SelectedSet = Vec<Option<DataPoint>>;

/// A data series as owned by the chart's data model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesTarget {
    pub id: String,
    pub values: Vec<DataPoint>,
}

/// Raw chart data handed to the tooltip by the data model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub targets: Vec<SeriesTarget>,
    /// Display names by series id. A `null` entry hides the series from the tooltip.
    #[serde(default)]
    pub names: HashMap<String, Option<String>>,
    #[serde(default = "default_x_format")]
    pub x_format: String,
}

fn default_x_format() -> String {
    DEFAULT_X_FORMAT.to_string()
}

impl Default for ChartData {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            names: HashMap::new(),
            x_format: default_x_format(),
        }
    }
}

impl ChartData {
    pub fn new(targets: Vec<SeriesTarget>) -> Self {
        Self {
            targets,
            ..Self::default()
        }
    }

    pub fn is_time_series(&self) -> bool {
        self.targets
            .first()
            .and_then(|t| t.values.first())
            .map_or(false, |p| p.x.is_time())
    }

    /// Apply the configured display name for the point's series
    pub fn add_name(&self, mut point: DataPoint) -> DataPoint {
        point.name = match self.names.get(&point.id) {
            Some(name) => name.clone(),
            None => Some(point.id.clone()),
        };
        point
    }

    /// The selected set at an x index, one slot per target
    pub fn selection_at(&self, index: usize) -> SelectedSet {
        self.targets
            .iter()
            .map(|t| t.values.get(index).cloned().map(|p| self.add_name(p)))
            .collect()
    }

    /// Index of the first value in the first series whose x equals `x`
    pub fn index_of_x(&self, x: &XValue) -> Option<usize> {
        self.targets
            .first()
            .and_then(|t| t.values.iter().position(|p| &p.x == x))
    }
}

/// Chart topology as far as tooltip placement is concerned
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Cartesian,
    Pie,
    Donut,
    Gauge,
    Radar,
}

impl Topology {
    pub fn is_arc(&self) -> bool {
        !matches!(self, Topology::Cartesian)
    }
}

/// Chart box measurements supplied by the layout system
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartGeometry {
    /// Plotting area width
    pub width: f64,
    /// Plotting area height
    pub height: f64,
    /// Whole chart width
    pub current_width: f64,
    /// Whole chart height
    pub current_height: f64,
    pub svg_left: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    /// Width of a legend placed on the right, if any
    #[serde(default)]
    pub legend_right_width: Option<f64>,
    #[serde(default)]
    pub rotated: bool,
}

impl ChartGeometry {
    /// Right boundary of the plotting area in chart coordinates
    pub fn chart_right(&self) -> f64 {
        self.svg_left + self.current_width - self.padding_right
    }
}
