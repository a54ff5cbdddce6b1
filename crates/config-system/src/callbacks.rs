//! Callable configuration values
//!
//! Options that accept a function are stored as reference-counted closures so a
//! config can be cloned into several chart instances. The argument structs give
//! every callable read access to the chart-wide state it may want to introspect.

use std::cmp::Ordering;
use std::rc::Rc;

use shared_types::{ChartGeometry, DataPoint, PhysicalPosition, Topology, TooltipPosition, XValue};

/// Positional arguments passed to name and value formatters
#[derive(Debug, Clone, Copy)]
pub struct FormatArgs<'a> {
    pub ratio: Option<f64>,
    pub id: &'a str,
    pub index: usize,
    /// The full (sorted) selection being rendered
    pub points: &'a [Option<DataPoint>],
    pub geometry: &'a ChartGeometry,
    pub topology: Topology,
}

/// Formats the x value shown in the title row
pub type TitleFormatter = Rc<dyn Fn(&XValue) -> Option<String>>;

/// Formats a series name
pub type NameFormatter = Rc<dyn Fn(&str, &FormatArgs<'_>) -> String>;

/// Formats a row value. `None` suppresses the row.
pub type ValueFormatter = Rc<dyn Fn(f64, &FormatArgs<'_>) -> Option<String>>;

/// Maps a series id to a display color
pub type ColorResolver = Rc<dyn Fn(&str) -> String>;

/// Maps a value to a color for level-colored charts
pub type LevelColor = Rc<dyn Fn(f64) -> String>;

/// Consumer-defined total order over selection slots
pub type Comparator = Rc<dyn Fn(Option<&DataPoint>, Option<&DataPoint>) -> Ordering>;

/// Lifecycle hook
pub type Hook = Rc<dyn Fn()>;

/// Arguments handed to a custom content function
#[derive(Clone, Copy)]
pub struct ContentArgs<'a> {
    pub points: &'a [Option<DataPoint>],
    pub title_format: &'a TitleFormatter,
    pub value_format: &'a ValueFormatter,
    pub color: &'a ColorResolver,
}

/// Replaces the whole content pipeline
pub type ContentRenderer = Rc<dyn Fn(&ContentArgs<'_>) -> String>;

/// Arguments handed to a custom position function
#[derive(Debug, Clone, Copy)]
pub struct PositionArgs<'a> {
    /// Points with a defined value, in selection order
    pub points: &'a [DataPoint],
    pub width: f64,
    pub height: f64,
    pub pointer: PhysicalPosition,
    pub geometry: &'a ChartGeometry,
}

/// Replaces the built-in placement, clamping included
pub type PositionResolver = Rc<dyn Fn(&PositionArgs<'_>) -> TooltipPosition>;
