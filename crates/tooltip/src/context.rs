//! Chart-wide state shared by the tooltip components
//!
//! A `TooltipContext` is owned by one chart instance and handed by reference to
//! the content builder, the position calculator and the visibility controller.
//! It bundles the tooltip configuration, the current chart geometry and the
//! external collaborators (x scale, tick/value formatting, color resolution).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use config_system::{
    ColorResolver, FormatArgs, LevelColor, TitleFormatter, TooltipConfig, ValueFormatter,
};
use serde::{Deserialize, Serialize};
use shared_types::{format_number, ChartGeometry, DataPoint, InputType, Topology, XValue};

/// d3 "category10" palette used when a series has no explicit color
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Projects x values onto the horizontal pixel axis
pub trait XScale {
    fn project(&self, x: &XValue) -> f64;
}

/// Linear mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new([0.0, 1.0], [0.0, 1.0])
    }
}

impl XScale for LinearScale {
    fn project(&self, x: &XValue) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (x.as_f64() - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Color resolver backed by explicit colors, falling back to the default palette.
/// Declared series take the palette slot of their declaration index; any other
/// id is appended in order of first request.
pub fn palette_resolver(explicit: HashMap<String, String>, declared: Vec<String>) -> ColorResolver {
    let assigned = RefCell::new(declared);

    Rc::new(move |id: &str| {
        if let Some(color) = explicit.get(id) {
            return color.clone();
        }

        let mut assigned = assigned.borrow_mut();
        let slot = match assigned.iter().position(|known| known == id) {
            Some(slot) => slot,
            None => {
                assigned.push(id.to_string());
                assigned.len() - 1
            }
        };
        DEFAULT_PALETTE[slot % DEFAULT_PALETTE.len()].to_string()
    })
}

fn default_tick_format(x: &XValue) -> Option<String> {
    Some(x.to_string())
}

fn default_y_format(value: f64, _: &FormatArgs<'_>) -> Option<String> {
    Some(format_number(value))
}

/// Explicit replacement for the chart-internal state every component reads
#[derive(Clone)]
pub struct TooltipContext {
    pub config: TooltipConfig,
    pub geometry: ChartGeometry,
    pub topology: Topology,
    pub input: InputType,
    /// A zoom transform is active
    pub zoomed: bool,
    /// The chart paints series with pattern fills
    pub patterns: bool,
    /// Stacks are normalized to 100%
    pub stack_normalized: bool,
    /// Series grouped into stacks
    pub data_groups: Vec<Vec<String>>,
    /// Series ids in visual stacking order
    pub target_order: Vec<String>,
    pub x_scale: Rc<dyn XScale>,
    /// Axis tick format, the default title format
    pub x_tick_format: TitleFormatter,
    /// Chart y format, the default value format
    pub y_format: ValueFormatter,
    color: ColorResolver,
    /// `color` is still the built-in palette
    default_colors: bool,
    pub level_color: Option<LevelColor>,
}

impl TooltipContext {
    pub fn new(config: TooltipConfig, geometry: ChartGeometry) -> Self {
        Self {
            config,
            geometry,
            topology: Topology::default(),
            input: InputType::default(),
            zoomed: false,
            patterns: false,
            stack_normalized: false,
            data_groups: Vec::new(),
            target_order: Vec::new(),
            x_scale: Rc::new(LinearScale::default()),
            x_tick_format: Rc::new(default_tick_format),
            y_format: Rc::new(default_y_format),
            color: palette_resolver(HashMap::new(), Vec::new()),
            default_colors: true,
            level_color: None,
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_input(mut self, input: InputType) -> Self {
        self.input = input;
        self
    }

    pub fn with_scale(mut self, scale: impl XScale + 'static) -> Self {
        self.x_scale = Rc::new(scale);
        self
    }

    pub fn with_colors(mut self, color: ColorResolver) -> Self {
        self.color = color;
        self.default_colors = false;
        self
    }

    pub fn color(&self) -> &ColorResolver {
        &self.color
    }

    /// Key the built-in palette by series declaration order. Has no effect once
    /// a resolver was supplied through `with_colors`.
    pub fn declare_series(&mut self, ids: Vec<String>) {
        if self.default_colors {
            self.color = palette_resolver(HashMap::new(), ids);
        }
    }

    /// Group series into stacks; `order` is the visual stacking order of all series
    pub fn with_groups(mut self, groups: Vec<Vec<String>>, order: Vec<String>) -> Self {
        self.data_groups = groups;
        self.target_order = order;
        self
    }

    pub fn has_groups(&self) -> bool {
        !self.data_groups.is_empty()
    }

    /// Formatter arguments for one row of a selection
    pub fn format_args<'a>(
        &'a self,
        point: &'a DataPoint,
        points: &'a [Option<DataPoint>],
    ) -> FormatArgs<'a> {
        FormatArgs {
            ratio: point.ratio,
            id: &point.id,
            index: point.index,
            points,
            geometry: &self.geometry,
            topology: self.topology,
        }
    }
}

impl fmt::Debug for TooltipContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipContext")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("topology", &self.topology)
            .field("input", &self.input)
            .field("zoomed", &self.zoomed)
            .field("patterns", &self.patterns)
            .field("stack_normalized", &self.stack_normalized)
            .field("data_groups", &self.data_groups)
            .field("default_colors", &self.default_colors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new([0.0, 10.0], [0.0, 500.0]);
        assert_eq!(scale.project(&XValue::Number(2.0)), 100.0);
        assert_eq!(scale.project(&XValue::Number(10.0)), 500.0);

        let flat = LinearScale::new([3.0, 3.0], [40.0, 500.0]);
        assert_eq!(flat.project(&XValue::Number(3.0)), 40.0);
    }

    #[test]
    fn test_palette_resolver() {
        let mut explicit = HashMap::new();
        explicit.insert("fixed".to_string(), "#000000".to_string());
        let color = palette_resolver(explicit, Vec::new());

        assert_eq!(color("fixed"), "#000000");
        assert_eq!(color("a"), DEFAULT_PALETTE[0]);
        assert_eq!(color("b"), DEFAULT_PALETTE[1]);
        assert_eq!(color("a"), DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_palette_follows_declaration_order() {
        let declared = vec!["fixed".to_string(), "a".to_string(), "b".to_string()];
        let mut explicit = HashMap::new();
        explicit.insert("fixed".to_string(), "#000000".to_string());
        let color = palette_resolver(explicit, declared);

        // Requested out of order, still keyed by declaration index
        assert_eq!(color("b"), DEFAULT_PALETTE[2]);
        assert_eq!(color("a"), DEFAULT_PALETTE[1]);
        assert_eq!(color("fixed"), "#000000");
        assert_eq!(color("late"), DEFAULT_PALETTE[3]);
    }

    #[test]
    fn test_declare_series_keeps_supplied_colors() {
        let mut ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default());
        ctx.declare_series(vec!["a".to_string(), "b".to_string()]);
        assert_eq!((ctx.color())("b"), DEFAULT_PALETTE[1]);

        let mut explicit = HashMap::new();
        explicit.insert("b".to_string(), "teal".to_string());
        let mut ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default())
            .with_colors(palette_resolver(explicit, Vec::new()));
        ctx.declare_series(vec!["a".to_string(), "b".to_string()]);
        assert_eq!((ctx.color())("b"), "teal");
    }

    #[test]
    fn test_default_formatters() {
        let ctx = TooltipContext::new(TooltipConfig::default(), ChartGeometry::default());
        let point = DataPoint::new("a", 0, XValue::Number(4.0), Some(10.0));
        let points = vec![Some(point.clone())];

        assert_eq!((ctx.x_tick_format)(&point.x).as_deref(), Some("4"));
        assert_eq!(
            (ctx.y_format)(2.5, &ctx.format_args(&point, &points)).as_deref(),
            Some("2.5")
        );
    }
}
