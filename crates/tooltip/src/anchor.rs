//! Container abstraction the tooltip renders into
//!
//! The core never touches a document directly. A [`ChartHost`] hands out
//! [`TooltipAnchor`]s: either an element the consumer bound the tooltip to, or a
//! container created inside the chart root.

/// Inline style properties written by the tooltip
pub mod style {
    pub const DISPLAY: &str = "display";
    pub const POSITION: &str = "position";
    pub const POINTER_EVENTS: &str = "pointer-events";
    pub const TOP: &str = "top";
    pub const LEFT: &str = "left";
}

/// An element that displays tooltip markup
pub trait TooltipAnchor {
    fn set_html(&mut self, html: &str);

    /// Set an inline style property. `None` removes it.
    fn set_style(&mut self, property: &str, value: Option<&str>);

    /// Current inline value of a style property
    fn style(&self, property: &str) -> Option<String>;

    /// Rendered `(width, height)` in pixels
    fn offset_size(&self) -> (f64, f64);
}

/// The document-side owner of a chart
pub trait ChartHost {
    /// Resolve a consumer-supplied container selector
    fn select_bound(&self, selector: &str) -> Option<Box<dyn TooltipAnchor>>;

    /// Create the tooltip container inside the chart root
    fn create_container(&self) -> Box<dyn TooltipAnchor>;

    /// Whether the chart root is attached to a live document
    fn is_attached(&self) -> bool;
}

/// `12.5` -> `"12.5px"`
pub fn px(value: f64) -> String {
    format!("{value}px")
}
