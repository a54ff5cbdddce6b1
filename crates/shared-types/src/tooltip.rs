//! Tooltip render state and placement structures

use serde::{Deserialize, Serialize};

use crate::{DataPoint, TooltipResult};

/// Cached result of the last tooltip render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Structural serialization of the last rendered selection
    pub fingerprint: String,

    /// Last measured rendered width in pixels
    pub width: f64,

    /// Last measured rendered height in pixels
    pub height: f64,

    /// X index the tooltip currently shows
    pub index: usize,
}

/// Anchor point of the tooltip box in chart coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub top: f64,
    pub left: f64,
}

impl TooltipPosition {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Change-detection key for a selected set. Not meant for display.
pub fn fingerprint(points: &[Option<DataPoint>]) -> TooltipResult<String> {
    Ok(serde_json::to_string(points)?)
}
