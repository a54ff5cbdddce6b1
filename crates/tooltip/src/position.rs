//! Tooltip placement
//!
//! Computes where the tooltip box goes relative to the pointer, depending on
//! chart topology, then clamps the box so it stays inside the chart viewport.

use config_system::{PositionArgs, PositionOption};
use shared_types::{DataPoint, InputType, PhysicalPosition, Topology, TooltipPosition};

use crate::context::TooltipContext;

/// Vertical gap between pointer and tooltip
const POINTER_GAP: f64 = 20.0;
/// Extra horizontal offset for rotated axes
const ROTATED_OFFSET: f64 = 100.0;
/// Lift applied on standard cartesian charts
const CARTESIAN_LIFT: f64 = 5.0;
/// Margin kept from the right edge after a shift
const RIGHT_MARGIN: f64 = 20.0;
/// Margin used when flipping the box above the pointer
const FLIP_MARGIN: f64 = 30.0;

pub struct PositionCalculator<'a> {
    ctx: &'a TooltipContext,
}

impl<'a> PositionCalculator<'a> {
    pub fn new(ctx: &'a TooltipContext) -> Self {
        Self { ctx }
    }

    /// Placement for a rendered tooltip of `width` x `height`. A custom position
    /// function replaces the whole calculation, clamping included.
    pub fn position(
        &self,
        points: &[DataPoint],
        width: f64,
        height: f64,
        pointer: PhysicalPosition,
    ) -> TooltipPosition {
        match &self.ctx.config.position {
            PositionOption::Custom(resolve) => resolve(&PositionArgs {
                points,
                width,
                height,
                pointer,
                geometry: &self.ctx.geometry,
            }),
            PositionOption::Default => self.default_position(points, width, height, pointer),
        }
    }

    fn default_position(
        &self,
        points: &[DataPoint],
        width: f64,
        height: f64,
        pointer: PhysicalPosition,
    ) -> TooltipPosition {
        let ctx = self.ctx;
        let geometry = &ctx.geometry;

        let mut left = pointer.x;
        let mut top = pointer.y + POINTER_GAP;
        let mut chart_right = geometry.chart_right();

        if ctx.topology.is_arc() {
            let raw = ctx.input == InputType::Touch || ctx.topology == Topology::Radar;
            if !raw {
                top += geometry.height / 2.0;
                left += (geometry.width - geometry.legend_right_width.unwrap_or(0.0)) / 2.0;
            }
        } else {
            // Without a point the pointer stands in for the projected x
            let data_scale = points
                .first()
                .map(|p| ctx.x_scale.project(&p.x))
                .unwrap_or(if geometry.rotated { pointer.y } else { pointer.x });

            if geometry.rotated {
                top = data_scale + POINTER_GAP;
                left += geometry.svg_left + ROTATED_OFFSET;
                chart_right -= geometry.svg_left;
            } else {
                top -= CARTESIAN_LIFT;
                let anchor = if ctx.zoomed { left } else { data_scale };
                left = geometry.svg_left + geometry.padding_left + POINTER_GAP + anchor;
            }
        }

        clamp(TooltipPosition::new(top, left), width, height, chart_right, geometry.current_height)
    }
}

/// Keep the box left of `chart_right`, flip it above the pointer when it would
/// overflow the bottom, and never place it above the chart.
fn clamp(
    mut pos: TooltipPosition,
    width: f64,
    height: f64,
    chart_right: f64,
    current_height: f64,
) -> TooltipPosition {
    let right = pos.left + width;
    if right > chart_right {
        pos.left -= right - chart_right + RIGHT_MARGIN;
    }

    if pos.top + height > current_height {
        pos.top -= height + FLIP_MARGIN;
    }

    if pos.top < 0.0 {
        pos.top = 0.0;
    }

    pos
}
