//! Chart-level tooltip facade
//!
//! A `TooltipChart` bundles one chart's tooltip context, data, controller and
//! link membership, and exposes the public show/hide entry points.

use std::cell::RefCell;
use std::rc::Rc;

use config_system::{InitX, LinkedOptions};
use log::{debug, warn};
use shared_types::{
    ChartData, ChartGeometry, DataPoint, PhysicalPosition, RenderState, TooltipError,
    TooltipResult, XValue,
};
use uuid::Uuid;

use crate::anchor::ChartHost;
use crate::content::ContentBuilder;
use crate::context::TooltipContext;
use crate::controller::TooltipController;
use crate::link::{LinkRegistry, LinkSynchronizer, LinkTarget};

/// What a public show call targets
#[derive(Debug, Clone)]
pub enum ShowRequest {
    /// An x index into the chart's data
    Index(usize),
    /// An x value, matched against the first series
    X(XValue),
    /// An explicit selected set at a pointer location
    Points {
        points: Vec<Option<DataPoint>>,
        pointer: PhysicalPosition,
    },
}

pub struct TooltipChart {
    id: Uuid,
    context: TooltipContext,
    data: ChartData,
    controller: TooltipController,
    link: LinkSynchronizer,
    host: Box<dyn ChartHost>,
}

impl TooltipChart {
    /// Set up the tooltip container and render the startup tooltip when configured
    pub fn new(mut context: TooltipContext, data: ChartData, host: impl ChartHost + 'static) -> Self {
        let id = Uuid::new_v4();
        context.declare_series(data.targets.iter().map(|t| t.id.clone()).collect());
        let controller = TooltipController::init(&context.config, &host);

        let mut chart = Self {
            id,
            context,
            data,
            controller,
            link: LinkSynchronizer::detached(id),
            host: Box::new(host),
        };

        if chart.context.config.init.show {
            if let Err(e) = chart.show_initial() {
                warn!("Initial tooltip not rendered: {e}");
            }
        }

        chart
    }

    /// Join a link registry and return the shared handle peers reach it through
    pub fn into_shared(mut self, registry: &LinkRegistry) -> Rc<RefCell<Self>> {
        let id = self.id;
        self.link.set_registry(registry.clone());

        let chart = Rc::new(RefCell::new(self));
        registry.register(id, &chart);
        chart
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &TooltipContext {
        &self.context
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn set_geometry(&mut self, geometry: ChartGeometry) {
        self.context.geometry = geometry;
    }

    pub fn controller(&self) -> &TooltipController {
        &self.controller
    }

    pub fn render_state(&self) -> Option<&RenderState> {
        self.controller.render_state()
    }

    pub fn is_visible(&self) -> bool {
        self.controller.is_visible()
    }

    pub fn show(&mut self, request: ShowRequest) -> TooltipResult<()> {
        match request {
            ShowRequest::Index(index) => self.show_at_index(index),
            ShowRequest::X(x) => {
                let index = self
                    .data
                    .index_of_x(&x)
                    .ok_or_else(|| TooltipError::NoMatchingX { x: x.to_string() })?;
                self.show_at_index(index)
            }
            ShowRequest::Points { points, pointer } => {
                self.show_points(points, pointer);
                Ok(())
            }
        }
    }

    /// Interaction path: show a selected set computed by the caller
    pub fn show_points(&mut self, points: Vec<Option<DataPoint>>, pointer: PhysicalPosition) {
        self.controller
            .show(&self.context, &self.link, points, pointer);
    }

    /// Show the selection at an x index, pointing at that x position
    pub fn show_at_index(&mut self, index: usize) -> TooltipResult<()> {
        let selection = self.selection(index)?;

        let x = selection
            .iter()
            .flatten()
            .next()
            .map(|p| self.context.x_scale.project(&p.x))
            .unwrap_or_default();
        let pointer = if self.context.geometry.rotated {
            PhysicalPosition::new(0.0, x)
        } else {
            PhysicalPosition::new(x, 0.0)
        };

        debug!("Tooltip {} showing index {index}", self.id);
        self.show_points(selection, pointer);
        Ok(())
    }

    /// Programmatic hide, overriding a do-not-hide policy
    pub fn hide(&mut self) {
        self.hide_tooltip(true);
    }

    /// Interaction path hide. Returns whether the tooltip was hidden.
    pub fn hide_tooltip(&mut self, force: bool) -> bool {
        self.controller.hide(&self.context, &self.link, force)
    }

    fn selection(&self, index: usize) -> TooltipResult<Vec<Option<DataPoint>>> {
        let selection = self.data.selection_at(index);
        if selection.iter().all(Option::is_none) {
            let len = self.data.targets.first().map_or(0, |t| t.values.len());
            return Err(TooltipError::IndexOutOfRange { index, len });
        }
        Ok(selection)
    }

    fn initial_index(&self) -> TooltipResult<usize> {
        match &self.context.config.init.x {
            InitX::Index(index) => Ok(*index),
            InitX::Time(input) if self.data.is_time_series() => {
                let x = XValue::parse_time(input, &self.data.x_format)?;
                self.data
                    .index_of_x(&x)
                    .ok_or_else(|| TooltipError::NoMatchingX { x: input.clone() })
            }
            InitX::Time(input) => Err(TooltipError::NoMatchingX { x: input.clone() }),
        }
    }

    fn show_initial(&mut self) -> TooltipResult<()> {
        let index = self.initial_index()?;
        let mut selection = self.selection(index)?;

        let html = ContentBuilder::new(&self.context).html(&mut selection);
        self.controller
            .render_initial(&html, &self.context.config.init.position);
        debug!("Initial tooltip rendered at index {index}");
        Ok(())
    }
}

impl LinkTarget for TooltipChart {
    fn link_options(&self) -> &LinkedOptions {
        &self.context.config.linked
    }

    fn is_attached(&self) -> bool {
        self.host.is_attached()
    }

    fn tooltip_index(&self) -> Option<usize> {
        self.controller.current_index()
    }

    fn show_at_index(&mut self, index: usize) -> TooltipResult<()> {
        TooltipChart::show_at_index(self, index)
    }

    fn hide_linked(&mut self) -> TooltipResult<()> {
        self.hide();
        Ok(())
    }
}
