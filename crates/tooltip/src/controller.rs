//! Tooltip visibility and lifecycle
//!
//! The controller owns the anchor element and the cached render state. A show
//! with an unchanged selection skips rebuilding and re-measuring the markup
//! but still moves the box to the new pointer location.

use config_system::{InitPosition, LifecycleEvent, TooltipConfig};
use log::{debug, warn};
use shared_types::{fingerprint, DataPoint, PhysicalPosition, RenderState};

use crate::anchor::{px, style, ChartHost, TooltipAnchor};
use crate::content::ContentBuilder;
use crate::context::TooltipContext;
use crate::link::LinkSynchronizer;
use crate::position::PositionCalculator;

pub struct TooltipController {
    anchor: Box<dyn TooltipAnchor>,
    /// The anchor is a consumer-supplied element and is never positioned.
    /// Set only when `bindto` resolved; a configured selector that matches
    /// nothing gets a created container, positioned like the default one.
    bound: bool,
    state: Option<RenderState>,
}

impl TooltipController {
    /// Attach to the bound element when `bindto` resolves, otherwise create a
    /// hidden, absolutely positioned container.
    pub fn init(config: &TooltipConfig, host: &dyn ChartHost) -> Self {
        if let Some(selector) = config.contents.bindto() {
            if let Some(anchor) = host.select_bound(selector) {
                debug!("Tooltip bound to {selector}");
                return Self::with_anchor(anchor, true);
            }
            debug!("Tooltip container {selector} not found, creating one");
        }

        let mut anchor = host.create_container();
        anchor.set_style(style::POSITION, Some("absolute"));
        anchor.set_style(style::POINTER_EVENTS, Some("none"));
        anchor.set_style(style::DISPLAY, Some("none"));
        Self::with_anchor(anchor, false)
    }

    pub fn with_anchor(anchor: Box<dyn TooltipAnchor>, bound: bool) -> Self {
        Self {
            anchor,
            bound,
            state: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn anchor(&self) -> &dyn TooltipAnchor {
        self.anchor.as_ref()
    }

    pub fn render_state(&self) -> Option<&RenderState> {
        self.state.as_ref()
    }

    /// X index of the visible tooltip
    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.index)
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_some() && self.anchor.style(style::DISPLAY).as_deref() != Some("none")
    }

    /// Show the tooltip for a selected set at a pointer location
    pub fn show(
        &mut self,
        ctx: &TooltipContext,
        link: &LinkSynchronizer,
        selected: Vec<Option<DataPoint>>,
        pointer: PhysicalPosition,
    ) {
        let config = &ctx.config;
        let shown: Vec<DataPoint> = selected
            .iter()
            .flatten()
            .filter(|p| p.has_value())
            .cloned()
            .collect();

        if shown.is_empty() || !config.show {
            return;
        }

        let current = match fingerprint(&selected) {
            Ok(current) => Some(current),
            Err(e) => {
                warn!("Tooltip fingerprint failed, forcing a render: {e}");
                None
            }
        };

        let unchanged = matches!(
            (&self.state, &current),
            (Some(state), Some(current)) if &state.fingerprint == current
        );

        if !unchanged {
            // The first present slot; `shown` being non-empty guarantees one
            let index = selected.iter().flatten().map(|p| p.index).next().unwrap_or_default();

            config.hooks.fire(LifecycleEvent::Show);

            let mut rows = selected;
            let html = ContentBuilder::new(ctx).html(&mut rows);
            self.anchor.set_html(&html);
            self.anchor.set_style(
                style::DISPLAY,
                if config.do_not_hide { None } else { Some("block") },
            );

            let (width, height) = self.anchor.offset_size();
            debug!("Tooltip rendered at index {index} ({width}x{height})");
            self.state = Some(RenderState {
                fingerprint: current.unwrap_or_default(),
                width,
                height,
                index,
            });

            config.hooks.fire(LifecycleEvent::Shown);
            link.sync(&config.linked, true, Some(index));
        }

        if !self.bound {
            let (width, height) = self
                .state
                .as_ref()
                .map_or((0.0, 0.0), |s| (s.width, s.height));
            let pos = PositionCalculator::new(ctx).position(&shown, width, height, pointer);

            self.anchor.set_style(style::TOP, Some(px(pos.top).as_str()));
            self.anchor.set_style(style::LEFT, Some(px(pos.left).as_str()));
        }
    }

    /// Hide the tooltip. Without `force` a do-not-hide policy wins.
    /// Returns whether the tooltip was hidden.
    pub fn hide(&mut self, ctx: &TooltipContext, link: &LinkSynchronizer, force: bool) -> bool {
        let config = &ctx.config;
        if config.do_not_hide && !force {
            debug!("Tooltip hide suppressed");
            return false;
        }

        config.hooks.fire(LifecycleEvent::Hide);
        self.anchor.set_style(style::DISPLAY, Some("none"));
        self.state = None;
        config.hooks.fire(LifecycleEvent::Hidden);

        link.sync(&config.linked, false, None);
        true
    }

    /// Startup tooltip: markup plus the configured CSS offsets, no render state
    pub fn render_initial(&mut self, html: &str, position: &InitPosition) {
        self.anchor.set_html(html);

        if !self.bound {
            self.anchor.set_style(style::TOP, Some(position.top.as_str()));
            self.anchor.set_style(style::LEFT, Some(position.left.as_str()));
            self.anchor.set_style(style::DISPLAY, Some("block"));
        }
    }
}
