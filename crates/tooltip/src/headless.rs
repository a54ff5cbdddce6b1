//! In-memory anchor and host
//!
//! Used for server-side rendering and tests. Anchors share their state through
//! `Rc<RefCell<..>>` so a caller can keep a handle and inspect what the tooltip
//! wrote after handing the anchor to a chart.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::anchor::{ChartHost, TooltipAnchor};

#[derive(Debug, Default)]
pub struct AnchorState {
    pub html: String,
    pub styles: HashMap<String, String>,
    /// Size reported by `offset_size`
    pub size: (f64, f64),
    pub html_writes: usize,
    pub measurements: Cell<usize>,
}

/// Anchor that records markup and styles
#[derive(Debug, Clone, Default)]
pub struct MemoryAnchor {
    state: Rc<RefCell<AnchorState>>,
}

impl MemoryAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor that reports a fixed rendered size
    pub fn with_size(width: f64, height: f64) -> Self {
        let anchor = Self::default();
        anchor.state.borrow_mut().size = (width, height);
        anchor
    }

    pub fn html(&self) -> String {
        self.state.borrow().html.clone()
    }

    pub fn html_writes(&self) -> usize {
        self.state.borrow().html_writes
    }

    pub fn measurements(&self) -> usize {
        self.state.borrow().measurements.get()
    }
}

impl TooltipAnchor for MemoryAnchor {
    fn set_html(&mut self, html: &str) {
        let mut state = self.state.borrow_mut();
        state.html = html.to_string();
        state.html_writes += 1;
    }

    fn set_style(&mut self, property: &str, value: Option<&str>) {
        let mut state = self.state.borrow_mut();
        match value {
            Some(value) => {
                state.styles.insert(property.to_string(), value.to_string());
            }
            None => {
                state.styles.remove(property);
            }
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    fn offset_size(&self) -> (f64, f64) {
        let state = self.state.borrow();
        state.measurements.set(state.measurements.get() + 1);
        state.size
    }
}

/// Host with a switchable attachment flag and registered bound containers
#[derive(Debug, Clone)]
pub struct MemoryHost {
    attached: Rc<Cell<bool>>,
    bound: Rc<RefCell<HashMap<String, MemoryAnchor>>>,
    created: Rc<RefCell<Vec<MemoryAnchor>>>,
    container_size: (f64, f64),
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            attached: Rc::new(Cell::new(true)),
            bound: Rc::new(RefCell::new(HashMap::new())),
            created: Rc::new(RefCell::new(Vec::new())),
            container_size: (0.0, 0.0),
        }
    }

    /// Containers created by this host report the given size
    pub fn with_container_size(mut self, width: f64, height: f64) -> Self {
        self.container_size = (width, height);
        self
    }

    /// Register an element resolvable through `bindto`
    pub fn bind(&self, selector: impl Into<String>, anchor: MemoryAnchor) {
        self.bound.borrow_mut().insert(selector.into(), anchor);
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    /// The most recently created container
    pub fn container(&self) -> Option<MemoryAnchor> {
        self.created.borrow().last().cloned()
    }
}

impl ChartHost for MemoryHost {
    fn select_bound(&self, selector: &str) -> Option<Box<dyn TooltipAnchor>> {
        self.bound
            .borrow()
            .get(selector)
            .cloned()
            .map(|a| Box::new(a) as Box<dyn TooltipAnchor>)
    }

    fn create_container(&self) -> Box<dyn TooltipAnchor> {
        let (width, height) = self.container_size;
        let anchor = MemoryAnchor::with_size(width, height);
        self.created.borrow_mut().push(anchor.clone());
        Box::new(anchor)
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}
