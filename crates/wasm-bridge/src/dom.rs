//! DOM-backed tooltip anchor and chart host

use chart_tooltip::{classes, ChartHost, TooltipAnchor};
use shared_types::{TooltipError, TooltipResult};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

/// A tooltip anchor on a live element
pub struct DomAnchor {
    element: HtmlElement,
}

impl DomAnchor {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl TooltipAnchor for DomAnchor {
    fn set_html(&mut self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn set_style(&mut self, property: &str, value: Option<&str>) {
        let style = self.element.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(|_| ()),
        };

        if let Err(e) = result {
            log::warn!("Failed to update tooltip style {property}: {e:?}");
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.element
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn offset_size(&self) -> (f64, f64) {
        (
            f64::from(self.element.offset_width()),
            f64::from(self.element.offset_height()),
        )
    }
}

/// The chart root element and its document
pub struct DomHost {
    document: Document,
    root: HtmlElement,
}

impl DomHost {
    /// Host for the element with the given id
    pub fn new(root_id: &str) -> TooltipResult<Self> {
        let window = web_sys::window().ok_or_else(|| interop("No window"))?;
        let document = window.document().ok_or_else(|| interop("No document"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| interop(&format!("No element with id '{root_id}'")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| interop(&format!("Element '{root_id}' is not an HTML element")))?;

        Ok(Self { document, root })
    }

    fn build_container(&self) -> TooltipResult<HtmlElement> {
        self.root.style().set_property("position", "relative")?;

        let container = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| interop("Created container is not an HTML element"))?;
        container.set_class_name(classes::TOOLTIP_CONTAINER);
        self.root.append_child(&container)?;

        Ok(container)
    }
}

impl ChartHost for DomHost {
    fn select_bound(&self, selector: &str) -> Option<Box<dyn TooltipAnchor>> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(|element| Box::new(DomAnchor::new(element)) as Box<dyn TooltipAnchor>)
    }

    fn create_container(&self) -> Box<dyn TooltipAnchor> {
        match self.build_container() {
            Ok(container) => Box::new(DomAnchor::new(container)),
            Err(e) => {
                // Detached element: the tooltip still works, it is just never seen
                log::error!("Tooltip container not attached: {e}");
                let fallback = self
                    .document
                    .create_element("div")
                    .ok()
                    .and_then(|element| element.dyn_into::<HtmlElement>().ok());
                match fallback {
                    Some(element) => Box::new(DomAnchor::new(element)),
                    None => Box::new(chart_tooltip::MemoryAnchor::new()),
                }
            }
        }
    }

    fn is_attached(&self) -> bool {
        let root: &Node = self.root.as_ref();
        self.document
            .body()
            .map_or(false, |body| body.contains(Some(root)))
    }
}

fn interop(message: &str) -> TooltipError {
    TooltipError::JsInterop {
        message: message.to_string(),
    }
}
