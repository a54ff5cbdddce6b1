//! WASM bridge for the chart tooltip
//! Exposes tooltip charts to JavaScript: DOM anchors, instance bookkeeping and
//! the `TooltipChartHandle` API

use std::sync::Once;

use chart_tooltip::{ShowRequest, TooltipChart};
use shared_types::{ChartGeometry, ErrorResponse, PhysicalPosition, TooltipError};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

pub mod dom;
pub mod instance_manager;
pub mod setup;

use dom::DomHost;
use instance_manager::InstanceManager;
use setup::ChartSetup;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        // Another module may have installed a logger already
        let _ = console_log::init_with_level(log::Level::Debug);
    });
}

fn to_js(error: TooltipError, operation: &str) -> JsValue {
    JsValue::from_str(
        &ErrorResponse::new(error)
            .with_context("wasm-bridge", operation)
            .to_json(),
    )
}

#[wasm_bindgen]
pub struct TooltipChartHandle {
    instance_id: Uuid,
}

#[wasm_bindgen]
impl TooltipChartHandle {
    /// Attach a tooltip to the chart rooted at `element_id`
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, setup_json: &str) -> Result<TooltipChartHandle, JsValue> {
        init_logging();

        let setup = ChartSetup::from_json(setup_json).map_err(|e| to_js(e, "new"))?;
        let (ctx, data) = setup.into_parts().map_err(|e| to_js(e, "new"))?;
        let host = DomHost::new(element_id).map_err(|e| to_js(e, "new"))?;

        let chart = TooltipChart::new(ctx, data, host);
        let instance_id = InstanceManager::create_instance(chart);
        log::info!("Tooltip attached to #{element_id} ({instance_id})");

        Ok(TooltipChartHandle { instance_id })
    }

    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.instance_id.to_string()
    }

    /// Show the tooltip for an x index
    #[wasm_bindgen(js_name = showIndex)]
    pub fn show_index(&self, index: usize) -> Result<(), JsValue> {
        InstanceManager::with_instance_mut(&self.instance_id, |chart| {
            chart.show(ShowRequest::Index(index))
        })
        .and_then(|shown| shown)
        .map_err(|e| to_js(e, "showIndex"))
    }

    /// Show the selection at `index` with the pointer at (`x`, `y`)
    #[wasm_bindgen(js_name = showAt)]
    pub fn show_at(&self, x: f64, y: f64, index: usize) -> Result<(), JsValue> {
        InstanceManager::with_instance_mut(&self.instance_id, |chart| {
            let points = chart.data().selection_at(index);
            chart.show(ShowRequest::Points {
                points,
                pointer: PhysicalPosition::new(x, y),
            })
        })
        .and_then(|shown| shown)
        .map_err(|e| to_js(e, "showAt"))
    }

    /// Programmatic hide, ignores `doNotHide`
    pub fn hide(&self) -> Result<(), JsValue> {
        InstanceManager::with_instance_mut(&self.instance_id, TooltipChart::hide)
            .map_err(|e| to_js(e, "hide"))
    }

    /// Pointer-leave hide; returns whether the tooltip was hidden
    #[wasm_bindgen(js_name = hideTooltip)]
    pub fn hide_tooltip(&self, force: bool) -> Result<bool, JsValue> {
        InstanceManager::with_instance_mut(&self.instance_id, |chart| chart.hide_tooltip(force))
            .map_err(|e| to_js(e, "hideTooltip"))
    }

    /// Replace the chart geometry after a resize
    #[wasm_bindgen(js_name = setGeometry)]
    pub fn set_geometry(&self, geometry: JsValue) -> Result<(), JsValue> {
        let geometry: ChartGeometry = serde_wasm_bindgen::from_value(geometry).map_err(|e| {
            to_js(
                TooltipError::InvalidConfig {
                    message: e.to_string(),
                    field: Some("geometry".to_string()),
                },
                "setGeometry",
            )
        })?;

        InstanceManager::with_instance_mut(&self.instance_id, |chart| chart.set_geometry(geometry))
            .map_err(|e| to_js(e, "setGeometry"))
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        InstanceManager::with_instance(&self.instance_id, TooltipChart::is_visible)
            .unwrap_or(false)
    }

    /// Current render state as a plain object, or `null` when hidden
    #[wasm_bindgen(js_name = renderState)]
    pub fn render_state(&self) -> Result<JsValue, JsValue> {
        let state = InstanceManager::with_instance(&self.instance_id, |chart| {
            chart.render_state().cloned()
        })
        .map_err(|e| to_js(e, "renderState"))?;

        serde_wasm_bindgen::to_value(&state).map_err(JsValue::from)
    }

    /// Drop the chart and leave its link group
    pub fn destroy(self) {
        if InstanceManager::remove_instance(&self.instance_id).is_some() {
            log::info!("Tooltip {} destroyed", self.instance_id);
        }
    }
}
