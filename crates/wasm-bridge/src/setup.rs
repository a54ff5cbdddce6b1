//! Chart setup handed in from JavaScript as JSON

use std::collections::HashMap;

use chart_tooltip::{palette_resolver, LinearScale, TooltipContext};
use config_system::{TooltipConfig, TooltipOptions};
use serde::{Deserialize, Serialize};
use shared_types::{ChartData, ChartGeometry, InputType, Topology, TooltipError, TooltipResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSetup {
    #[serde(default)]
    pub tooltip: TooltipOptions,
    #[serde(default)]
    pub geometry: ChartGeometry,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub input: InputType,
    #[serde(default)]
    pub data: ChartData,
    /// Explicit series colors; others come from the default palette
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Numeric x domain mapped onto the plot width
    #[serde(default)]
    pub x_domain: Option<[f64; 2]>,
    #[serde(default)]
    pub data_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub patterns: bool,
    #[serde(default)]
    pub stack_normalized: bool,
}

impl ChartSetup {
    pub fn from_json(json: &str) -> TooltipResult<Self> {
        serde_json::from_str(json).map_err(|e| TooltipError::InvalidConfig {
            message: e.to_string(),
            field: None,
        })
    }

    /// Validate the tooltip options and assemble the chart context
    pub fn into_parts(self) -> TooltipResult<(TooltipContext, ChartData)> {
        let config =
            TooltipConfig::from_options(self.tooltip).map_err(|e| TooltipError::InvalidConfig {
                message: e.to_string(),
                field: Some("tooltip".to_string()),
            })?;

        let target_order: Vec<String> = self.data.targets.iter().map(|t| t.id.clone()).collect();
        let mut ctx = TooltipContext::new(config, self.geometry.clone())
            .with_topology(self.topology)
            .with_input(self.input)
            .with_colors(palette_resolver(self.colors, target_order.clone()))
            .with_groups(self.data_groups, target_order);
        ctx.patterns = self.patterns;
        ctx.stack_normalized = self.stack_normalized;

        if let Some(domain) = self.x_domain {
            ctx = ctx.with_scale(LinearScale::new(domain, [0.0, self.geometry.width]));
        }

        Ok((ctx, self.data))
    }
}
