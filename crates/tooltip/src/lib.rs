//! Chart tooltip core
//!
//! Content generation, placement, visibility and cross-chart synchronization
//! for the tooltip overlay of an interactive chart. Rendering targets are
//! reached through the [`anchor`] traits; `headless` provides an in-memory
//! implementation and the wasm bridge provides a DOM one.

pub mod anchor;
pub mod chart;
pub mod content;
pub mod context;
pub mod controller;
pub mod headless;
pub mod link;
pub mod order;
pub mod position;
pub mod template;

pub use anchor::{ChartHost, TooltipAnchor};
pub use chart::{ShowRequest, TooltipChart};
pub use content::ContentBuilder;
pub use context::{palette_resolver, LinearScale, TooltipContext, XScale, DEFAULT_PALETTE};
pub use controller::TooltipController;
pub use headless::{MemoryAnchor, MemoryHost};
pub use link::{LinkRegistry, LinkSynchronizer, LinkTarget};
pub use position::PositionCalculator;
pub use template::{classes, TooltipTemplate};

// Re-export the crates consumers need to build a chart
pub use config_system;
pub use shared_types;
