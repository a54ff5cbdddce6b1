//! Safe instance management for tooltip charts
//! Keeps every chart created from JavaScript in thread-local storage, together
//! with the link registry the charts synchronize through

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chart_tooltip::{LinkRegistry, TooltipChart};
use shared_types::{TooltipError, TooltipResult};
use uuid::Uuid;

type SharedChart = Rc<RefCell<TooltipChart>>;

// Thread-local storage for chart instances
thread_local! {
    static CHART_INSTANCES: RefCell<HashMap<Uuid, SharedChart>> = RefCell::new(HashMap::new());
    static LINK_REGISTRY: LinkRegistry = LinkRegistry::new();
}

/// Manages chart instances without global mutable state
pub struct InstanceManager;

impl InstanceManager {
    /// Register a chart for lookup and linking, returning its id
    pub fn create_instance(chart: TooltipChart) -> Uuid {
        let id = chart.id();
        let shared = LINK_REGISTRY.with(|registry| chart.into_shared(registry));

        CHART_INSTANCES.with(|instances| {
            instances.borrow_mut().insert(id, shared);
        });

        log::debug!("Tooltip chart {id} registered");
        id
    }

    fn get(id: &Uuid) -> TooltipResult<SharedChart> {
        CHART_INSTANCES
            .with(|instances| instances.borrow().get(id).cloned())
            .ok_or_else(|| TooltipError::InstanceNotFound { id: id.to_string() })
    }

    /// Run `f` against a chart instance
    pub fn with_instance<F, R>(id: &Uuid, f: F) -> TooltipResult<R>
    where
        F: FnOnce(&TooltipChart) -> R,
    {
        let chart = Self::get(id)?;
        let chart = chart
            .try_borrow()
            .map_err(|_| TooltipError::InstanceBusy { id: id.to_string() })?;
        Ok(f(&chart))
    }

    /// Run `f` against a mutable chart instance. The instance map is not
    /// borrowed while `f` runs, so linked charts can be reached from inside it.
    pub fn with_instance_mut<F, R>(id: &Uuid, f: F) -> TooltipResult<R>
    where
        F: FnOnce(&mut TooltipChart) -> R,
    {
        let chart = Self::get(id)?;
        let mut chart = chart
            .try_borrow_mut()
            .map_err(|_| TooltipError::InstanceBusy { id: id.to_string() })?;
        Ok(f(&mut chart))
    }

    /// Check if an instance exists
    pub fn instance_exists(id: &Uuid) -> bool {
        CHART_INSTANCES.with(|instances| instances.borrow().contains_key(id))
    }

    /// Remove an instance and its link membership
    pub fn remove_instance(id: &Uuid) -> Option<SharedChart> {
        LINK_REGISTRY.with(|registry| registry.unregister(*id));
        CHART_INSTANCES.with(|instances| instances.borrow_mut().remove(id))
    }

    /// Get the number of active instances
    pub fn instance_count() -> usize {
        CHART_INSTANCES.with(|instances| instances.borrow().len())
    }

    /// Number of charts taking part in linking
    pub fn linked_count() -> usize {
        LINK_REGISTRY.with(|registry| registry.len())
    }

    /// Clear all instances (useful for cleanup)
    pub fn clear_all() {
        let ids: Vec<Uuid> =
            CHART_INSTANCES.with(|instances| instances.borrow().keys().copied().collect());
        for id in ids {
            Self::remove_instance(&id);
        }
    }
}
