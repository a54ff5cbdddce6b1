//! Cross-instance tooltip synchronization
//!
//! Charts sharing a link name mirror each other's tooltip. The registry holds
//! weak handles only; a chart that has been dropped simply stops taking part.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use config_system::LinkedOptions;
use log::debug;
use shared_types::{TooltipError, TooltipResult};
use uuid::Uuid;

/// The side of a chart that linked instances may drive
pub trait LinkTarget {
    fn link_options(&self) -> &LinkedOptions;

    /// Whether the chart root is attached to a live document
    fn is_attached(&self) -> bool;

    /// X index the tooltip currently shows, if visible
    fn tooltip_index(&self) -> Option<usize>;

    fn show_at_index(&mut self, index: usize) -> TooltipResult<()>;

    fn hide_linked(&mut self) -> TooltipResult<()>;
}

type Member = (Uuid, Weak<RefCell<dyn LinkTarget>>);

/// Shared, non-owning list of chart instances
#[derive(Clone, Default)]
pub struct LinkRegistry {
    members: Rc<RefCell<Vec<Member>>>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&self, id: Uuid, target: &Rc<RefCell<T>>)
    where
        T: LinkTarget + 'static,
    {
        let target: Rc<RefCell<dyn LinkTarget>> = target.clone();
        let mut members = self.members.borrow_mut();
        members.retain(|(member, _)| *member != id);
        members.push((id, Rc::downgrade(&target)));
    }

    pub fn unregister(&self, id: Uuid) {
        self.members.borrow_mut().retain(|(member, _)| *member != id);
    }

    /// Live members at this moment, in registration order
    pub fn snapshot(&self) -> Vec<(Uuid, Rc<RefCell<dyn LinkTarget>>)> {
        self.members
            .borrow()
            .iter()
            .filter_map(|(id, weak)| weak.upgrade().map(|target| (*id, target)))
            .collect()
    }

    /// Forget members that have been dropped
    pub fn prune(&self) {
        self.members
            .borrow_mut()
            .retain(|(_, weak)| weak.strong_count() > 0);
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for LinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkRegistry")
            .field("members", &self.len())
            .finish()
    }
}

/// Propagates one chart's show/hide to its linked peers
#[derive(Debug, Clone)]
pub struct LinkSynchronizer {
    id: Uuid,
    registry: Option<LinkRegistry>,
}

impl LinkSynchronizer {
    /// A synchronizer that never reaches any peer
    pub fn detached(id: Uuid) -> Self {
        Self { id, registry: None }
    }

    pub fn new(id: Uuid, registry: LinkRegistry) -> Self {
        Self {
            id,
            registry: Some(registry),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> Option<&LinkRegistry> {
        self.registry.as_ref()
    }

    pub fn set_registry(&mut self, registry: LinkRegistry) {
        self.registry = Some(registry);
    }

    /// Mirror a show at `index` (or a hide) onto every eligible peer.
    /// Failures are confined to the peer that raised them.
    pub fn sync(&self, linked: &LinkedOptions, show: bool, index: Option<usize>) {
        if !linked.enabled {
            return;
        }
        let Some(registry) = &self.registry else {
            return;
        };

        for (id, member) in registry.snapshot() {
            if id == self.id {
                continue;
            }

            if let Err(e) = Self::apply(id, &member, linked, show, index) {
                debug!("Linked tooltip sync skipped for {id}: {e}");
            }
        }
    }

    fn apply(
        id: Uuid,
        member: &Rc<RefCell<dyn LinkTarget>>,
        linked: &LinkedOptions,
        show: bool,
        index: Option<usize>,
    ) -> TooltipResult<()> {
        let mut target = member
            .try_borrow_mut()
            .map_err(|_| TooltipError::InstanceBusy { id: id.to_string() })?;

        let options = target.link_options();
        if !options.enabled || options.name != linked.name || !target.is_attached() {
            return Ok(());
        }

        match (show, index) {
            (true, Some(index)) if target.tooltip_index() != Some(index) => {
                target.show_at_index(index)
            }
            (true, _) => Ok(()),
            (false, _) if target.tooltip_index().is_some() => target.hide_linked(),
            (false, _) => Ok(()),
        }
    }
}
