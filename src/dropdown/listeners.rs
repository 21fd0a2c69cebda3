//! Document click stream and scoped listener registration
//!
//! The host owns a [`Document`] and feeds it every mouse-down. Components
//! register interest through [`Document::on_click`] and get back a
//! [`ListenerHandle`] that unregisters itself when dropped, so a component
//! that disappears can never leave a listener behind. [`ListenerGroup`]
//! collects the handles acquired while a component is open.
//!
//! Dispatch only reports *which owners* listen; the host then calls the
//! owning component. This keeps the registry free of closures that would
//! need to borrow the components themselves.

use ratatui::layout::Position;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a component holding registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a process-unique owner id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Dispatch phase of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Notified before bubble listeners
    Capture,
    Bubble,
}

/// A click on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Cell the click landed on
    pub target: Position,
}

impl ClickEvent {
    pub fn at(x: u16, y: u16) -> Self {
        Self {
            target: Position::new(x, y),
        }
    }
}

#[derive(Debug)]
struct Registration {
    id: u64,
    owner: OwnerId,
    phase: Phase,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// Host-owned click stream shared by every component on screen
#[derive(Debug, Clone, Default)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click listener for `owner`
    pub fn on_click(&self, owner: OwnerId, phase: Phase) -> ListenerHandle {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.registrations.push(Registration { id, owner, phase });

        ListenerHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Owners to notify for a click, capture listeners first, each phase in registration order
    pub fn dispatch_click(&self, event: &ClickEvent) -> Vec<OwnerId> {
        let registry = self.registry.borrow();
        let owners: Vec<OwnerId> = [Phase::Capture, Phase::Bubble]
            .iter()
            .flat_map(|phase| {
                registry
                    .registrations
                    .iter()
                    .filter(move |r| r.phase == *phase)
                    .map(|r| r.owner)
            })
            .collect();

        tracing::trace!(
            x = event.target.x,
            y = event.target.y,
            listeners = owners.len(),
            "Document click"
        );
        owners
    }

    /// Total number of live registrations
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().registrations.len()
    }

    /// Number of live registrations held by `owner`
    pub fn listener_count_for(&self, owner: OwnerId) -> usize {
        self.registry
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.owner == owner)
            .count()
    }
}

/// A live registration; unregisters on drop
#[must_use = "dropping the handle immediately unregisters the listener"]
#[derive(Debug)]
pub struct ListenerHandle {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        // The document may already be gone during host teardown
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .registrations
                .retain(|r| r.id != self.id);
        }
    }
}

/// Listeners acquired together and released together
#[derive(Debug, Default)]
pub struct ListenerGroup {
    handles: Vec<ListenerHandle>,
}

impl ListenerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handle: ListenerHandle) {
        self.handles.push(handle);
    }

    /// Release every handle in the group
    pub fn remove_all_listeners(&mut self) {
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_drop_unregisters() {
        let document = Document::new();
        let owner = OwnerId::next();

        let handle = document.on_click(owner, Phase::Bubble);
        assert_eq!(document.listener_count(), 1);
        drop(handle);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn group_releases_everything() {
        let document = Document::new();
        let owner = OwnerId::next();
        let mut group = ListenerGroup::new();

        group.add(document.on_click(owner, Phase::Capture));
        group.add(document.on_click(owner, Phase::Bubble));
        assert_eq!(document.listener_count_for(owner), 2);

        group.remove_all_listeners();
        assert!(group.is_empty());
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn capture_listeners_are_notified_first() {
        let document = Document::new();
        let (a, b) = (OwnerId::next(), OwnerId::next());

        let _bubble = document.on_click(a, Phase::Bubble);
        let _capture = document.on_click(b, Phase::Capture);

        assert_eq!(document.dispatch_click(&ClickEvent::at(0, 0)), vec![b, a]);
    }

    #[test]
    fn handles_outliving_the_document_are_harmless() {
        let document = Document::new();
        let handle = document.on_click(OwnerId::next(), Phase::Capture);
        drop(document);
        drop(handle);
    }
}
