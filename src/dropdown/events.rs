//! Events emitted by a dropdown
//!
//! Subscribers are plain closures called synchronously, in subscription
//! order, at the moment the dropdown emits.

use super::item::Item;
use super::props::ButtonType;
use serde::Serialize;
use std::sync::Arc;

/// Something observable happened in a dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DropdownEvent {
    /// A search ran; emitted for filtering and for restoring alike
    ItemsFiltered {
        original_items: Arc<[Item]>,
        filtered_items: Arc<[Item]>,
    },
    /// The menu opened or closed
    ExpandedChanged { expanded: bool },
    /// An item was activated; carries the item's state after activation
    ItemSelected { item: Item },
    /// The footer button was pressed
    ButtonClicked {
        #[serde(rename = "type")]
        kind: ButtonType,
    },
}

impl DropdownEvent {
    /// Event name as subscribers know it
    pub fn name(&self) -> &'static str {
        match self {
            DropdownEvent::ItemsFiltered { .. } => "itemsFiltered",
            DropdownEvent::ExpandedChanged { .. } => "expandedChanged",
            DropdownEvent::ItemSelected { .. } => "itemSelected",
            DropdownEvent::ButtonClicked { .. } => "buttonClicked",
        }
    }
}

/// Handle returned by [`EventEmitter::on`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&DropdownEvent)>;

/// Synchronous fan-out to subscribers
#[derive(Default)]
pub struct EventEmitter {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event
    pub fn on(&mut self, handler: impl FnMut(&DropdownEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Unsubscribe; returns false if the id was unknown
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: DropdownEvent) {
        tracing::trace!(event = event.name(), subscribers = self.handlers.len(), "Emit");
        for (_, handler) in self.handlers.iter_mut() {
            handler(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
