// Dropdown widget
//
// A toggleable menu anchored to a trigger, with optional search filtering,
// click-outside dismissal and viewport-aware alignment.
//
// - props: validated properties and their raw (config) shape
// - item: menu item union, item paths and item validation
// - component: DropdownBase, the stateful widget
// - listeners: host document click stream with scoped registrations
// - align: eight-placement alignment with best-region search
// - search: snapshot-based filtering and the search text field
// - layout / tree / render: geometry, rendered subtree and drawing

pub mod align;
pub mod component;
pub mod events;
pub mod item;
pub mod layout;
pub mod listeners;
pub mod props;
pub mod render;
pub mod search;
pub mod tree;

pub use align::{Align, AlignedPosition, Aligner, Placement};
pub use component::{DropdownBase, Lifecycle};
pub use events::{DropdownEvent, SubscriptionId};
pub use item::{Icon, Item, ItemKind, ItemPath, RawItem};
pub use listeners::{ClickEvent, Document, ListenerGroup, ListenerHandle, OwnerId, Phase};
pub use props::{
    ButtonConfig, ButtonStyle, ButtonType, DropdownProps, IndicatorsPosition, MenuType,
    PropsError, RawDropdownProps, TriggerStyle, DEFAULT_ALIGN_ELEMENT_SELECTOR,
};
pub use tree::{Node, RenderTree, Selector};
