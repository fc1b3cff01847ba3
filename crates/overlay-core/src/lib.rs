pub mod catalog;
pub mod constants;
pub mod debounce;
pub mod drag;
pub mod error;
pub mod favorites;
pub mod gizmo;
pub mod host;
pub mod i18n;
pub mod keybinds;
pub mod math;
pub mod offset;
pub mod panel;
pub mod prefs;
pub mod projection;
pub mod smoothing;

pub use catalog::{Catalog, CategoryEntry, Emote, Selection};
pub use debounce::Debouncer;
pub use drag::{Axis, DragController, DragParams, DragSession};
pub use error::{OverlayError, Result};
pub use favorites::Favorites;
pub use gizmo::{CloseReason, GizmoController, GizmoParams, GizmoState, Readout, Transition};
pub use i18n::Strings;
pub use host::{parse_response, HostBridge, HostCommand, HostEvent, RecordingHost};
pub use keybinds::{menu_position, slots_from_response, ContextMenu, KeybindSlot};
pub use offset::{Offset, OffsetStore};
pub use panel::{PanelDrag, PanelPosition};
pub use prefs::{KeyValueStore, MemoryStore, Preferences, ScrollSaver};
pub use projection::{scale_for_distance, Placement, ProjectionTick, ProjectionUpdater};
pub use smoothing::SmoothingLoop;
