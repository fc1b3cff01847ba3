// DOM hooks shared by the gizmo and menu front-ends. The page markup in
// `web/index.html` carries these ids and attributes.

// Gizmo
pub const GIZMO_OVERLAY_ID: &str = "gizmo-overlay";
pub const GIZMO_CONTAINER_ID: &str = "gizmo-container";
pub const GIZMO_TITLE_ID: &str = "gizmo-title";
pub const GIZMO_INSTRUCTIONS_ID: &str = "gizmo-instructions";
pub const GIZMO_SAVE_ID: &str = "gizmo-save";
pub const GIZMO_CANCEL_ID: &str = "gizmo-cancel";
pub const GIZMO_READOUT_X_ID: &str = "gizmo-readout-x";
pub const GIZMO_READOUT_Y_ID: &str = "gizmo-readout-y";
pub const GIZMO_READOUT_Z_ID: &str = "gizmo-readout-z";
pub const GIZMO_READOUT_ROT_ID: &str = "gizmo-readout-rot";
pub const HANDLE_ID_PREFIX: &str = "gizmo-handle-"; // + axis name
pub const AXIS_COLOR_PROPERTY: &str = "--axis-color";

// Menu
pub const MENU_ROOT_ID: &str = "menu-root";
pub const MENU_TITLE_ID: &str = "menu-title";
pub const CATEGORY_LIST_ID: &str = "category-list";
pub const EMOTE_GRID_ID: &str = "emote-grid";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const CLEAR_SEARCH_ID: &str = "clear-search";
pub const TOP_BAR_ID: &str = "top-bar";
pub const COMPACT_TOGGLE_ID: &str = "compact-toggle";
pub const EXIT_BUTTON_ID: &str = "exit-button";
pub const RESET_BUTTON_ID: &str = "reset-settings";
pub const WELCOME_ID: &str = "welcome-message";
pub const CONTEXT_MENU_ID: &str = "context-menu";

// Classes
pub const HIDDEN_CLASS: &str = "hidden";
pub const VISIBLE_CLASS: &str = "visible";
pub const COMPACT_CLASS: &str = "compact";
pub const ACTIVE_CLASS: &str = "active";
pub const DRAGGABLE_CLASS: &str = "draggable";

// Data attributes used for event delegation
pub const DATA_CATEGORY: &str = "data-category";
pub const DATA_EMOTE: &str = "data-emote";
pub const DATA_ACTION: &str = "data-action";
pub const DATA_SLOT: &str = "data-slot";

// Fallback when the page is opened outside the game client
pub const DEFAULT_RESOURCE_NAME: &str = "rpemotes";
