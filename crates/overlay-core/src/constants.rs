// Shared tuning constants for the gizmo and the picker. Keep magic numbers here.

// Offset limits (world units relative to the placement origin)
pub const MAX_OFFSET: f32 = 2.5; // |x|, |y| and the top of z
pub const MIN_HEIGHT: f32 = 0.0; // z never goes below the ground

// Drag mapping
pub const MAX_DRAG_DELTA_PX: f32 = 150.0; // per-axis pointer delta clamp, before scaling
pub const POSITION_SENSITIVITY: f32 = 0.005; // world units per screen unit

// Visual smoothing factor per animation frame, in (0, 1)
pub const SMOOTHING_FACTOR: f32 = 0.1;

// Host sync quiet window (milliseconds after the last target change)
pub const SYNC_QUIET_WINDOW_MS: u64 = 10;

// Projection
pub const INITIAL_CAMERA_DISTANCE: f32 = 5.0;
pub const SCALE_FALLOFF_DISTANCE: f32 = 30.0; // distance at which the unclamped scale hits zero
pub const MIN_GIZMO_SCALE: f32 = 0.4;

// Pointer buttons as reported by MouseEvent.button
pub const PRIMARY_BUTTON: i16 = 0;
pub const SECONDARY_BUTTON: i16 = 2;

// Picker
pub const SEARCH_DEBOUNCE_MS: u64 = 250;
pub const SCROLL_SAVE_DEBOUNCE_MS: u64 = 150;
pub const CONTEXT_MENU_EDGE_MARGIN: f32 = 10.0;

// Handle palette
pub const COLOR_X: &str = "#F44336";
pub const COLOR_Y: &str = "#2196F3";
pub const COLOR_Z: &str = "#4CAF50";
pub const COLOR_ROT_Z: &str = "#00BCD4";
pub const COLOR_HIGHLIGHT: &str = "#FFEB3B";

// Fixed sidebar order; unknown categories follow alphabetically
pub const CATEGORY_ORDER: [&str; 10] = [
    "All",
    "Favorites",
    "Dances",
    "PropEmotes",
    "Shared",
    "Expressions",
    "Walks",
    "AnimalEmotes",
    "Emotes",
    "Exits",
];

// Persisted preference keys
pub const FAVORITES_KEY: &str = "rpemotes_favorites";
pub const COMPACT_STATE_KEY: &str = "rpemotes_compact_state";
pub const COMPACT_POSITION_KEY: &str = "rpemotes_compact_position";
pub const SCROLL_POSITIONS_KEY: &str = "rpemotes_scroll_positions";
