// Browser-side wiring and visual tuning constants.

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const HINT_OVERLAY_ID: &str = "hint-overlay";
pub const START_OVERLAY_ID: &str = "start-overlay";

// Assets
pub const MUSIC_URL: &str = "/music/music.mp3";

// Input
pub const CLICK_SLOP_PX: f32 = 6.0; // max pointer travel for a press to count as a click
pub const WHEEL_NOTCH_PX: f32 = 100.0; // deltaY of one wheel notch in pixel mode

// Rendering
pub const BLOOM_DOWNSAMPLE: u32 = 2; // bloom targets run at 1/2 resolution
pub const LIGHT_DIRECTION: [f32; 3] = [2.0, 60.0, 10.0]; // key light position, used as a direction
pub const AMBIENT_LIGHT: f32 = 0.35;
pub const SNOW_SPRITE_SCALE: f32 = 4.0; // sprite size multiplier over the nominal point size
pub const MAX_BLUR_TAPS: f32 = 4.0; // blur footprint in texels at radius 1
pub const GLASS_ALPHA: f32 = 0.08; // enclosure opacity head-on; the rim adds more

// Logging
pub const FPS_LOG_INTERVAL_FRAMES: u64 = 600;
