use glam::Vec3;

// Shared simulation/visual tuning constants used by the web frontend.

// Snow field
pub const SNOW_PARTICLE_REQUEST: usize = 10_000; // sampled candidates, roughly 85% survive the band test
pub const SNOW_VELOCITY_SPAN: f32 = 0.05; // per-particle fall speed drawn from [-span/2, span/2)
pub const SNOW_RESAMPLE_ATTEMPTS: u32 = 64; // band rejection tries before folding the height
pub const SNOW_POINT_SIZE: f32 = 0.03; // world-space sprite size
pub const SNOW_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Enclosure
pub const ENCLOSURE_SCALE: f32 = 0.7; // fraction of the centerpiece bounding sphere
pub const ENCLOSURE_SEGMENTS: u32 = 64;
pub const ENCLOSURE_RINGS: u32 = 48;
pub const ENCLOSURE_TINT: [f32; 3] = [0.82, 0.9, 1.0];

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 100.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_HOME_EYE: Vec3 = Vec3::new(0.0, 5.0, 20.0);
pub const CELEBRATION_EYE: Vec3 = Vec3::new(-20.0, -18.0, 0.0);

// Animation: mixers advance by a constant step per tick, not by elapsed time
pub const ANIMATION_STEP: f32 = 0.01;

// Bloom defaults and panel ranges
pub const BLOOM_STRENGTH: f32 = 0.5;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.85;
pub const BLOOM_STRENGTH_MAX: f32 = 3.0;
pub const BLOOM_RADIUS_MAX: f32 = 1.0;
pub const BLOOM_THRESHOLD_MAX: f32 = 1.0;

// Celebration pulse: strength <- (strength + increment) mod modulus every period
pub const BLOOM_PULSE_PERIOD_MS: u32 = 100;
pub const BLOOM_PULSE_INCREMENT: f32 = 3.0;
pub const BLOOM_PULSE_MODULUS: f32 = 4.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 100.0;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel notch

// Scene layout (world-space placement of the diorama pieces)
pub const CENTERPIECE_SCALE: f32 = 1.7;
pub const CENTERPIECE_OFFSET: Vec3 = Vec3::new(0.0, -20.0, 0.0);
pub const SANTA_SCALE: f32 = 0.07;
pub const SANTA_OFFSET: Vec3 = Vec3::new(0.0, -20.0, 5.0);
pub const SANTA_YAW: f32 = -std::f32::consts::FRAC_PI_3;
pub const SNOWMAN_SCALE: f32 = 1.5;
pub const SNOWMAN_OFFSET: Vec3 = Vec3::new(25.0, -18.0, -4.0);
pub const SNOWMAN_YAW: f32 = -std::f32::consts::FRAC_PI_2;

// Frame statistics
pub const FPS_WINDOW: usize = 60; // frames averaged by FrameStats
