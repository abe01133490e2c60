// Shared tuning constants for the interaction engine. The gesture and grab
// values are empirically tuned, not physically derived.

// Gesture
pub const PINCH_THRESHOLD: f32 = 0.05; // normalized landmark units, strict less-than

// Interaction
pub const GRAB_RADIUS: f32 = 100.0; // px around the hand proxy searched for a target
pub const SPIN_DAMPING: f32 = 0.9; // per-active-frame multiplier on a held body's angular velocity

// Grab spring
pub const GRAB_STIFFNESS: f32 = 500.0;
pub const GRAB_DAMPING: f32 = 50.0;
pub const GRAB_REST_LENGTH: f32 = 0.0; // pulls the target onto the hand position

// World (pixel units, +y down)
pub const GRAVITY_Y: f32 = 1000.0; // px/s^2
pub const WALL_THICKNESS: f32 = 100.0;
pub const FLOOR_SINK: f32 = 10.0; // floor is raised this far into the viewport
pub const WALL_FRICTION: f32 = 1.0;
pub const WALL_RESTITUTION: f32 = 0.5;
pub const FLOOR_RESTITUTION: f32 = 0.1;

// Manipulables
pub const CUBE_SIZE_MIN: f32 = 60.0; // full edge length, px
pub const CUBE_SIZE_MAX: f32 = 100.0;
pub const CUBE_CORNER_RADIUS: f32 = 10.0;
pub const CUBE_FRICTION: f32 = 0.9;
pub const CUBE_RESTITUTION: f32 = 0.4;
pub const CUBE_DENSITY: f32 = 0.002;
pub const CUBE_AIR_DAMPING: f32 = 0.6; // linear + angular damping coefficient

// Hand proxies
pub const PROXY_RADIUS: f32 = 10.0;

// Defaults for the surrounding application
pub const DEFAULT_HAND_SLOTS: usize = 2;
pub const DEFAULT_SPAWN_COUNT: usize = 5;
pub const SPAWN_JITTER_X: f32 = 100.0; // respawn x spread around viewport center
pub const SPAWN_Y: f32 = 100.0; // respawn drop height
