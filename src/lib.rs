//! Ball Mixer - a 2D toy of falling, bouncing, color-mixing balls
//!
//! Core modules:
//! - `sim`: Simulation core (entities, per-tick physics, color mixing, inventory)
//! - `settings`: Tunable physics and interaction knobs, loadable from JSON
//!
//! Rendering, input capture and the frame timer live outside this crate. A
//! driver calls [`sim::GameLogic::update`] once per frame and forwards user
//! input to the suck/spit/pick methods.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Ball, Color, DeleteZone, GameLogic, SimEvent, mix_colors};

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

    /// Default time step passed to `update` (one frame)
    pub const DEFAULT_DT: f32 = 1.0;

    /// Velocity multiplier applied every tick
    pub const DEFAULT_FRICTION: f32 = 0.98;
    /// Downward acceleration added to vy every tick
    pub const DEFAULT_GRAVITY: f32 = 0.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Velocity retained (and reversed) on a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.7;

    /// Delete zone is a square anchored at the top-right corner
    pub const DELETE_ZONE_SIZE: f32 = 100.0;

    /// Interaction defaults
    pub const SUCK_RADIUS: f32 = 50.0;
    pub const SPIT_SPEED: f32 = 5.0;
    pub const PICK_RADIUS: f32 = 20.0;

    /// Channel range for randomly colored balls
    pub const RANDOM_CHANNEL_MIN: i32 = 50;
    pub const RANDOM_CHANNEL_MAX: i32 = 255;
}
