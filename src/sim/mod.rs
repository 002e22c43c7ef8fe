//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Randomness only through an injected `rand::Rng`
//! - Stable iteration order (collection order of the active balls)
//! - Single-threaded, every call runs to completion

pub mod collision;
pub mod color;
pub mod state;
pub mod tick;

pub use collision::{WallHit, colliding_pairs, resolve_walls};
pub use color::{Color, mix_colors};
pub use state::{Ball, DeleteZone, GameLogic, SimEvent};
