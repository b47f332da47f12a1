//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Rect, ball_rect_collision, hit_block, hit_paddle};
pub use state::{Ball, Block, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, build_grid, restart_level, tick};
