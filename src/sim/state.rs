//! Game state and core simulation types
//!
//! Everything needed to advance a run deterministically lives here: the
//! entities, the seeded RNG, and the session state (launch velocity) that
//! survives level restarts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::block_tint;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (balls may still be resting on the paddle)
    Playing,
    /// Run ended: every ball was lost
    GameOver,
}

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Resting at the spawn point, unlaunched; skips physics until launch
    pub on_paddle: bool,
}

impl Ball {
    /// New ball at the spawn point, waiting for launch
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            on_paddle: true,
        }
    }

    /// Release the ball with the given velocity. No-op for free balls.
    /// Returns true if the ball was actually launched.
    pub fn launch(&mut self, velocity: Vec2) -> bool {
        if !self.on_paddle {
            return false;
        }
        self.vel = velocity;
        self.on_paddle = false;
        true
    }
}

/// A block in the grid
#[derive(Debug, Clone)]
pub struct Block {
    pub id: u32,
    /// Center of the block's display footprint
    pub pos: Vec2,
    /// Hits remaining before destruction; never increases, floors at 0
    pub hits: u8,
    /// Destroying this block spawns a replacement ball
    pub creates_ball: bool,
    /// Cosmetic tint, recomputed from `hits` on every hit
    pub tint: u32,
    /// Disabled blocks stay in the vec but stop colliding and rendering
    pub active: bool,
}

impl Block {
    pub fn new(id: u32, pos: Vec2, hits: u8) -> Self {
        Self {
            id,
            pos,
            hits,
            creates_ball: true,
            tint: block_tint(hits),
            active: true,
        }
    }

    /// Collision body. Specified in source-texture pixels (600x220) and
    /// scaled with the sprite, so it is narrower and flatter than the
    /// 100x20 display footprint.
    pub fn collider(&self) -> Rect {
        let scale_x = BLOCK_WIDTH / BLOCK_SOURCE_WIDTH;
        let scale_y = BLOCK_HEIGHT / BLOCK_SOURCE_HEIGHT;
        Rect::new(
            self.pos,
            Vec2::new(
                BLOCK_BODY_WIDTH * scale_x / 2.0,
                BLOCK_BODY_HEIGHT * scale_y / 2.0,
            ),
        )
    }
}

/// The player's paddle. Immovable with respect to physics; only pointer
/// input moves it.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
        }
    }
}

impl Paddle {
    /// Track the pointer, clamped to the playfield
    pub fn track_pointer(&mut self, pointer_x: f32) {
        self.x = pointer_x.clamp(PADDLE_MIN_X, PADDLE_MAX_X);
    }

    pub fn collider(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.y),
            Vec2::new(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT),
        )
    }
}

/// Things that happened during a tick, drained by the shell for scene
/// transitions, HUD updates, and logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    BallLaunched { id: u32 },
    BlockDamaged { id: u32, hits_left: u8 },
    BlockDestroyed { id: u32, spawned_ball: Option<u32> },
    BallLost { id: u32 },
    LevelCleared { level: u32 },
    GameOver,
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Grids cleared this run
    pub level: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    /// The block grid; disabled blocks stay in place until the next restart
    pub blocks: Vec<Block>,
    /// Velocity applied to a ball on launch. Scaled by the clear multiplier
    /// every time the grid empties and deliberately NOT reset by
    /// `restart_level`, so each cleared grid starts faster.
    pub launch_velocity: Vec2,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            level: 0,
            phase: GamePhase::Playing,
            paddle: Paddle::default(),
            balls: Vec::new(),
            blocks: Vec::new(),
            launch_velocity: Vec2::new(tuning.launch_velocity_x, tuning.launch_velocity_y),
            tuning,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        super::tick::build_grid(&mut state);
        state.spawn_ball();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball resting at the spawn point. Returns its id.
    pub fn spawn_ball(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id));
        id
    }

    /// Count of blocks still colliding/visible
    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.blocks.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_grid_and_one_resting_ball() {
        let state = GameState::new(7);
        assert_eq!(state.blocks.len(), 15);
        assert_eq!(state.active_blocks(), 15);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].on_paddle);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_block_hits_within_range() {
        let state = GameState::new(99);
        for block in &state.blocks {
            assert!((1..=3).contains(&block.hits), "hits = {}", block.hits);
            assert!(block.creates_ball);
            assert_eq!(block.tint, crate::block_tint(block.hits));
        }
    }

    #[test]
    fn test_launch_only_fires_once() {
        let mut ball = Ball::new(1);
        let vel = Vec2::new(-75.0, -300.0);
        assert!(ball.launch(vel));
        assert_eq!(ball.vel, vel);
        assert!(!ball.on_paddle);

        // Second launch is a no-op
        assert!(!ball.launch(Vec2::new(50.0, 50.0)));
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_paddle_pointer_clamp() {
        let mut paddle = Paddle::default();
        paddle.track_pointer(10.0);
        assert_eq!(paddle.x, 52.0);
        paddle.track_pointer(2000.0);
        assert_eq!(paddle.x, 990.0);
        paddle.track_pointer(512.0);
        assert_eq!(paddle.x, 512.0);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = GameState::new(123);
        let b = GameState::new(123);
        let hits_a: Vec<u8> = a.blocks.iter().map(|b| b.hits).collect();
        let hits_b: Vec<u8> = b.blocks.iter().map(|b| b.hits).collect();
        assert_eq!(hits_a, hits_b);
    }
}
