//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically: input, ball
//! movement, collisions, loss/clear checks, and the level restart path.

use glam::Vec2;
use rand::Rng;

use super::collision::{ball_rect_collision, hit_block, hit_paddle};
use super::state::{Ball, Block, GameEvent, GamePhase, GameState, Paddle};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x position (paddle tracks it, clamped to the playfield)
    pub pointer_x: Option<f32>,
    /// Release a resting ball (pointer up)
    pub launch: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    if let Some(pointer_x) = input.pointer_x {
        state.paddle.track_pointer(pointer_x);
    }

    // Pointer up releases the first resting ball in iteration order, at
    // most one per event
    if input.launch {
        let launch_velocity = state.launch_velocity;
        if let Some(ball) = state.balls.iter_mut().find(|b| b.on_paddle) {
            if ball.launch(launch_velocity) {
                let id = ball.id;
                state.events.push(GameEvent::BallLaunched { id });
            }
        }
    }

    // Move free balls and resolve collisions. Replacement-ball spawns are
    // deferred past the loop to avoid re-entering the ball vec mid-iteration.
    let mut destroyed_blocks: Vec<(u32, bool)> = Vec::new();
    {
        let GameState {
            balls,
            blocks,
            paddle,
            rng,
            tuning,
            events,
            ..
        } = state;
        let paddle_rect = paddle.collider();

        for ball in balls.iter_mut() {
            if ball.on_paddle {
                continue;
            }

            ball.pos += ball.vel * dt;
            bounce_world(ball);

            // Only respond when the ball is moving into the paddle, so a
            // freshly launched ball can leave the contact zone cleanly
            let paddle_result = ball_rect_collision(ball.pos, ball.radius, &paddle_rect);
            if paddle_result.hit && ball.vel.dot(paddle_result.normal) < 0.0 {
                hit_paddle(ball, paddle, rng, tuning);
            }

            // One block contact per ball per tick; separate before the
            // handler overrides velocity
            for block in blocks.iter_mut().filter(|b| b.active) {
                let result = ball_rect_collision(ball.pos, ball.radius, &block.collider());
                if result.hit {
                    ball.pos += result.normal * (result.penetration + 0.5);
                    if hit_block(ball, block, rng, tuning) {
                        destroyed_blocks.push((block.id, block.creates_ball));
                    } else {
                        events.push(GameEvent::BlockDamaged {
                            id: block.id,
                            hits_left: block.hits,
                        });
                    }
                    break;
                }
            }
        }
    }

    // Every destroyed block with `creates_ball` set spawns exactly one
    // replacement, resting at the spawn point
    for (block_id, creates_ball) in destroyed_blocks {
        let spawned_ball = creates_ball.then(|| state.spawn_ball());
        state.events.push(GameEvent::BlockDestroyed {
            id: block_id,
            spawned_ball,
        });
    }

    // Balls past the floor are gone, not just hidden
    let mut lost = Vec::new();
    state.balls.retain(|ball| {
        if ball.pos.y > FLOOR_Y {
            lost.push(ball.id);
            false
        } else {
            true
        }
    });
    for id in lost {
        state.events.push(GameEvent::BallLost { id });
    }

    // Loss check first: if both conditions trigger in the same frame,
    // Game Over wins and the restart is skipped
    if state.balls.is_empty() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("game over after {} cleared grids", state.level);
        return;
    }

    if state.active_blocks() == 0 {
        state.launch_velocity *= state.tuning.clear_speed_scale;
        state.level += 1;
        state.events.push(GameEvent::LevelCleared { level: state.level });
        log::info!(
            "grid cleared, launch velocity now ({:.1}, {:.1})",
            state.launch_velocity.x,
            state.launch_velocity.y
        );
        restart_level(state);
    }

    state.normalize_order();
}

/// Reflect the ball off the world bounds (full restitution)
fn bounce_world(ball: &mut Ball) {
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs();
    }
    if ball.pos.x + ball.radius > WORLD_WIDTH {
        ball.pos.x = WORLD_WIDTH - ball.radius;
        ball.vel.x = -ball.vel.x.abs();
    }
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs();
    }
    if ball.pos.y + ball.radius > WORLD_HEIGHT {
        ball.pos.y = WORLD_HEIGHT - ball.radius;
        ball.vel.y = -ball.vel.y.abs();
    }
}

/// Lay out the 3x5 block grid, each block's health drawn from the tuning
/// range
pub fn build_grid(state: &mut GameState) {
    let min_hits = state.tuning.block_min_hits;
    let max_hits = state.tuning.block_max_hits;

    for row in 0..BLOCK_ROWS {
        for col in 0..BLOCK_COLS {
            let x = GRID_ORIGIN_X + col as f32 * (BLOCK_WIDTH + BLOCK_PADDING);
            let y = GRID_ORIGIN_Y + row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING);
            let hits = state.rng.random_range(min_hits..=max_hits);
            let id = state.next_entity_id();
            state.blocks.push(Block::new(id, Vec2::new(x, y), hits));
        }
    }
}

/// Rebuild the scene after a cleared grid: fresh paddle, fresh grid, one
/// fresh resting ball. The scaled launch velocity is carried forward
/// untouched.
pub fn restart_level(state: &mut GameState) {
    state.paddle = Paddle::default();
    state.balls.clear();
    state.blocks.clear();
    build_grid(state);
    state.spawn_ball();
    state.phase = GamePhase::Playing;
}
