//! Collision detection and response
//!
//! Circle-vs-rect detection for balls against blocks and the paddle, plus
//! the two gameplay handlers that mutate ball and block state on contact.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, Block, Paddle};
use crate::tuning::Tuning;

/// An axis-aligned collision body
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Closest point inside the rect to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Surface normal at contact, pointing toward the ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and an axis-aligned rect.
///
/// Returns contact point, outward normal, and penetration depth so the
/// caller can separate the ball before adjusting its velocity.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    if dist_sq > 1e-6 {
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    // Ball center is inside the rect (tunneling): push out along the
    // axis of least penetration
    let from_center = ball_pos - rect.center;
    let overlap_x = rect.half.x - from_center.x.abs();
    let overlap_y = rect.half.y - from_center.y.abs();

    if overlap_x < overlap_y {
        let sign = if from_center.x >= 0.0 { 1.0 } else { -1.0 };
        CollisionResult {
            hit: true,
            point: Vec2::new(rect.center.x + sign * rect.half.x, ball_pos.y),
            normal: Vec2::new(sign, 0.0),
            penetration: overlap_x + ball_radius,
        }
    } else {
        let sign = if from_center.y >= 0.0 { 1.0 } else { -1.0 };
        CollisionResult {
            hit: true,
            point: Vec2::new(ball_pos.x, rect.center.y + sign * rect.half.y),
            normal: Vec2::new(0.0, sign),
            penetration: overlap_y + ball_radius,
        }
    }
}

/// Ball hit a block. Returns true if this hit destroyed the block; the
/// caller owns spawning the replacement ball.
pub fn hit_block(ball: &mut Ball, block: &mut Block, rng: &mut Pcg32, tuning: &Tuning) -> bool {
    if !block.active {
        // The engine should never hand us a disabled block; treat it as a
        // logged anomaly rather than corrupting state
        log::warn!("hit_block on inactive block {}", block.id);
        return false;
    }

    block.hits = block.hits.saturating_sub(1);
    block.tint = crate::block_tint(block.hits);

    let destroyed = block.hits == 0;
    if destroyed {
        // Disabled, not removed: the grid slot stays occupied until the
        // next restart rebuilds it
        block.active = false;
    }

    // The ball always rebounds upward off a block, whichever side it
    // struck from
    ball.vel.y = -ball.vel.y.abs();

    // Keep the ball from settling into a purely vertical bounce loop
    if ball.vel.x.abs() < tuning.min_horizontal_speed {
        let magnitude = rng.random_range(tuning.kick_min..=tuning.kick_max) as f32;
        let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
        ball.vel.x = magnitude * sign;
    }

    destroyed
}

/// Ball hit the paddle. Deflects horizontally in proportion to how far
/// off-center it struck, and always rebounds upward.
pub fn hit_paddle(ball: &mut Ball, paddle: &Paddle, rng: &mut Pcg32, tuning: &Tuning) {
    if ball.pos.x < paddle.x {
        ball.vel.x = -tuning.paddle_deflect * (paddle.x - ball.pos.x);
    } else if ball.pos.x > paddle.x {
        ball.vel.x = tuning.paddle_deflect * (ball.pos.x - paddle.x);
    } else {
        // Dead center: small random nudge so the ball doesn't bounce straight up
        ball.vel.x = rng.random_range(tuning.center_kick_min..=tuning.center_kick_max) as f32;
    }

    ball.vel.y = -ball.vel.y.abs();

    // Rest the ball on the paddle's top edge so it can't re-collide next tick
    ball.pos.y = paddle.collider().top() - ball.radius;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn block_at(pos: Vec2, hits: u8) -> Block {
        Block::new(1, pos, hits)
    }

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(9);
        ball.pos = pos;
        ball.vel = vel;
        ball.on_paddle = false;
        ball
    }

    #[test]
    fn test_ball_rect_collision_from_above() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 10.0));
        let result = ball_rect_collision(Vec2::new(100.0, 85.0), 8.0, &rect);
        assert!(result.hit);
        assert!(result.normal.y < 0.0);
        assert!(result.penetration > 0.0);
    }

    #[test]
    fn test_ball_rect_collision_miss() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 10.0));
        let result = ball_rect_collision(Vec2::new(300.0, 300.0), 8.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_rect_collision_center_inside() {
        let rect = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 10.0));
        // Center slightly above the rect center: least penetration is vertical
        let result = ball_rect_collision(Vec2::new(100.0, 95.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_hit_block_decrements_and_retints() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, 120.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 3);

        let destroyed = hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
        assert!(!destroyed);
        assert_eq!(block.hits, 2);
        assert_eq!(block.tint, crate::block_tint(2));
        assert!(block.active);
    }

    #[test]
    fn test_hit_block_destruction_disables() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, 120.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 1);

        let destroyed = hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
        assert!(destroyed);
        assert_eq!(block.hits, 0);
        assert!(!block.active);
    }

    #[test]
    fn test_hit_block_always_bounces_up() {
        let tuning = Tuning::default();

        // Moving down: reflected up
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, 200.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 3);
        hit_block(&mut ball, &mut block, &mut rng(), &tuning);
        assert_eq!(ball.vel.y, -200.0);

        // Already moving up (struck from below): stays up
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, -200.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 3);
        hit_block(&mut ball, &mut block, &mut rng(), &tuning);
        assert_eq!(ball.vel.y, -200.0);
    }

    #[test]
    fn test_hit_block_horizontal_rescue() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(10.0, 200.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 3);
        hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
        let speed = ball.vel.x.abs();
        assert!((50.0..=100.0).contains(&speed), "speed = {speed}");
    }

    #[test]
    fn test_hit_block_keeps_fast_horizontal() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(-120.0, 200.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 3);
        hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
        assert_eq!(ball.vel.x, -120.0);
    }

    #[test]
    fn test_hit_block_inactive_is_noop() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, 200.0));
        let mut block = block_at(Vec2::new(100.0, 90.0), 1);
        block.active = false;
        block.hits = 0;

        let destroyed = hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
        assert!(!destroyed);
        assert_eq!(block.hits, 0);
        assert_eq!(ball.vel, Vec2::new(60.0, 200.0));
    }

    #[test]
    fn test_hit_paddle_deflects_by_offset() {
        let paddle = Paddle::default();
        let tuning = Tuning::default();

        // 30 units left of center: vx = -10 * 30
        let mut ball = free_ball(Vec2::new(paddle.x - 30.0, 520.0), Vec2::new(40.0, 250.0));
        hit_paddle(&mut ball, &paddle, &mut rng(), &tuning);
        assert_eq!(ball.vel.x, -300.0);
        assert_eq!(ball.vel.y, -250.0);

        // 30 units right of center: vx = 10 * 30
        let mut ball = free_ball(Vec2::new(paddle.x + 30.0, 520.0), Vec2::new(-40.0, 250.0));
        hit_paddle(&mut ball, &paddle, &mut rng(), &tuning);
        assert_eq!(ball.vel.x, 300.0);
        assert_eq!(ball.vel.y, -250.0);
    }

    #[test]
    fn test_hit_paddle_center_random_nudge() {
        let paddle = Paddle::default();
        let mut ball = free_ball(Vec2::new(paddle.x, 520.0), Vec2::new(0.0, 250.0));
        hit_paddle(&mut ball, &paddle, &mut rng(), &Tuning::default());
        assert!((2.0..=8.0).contains(&ball.vel.x), "vx = {}", ball.vel.x);
        assert_eq!(ball.vel.y, -250.0);
    }

    #[test]
    fn test_hit_paddle_separates_ball() {
        let paddle = Paddle::default();
        let mut ball = free_ball(Vec2::new(paddle.x - 30.0, 520.0), Vec2::new(40.0, 250.0));
        hit_paddle(&mut ball, &paddle, &mut rng(), &Tuning::default());
        assert!(ball.pos.y <= paddle.collider().top() - ball.radius);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn block_hit_rebounds_upward(vx in -400.0_f32..400.0, vy in -400.0_f32..400.0, hits in 1u8..=3) {
                let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(vx, vy));
                let mut block = block_at(Vec2::new(100.0, 90.0), hits);
                hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
                prop_assert!(ball.vel.y <= 0.0);
                if vy != 0.0 {
                    prop_assert!(ball.vel.y < 0.0);
                }
            }

            #[test]
            fn block_hit_decrements_exactly_once(hits in 1u8..=3) {
                let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(60.0, 200.0));
                let mut block = block_at(Vec2::new(100.0, 90.0), hits);
                hit_block(&mut ball, &mut block, &mut rng(), &Tuning::default());
                prop_assert_eq!(block.hits, hits - 1);
            }

            #[test]
            fn slow_balls_leave_with_kick_speed(vx in -49.9_f32..49.9, seed in 0u64..1000) {
                let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(vx, 200.0));
                let mut block = block_at(Vec2::new(100.0, 90.0), 3);
                let mut rng = Pcg32::seed_from_u64(seed);
                hit_block(&mut ball, &mut block, &mut rng, &Tuning::default());
                prop_assert!((50.0..=100.0).contains(&ball.vel.x.abs()));
            }

            #[test]
            fn paddle_hit_rebounds_upward(offset in -60.0_f32..60.0, vy in 1.0_f32..400.0) {
                let paddle = Paddle::default();
                let mut ball = free_ball(Vec2::new(paddle.x + offset, 520.0), Vec2::new(0.0, vy));
                hit_paddle(&mut ball, &paddle, &mut rng(), &Tuning::default());
                prop_assert!(ball.vel.y < 0.0);
                // Deflection pushes away from the paddle center
                if offset < 0.0 {
                    prop_assert!(ball.vel.x < 0.0);
                } else if offset > 0.0 {
                    prop_assert!(ball.vel.x > 0.0);
                }
            }
        }
    }
}
