//! Collision detection and response
//!
//! Two kinds of contact exist: a ball against the screen edges (a damped
//! bounce) and a ball against another ball (color only, no physical
//! response).

use super::state::Ball;
use crate::consts::WALL_RESTITUTION;

/// Which walls a ball was pushed back from this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub horizontal: bool,
    pub vertical: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Clamp a ball inside `[0, width] x [0, height]` and bounce it
///
/// Each axis checks the low wall first and only falls through to the high
/// wall when the low one was not hit. A ball wider than the screen is
/// therefore clamped against one side only.
pub fn resolve_walls(ball: &mut Ball, width: f32, height: f32) -> WallHit {
    let mut hit = WallHit::default();

    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = -ball.vel.x * WALL_RESTITUTION;
        hit.horizontal = true;
    } else if ball.pos.x + ball.radius > width {
        ball.pos.x = width - ball.radius;
        ball.vel.x = -ball.vel.x * WALL_RESTITUTION;
        hit.horizontal = true;
    }

    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y * WALL_RESTITUTION;
        hit.vertical = true;
    } else if ball.pos.y + ball.radius > height {
        ball.pos.y = height - ball.radius;
        ball.vel.y = -ball.vel.y * WALL_RESTITUTION;
        hit.vertical = true;
    }

    hit
}

/// All overlapping pairs `(i, j)` with `i < j`, each unordered pair once
///
/// The inner scan starts after `i`, so `(j, i)` is never produced. Indices
/// refer to `balls` and stay valid as long as the slice is not reordered.
/// Pairs come out in scan order.
pub fn colliding_pairs(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();

    for (i, a) in balls.iter().enumerate() {
        for (j, b) in balls.iter().enumerate().skip(i + 1) {
            if a.is_colliding(b) {
                pairs.push((i, j));
            }
        }
    }

    pairs
}
