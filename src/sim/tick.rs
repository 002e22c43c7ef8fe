//! Per-frame simulation step
//!
//! Core loop that advances every active ball, culls the ones that reached
//! the delete zone, then mixes colors of overlapping pairs.

use super::collision::{colliding_pairs, resolve_walls};
use super::color::mix_colors;
use super::state::{GameLogic, SimEvent};

/// Advance the world by `dt`
///
/// Each ball is fully advanced (integrate, gravity, friction, walls, zone
/// test) before the next one. Culled balls are removed only after the
/// movement pass, highest index first, and never take part in mixing.
pub fn tick(logic: &mut GameLogic, dt: f32) {
    logic.events.clear();

    let width = logic.screen_width();
    let height = logic.screen_height();
    let zone = *logic.delete_zone();
    let gravity = logic.gravity;
    let friction = logic.friction;

    let mut culled = Vec::new();
    for (i, ball) in logic.balls.iter_mut().enumerate() {
        ball.pos += ball.vel * dt;
        ball.vel.y += gravity * dt;
        ball.vel *= friction;

        let hit = resolve_walls(ball, width, height);
        if hit.any() {
            logic.events.push(SimEvent::WallBounce {
                id: ball.id,
                horizontal: hit.horizontal,
                vertical: hit.vertical,
            });
        }

        if zone.contains(ball) {
            culled.push(i);
        }
    }

    for &i in culled.iter().rev() {
        let ball = logic.balls.remove(i);
        log::debug!("Ball {} entered the delete zone", ball.id);
        logic.events.push(SimEvent::BallCulled { id: ball.id });
    }

    // Positions are fixed from here on, so pairs can be found up front;
    // colors are mixed in scan order so later pairs see earlier results.
    for (i, j) in colliding_pairs(&logic.balls) {
        let color = mix_colors(logic.balls[i].color, logic.balls[j].color);
        logic.balls[i].color = color;
        logic.balls[j].color = color;

        let (a, b) = (logic.balls[i].id, logic.balls[j].id);
        log::trace!("Balls {} and {} mixed to {}", a, b, color);
        logic.events.push(SimEvent::ColorsMixed { a, b, color });
    }
}

impl GameLogic {
    /// Advance the simulation by one frame of length `dt`
    pub fn update(&mut self, dt: f32) {
        tick(self, dt);
    }
}
