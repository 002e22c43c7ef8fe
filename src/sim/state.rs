//! World state and core simulation types
//!
//! A ball lives in exactly one of two places: the active set (`balls`) that
//! takes part in physics and rendering, or the stack-ordered `inventory`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;
use crate::settings::Settings;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Ball {
    /// A ball at rest
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Euclidean distance between centers
    #[inline]
    pub fn distance_to(&self, other: &Ball) -> f32 {
        self.pos.distance(other.pos)
    }

    /// True if the discs overlap. Exact tangency does not count.
    #[inline]
    pub fn is_colliding(&self, other: &Ball) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

/// Axis-aligned removal region in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeleteZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DeleteZone {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The fixed-size zone in the top-right corner of a screen
    pub fn top_right(screen_width: f32) -> Self {
        Self::new(
            screen_width - DELETE_ZONE_SIZE,
            0.0,
            DELETE_ZONE_SIZE,
            DELETE_ZONE_SIZE,
        )
    }

    /// Closed-rectangle test on the ball's center only (radius ignored)
    pub fn contains(&self, ball: &Ball) -> bool {
        (self.x..=self.x + self.width).contains(&ball.pos.x)
            && (self.y..=self.y + self.height).contains(&ball.pos.y)
    }
}

/// Things that happened during the last `update`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Ball was pushed back inside the screen and bounced
    WallBounce {
        id: u32,
        horizontal: bool,
        vertical: bool,
    },
    /// Ball's center entered the delete zone; it has been dropped
    BallCulled { id: u32 },
    /// Two overlapping balls were both recolored to `color`
    ColorsMixed { a: u32, b: u32, color: Color },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogic {
    screen_width: f32,
    screen_height: f32,
    /// Active balls, in insertion order
    pub balls: Vec<Ball>,
    /// Stashed balls; the last one pushed is the first spat out
    pub inventory: Vec<Ball>,
    delete_zone: DeleteZone,
    /// Velocity multiplier applied every tick
    pub friction: f32,
    /// vy increment per unit of dt
    pub gravity: f32,
    /// Radius given to newly added balls
    pub ball_radius: f32,
    /// Events from the most recent tick
    #[serde(skip)]
    pub(crate) events: Vec<SimEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameLogic {
    fn default() -> Self {
        Self::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}

impl GameLogic {
    /// Create an empty world with default physics
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            balls: Vec::new(),
            inventory: Vec::new(),
            delete_zone: DeleteZone::top_right(screen_width),
            friction: DEFAULT_FRICTION,
            gravity: DEFAULT_GRAVITY,
            ball_radius: BALL_RADIUS,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an empty world from loaded settings
    pub fn with_settings(settings: &Settings) -> Self {
        let mut logic = Self::new(settings.screen_width, settings.screen_height);
        logic.friction = settings.friction;
        logic.gravity = settings.gravity;
        logic.ball_radius = settings.ball_radius;
        log::info!(
            "World {}x{} (friction={}, gravity={}, ball radius={})",
            logic.screen_width,
            logic.screen_height,
            logic.friction,
            logic.gravity,
            logic.ball_radius
        );
        logic
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    pub fn delete_zone(&self) -> &DeleteZone {
        &self.delete_zone
    }

    /// Events recorded by the most recent `update`
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ball at rest. Without an explicit color a random one is drawn
    /// from `rng`; the RNG is untouched otherwise.
    pub fn add_ball<R: Rng + ?Sized>(
        &mut self,
        pos: Vec2,
        color: Option<Color>,
        rng: &mut R,
    ) -> &Ball {
        let id = self.next_entity_id();
        let color = color.unwrap_or_else(|| Color::random(rng));
        self.balls.push(Ball::new(id, pos, self.ball_radius, color));
        &self.balls[self.balls.len() - 1]
    }

    /// Drop an active ball. Unknown ids are ignored.
    pub fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        let index = self.balls.iter().position(|b| b.id == id)?;
        Some(self.balls.remove(index))
    }

    /// Move the active ball closest to `at` (strictly within `radius`) onto
    /// the inventory stack. Equal distances keep the earlier ball.
    pub fn suck_ball(&mut self, at: Vec2, radius: f32) -> Option<&Ball> {
        let mut closest = None;
        let mut min_distance = radius;

        for (i, ball) in self.balls.iter().enumerate() {
            let distance = ball.pos.distance(at);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(i);
            }
        }

        let ball = self.balls.remove(closest?);
        log::debug!("Sucked ball {} at ({}, {})", ball.id, at.x, at.y);
        self.inventory.push(ball);
        self.inventory.last()
    }

    /// Pop the most recently sucked ball and launch it from `at` in a random
    /// direction with the given speed.
    pub fn spit_ball<R: Rng + ?Sized>(
        &mut self,
        at: Vec2,
        speed: f32,
        rng: &mut R,
    ) -> Option<&Ball> {
        let mut ball = self.inventory.pop()?;

        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        ball.pos = at;
        ball.vel = Vec2::from_angle(angle) * speed;
        log::debug!(
            "Spat ball {} at ({}, {}) heading {:.2} rad",
            ball.id,
            at.x,
            at.y,
            angle
        );

        self.balls.push(ball);
        self.balls.last()
    }

    /// First active ball (collection order) strictly within `radius` of `at`
    pub fn ball_at_position(&self, at: Vec2, radius: f32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.pos.distance(at) < radius)
    }

    pub fn inventory_size(&self) -> usize {
        self.inventory.len()
    }

    pub fn clear_inventory(&mut self) {
        self.inventory.clear();
    }

    /// Resize the screen and move the delete zone to the new top-right
    /// corner. Balls are not moved; the next `update` clamps them.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        self.delete_zone = DeleteZone::top_right(width);
        log::info!("Screen resized to {}x{}", width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(id: u32, x: f32, y: f32) -> Ball {
        Ball::new(id, Vec2::new(x, y), BALL_RADIUS, Color::new(100, 100, 100))
    }

    fn suck_id(logic: &mut GameLogic, x: f32, y: f32) -> Option<u32> {
        logic.suck_ball(Vec2::new(x, y), SUCK_RADIUS).map(|b| b.id)
    }

    #[test]
    fn test_tangent_balls_do_not_collide() {
        let a = ball_at(1, 100.0, 100.0);
        let b = ball_at(2, 130.0, 100.0);
        assert_eq!(a.distance_to(&b), 30.0);
        assert!(!a.is_colliding(&b));

        let c = ball_at(3, 129.999, 100.0);
        assert!(a.is_colliding(&c));
    }

    #[test]
    fn test_delete_zone_uses_center_and_closed_bounds() {
        let zone = DeleteZone::top_right(800.0);
        assert_eq!(zone, DeleteZone::new(700.0, 0.0, 100.0, 100.0));

        assert!(zone.contains(&ball_at(1, 700.0, 100.0)));
        assert!(zone.contains(&ball_at(2, 800.0, 0.0)));
        // Overlapping by radius but center outside
        assert!(!zone.contains(&ball_at(3, 690.0, 50.0)));
    }

    #[test]
    fn test_add_ball_defaults() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let color = Some(Color::new(1, 2, 3));
        let ball = logic.add_ball(Vec2::new(10.0, 20.0), color, &mut rng);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.radius, 15.0);
        assert_eq!(ball.color.to_tuple(), (1, 2, 3));

        let random = logic.add_ball(Vec2::new(30.0, 40.0), None, &mut rng).color;
        assert!(random.r() >= 50 && random.g() >= 50 && random.b() >= 50);
        assert_eq!(logic.balls.len(), 2);
        assert_ne!(logic.balls[0].id, logic.balls[1].id);
    }

    #[test]
    fn test_remove_ball_is_noop_when_absent() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let id = logic.add_ball(Vec2::new(100.0, 100.0), None, &mut rng).id;

        assert!(logic.remove_ball(id + 100).is_none());
        assert_eq!(logic.balls.len(), 1);

        assert_eq!(logic.remove_ball(id).map(|b| b.id), Some(id));
        assert!(logic.balls.is_empty());
        assert!(logic.remove_ball(id).is_none());
    }

    #[test]
    fn test_suck_then_spit_round_trip() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(42);
        logic.add_ball(Vec2::new(100.0, 100.0), None, &mut rng);
        let target = logic.add_ball(Vec2::new(300.0, 300.0), None, &mut rng).id;

        let sucked = suck_id(&mut logic, 310.0, 300.0);
        assert_eq!(sucked, Some(target));
        assert!(logic.balls.iter().all(|b| b.id != target));
        assert_eq!(logic.inventory_size(), 1);

        let spat = logic
            .spit_ball(Vec2::new(400.0, 250.0), SPIT_SPEED, &mut rng)
            .cloned()
            .expect("inventory had a ball");
        assert_eq!(spat.id, target);
        assert_eq!(spat.pos, Vec2::new(400.0, 250.0));
        assert!((spat.vel.length() - SPIT_SPEED).abs() < 1e-4);
        assert!(logic.balls.iter().any(|b| b.id == target));
        assert_eq!(logic.inventory_size(), 0);
    }

    #[test]
    fn test_suck_picks_closest_and_respects_radius() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let far = logic.add_ball(Vec2::new(140.0, 100.0), None, &mut rng).id;
        let near = logic.add_ball(Vec2::new(110.0, 100.0), None, &mut rng).id;

        assert!(logic.suck_ball(Vec2::new(300.0, 300.0), SUCK_RADIUS).is_none());
        assert_eq!(suck_id(&mut logic, 100.0, 100.0), Some(near));
        assert_eq!(suck_id(&mut logic, 100.0, 100.0), Some(far));
        // Exactly on the radius is out of range
        logic.add_ball(Vec2::new(150.0, 100.0), None, &mut rng);
        assert!(logic.suck_ball(Vec2::new(100.0, 100.0), 50.0).is_none());
    }

    #[test]
    fn test_suck_tie_keeps_first() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let first = logic.add_ball(Vec2::new(90.0, 100.0), None, &mut rng).id;
        logic.add_ball(Vec2::new(110.0, 100.0), None, &mut rng);

        assert_eq!(suck_id(&mut logic, 100.0, 100.0), Some(first));
    }

    #[test]
    fn test_inventory_is_a_stack() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let a = logic.add_ball(Vec2::new(100.0, 100.0), None, &mut rng).id;
        let b = logic.add_ball(Vec2::new(400.0, 400.0), None, &mut rng).id;

        logic.suck_ball(Vec2::new(100.0, 100.0), SUCK_RADIUS);
        logic.suck_ball(Vec2::new(400.0, 400.0), SUCK_RADIUS);

        let at = Vec2::new(200.0, 200.0);
        assert_eq!(logic.spit_ball(at, SPIT_SPEED, &mut rng).map(|b| b.id), Some(b));
        assert_eq!(logic.spit_ball(at, SPIT_SPEED, &mut rng).map(|b| b.id), Some(a));
    }

    #[test]
    fn test_spit_empty_inventory() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(5);
        logic.add_ball(Vec2::new(100.0, 100.0), None, &mut rng);
        let before = logic.balls.clone();

        assert!(logic.spit_ball(Vec2::new(1.0, 1.0), SPIT_SPEED, &mut rng).is_none());
        assert_eq!(logic.balls, before);
    }

    #[test]
    fn test_clear_inventory() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(5);
        logic.add_ball(Vec2::new(100.0, 100.0), None, &mut rng);
        logic.suck_ball(Vec2::new(100.0, 100.0), SUCK_RADIUS);
        assert_eq!(logic.inventory_size(), 1);

        logic.clear_inventory();
        assert_eq!(logic.inventory_size(), 0);
        assert!(logic.balls.is_empty());
    }

    #[test]
    fn test_ball_at_position_returns_first_match() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let first = logic.add_ball(Vec2::new(105.0, 100.0), None, &mut rng).id;
        logic.add_ball(Vec2::new(101.0, 100.0), None, &mut rng);

        let picked = logic.ball_at_position(Vec2::new(100.0, 100.0), PICK_RADIUS);
        assert_eq!(picked.map(|b| b.id), Some(first));
        assert!(logic.ball_at_position(Vec2::new(500.0, 500.0), PICK_RADIUS).is_none());
    }

    #[test]
    fn test_set_screen_size_moves_delete_zone_only() {
        let mut logic = GameLogic::default();
        let mut rng = Pcg32::seed_from_u64(9);
        logic.add_ball(Vec2::new(750.0, 500.0), None, &mut rng);

        logic.set_screen_size(400.0, 300.0);
        assert_eq!(logic.screen_width(), 400.0);
        assert_eq!(logic.screen_height(), 300.0);
        assert_eq!(*logic.delete_zone(), DeleteZone::new(300.0, 0.0, 100.0, 100.0));
        assert_eq!(logic.balls[0].pos, Vec2::new(750.0, 500.0));
    }

    #[test]
    fn test_with_settings() {
        let settings = Settings {
            friction: 0.5,
            gravity: 1.0,
            ball_radius: 8.0,
            screen_width: 1024.0,
            screen_height: 768.0,
            ..Settings::default()
        };
        let logic = GameLogic::with_settings(&settings);
        assert_eq!(logic.friction, 0.5);
        assert_eq!(logic.gravity, 1.0);
        assert_eq!(logic.ball_radius, 8.0);
        assert_eq!(logic.delete_zone().x, 924.0);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 1.0f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 1.0f32..100.0,
        ) {
            let a = Ball::new(1, Vec2::new(ax, ay), ar, Color::new(0, 0, 0));
            let b = Ball::new(2, Vec2::new(bx, by), br, Color::new(0, 0, 0));
            prop_assert_eq!(a.is_colliding(&b), b.is_colliding(&a));
        }
    }
}
