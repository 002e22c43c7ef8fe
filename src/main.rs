//! Ball Mixer headless driver
//!
//! Stands in for the windowed game loop: spawns balls, calls `update` once
//! per frame and plays scripted suck/spit gestures at random points.

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use ball_mixer::consts::DEFAULT_DT;
    use ball_mixer::{GameLogic, Settings, SimEvent};

    #[derive(Parser, Debug)]
    #[command(
        name = "ball-mixer",
        about = "Run the ball mixing simulation without a window"
    )]
    pub struct Args {
        /// RNG seed (colors, spawn points, spit angles)
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u32,
        /// Balls spawned before the first frame
        #[arg(long, default_value_t = 20)]
        balls: u32,
        /// JSON settings file (missing fields use defaults)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Play a suck and a spit gesture every N frames (0 disables)
        #[arg(long, default_value_t = 60)]
        interact_every: u32,
        /// Print the final world as JSON
        #[arg(long)]
        dump: bool,
    }

    /// Uniform random point on screen, kept one radius away from the edges
    fn random_point(rng: &mut Pcg32, logic: &GameLogic) -> Vec2 {
        let r = logic.ball_radius;
        Vec2::new(
            rng.random_range(r..(logic.screen_width() - r).max(r + 1.0)),
            rng.random_range(r..(logic.screen_height() - r).max(r + 1.0)),
        )
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let mut rng = Pcg32::seed_from_u64(args.seed);
        let mut logic = GameLogic::with_settings(&settings);
        log::info!("Seed {}, spawning {} balls", args.seed, args.balls);

        for _ in 0..args.balls {
            let at = random_point(&mut rng, &logic);
            logic.add_ball(at, None, &mut rng);
        }

        let mut bounces = 0usize;
        let mut culled = 0usize;
        let mut mixes = 0usize;

        for frame in 1..=args.ticks {
            logic.update(DEFAULT_DT);

            for event in logic.events() {
                match event {
                    SimEvent::WallBounce { .. } => bounces += 1,
                    SimEvent::BallCulled { .. } => culled += 1,
                    SimEvent::ColorsMixed { .. } => mixes += 1,
                }
            }

            if args.interact_every > 0 && frame % args.interact_every == 0 {
                let at = random_point(&mut rng, &logic);
                if let Some(ball) = logic.suck_ball(at, settings.suck_radius) {
                    log::info!(
                        "Frame {}: sucked ball {} ({})",
                        frame,
                        ball.id,
                        ball.color
                    );
                }

                let at = random_point(&mut rng, &logic);
                if let Some(ball) = logic.spit_ball(at, settings.spit_speed, &mut rng) {
                    log::info!(
                        "Frame {}: spat ball {} at ({:.0}, {:.0})",
                        frame,
                        ball.id,
                        at.x,
                        at.y
                    );
                }

                let at = random_point(&mut rng, &logic);
                if let Some(ball) = logic.ball_at_position(at, settings.pick_radius) {
                    log::debug!("Frame {}: ball {} under cursor", frame, ball.id);
                }
            }
        }

        log::info!(
            "Done after {} frames: {} active, {} in inventory, {} bounces, {} culled, {} mixes",
            args.ticks,
            logic.balls.len(),
            logic.inventory_size(),
            bounces,
            culled,
            mixes
        );

        if args.dump {
            println!("{}", serde_json::to_string_pretty(&logic)?);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Ball Mixer (headless) starting...");
    driver::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A web build embeds the library directly; there is no standalone driver
}
