//! Cannon Round entry point
//!
//! Native builds run a headless demo round: a scripted host stands in for
//! the physics engine, firing at targets and reporting contacts.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => cannon_round::Settings::load_or_default(path),
        None => cannon_round::Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Cannon Round (native) starting with seed {}", seed);

    match demo::run(&settings, seed) {
        Ok(summary) => match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("could not encode summary: {err}"),
        },
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives `cannon_round::sim::Game` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use cannon_round::sim::{
        EntityKind, Game, HitEvent, PcgSource, RandomSource, RoundSummary, SceneLayout,
    };
    use cannon_round::{AudioManager, CannonError, Settings};
    use glam::Vec2;

    /// Simulated frame rate
    const FPS: f64 = 60.0;
    /// Frames a cannonball flies before the scripted host reports a contact
    const FLIGHT_FRAMES: u32 = 24;
    /// Demo length cap
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn run(settings: &Settings, seed: u64) -> Result<RoundSummary, CannonError> {
        let layout = SceneLayout::new(Vec2::new(1024.0, 576.0), settings.device);
        let mut game = Game::start(
            layout,
            settings.round,
            AudioManager::from_settings(settings),
            PcgSource::new(seed),
        )?;
        // Decides what each shot hits
        let mut luck = PcgSource::new(seed.wrapping_add(1));
        let mut flight = 0;

        for frame in 0..MAX_FRAMES {
            let report = game.update(frame as f64 / FPS);
            if let Some(summary) = game.summary() {
                log::info!("{:?}: {}", report.outcome, report.time_label);
                return Ok(summary);
            }

            if game.projectile.is_none() {
                if let Some(aim) = game.targets.first().map(|t| t.position) {
                    game.tap(aim);
                    flight = 0;
                }
            } else {
                flight += 1;
                if flight >= FLIGHT_FRAMES {
                    let event = scripted_contact(&game, &mut luck);
                    let response = game.handle_hit(&event);
                    log::debug!("{:?} -> {:?}", event.category, response);
                }
            }

            for cue in game.audio.drain() {
                log::trace!("play {} at {:.2}", cue.effect.asset_name(), cue.volume);
            }
        }

        log::warn!("demo stopped after {} frames", MAX_FRAMES);
        Ok(RoundSummary {
            won: false,
            elapsed: game.round.elapsed_time(),
        })
    }

    /// Half the shots land on a target, the rest split between blocker and wall
    fn scripted_contact(game: &Game, luck: &mut PcgSource) -> HitEvent {
        match luck.next_below(4) {
            0 | 1 => game
                .targets
                .first()
                .and_then(|t| match t.kind {
                    EntityKind::Target { size, .. } => Some(HitEvent::target(t.id, size)),
                    EntityKind::Blocker(_) => None,
                })
                .unwrap_or_else(HitEvent::wall),
            2 => game
                .blockers
                .first()
                .map(|b| HitEvent::blocker(b.id))
                .unwrap_or_else(HitEvent::wall),
            _ => HitEvent::wall(),
        }
    }
}
