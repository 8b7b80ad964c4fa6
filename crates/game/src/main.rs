//! Skyharvest headless driver: runs a session under a scripted autopilot and logs the HUD.
//!
//! Usage: `skyharvest [ticks]` (default 3600, one minute at 60 Hz), or
//! `skyharvest --init-config` to write the default `config.ron`.

mod autopilot;

use std::thread;

use anyhow::{anyhow, Context, Result};
use game::{dependent_requests, Activation, GameConfig, Session, SessionEvent};
use input::InputState;

use crate::autopilot::Autopilot;

const DEFAULT_TICKS: u64 = 3600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--init-config") {
        GameConfig::default().save();
        log::info!("Wrote default config.ron");
        return Ok(());
    }
    let ticks = arg
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("tick count must be a non-negative integer")?
        .unwrap_or(DEFAULT_TICKS);

    let config = GameConfig::load();
    let boost_cost = config.economy.boost_cost;
    let mut session = Session::new(config).context("invalid configuration")?;

    // Orbit centers first, synchronously; everything else arrives through the loader queue.
    let layout = session.layout();
    let centers = session.register_centers(&layout);
    let requests = dependent_requests(&layout, &centers);
    let loader = session.loader_handle();
    let worker = thread::spawn(move || requests.into_iter().filter(|r| loader.submit(*r)).count());

    log::info!(
        "Running {} ticks with {} centers registered, layout seed {}",
        ticks,
        centers.len(),
        layout.seed
    );

    let mut pilot = Autopilot::new();
    let mut input = InputState::new();
    let mut collected = 0u32;
    for _ in 0..ticks {
        pilot.steer(&session, &mut input);
        let report = session.tick(&mut input, None);

        if report.loaded > 0 {
            log::info!("Tick {}: {} collectibles loaded", report.tick, report.loaded);
        }
        for event in &report.events {
            match event {
                SessionEvent::Activated(Activation::Collected {
                    category,
                    score,
                    new_position,
                    ..
                }) => {
                    collected += 1;
                    log::info!(
                        "Tick {}: collected {:?} (+{}), respawned at {:.1}",
                        report.tick,
                        category,
                        score,
                        new_position
                    );
                }
                SessionEvent::Boosted => log::debug!("Tick {}: boost", report.tick),
                SessionEvent::Spawned(id) => log::debug!("Tick {}: spawned {:?}", report.tick, id),
                _ => {}
            }
        }
        if let Some(hud) = report.hud_changed {
            log::info!("{}", hud.render_console(boost_cost));
        }
    }

    let queued = worker
        .join()
        .map_err(|_| anyhow!("layout loader thread panicked"))?;
    let hud = session.hud();
    log::info!(
        "Finished after {} ticks ({:.1}s simulated): {} collections, {} queued, {}",
        session.clock().tick(),
        session.clock().elapsed_seconds(),
        collected,
        queued,
        hud
    );
    Ok(())
}
