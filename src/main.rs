//! Gnome Blast demo
//!
//! Throws one gnome into a cluster of gnomes and crates and runs the chain
//! reaction to completion.
//!
//! Usage: `gnome-blast [seed] [settings.json]`

use glam::Vec3;

use gnome_blast::sim::{BlastEvent, BlastWorld, BodyFlags};
use gnome_blast::{BlastSettings, Hand};

/// Simulated frame length (ms)
const FRAME_MS: u64 = 16;
/// Give up after this much simulated time (ms)
const MAX_RUN_MS: u64 = 120_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let settings = args
        .next()
        .map(BlastSettings::load_or_default)
        .unwrap_or_default();

    log::info!("Gnome Blast starting with seed: {}", seed);
    let mut world = BlastWorld::new(seed, settings);
    world.set_avatar(Some(Vec3::new(0.0, 1.7, 4.0)));

    // Gnomes on a ring, crates in between
    let thrown = world.spawn_gnome(Vec3::new(0.0, 0.0, 2.5));
    for i in 0..8 {
        let theta = i as f32 * std::f32::consts::TAU / 8.0;
        let ring = Vec3::new(theta.cos(), 0.0, theta.sin());
        world.spawn_gnome(ring * 0.9);
        world.spawn_body(ring * 1.6, BodyFlags::default());
    }
    world.spawn_body(Vec3::new(0.0, -0.5, 0.0), BodyFlags::fixed());

    world.grab(thrown, Hand::Right);
    world.update_body(thrown, Vec3::new(0.0, 0.0, 2.5), Vec3::new(0.0, 0.5, -4.0));
    world.release(thrown);
    // Lands in the middle of the ring
    world.update_body(thrown, Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO);
    world.collide(thrown);

    let mut elapsed = 0;
    while !world.scheduler().is_empty() && elapsed < MAX_RUN_MS {
        world.advance(FRAME_MS);
        elapsed += FRAME_MS;
    }

    let mut explosions = 0;
    let mut impulses = 0;
    let mut debris = 0;
    for event in world.drain_events() {
        match event {
            BlastEvent::Exploded {
                gnome,
                epicenter,
                mode,
            } => {
                explosions += 1;
                println!("{:?} exploded ({:?}) at {:?}", gnome, mode, epicenter);
            }
            BlastEvent::Impulse { .. } => impulses += 1,
            BlastEvent::DebrisSpawned { parts, .. } => debris += parts.len(),
            BlastEvent::AvatarImpact(impact) => {
                log::debug!("Avatar thrust {:?}", impact.thrust);
            }
            other => log::debug!("{:?}", other),
        }
    }

    println!(
        "{} explosions, {} impulses, {} debris, {} ms simulated",
        explosions,
        impulses,
        debris,
        world.now_ms()
    );
}
