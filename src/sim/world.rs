//! Blast world: the context a host integration drives
//!
//! Holds a snapshot of the bodies the host reports, the gnome props among
//! them, a seeded RNG, and the deferred scheduler. Host callbacks come in as
//! method calls; velocity edits land on the stored bodies and everything the
//! host should play or render is queued as a `BlastEvent`.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::blast::{AvatarImpact, BlastParams, BodyFlags, Target, avatar_impact, propagate};
use super::detonation::DetonationMode;
use super::gnome::Gnome;
use super::scheduler::{DeferredQueue, ScheduledTask, Scheduler};
use crate::Hand;
use crate::consts::{DEBRIS_LIFETIME_MS, DEBRIS_OFFSETS};
use crate::settings::BlastSettings;

/// A body as last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub flags: BodyFlags,
}

impl Body {
    pub fn new(position: Vec3, flags: BodyFlags) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            flags,
        }
    }
}

/// Things the host should apply, play, or render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlastEvent {
    /// Gnome left the hand fast enough (laugh sound + short haptic pulse)
    Thrown {
        gnome: EntityId,
        hand: Hand,
        position: Vec3,
    },
    /// Gnome went off (explosion sound, flash particles, debris)
    Exploded {
        gnome: EntityId,
        epicenter: Vec3,
        mode: DetonationMode,
    },
    /// New velocities for a blasted body
    Impulse {
        target: EntityId,
        velocity: Vec3,
        angular_velocity: Vec3,
    },
    /// Gnome will chain-detonate after a delay
    ChainArmed { gnome: EntityId, delay_ms: u64 },
    /// Chain timer ran out for a gnome that no longer exists
    ChainFizzled { gnome: EntityId },
    /// Shattered pieces of a spent gnome, free to be blasted around
    DebrisSpawned {
        gnome: EntityId,
        parts: Vec<EntityId>,
    },
    /// Lifetime ran out and the body was deleted
    Expired { entity: EntityId },
    /// Push and haptic pulse for the local avatar
    AvatarImpact(AvatarImpact),
}

/// Simulation context for one scene
#[derive(Debug, Clone)]
pub struct BlastWorld<S: Scheduler = DeferredQueue> {
    settings: BlastSettings,
    params: BlastParams,
    seed: u64,
    rng: Pcg32,
    scheduler: S,
    /// Live bodies (sorted by id for determinism)
    bodies: BTreeMap<EntityId, Body>,
    /// Gnome state for live gnome bodies
    gnomes: BTreeMap<EntityId, Gnome>,
    avatar: Option<Vec3>,
    events: Vec<BlastEvent>,
    next_id: u32,
}

impl BlastWorld<DeferredQueue> {
    /// Create a world with the given seed and a millisecond timer queue
    pub fn new(seed: u64, settings: BlastSettings) -> Self {
        Self::with_scheduler(seed, settings, DeferredQueue::new())
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Advance the clock and run due chain timers. Returns tasks run.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let due = self.scheduler.advance(elapsed_ms);
        let count = due.len();
        for task in due {
            self.run_task(task);
        }
        count
    }

    /// Keep advancing to the next due timer until none remain or
    /// `max_ms` has passed. Returns tasks run.
    pub fn run_pending(&mut self, max_ms: u64) -> usize {
        let deadline = self.now_ms().saturating_add(max_ms);
        let mut count = 0;
        while let Some(wait) = self.scheduler.next_due_in() {
            if self.now_ms().saturating_add(wait) > deadline {
                break;
            }
            count += self.advance(wait);
        }
        count
    }
}

impl<S: Scheduler> BlastWorld<S> {
    pub fn with_scheduler(seed: u64, settings: BlastSettings, scheduler: S) -> Self {
        let params = settings.blast_params();
        Self {
            settings,
            params,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            bodies: BTreeMap::new(),
            gnomes: BTreeMap::new(),
            avatar: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &BlastSettings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a plain body (crate, ball, wall)
    pub fn spawn_body(&mut self, position: Vec3, flags: BodyFlags) -> EntityId {
        let id = self.next_entity_id();
        self.bodies.insert(id, Body::new(position, flags));
        id
    }

    /// Add a gnome grenade
    pub fn spawn_gnome(&mut self, position: Vec3) -> EntityId {
        let id = self.spawn_body(position, BodyFlags::default());
        self.gnomes.insert(id, Gnome::new());
        id
    }

    /// Host deleted the entity. Pending timers for it will fizzle.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.gnomes.remove(&id);
        self.bodies.remove(&id).is_some()
    }

    pub fn gnome_count(&self) -> usize {
        self.gnomes.len()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn gnome(&self, id: EntityId) -> Option<&Gnome> {
        self.gnomes.get(&id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (EntityId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    /// Sync a body's motion from the host's physics
    pub fn update_body(&mut self, id: EntityId, position: Vec3, velocity: Vec3) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.position = position;
                body.velocity = velocity;
                true
            }
            None => false,
        }
    }

    pub fn set_flags(&mut self, id: EntityId, flags: BodyFlags) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.flags = flags;
                true
            }
            None => false,
        }
    }

    pub fn set_avatar(&mut self, position: Option<Vec3>) {
        self.avatar = position;
    }

    pub fn events(&self) -> &[BlastEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BlastEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn grab(&mut self, id: EntityId, hand: Hand) -> bool {
        if !self.bodies.contains_key(&id) {
            return false;
        }
        match self.gnomes.get_mut(&id) {
            Some(gnome) => {
                gnome.on_grab(hand);
                true
            }
            None => false,
        }
    }

    /// Gnome released from the hand; uses the body's current velocity
    pub fn release(&mut self, id: EntityId) -> bool {
        let (Some(gnome), Some(body)) = (self.gnomes.get_mut(&id), self.bodies.get(&id)) else {
            return false;
        };
        if !gnome.on_release(body.velocity.length(), self.settings.throw_speed_threshold) {
            return false;
        }
        let Some(hand) = gnome.hand else {
            return false;
        };
        log::debug!("Gnome {:?} thrown with {:?} hand", id, hand);
        self.events.push(BlastEvent::Thrown {
            gnome: id,
            hand,
            position: body.position,
        });
        true
    }

    /// Host reported a collision involving `id`. Returns true if it blew up.
    pub fn collide(&mut self, id: EntityId) -> bool {
        let impact = self.is_alive(id) && self.gnomes.get(&id).is_some_and(|g| g.on_collision());
        impact && self.detonate(id)
    }

    /// Blow up a gnome now. No-op for removed, unknown or spent gnomes.
    pub fn detonate(&mut self, id: EntityId) -> bool {
        let (Some(gnome), Some(body)) = (self.gnomes.get_mut(&id), self.bodies.get_mut(&id)) else {
            return false;
        };
        if !gnome.record.detonate() {
            return false;
        }
        gnome.trigger.mark_detonated();
        let mode = gnome.record.mode;
        let epicenter = body.position;

        // Spent gnome is hidden and no longer collides
        body.flags.dynamic = false;
        body.flags.collides_with_dynamic = false;
        body.velocity = Vec3::ZERO;
        body.angular_velocity = Vec3::ZERO;

        log::info!("Gnome {:?} exploded ({:?}) at {:?}", id, mode, epicenter);
        self.events.push(BlastEvent::Exploded {
            gnome: id,
            epicenter,
            mode,
        });

        if let Some(avatar) = self.avatar
            && let Some(impact) = avatar_impact(
                epicenter,
                avatar,
                &self.params,
                self.settings.avatar_thrust_multiplier,
            )
        {
            self.events.push(BlastEvent::AvatarImpact(impact));
        }

        let candidates = self.query_radius(epicenter, self.params.radius);
        let hits = propagate(epicenter, &self.params, &candidates, &mut self.rng);

        let mut chained = Vec::new();
        for (target, result) in hits {
            if let Some(body) = self.bodies.get_mut(&target.id) {
                body.velocity = result.new_velocity;
                body.angular_velocity = result.new_angular_velocity;
            }
            self.events.push(BlastEvent::Impulse {
                target: target.id,
                velocity: result.new_velocity,
                angular_velocity: result.new_angular_velocity,
            });
            if result.chain_requested {
                chained.push(target.id);
            }
        }

        for target in chained {
            self.timed_explode(target);
        }

        // Debris lands after the pass so its own blast leaves it alone
        let parts = self.spawn_debris(epicenter);
        self.events.push(BlastEvent::DebrisSpawned { gnome: id, parts });
        self.scheduler
            .schedule(DEBRIS_LIFETIME_MS, ScheduledTask::Expire { entity: id });
        true
    }

    fn spawn_debris(&mut self, epicenter: Vec3) -> Vec<EntityId> {
        let mut parts = Vec::with_capacity(DEBRIS_OFFSETS.len());
        for offset in DEBRIS_OFFSETS {
            let part = self.spawn_body(epicenter + Vec3::from_array(offset), BodyFlags::default());
            self.scheduler
                .schedule(DEBRIS_LIFETIME_MS, ScheduledTask::Expire { entity: part });
            parts.push(part);
        }
        parts
    }

    /// Arm a gnome's chain timer. Non-gnomes and already armed or spent
    /// gnomes ignore the request.
    pub fn timed_explode(&mut self, id: EntityId) -> bool {
        if !self.bodies.contains_key(&id) {
            return false;
        }
        let Some(gnome) = self.gnomes.get_mut(&id) else {
            return false;
        };
        if gnome.record.has_detonated {
            return false;
        }
        let Some(delay_ms) = gnome
            .trigger
            .request(&mut self.rng, self.settings.max_chain_delay_ms)
        else {
            return false;
        };
        gnome.record.arm_timer();
        self.scheduler
            .schedule(delay_ms, ScheduledTask::Detonate { entity: id });

        log::debug!("Gnome {:?} chain-armed, {} ms", id, delay_ms);
        self.events.push(BlastEvent::ChainArmed { gnome: id, delay_ms });
        true
    }

    /// Execute a task handed back by the scheduler
    pub fn run_task(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::Detonate { entity } => {
                let alive = self.is_alive(entity);
                let fired = self
                    .gnomes
                    .get_mut(&entity)
                    .is_some_and(|g| g.trigger.fire(alive));
                if fired {
                    self.detonate(entity);
                } else if !alive {
                    log::debug!("Chain timer for removed gnome {:?} ignored", entity);
                    self.events.push(BlastEvent::ChainFizzled { gnome: entity });
                }
            }
            ScheduledTask::Expire { entity } => {
                if self.remove(entity) {
                    self.events.push(BlastEvent::Expired { entity });
                }
            }
        }
    }

    /// Live bodies within `radius` of `center`, by id
    fn query_radius(&self, center: Vec3, radius: f32) -> Vec<Target> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.position.distance(center) <= radius)
            .map(|(id, body)| Target {
                id: *id,
                position: body.position,
                velocity: body.velocity,
                flags: body.flags,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::scheduler::ImmediateScheduler;
    use crate::sim::{BodyKind, TriggerState};

    /// Spent gnome plus its debris, each with an expiry task
    const SPENT_BODIES: usize = DEBRIS_OFFSETS.len() + 1;

    fn world() -> BlastWorld {
        BlastWorld::new(12345, BlastSettings::default())
    }

    fn throw(world: &mut BlastWorld, id: EntityId) {
        assert!(world.grab(id, Hand::Right));
        let position = world.body(id).unwrap().position;
        world.update_body(id, position, Vec3::new(0.0, 0.0, 4.0));
        assert!(world.release(id));
    }

    fn count_exploded(events: &[BlastEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, BlastEvent::Exploded { .. }))
            .count()
    }

    #[test]
    fn test_impact_detonation_pushes_neighbors() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        let crate_id = world.spawn_body(Vec3::new(1.5, 0.0, 0.0), BodyFlags::default());
        let far = world.spawn_body(Vec3::new(10.0, 0.0, 0.0), BodyFlags::default());

        throw(&mut world, gnome);
        assert!(world.collide(gnome));

        let pushed = world.body(crate_id).unwrap();
        assert!(pushed.velocity.x > 0.0);
        assert!((pushed.velocity.length() - 1.0 / 1.5).abs() < 1e-4);
        assert_eq!(world.body(far).unwrap().velocity, Vec3::ZERO);

        let events = world.drain_events();
        assert!(matches!(events[0], BlastEvent::Thrown { hand: Hand::Right, .. }));
        assert_eq!(count_exploded(&events), 1);
        assert!(!events.iter().any(|e| matches!(
            e,
            BlastEvent::Impulse { target, .. } if *target == gnome
        )));
    }

    #[test]
    fn test_detonate_twice_is_noop() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        world.spawn_body(Vec3::new(1.0, 0.0, 0.0), BodyFlags::default());

        assert!(world.detonate(gnome));
        let first = world.drain_events();
        assert!(!world.detonate(gnome));
        assert!(!world.collide(gnome));
        assert!(world.drain_events().is_empty());
        assert_eq!(count_exploded(&first), 1);
    }

    #[test]
    fn test_unthrown_gnome_survives_collision() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        assert!(!world.collide(gnome));
        world.grab(gnome, Hand::Left);
        // Dropped, not thrown
        assert!(!world.release(gnome));
        assert!(!world.collide(gnome));
        assert!(!world.gnome(gnome).unwrap().has_detonated());
    }

    #[test]
    fn test_chain_reaction_cascade() {
        let mut world = world();
        let a = world.spawn_gnome(Vec3::ZERO);
        let b = world.spawn_gnome(Vec3::new(1.0, 0.0, 0.0));
        let c = world.spawn_gnome(Vec3::new(2.0, 0.0, 0.0));

        world.detonate(a);
        assert_eq!(world.gnome(b).unwrap().trigger.state(), TriggerState::Armed);
        assert_eq!(world.gnome(c).unwrap().trigger.state(), TriggerState::Idle);
        // Chain timer plus expiry of the spent gnome and its debris
        assert_eq!(world.scheduler().pending(), 1 + SPENT_BODIES);

        world.advance(MAX_CHAIN_DELAY_MS);
        assert!(world.gnome(b).unwrap().has_detonated());
        assert_eq!(world.gnome(b).unwrap().record.mode, DetonationMode::Timed);
        assert_eq!(world.gnome(c).unwrap().trigger.state(), TriggerState::Armed);

        world.advance(MAX_CHAIN_DELAY_MS);
        assert!(world.gnome(c).unwrap().has_detonated());
        assert_eq!(world.scheduler().pending(), 3 * SPENT_BODIES);
        assert_eq!(count_exploded(world.events()), 3);

        world.run_pending(DEBRIS_LIFETIME_MS);
        assert!(world.scheduler().is_empty());
        assert_eq!(world.bodies().count(), 0);
        assert_eq!(world.gnome_count(), 0);
    }

    #[test]
    fn test_repeated_chain_requests_arm_once() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        let armed = (0..5).filter(|_| world.timed_explode(gnome)).count();
        assert_eq!(armed, 1);
        assert_eq!(world.scheduler().pending(), 1);
        let armed_events = world
            .events()
            .iter()
            .filter(|e| matches!(e, BlastEvent::ChainArmed { .. }))
            .count();
        assert_eq!(armed_events, 1);
    }

    #[test]
    fn test_armed_gnome_ignores_impact() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        throw(&mut world, gnome);
        world.timed_explode(gnome);
        assert!(!world.collide(gnome));
        assert_eq!(world.run_pending(MAX_CHAIN_DELAY_MS), 1);
        assert!(world.gnome(gnome).unwrap().has_detonated());
    }

    #[test]
    fn test_removed_gnome_timer_fizzles() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        world.timed_explode(gnome);
        assert!(world.remove(gnome));

        world.advance(MAX_CHAIN_DELAY_MS);
        let events = world.drain_events();
        assert_eq!(count_exploded(&events), 0);
        assert!(events.contains(&BlastEvent::ChainFizzled { gnome }));
        assert!(world.gnome(gnome).is_none());
        assert!(!world.detonate(gnome));
    }

    #[test]
    fn test_removed_gnomes_release_state() {
        let mut world = world();
        for _ in 0..100 {
            let gnome = world.spawn_gnome(Vec3::ZERO);
            world.grab(gnome, Hand::Left);
            assert!(world.remove(gnome));
            assert!(world.gnome(gnome).is_none());
        }
        assert_eq!(world.gnome_count(), 0);
        assert_eq!(world.bodies().count(), 0);
    }

    #[test]
    fn test_detonation_leaves_debris() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::new(1.0, 2.0, 3.0));
        world.detonate(gnome);

        let parts = world
            .events()
            .iter()
            .find_map(|e| match e {
                BlastEvent::DebrisSpawned { gnome: g, parts } if *g == gnome => Some(parts.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(parts.len(), DEBRIS_OFFSETS.len());
        for (part, offset) in parts.iter().zip(DEBRIS_OFFSETS) {
            let body = world.body(*part).unwrap();
            let expected = Vec3::new(1.0, 2.0, 3.0) + Vec3::from_array(offset);
            assert!((body.position - expected).length() < 1e-6);
            assert_eq!(body.velocity, Vec3::ZERO);
            assert!(body.flags.is_eligible());
            assert!(world.gnome(*part).is_none());
        }

        world.advance(DEBRIS_LIFETIME_MS - 1);
        assert!(parts.iter().all(|p| world.is_alive(*p)));
        assert!(world.is_alive(gnome));

        world.advance(1);
        assert!(parts.iter().all(|p| !world.is_alive(*p)));
        assert!(!world.is_alive(gnome));
        assert!(world.gnome(gnome).is_none());
        let expired = world
            .events()
            .iter()
            .filter(|e| matches!(e, BlastEvent::Expired { .. }))
            .count();
        assert_eq!(expired, SPENT_BODIES);
    }

    #[test]
    fn test_chain_blast_scatters_earlier_debris() {
        let mut world = world();
        let a = world.spawn_gnome(Vec3::ZERO);
        let b = world.spawn_gnome(Vec3::new(1.0, 0.0, 0.0));
        world.detonate(a);

        let parts = world
            .events()
            .iter()
            .find_map(|e| match e {
                BlastEvent::DebrisSpawned { parts, .. } => Some(parts.clone()),
                _ => None,
            })
            .unwrap();
        world.drain_events();

        world.advance(MAX_CHAIN_DELAY_MS);
        assert!(world.gnome(b).unwrap().has_detonated());
        let events = world.drain_events();
        for part in &parts {
            let pushed = events.iter().any(|e| matches!(
                e,
                BlastEvent::Impulse { target, .. } if target == part
            ));
            assert!(pushed, "debris {:?} not pushed", part);
            assert!(world.body(*part).unwrap().velocity.x < 0.0);
        }
        // Debris is not a gnome, so nothing new is armed
        assert!(!events.iter().any(|e| matches!(e, BlastEvent::ChainArmed { .. })));
    }

    #[test]
    fn test_set_flags_locks_body() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        let crate_id = world.spawn_body(Vec3::new(0.5, 0.0, 0.0), BodyFlags::default());
        assert!(world.set_flags(crate_id, BodyFlags::fixed()));
        assert!(!world.set_flags(EntityId(999), BodyFlags::fixed()));

        world.detonate(gnome);
        assert_eq!(world.body(crate_id).unwrap().velocity, Vec3::ZERO);
        assert!(!world.events().iter().any(|e| matches!(
            e,
            BlastEvent::Impulse { target, .. } if *target == crate_id
        )));
    }

    #[test]
    fn test_ineligible_bodies_untouched() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        let locked = world.spawn_body(
            Vec3::new(0.5, 0.0, 0.0),
            BodyFlags {
                locked: true,
                ..Default::default()
            },
        );
        let zone = world.spawn_body(
            Vec3::new(0.0, 0.5, 0.0),
            BodyFlags {
                kind: BodyKind::Zone,
                ..Default::default()
            },
        );
        let wall = world.spawn_body(Vec3::new(0.0, 0.0, 0.5), BodyFlags::fixed());

        world.detonate(gnome);
        for id in [locked, zone, wall] {
            assert_eq!(world.body(id).unwrap().velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn test_non_gnome_chain_request_ignored() {
        let mut world = world();
        let gnome = world.spawn_gnome(Vec3::ZERO);
        let ball = world.spawn_body(Vec3::new(0.3, 0.0, 0.0), BodyFlags::default());
        world.detonate(gnome);
        assert!(!world.timed_explode(ball));
        assert_eq!(world.scheduler().pending(), SPENT_BODIES);
    }

    #[test]
    fn test_avatar_impact_event() {
        let mut world = world();
        world.set_avatar(Some(Vec3::new(0.0, 0.0, 4.0)));
        let gnome = world.spawn_gnome(Vec3::ZERO);
        world.detonate(gnome);

        let impact = world
            .events()
            .iter()
            .find_map(|e| match e {
                BlastEvent::AvatarImpact(impact) => Some(*impact),
                _ => None,
            })
            .unwrap();
        assert!((impact.thrust - Vec3::new(0.0, 0.0, AVATAR_THRUST_MULTIPLIER / 4.0)).length() < 1e-5);
        assert_eq!(impact.haptic_strength, 1.0);
    }

    #[test]
    fn test_immediate_scheduler() {
        let mut world = BlastWorld::with_scheduler(7, BlastSettings::default(), ImmediateScheduler::new());
        let gnome = world.spawn_gnome(Vec3::ZERO);
        world.timed_explode(gnome);
        let tasks = world.scheduler_mut().take();
        assert_eq!(tasks.len(), 1);
        for task in tasks {
            world.run_task(task);
        }
        assert!(world.gnome(gnome).unwrap().has_detonated());
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut world = BlastWorld::new(seed, BlastSettings::default());
            let a = world.spawn_gnome(Vec3::ZERO);
            world.spawn_gnome(Vec3::new(0.6, 0.0, 0.0));
            world.spawn_gnome(Vec3::new(0.0, 0.7, 0.0));
            world.spawn_body(Vec3::new(0.0, 0.0, 1.2), BodyFlags::default());
            world.detonate(a);
            world.run_pending(60_000);
            world.drain_events()
        };
        assert_eq!(run(99999), run(99999));
    }
}
