//! Data-oriented particle pool.
//!
//! Particles are plain records in a dense `Vec`; a particle's size is a pure
//! function of its age, so aging is a single pass and no per-particle timers
//! or callbacks exist. Removal swaps the last record into the freed slot and
//! patches the id index.

use crate::config::ParticleConfig;
use crate::ease::{Ease, Segment};
use fnv::FnvHashMap;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Grow, hold, shrink. Shared by every particle in a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeProfile {
    pub peak_multiplier: f32,
    pub grow_duration: f32,
    pub grow_ease: Ease,
    pub shrink_offset: f32,
    pub shrink_duration: f32,
    pub shrink_ease: Ease,
}

impl SizeProfile {
    pub fn from_config(cfg: &ParticleConfig) -> Self {
        Self {
            peak_multiplier: cfg.peak_multiplier,
            grow_duration: cfg.grow_duration,
            grow_ease: cfg.grow_ease,
            shrink_offset: cfg.shrink_offset.max(cfg.grow_duration),
            shrink_duration: cfg.shrink_duration,
            shrink_ease: cfg.shrink_ease,
        }
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.shrink_offset + self.shrink_duration
    }

    /// Radius of a particle spawned with `base` after `age` seconds.
    pub fn size(&self, base: f32, age: f32) -> f32 {
        let peak = base * self.peak_multiplier;
        let size = if age < self.shrink_offset {
            Segment {
                start: 0.0,
                duration: self.grow_duration,
                from: base,
                to: peak,
                ease: self.grow_ease,
            }
            .sample(age)
        } else {
            Segment {
                start: self.shrink_offset,
                duration: self.shrink_duration,
                from: peak,
                to: 0.0,
                ease: self.shrink_ease,
            }
            .sample(age)
        };
        size.max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec2,
    pub base_size: f32,
    pub age: f32,
}

/// What the compositor needs from a live particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSample {
    pub id: ParticleId,
    pub position: Vec2,
    pub size: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    index: FnvHashMap<ParticleId, usize>,
    next_id: u64,
    // lower bound on the smallest live id; ids are handed out in spawn order
    oldest: u64,
    profile: SizeProfile,
    cfg: ParticleConfig,
    divergence_threshold: f32,
}

impl ParticleField {
    pub fn new(cfg: &ParticleConfig, divergence_threshold: f32) -> Self {
        Self {
            particles: Vec::with_capacity(256),
            index: FnvHashMap::default(),
            next_id: 0,
            oldest: 0,
            profile: SizeProfile::from_config(cfg),
            cfg: cfg.clone(),
            divergence_threshold,
        }
    }

    pub fn profile(&self) -> &SizeProfile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.index.get(&id).map(|&slot| &self.particles[slot])
    }

    /// Current radius of a live particle.
    pub fn size_of(&self, id: ParticleId) -> Option<f32> {
        self.get(id).map(|p| self.profile.size(p.base_size, p.age))
    }

    /// Emit particles for one frame of pointer motion. Returns how many were
    /// spawned.
    pub fn emit(&mut self, prev_smooth: Vec2, smooth: Vec2, divergence: f32) -> usize {
        if !(divergence >= self.divergence_threshold) {
            return 0;
        }
        let base = divergence * self.cfg.size_factor;
        self.spawn_along(prev_smooth, smooth, base)
    }

    /// Spawn along `prev -> curr` so fast strokes stay continuous. A short
    /// hop spawns a single particle at `curr`.
    pub fn spawn_along(&mut self, prev: Vec2, curr: Vec2, base: f32) -> usize {
        let travel = prev.distance(curr);
        if travel > self.cfg.move_threshold {
            let spacing = (base * self.cfg.spacing_ratio).max(self.cfg.min_spacing);
            let steps = ((travel / spacing).ceil() as u32).clamp(1, self.cfg.max_steps.max(1));
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                self.spawn(prev.lerp(curr, t), base);
            }
            steps as usize + 1
        } else {
            self.spawn(curr, base);
            1
        }
    }

    pub fn spawn(&mut self, position: Vec2, base_size: f32) -> ParticleId {
        if self.cfg.max_particles > 0 && self.particles.len() >= self.cfg.max_particles {
            self.retire_oldest();
        }
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.particles.len());
        self.particles.push(Particle {
            id,
            position,
            base_size: base_size.max(0.0),
            age: 0.0,
        });
        id
    }

    /// Age every particle by `dt`, dropping those whose size has reached
    /// zero. Returns the number removed.
    pub fn advance(&mut self, dt: f32) -> usize {
        let lifetime = self.profile.lifetime();
        let mut removed = 0;
        let mut i = 0;
        while i < self.particles.len() {
            self.particles[i].age += dt;
            if self.particles[i].age >= lifetime {
                // the swapped-in record is unvisited; look at slot i again
                self.remove_slot(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    /// Remove a particle by id. Removing an id that is not live is a no-op.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        match self.index.get(&id) {
            Some(&slot) => {
                self.remove_slot(slot);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.index.clear();
        self.oldest = self.next_id;
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleSample> + '_ {
        self.particles.iter().map(move |p| ParticleSample {
            id: p.id,
            position: p.position,
            size: self.profile.size(p.base_size, p.age),
        })
    }

    /// Drop the earliest spawned live particle. The cursor only moves
    /// forward, so the cost is amortised over spawns.
    fn retire_oldest(&mut self) {
        while self.oldest < self.next_id {
            let id = ParticleId(self.oldest);
            self.oldest += 1;
            if self.remove(id) {
                log::debug!("[particles] pool full, retiring {:?}", id);
                return;
            }
        }
    }

    fn remove_slot(&mut self, slot: usize) {
        let gone = self.particles.swap_remove(slot);
        self.index.remove(&gone.id);
        if let Some(moved) = self.particles.get(slot) {
            self.index.insert(moved.id, slot);
        }
    }
}
