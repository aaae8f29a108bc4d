//! Particle bursts for jumps, breaking platforms and coin pickups

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Particle};
use crate::consts::MAX_PARTICLES;

/// Which event spawned a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Jump,
    Break,
    Coin,
}

/// Shape of a burst: counts, spreads and lifetimes
#[derive(Debug, Clone, Copy)]
pub struct BurstDef {
    pub count: usize,
    /// Horizontal spawn spread (total width, centered)
    pub spread_x: f32,
    /// Horizontal velocity spread (total width, centered)
    pub spread_vx: f32,
    /// Upward speed: vy = -(U * vy_range + vy_min)
    pub vy_min: f32,
    pub vy_range: f32,
    pub life: u32,
    pub color: [u8; 3],
    /// size = U * size_range + size_min
    pub size_min: f32,
    pub size_range: f32,
}

impl BurstKind {
    pub fn def(self) -> BurstDef {
        match self {
            BurstKind::Jump => BurstDef {
                count: 8,
                spread_x: 60.0,
                spread_vx: 6.0,
                vy_min: 2.0,
                vy_range: 8.0,
                life: 30,
                color: [0, 255, 255],
                size_min: 2.0,
                size_range: 4.0,
            },
            BurstKind::Break => BurstDef {
                count: 12,
                spread_x: 80.0,
                spread_vx: 8.0,
                vy_min: 1.0,
                vy_range: 6.0,
                life: 40,
                color: [255, 100, 100],
                size_min: 1.0,
                size_range: 3.0,
            },
            BurstKind::Coin => BurstDef {
                count: 10,
                spread_x: 40.0,
                spread_vx: 6.0,
                vy_min: 2.0,
                vy_range: 8.0,
                life: 35,
                color: [255, 215, 0],
                size_min: 2.0,
                size_range: 4.0,
            },
        }
    }
}

/// Push a burst of particles at `origin`, dropping any beyond the live cap
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, kind: BurstKind, origin: Vec2) {
    let def = kind.def();
    let room = MAX_PARTICLES.saturating_sub(particles.len());
    let count = def.count.min(room);
    if count < def.count {
        log::debug!("Particle cap reached, dropping {} {:?} particles", def.count - count, kind);
    }

    for _ in 0..count {
        let x = origin.x + (rng.random::<f32>() - 0.5) * def.spread_x;
        let vx = (rng.random::<f32>() - 0.5) * def.spread_vx;
        let vy = -(rng.random::<f32>() * def.vy_range + def.vy_min);
        let size = rng.random::<f32>() * def.size_range + def.size_min;
        particles.push(Particle {
            pos: Vec2::new(x, origin.y),
            vel: Vec2::new(vx, vy),
            life: def.life,
            max_life: def.life,
            color: def.color,
            size,
        });
    }
}

impl GameState {
    /// Spawn a burst using the session RNG
    pub fn burst(&mut self, kind: BurstKind, origin: Vec2) {
        spawn_burst(&mut self.particles, &mut self.rng, kind, origin);
    }
}

/// Age every particle by one tick and drop the dead ones in place
pub fn update_particles(particles: &mut Vec<Particle>, gravity: f32) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += gravity;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(123)
    }

    #[test]
    fn test_burst_counts_and_ranges() {
        let mut rng = rng();
        for (kind, count) in [(BurstKind::Jump, 8), (BurstKind::Break, 12), (BurstKind::Coin, 10)] {
            let mut particles = Vec::new();
            spawn_burst(&mut particles, &mut rng, kind, Vec2::new(200.0, 100.0));
            assert_eq!(particles.len(), count);

            let def = kind.def();
            for p in &particles {
                assert!((p.pos.x - 200.0).abs() <= def.spread_x / 2.0);
                assert_eq!(p.pos.y, 100.0);
                assert!(p.vel.y <= -def.vy_min && p.vel.y >= -(def.vy_min + def.vy_range));
                assert!(p.size >= def.size_min && p.size <= def.size_min + def.size_range);
                assert_eq!(p.life, def.life);
                assert_eq!(p.alpha(), 1.0);
            }
        }
    }

    #[test]
    fn test_particles_age_one_tick_at_a_time() {
        let mut rng = rng();
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, BurstKind::Jump, Vec2::ZERO);

        for tick in 1..30 {
            update_particles(&mut particles, 0.2);
            assert_eq!(particles.len(), 8);
            assert!(particles.iter().all(|p| p.life == 30 - tick));
        }
        assert!((particles[0].alpha() - 1.0 / 30.0).abs() < 1e-6);

        update_particles(&mut particles, 0.2);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particles_fall_under_gravity() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            life: 10,
            max_life: 10,
            color: [255, 255, 255],
            size: 2.0,
        }];
        update_particles(&mut particles, 0.2);
        assert_eq!(particles[0].pos, Vec2::new(1.0, -2.0));
        assert!((particles[0].vel.y + 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = rng();
        let mut particles = Vec::new();
        while particles.len() + 12 <= MAX_PARTICLES {
            spawn_burst(&mut particles, &mut rng, BurstKind::Break, Vec2::ZERO);
        }
        spawn_burst(&mut particles, &mut rng, BurstKind::Break, Vec2::ZERO);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
