use glam::Vec3;

use crate::renderer::draw::DrawList;
use crate::renderer::texture::TextureId;
use crate::timer::Timer;

use super::sprite::{AtlasRect, Sprite};

/// Where inactive bullets wait, far behind the camera's view.
pub const PARKED_POSITION: Vec3 = Vec3::new(0.0, 0.0, -100.0);

#[derive(Debug, Clone)]
pub struct Bullet {
    pub sprite: Sprite,
    pub active: bool,
}

/// How pooled bullets travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletMotion {
    /// World units moved up per accepted step.
    pub step: f32,
    pub interval_ms: u64,
    /// Bullets above this y return to the pool.
    pub ceiling: f32,
}

/// Fixed-capacity bullet arena.
///
/// All slots are allocated up front. Firing claims the first inactive slot
/// found by a linear scan; a full pool drops the request.
#[derive(Debug)]
pub struct BulletPool {
    slots: Box<[Bullet]>,
    motion: BulletMotion,
    timer: Timer,
}

impl BulletPool {
    pub fn new(capacity: usize, scale: f32, motion: BulletMotion) -> Self {
        let slots = (0..capacity)
            .map(|_| Bullet {
                sprite: Sprite::new(PARKED_POSITION, scale, AtlasRect::FULL),
                active: false,
            })
            .collect();
        Self { slots, motion, timer: Timer::new() }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    /// Claim a free slot and place it at `origin`. Returns the slot index, or
    /// `None` with the pool untouched when every slot is active.
    pub fn fire(&mut self, origin: Vec3) -> Option<usize> {
        let index = self.slots.iter().position(|b| !b.active)?;
        let bullet = &mut self.slots[index];
        bullet.sprite.position = origin;
        bullet.active = true;
        Some(index)
    }

    /// Move active bullets up one step per elapsed interval and retire the
    /// ones that pass the ceiling.
    pub fn update(&mut self) {
        if !self.timer.step(self.motion.interval_ms) {
            return;
        }
        for bullet in self.slots.iter_mut().filter(|b| b.active) {
            bullet.sprite.position.y += self.motion.step;
            if bullet.sprite.position.y > self.motion.ceiling {
                bullet.active = false;
                bullet.sprite.position = PARKED_POSITION;
            }
        }
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    pub fn draw(&self, texture: TextureId, list: &mut DrawList) {
        for bullet in self.iter_live() {
            bullet.sprite.draw(texture, list);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const MOTION: BulletMotion = BulletMotion { step: 0.5, interval_ms: 16, ceiling: 1.0 };

    fn expire_timer(pool: &mut BulletPool) {
        pool.timer = Timer::started_ago(Duration::from_millis(100));
    }

    #[test]
    fn fire_claims_first_free_slot() {
        let mut pool = BulletPool::new(3, 0.05, MOTION);
        assert_eq!(pool.fire(Vec3::ZERO), Some(0));
        assert_eq!(pool.fire(Vec3::ZERO), Some(1));
        pool.slots[0].active = false;
        assert_eq!(pool.fire(Vec3::ONE), Some(0));
        assert_eq!(pool.slots[0].sprite.position, Vec3::ONE);
    }

    #[test]
    fn exhausted_pool_is_unchanged_by_fire() {
        let mut pool = BulletPool::new(2, 0.05, MOTION);
        pool.fire(Vec3::ZERO);
        pool.fire(Vec3::X);
        let before: Vec<_> = pool.slots.iter().map(|b| (b.active, b.sprite.position)).collect();

        assert_eq!(pool.fire(Vec3::Y), None);

        let after: Vec<_> = pool.slots.iter().map(|b| (b.active, b.sprite.position)).collect();
        assert_eq!(before, after);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn bullets_rise_and_retire_above_ceiling() {
        let mut pool = BulletPool::new(1, 0.05, MOTION);
        pool.fire(Vec3::new(0.0, 0.25, -2.0));

        expire_timer(&mut pool);
        pool.update();
        assert_eq!(pool.slots[0].sprite.position.y, 0.75);
        assert!(pool.slots[0].active);

        expire_timer(&mut pool);
        pool.update();
        assert!(!pool.slots[0].active);
        assert_eq!(pool.slots[0].sprite.position, PARKED_POSITION);
        assert_eq!(pool.iter_live().count(), 0);
    }

    #[test]
    fn update_before_interval_moves_nothing() {
        let slow = BulletMotion { interval_ms: 60_000, ..MOTION };
        let mut pool = BulletPool::new(1, 0.05, slow);
        pool.fire(Vec3::ZERO);
        pool.update();
        assert_eq!(pool.slots[0].sprite.position, Vec3::ZERO);
    }
}
