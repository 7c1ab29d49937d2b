use glam::Vec3;

use crate::renderer::draw::DrawList;
use crate::renderer::texture::TextureId;
use crate::timer::Timer;

use super::sprite::{Sprite, SpriteSheet};

#[derive(Debug, Clone)]
pub struct Enemy {
    sprite: Sprite,
    sheet: SpriteSheet,
    column: u32,
    frame_interval_ms: u64,
    timer: Timer,
    pub live: bool,
}

impl Enemy {
    pub fn new(position: Vec3, scale: f32, sheet: SpriteSheet, frame_interval_ms: u64) -> Self {
        Self {
            sprite: Sprite::new(position, scale, sheet.frame(0, 0)),
            sheet,
            column: 0,
            frame_interval_ms,
            timer: Timer::new(),
            live: true,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Cycle through the first sheet row, one frame per elapsed interval.
    pub fn update(&mut self) {
        if !self.live {
            return;
        }
        if self.timer.step(self.frame_interval_ms) {
            self.column = self.sheet.next_column(self.column);
            self.sprite.frame = self.sheet.frame(self.column, 0);
        }
    }

    pub fn draw(&self, texture: TextureId, list: &mut DrawList) {
        if self.live {
            self.sprite.draw(texture, list);
        }
    }
}
