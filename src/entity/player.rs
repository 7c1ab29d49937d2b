use glam::Vec3;

use crate::renderer::draw::DrawList;
use crate::renderer::texture::TextureId;
use crate::timer::Timer;

use super::sprite::{Sprite, SpriteSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stand,
    WalkLeft,
    WalkRight,
}

impl Action {
    /// Sprite-sheet row holding this action's frames.
    fn row(self) -> u32 {
        match self {
            Action::Stand | Action::WalkRight => 0,
            Action::WalkLeft => 1,
        }
    }

    /// Horizontal direction of travel.
    fn direction(self) -> f32 {
        match self {
            Action::Stand => 0.0,
            Action::WalkLeft => -1.0,
            Action::WalkRight => 1.0,
        }
    }
}

/// The player ship: walks left and right along the bottom of the world.
#[derive(Debug, Clone)]
pub struct Player {
    sprite: Sprite,
    sheet: SpriteSheet,
    action: Action,
    column: u32,
    /// World units per second.
    speed: f32,
    frame_interval_ms: u64,
    timer: Timer,
}

impl Player {
    pub fn new(position: Vec3, scale: f32, sheet: SpriteSheet, speed: f32, frame_interval_ms: u64) -> Self {
        Self {
            sprite: Sprite::new(position, scale, sheet.frame(0, 0)),
            sheet,
            action: Action::Stand,
            column: 0,
            speed,
            frame_interval_ms,
            timer: Timer::new(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn position(&self) -> Vec3 {
        self.sprite.position
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Switch action. A new action restarts at the first frame of its row.
    pub fn set_action(&mut self, action: Action) {
        if action == self.action {
            return;
        }
        self.action = action;
        self.column = 0;
        self.sprite.frame = self.sheet.frame(0, self.row());
        self.timer.reset();
    }

    /// A walk key was let go. Only stops the player if that walk is the
    /// current action, so releasing one arrow while holding the other keeps
    /// walking.
    pub fn release(&mut self, action: Action) {
        if self.action == action {
            self.set_action(Action::Stand);
        }
    }

    /// Move by `speed * dt` in the walking direction and advance the walk
    /// animation one frame per elapsed interval.
    pub fn update(&mut self, dt: f32) {
        if self.action == Action::Stand {
            return;
        }

        self.sprite.position.x += self.action.direction() * self.speed * dt;

        if self.timer.step(self.frame_interval_ms) {
            self.column = self.sheet.next_column(self.column);
            self.sprite.frame = self.sheet.frame(self.column, self.row());
        }
    }

    pub fn draw(&self, texture: TextureId, list: &mut DrawList) {
        self.sprite.draw(texture, list);
    }

    fn row(&self) -> u32 {
        self.action.row().min(self.sheet.rows - 1)
    }
}
