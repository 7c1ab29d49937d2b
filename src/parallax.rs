use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::Color;
use crate::entity::AtlasRect;
use crate::renderer::draw::DrawList;
use crate::renderer::projection::Projection;
use crate::renderer::texture::TextureId;
use crate::timer::Timer;

/// Depth of the background plane in world units.
pub const BACKGROUND_Z: f32 = -10.0;
/// World-space size of the background plane: `10 * aspect` wide, 6 high.
pub const BACKGROUND_HEIGHT: f32 = 6.0;
pub const BACKGROUND_WIDTH_PER_ASPECT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scroll direction {0:?} (expected up, down, left or right)")]
pub struct UnknownDirection(pub String);

impl FromStr for ScrollDirection {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(UnknownDirection(other.to_owned())),
        }
    }
}

/// A repeating background texture seen through a sliding window.
///
/// The window starts as the whole texture and is never wrapped back into
/// `[0, 1]`; the texture must be sampled with repeat wrapping.
#[derive(Debug, Clone)]
pub struct Parallax {
    window: AtlasRect,
    step: f32,
    interval_ms: u64,
    timer: Timer,
}

impl Parallax {
    pub fn new(step: f32, interval_ms: u64) -> Self {
        Self { window: AtlasRect::FULL, step, interval_ms, timer: Timer::new() }
    }

    pub fn window(&self) -> AtlasRect {
        self.window
    }

    /// Timer-gated scroll. Returns whether the window moved.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        if !self.timer.step(self.interval_ms) {
            return false;
        }
        self.shift(direction);
        true
    }

    /// Move the window one step immediately.
    pub fn shift(&mut self, direction: ScrollDirection) {
        let s = self.step;
        let (dx, dy) = match direction {
            ScrollDirection::Up => (0.0, s),
            ScrollDirection::Down => (0.0, -s),
            ScrollDirection::Right => (s, 0.0),
            ScrollDirection::Left => (-s, 0.0),
        };
        self.window = self.window.offset(dx, dy);
    }

    /// Queue the background plane, sized to fill the view at `width × height`.
    pub fn draw(&self, texture: TextureId, width: f32, height: f32, list: &mut DrawList) {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let hw = BACKGROUND_WIDTH_PER_ASPECT * aspect / 2.0;
        let hh = BACKGROUND_HEIGHT / 2.0;
        let z = BACKGROUND_Z;
        let w = self.window;
        list.push_quad(
            Projection::World,
            Some(texture),
            [[-hw, hh, z], [hw, hh, z], [-hw, -hh, z], [hw, -hh, z]],
            [w.x_min, w.y_min],
            [w.x_max, w.y_max],
            Color::WHITE,
        );
    }
}
