use glam::Vec3;

use crate::engine::Color;
use crate::renderer::draw::DrawList;
use crate::renderer::projection::Projection;
use crate::renderer::texture::TextureId;

/// Sub-rectangle of a texture in normalised `[0, 1]` coordinates, v down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRect {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl AtlasRect {
    /// The whole texture.
    pub const FULL: Self = Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };

    /// The same rectangle moved by `(dx, dy)`. No wrapping is applied.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x_min: self.x_min + dx,
            x_max: self.x_max + dx,
            y_min: self.y_min + dy,
            y_max: self.y_max + dy,
        }
    }
}

/// A uniform grid of animation frames. Column 0 / row 0 is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    /// Zero counts are raised to one.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns: columns.max(1), rows: rows.max(1) }
    }

    pub fn frame(&self, column: u32, row: u32) -> AtlasRect {
        let fw = 1.0 / self.columns as f32;
        let fh = 1.0 / self.rows as f32;
        AtlasRect {
            x_min: column as f32 * fw,
            x_max: (column + 1) as f32 * fw,
            y_min: row as f32 * fh,
            y_max: (row + 1) as f32 * fh,
        }
    }

    /// The column after `column`, wrapping to the first.
    pub fn next_column(&self, column: u32) -> u32 {
        (column + 1) % self.columns
    }
}

/// A textured quad in world space.
///
/// The local mesh spans `[-1, 1]` on x and y, is scaled uniformly and then
/// moved to `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub position: Vec3,
    pub scale: f32,
    pub frame: AtlasRect,
}

impl Sprite {
    pub fn new(position: Vec3, scale: f32, frame: AtlasRect) -> Self {
        Self { position, scale, frame }
    }

    /// World-space corners: top-left, top-right, bottom-left, bottom-right.
    #[rustfmt::skip]
    pub fn corners(&self) -> [[f32; 3]; 4] {
        let p = self.position;
        let s = self.scale;
        [
            (p + Vec3::new(-s,  s, 0.0)).to_array(),
            (p + Vec3::new( s,  s, 0.0)).to_array(),
            (p + Vec3::new(-s, -s, 0.0)).to_array(),
            (p + Vec3::new( s, -s, 0.0)).to_array(),
        ]
    }

    pub fn draw(&self, texture: TextureId, list: &mut DrawList) {
        list.push_quad(
            Projection::World,
            Some(texture),
            self.corners(),
            [self.frame.x_min, self.frame.y_min],
            [self.frame.x_max, self.frame.y_max],
            Color::WHITE,
        );
    }
}
