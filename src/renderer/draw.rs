use crate::engine::Color;

use super::pipeline::QuadVertex;
use super::projection::Projection;
use super::texture::TextureId;

/// A run of quads sharing one projection and one texture.
///
/// `texture: None` samples a 1×1 white texel, so the quad shows its tint
/// colour only.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub projection: Projection,
    pub texture: Option<TextureId>,
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
}

impl DrawBatch {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Everything one frame draws, in submission order.
///
/// Built on the CPU by the scene and consumed by the GPU renderer, so every
/// draw routine can be inspected in tests without a device.
#[derive(Debug, Clone)]
pub struct DrawList {
    pub clear_color: Color,
    pub batches: Vec<DrawBatch>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self { clear_color: Color::WHITE, batches: Vec::new() }
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all batches and set the colour the frame is cleared to.
    pub fn reset(&mut self, clear_color: Color) {
        self.clear_color = clear_color;
        self.batches.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.batches.iter().map(DrawBatch::quad_count).sum()
    }

    /// Queue one textured quad.
    ///
    /// Corners are given in reading order: top-left, top-right, bottom-left,
    /// bottom-right. `uv_min` lands on the top-left corner and `uv_max` on
    /// the bottom-right.
    pub fn push_quad(
        &mut self,
        projection: Projection,
        texture: Option<TextureId>,
        corners: [[f32; 3]; 4],
        uv_min: [f32; 2],
        uv_max: [f32; 2],
        color: Color,
    ) {
        let [tl, tr, bl, br] = corners;
        let c = color.0;
        #[rustfmt::skip]
        let vertices = [
            QuadVertex { position: tl, uv: uv_min,                 color: c },
            QuadVertex { position: tr, uv: [uv_max[0], uv_min[1]], color: c },
            QuadVertex { position: bl, uv: [uv_min[0], uv_max[1]], color: c },
            QuadVertex { position: br, uv: uv_max,                 color: c },
        ];
        self.push_mesh(projection, texture, &vertices, &QUAD_INDICES);
    }

    /// Queue an axis-aligned screen-space rectangle.
    pub fn push_screen_rect(
        &mut self,
        texture: Option<TextureId>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) {
        #[rustfmt::skip]
        let corners = [
            [x,     y,     0.0],
            [x + w, y,     0.0],
            [x,     y + h, 0.0],
            [x + w, y + h, 0.0],
        ];
        self.push_quad(Projection::Screen, texture, corners, [0.0, 0.0], [1.0, 1.0], color);
    }

    /// Append a pre-built mesh. `indices` are relative to `vertices`.
    /// Consecutive meshes with the same projection and texture share a batch.
    pub fn push_mesh(
        &mut self,
        projection: Projection,
        texture: Option<TextureId>,
        vertices: &[QuadVertex],
        indices: &[u32],
    ) {
        if vertices.is_empty() {
            return;
        }

        let continues_last = matches!(
            self.batches.last(),
            Some(last) if last.projection == projection && last.texture == texture
        );
        if !continues_last {
            self.batches.push(DrawBatch {
                projection,
                texture,
                vertices: Vec::new(),
                indices: Vec::new(),
            });
        }
        let Some(batch) = self.batches.last_mut() else { return };

        let base = batch.vertices.len() as u32;
        batch.vertices.extend_from_slice(vertices);
        batch.indices.extend(indices.iter().map(|i| base + i));
    }
}

/// Two triangles over a TL, TR, BL, BR vertex quad: (0,1,2) and (1,3,2).
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(list: &mut DrawList, texture: Option<TextureId>) {
        list.push_screen_rect(texture, 0.0, 0.0, 10.0, 10.0, Color::WHITE);
    }

    #[test]
    fn same_texture_and_projection_share_a_batch() {
        let mut list = DrawList::new();
        rect(&mut list, Some(TextureId(1)));
        rect(&mut list, Some(TextureId(1)));
        assert_eq!(list.batches.len(), 1);
        assert_eq!(list.quad_count(), 2);
        assert_eq!(&list.batches[0].indices[6..], &[4, 5, 6, 5, 7, 6]);
    }

    #[test]
    fn texture_change_starts_a_new_batch_preserving_order() {
        let mut list = DrawList::new();
        rect(&mut list, Some(TextureId(1)));
        rect(&mut list, None);
        rect(&mut list, Some(TextureId(1)));
        let textures: Vec<_> = list.batches.iter().map(|b| b.texture).collect();
        assert_eq!(textures, vec![Some(TextureId(1)), None, Some(TextureId(1))]);
    }

    #[test]
    fn empty_mesh_adds_nothing() {
        let mut list = DrawList::new();
        list.push_mesh(Projection::Screen, None, &[], &[]);
        assert!(list.batches.is_empty());
    }

    #[test]
    fn reset_clears_batches_and_sets_colour() {
        let mut list = DrawList::new();
        rect(&mut list, None);
        list.reset(Color::BLACK);
        assert!(list.batches.is_empty());
        assert_eq!(list.clear_color, Color::BLACK);
    }

    #[test]
    fn screen_rect_uvs_cover_unit_square() {
        let mut list = DrawList::new();
        list.push_screen_rect(None, 5.0, 6.0, 20.0, 10.0, Color::WHITE);
        let v = &list.batches[0].vertices;
        assert_eq!(v[0].position, [5.0, 6.0, 0.0]);
        assert_eq!(v[3].position, [25.0, 16.0, 0.0]);
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[3].uv, [1.0, 1.0]);
    }
}
