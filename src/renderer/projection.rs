use glam::Mat4;

/// Vertical field of view of the world projection, in degrees.
pub const WORLD_FOV_Y: f32 = 45.0;
pub const WORLD_NEAR: f32 = 0.1;
pub const WORLD_FAR: f32 = 100.0;

/// Which coordinate system a batch of quads is expressed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// 2D screen pixels, origin top-left, y down. Menus, overlays and text.
    Screen,
    /// 3D world units seen through the perspective set up by the last resize.
    World,
}

/// Projection uniform uploaded to the GPU.
///
/// Column-major, matching WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectionUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl ProjectionUniform {
    /// Orthographic projection mapping pixel coords `[0..w] × [0..h]` to clip
    /// space with `(0, 0)` at the top-left corner.
    ///
    /// ```text
    /// col0: [2/w,  0,    0, 0]
    /// col1: [0,   -2/h,  0, 0]
    /// col2: [0,    0,    1, 0]
    /// col3: [-1,   1,    0, 1]
    /// ```
    #[rustfmt::skip]
    pub fn screen(width: f32, height: f32) -> Self {
        let sx = 2.0 / width.max(1.0);
        let sy = -2.0 / height.max(1.0);
        Self {
            view_proj: [
                [sx,   0.0, 0.0, 0.0], // col0
                [0.0,  sy,  0.0, 0.0], // col1
                [0.0,  0.0, 1.0, 0.0], // col2
                [-1.0, 1.0, 0.0, 1.0], // col3
            ],
        }
    }

    /// Right-handed perspective looking down -Z, 45° vertical FOV.
    /// A zero height is treated as one.
    pub fn world(width: f32, height: f32) -> Self {
        let height = if height <= 0.0 { 1.0 } else { height };
        let aspect = width / height;
        let proj = Mat4::perspective_rh(WORLD_FOV_Y.to_radians(), aspect, WORLD_NEAR, WORLD_FAR);
        Self { view_proj: proj.to_cols_array_2d() }
    }

    pub fn for_projection(projection: Projection, width: f32, height: f32) -> Self {
        match projection {
            Projection::Screen => Self::screen(width, height),
            Projection::World => Self::world(width, height),
        }
    }

    fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_proj)
    }

    /// Project a point to normalised device coordinates.
    pub fn project(&self, point: [f32; 3]) -> [f32; 3] {
        self.matrix().project_point3(glam::Vec3::from(point)).to_array()
    }
}
