pub mod draw;
pub mod pipeline;
pub mod projection;
pub mod text;
pub mod texture;

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use draw::DrawList;
use pipeline::{QuadPipeline, create_quad_pipeline};
use projection::{Projection, ProjectionUniform};
use texture::{GpuTexture, SamplerOptions, TextureId, TextureLoader, decode_image};

use crate::error::{AssetError, RenderError};

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad_pipeline: QuadPipeline,
    /// Pixel-space orthographic projection for 2D screens, overlays and text.
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    /// Perspective projection for the game world, rebuilt on resize.
    world_buffer: wgpu::Buffer,
    world_bind_group: wgpu::BindGroup,
    /// Indexed by `TextureId`.
    textures: Vec<GpuTexture>,
    /// Bound for batches without a texture.
    white: GpuTexture,
    last_loaded: Option<TextureId>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        info!("using GPU adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_pipeline = create_quad_pipeline(&device, format);

        let (w, h) = (config.width as f32, config.height as f32);
        let (screen_buffer, screen_bind_group) = projection_binding(
            &device,
            &quad_pipeline.projection_bind_group_layout,
            &ProjectionUniform::screen(w, h),
            "screen_projection",
        );
        let (world_buffer, world_bind_group) = projection_binding(
            &device,
            &quad_pipeline.projection_bind_group_layout,
            &ProjectionUniform::world(w, h),
            "world_projection",
        );

        let white = GpuTexture::white(&device, &queue, &quad_pipeline.texture_bind_group_layout);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            quad_pipeline,
            screen_buffer,
            screen_bind_group,
            world_buffer,
            world_bind_group,
            textures: Vec::new(),
            white,
            last_loaded: None,
        })
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let (w, h) = (new_size.width as f32, new_size.height as f32);
        for projection in [Projection::Screen, Projection::World] {
            self.write_projection(projection, &ProjectionUniform::for_projection(projection, w, h));
        }
    }

    /// Reconfigure the surface at its current size after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn write_projection(&self, projection: Projection, uniform: &ProjectionUniform) {
        let buffer = match projection {
            Projection::Screen => &self.screen_buffer,
            Projection::World => &self.world_buffer,
        };
        self.queue
            .write_buffer(buffer, 0, bytemuck::cast_slice(std::slice::from_ref(uniform)));
    }

    fn texture_bind_group(&self, texture: Option<TextureId>) -> &wgpu::BindGroup {
        texture
            .and_then(|id| self.textures.get(id.0 as usize))
            .map_or(&self.white.bind_group, |t| &t.bind_group)
    }

    /// Render one frame.
    ///
    /// The frame is cleared to `list.clear_color`, then every batch is drawn in
    /// order within a single render pass. Each batch binds the projection it
    /// was built for and its texture.
    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Buffers must outlive the render pass that references them.
        let buffers: Vec<(wgpu::Buffer, wgpu::Buffer)> = list
            .batches
            .iter()
            .map(|batch| {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("quad_vertex_buffer"),
                    contents: bytemuck::cast_slice(&batch.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let ibuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("quad_index_buffer"),
                    contents: bytemuck::cast_slice(&batch.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (vbuf, ibuf)
            })
            .collect();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let [r, g, b, a] = list.clear_color.0;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.quad_pipeline.render_pipeline);

            for (batch, (vbuf, ibuf)) in list.batches.iter().zip(&buffers) {
                let projection_bg = match batch.projection {
                    Projection::Screen => &self.screen_bind_group,
                    Projection::World => &self.world_bind_group,
                };
                pass.set_bind_group(0, projection_bg, &[]);
                pass.set_bind_group(1, self.texture_bind_group(batch.texture), &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.set_index_buffer(ibuf.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..batch.indices.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl TextureLoader for Renderer {
    fn load_texture(&mut self, path: &Path, options: SamplerOptions) -> Result<TextureId, AssetError> {
        let img = decode_image(path)?;
        let label = path.to_string_lossy();
        let gpu = GpuTexture::upload(
            &self.device,
            &self.queue,
            &self.quad_pipeline.texture_bind_group_layout,
            &img,
            options,
            &label,
        );
        debug!("uploaded {} ({}x{}, {:?})", label, gpu.width, gpu.height, options);

        let id = TextureId(self.textures.len() as u32);
        self.textures.push(gpu);
        self.last_loaded = Some(id);
        Ok(id)
    }

    fn last_loaded(&self) -> Option<TextureId> {
        self.last_loaded
    }
}

fn projection_binding(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform: &ProjectionUniform,
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(std::slice::from_ref(uniform)),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, bind_group)
}
