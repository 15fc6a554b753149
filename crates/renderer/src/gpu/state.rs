use std::time::{Duration, Instant};

use anyhow::Result;
use effect::{CanvasLayout, FrameUniforms, Session};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, warn};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use super::context::GpuContext;
use super::pipeline::EffectPipeline;
use super::texture::{ensure_fits, ImageTexture};
use super::uniforms::EffectUniforms;

/// Everything needed to draw the effect into one window surface.
pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: EffectPipeline,
    _image: ImageTexture,
    uniforms: EffectUniforms,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    frame_count: u64,
    frames_since_last_update: u32,
    last_fps_update: Instant,
    frames_per_second: f32,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        session: &Session,
        layout: &CanvasLayout,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        ensure_fits(
            session.image.width(),
            session.image.height(),
            context.max_dimension(),
        )?;
        let image = ImageTexture::upload(&context.device, &context.queue, &session.image);
        let pipeline = EffectPipeline::new(&context.device, context.surface_format, &image)?;

        let uniforms = EffectUniforms::new(layout);
        let uniform_buffer =
            context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("effect uniforms"),
                    contents: bytemuck::bytes_of(&uniforms),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
        let uniform_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("uniform bind group"),
                layout: &pipeline.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        debug!(
            width = context.size.width,
            height = context.size.height,
            format = ?context.surface_format,
            "gpu state ready"
        );

        Ok(Self {
            context,
            pipeline,
            _image: image,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            frame_count: 0,
            frames_since_last_update: 0,
            last_fps_update: Instant::now(),
            frames_per_second: 0.0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Restores the surface after `Lost` or `Outdated`.
    pub(crate) fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Writes the frame snapshot and draws one full-surface pass.
    pub(crate) fn render(
        &mut self,
        frame: &FrameUniforms,
        layout: &CanvasLayout,
    ) -> Result<(), wgpu::SurfaceError> {
        let acquire_start = Instant::now();
        let output = self.context.surface.get_current_texture()?;
        let acquire = acquire_start.elapsed();
        if self.frames_per_second > 0.0 {
            let budget = Duration::from_secs_f32(1.0 / self.frames_per_second);
            if acquire > budget {
                warn!(
                    "acquiring frame took {}ms, which is over the frame budget of {}ms",
                    acquire.as_millis(),
                    budget.as_millis(),
                );
            }
        }

        self.frame_count += 1;
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let since_update = now.saturating_duration_since(self.last_fps_update);
        if since_update >= Duration::from_secs(1) {
            self.frames_per_second =
                self.frames_since_last_update as f32 / since_update.as_secs_f32();
            self.frames_since_last_update = 0;
            self.last_fps_update = now;
            debug!(
                fps = self.frames_per_second.round(),
                frame_count = self.frame_count,
                time = frame.time,
                mouse_x = frame.mouse.x,
                mouse_y = frame.mouse.y,
                "render stats"
            );
        }

        self.uniforms.update(frame, layout);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("effect pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.pipeline.image_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
