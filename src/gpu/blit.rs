//! Copies the persistent scene target onto the swapchain image.

use super::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d,
};
use super::shader_composer::{ShaderComposer, BLIT_SHADER};
use crate::error::SceneError;

/// Full-screen blit pipeline bound to one source view.
pub struct BlitPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
}

impl BlitPass {
    /// Build the pipeline for `format` targets, sampling `source`.
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if the blit shader fails to compose.
    pub fn new(
        device: &wgpu::Device,
        composer: &mut ShaderComposer,
        format: wgpu::TextureFormat,
        source: &wgpu::TextureView,
    ) -> Result<Self, SceneError> {
        let shader = composer.compose(device, "Blit Shader", BLIT_SHADER)?;
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Blit Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let pipeline = create_screen_space_pipeline(
            device,
            "Blit",
            &shader,
            format,
            &[&layout],
        );
        let sampler = linear_sampler(device, "Blit Sampler");
        let bind_group = Self::bind(device, &layout, &sampler, source);
        Ok(Self {
            pipeline,
            layout,
            sampler,
            bind_group,
        })
    }

    fn bind(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        source: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Point the pass at a new source view (after a resize).
    pub fn rebind(&mut self, device: &wgpu::Device, source: &wgpu::TextureView) {
        self.bind_group = Self::bind(device, &self.layout, &self.sampler, source);
    }

    /// Record the copy into `target`, overwriting it.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blit pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
