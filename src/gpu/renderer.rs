//! The wgpu [`RenderBackend`].
//!
//! Draw calls made through the [`Shader`] interface during a frame are
//! only recorded (see [`ProgramSet`]). `end_frame` uploads both programs'
//! global blocks and the packed per-object arena, replays the draws into
//! the persistent scene target with dynamic uniform offsets, and blits the
//! result to the swapchain.

use std::path::Path;

use bytemuck::Pod;

use super::blit::BlitPass;
use super::dynamic_buffer::DynamicBuffer;
use super::mesh::{GpuMesh, MeshLibrary};
use super::model::{load_mesh_data, Model};
use super::pipeline_helpers::{create_mesh_pipeline, uniform_buffer};
use super::render_context::RenderContext;
use super::shader::{FrameStaging, Program, ProgramSet, Shader, UNIFORM_ALIGNMENT};
use super::shader_composer::{
    ShaderComposer, LIGHT_SOURCE_SHADER, LIT_SHADER,
};
use super::texture::RenderTarget;
use super::uniforms::{
    LightSourceGlobals, LightSourceObject, LitGlobals, LitObject,
};
use crate::error::SceneError;
use crate::options::DisplayOptions;
use crate::scene::RenderBackend;

/// Pipeline and bind groups of one shader program.
struct ProgramPipeline {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    locals_layout: wgpu::BindGroupLayout,
    locals_bind_group: wgpu::BindGroup,
    locals_size: u64,
}

impl ProgramPipeline {
    fn new<G: Pod, L: Pod>(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        label: &str,
        shader: (&str, &str),
        locals: &wgpu::Buffer,
    ) -> Result<Self, SceneError> {
        let device = &context.device;
        let module =
            composer.compose(device, &format!("{label} Shader"), shader)?;

        let globals_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Globals Layout")),
                entries: &[uniform_buffer::<G>(0, false)],
            });
        let locals_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Locals Layout")),
                entries: &[uniform_buffer::<L>(0, true)],
            });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Globals")),
            size: size_of::<G>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} Globals Bind Group")),
                layout: &globals_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                }],
            });

        let locals_size = size_of::<L>() as u64;
        let locals_bind_group =
            Self::bind_locals(device, &locals_layout, locals, locals_size);

        let pipeline = create_mesh_pipeline(
            device,
            label,
            &module,
            context.format(),
            &[&globals_layout, &locals_layout],
        );

        Ok(Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            locals_layout,
            locals_bind_group,
            locals_size,
        })
    }

    fn bind_locals(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        size: u64,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Locals Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(size),
                }),
            }],
        })
    }

    fn rebind_locals(&mut self, device: &wgpu::Device, buffer: &wgpu::Buffer) {
        self.locals_bind_group = Self::bind_locals(
            device,
            &self.locals_layout,
            buffer,
            self.locals_size,
        );
    }
}

/// wgpu implementation of [`RenderBackend`].
pub struct Renderer {
    context: RenderContext,
    programs: ProgramSet,
    meshes: MeshLibrary,
    lit: ProgramPipeline,
    light_source: ProgramPipeline,
    locals: DynamicBuffer,
    scene_color: RenderTarget,
    scene_depth: RenderTarget,
    blit: BlitPass,
    clear_color: wgpu::Color,
    clear: bool,
}

impl Renderer {
    /// Compose the shaders and build pipelines and offscreen targets for
    /// `context`'s surface.
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if a shader fails to compose.
    pub fn new(
        context: RenderContext,
        display: &DisplayOptions,
    ) -> Result<Self, SceneError> {
        let mut composer = ShaderComposer::new()?;
        let locals = DynamicBuffer::new(
            &context.device,
            "Per-Object Uniforms",
            16 * UNIFORM_ALIGNMENT,
            wgpu::BufferUsages::UNIFORM,
        );

        let lit = ProgramPipeline::new::<LitGlobals, LitObject>(
            &context,
            &mut composer,
            "Lit",
            LIT_SHADER,
            locals.buffer(),
        )?;
        let light_source =
            ProgramPipeline::new::<LightSourceGlobals, LightSourceObject>(
                &context,
                &mut composer,
                "Light Source",
                LIGHT_SOURCE_SHADER,
                locals.buffer(),
            )?;

        let size = context.size();
        let scene_color = RenderTarget::new(
            &context.device,
            "Scene Color",
            size,
            context.format(),
        );
        let scene_depth = RenderTarget::depth(&context.device, size);
        let blit = BlitPass::new(
            &context.device,
            &mut composer,
            context.format(),
            &scene_color.view,
        )?;

        let [r, g, b] = display.background_color.map(f64::from);
        log::info!(
            "Renderer ready: {}x{} {:?}",
            size.0,
            size.1,
            context.format()
        );

        Ok(Self {
            context,
            programs: ProgramSet::new(),
            meshes: MeshLibrary::default(),
            lit,
            light_source,
            locals,
            scene_color,
            scene_depth,
            blit,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            clear: true,
        })
    }

    /// Load a glTF model and upload it.
    ///
    /// # Errors
    ///
    /// [`SceneError::ModelLoad`] if the file is missing or malformed.
    pub fn load_model(&mut self, path: &Path) -> Result<Model, SceneError> {
        let data = load_mesh_data(path)?;
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model");
        let mesh = GpuMesh::upload(&self.context.device, label, &data);
        Ok(Model::new(self.meshes.insert(mesh)))
    }

    /// Resize the surface and the offscreen targets. Zero sizes are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        let device = &self.context.device;
        self.scene_color = RenderTarget::new(
            device,
            "Scene Color",
            (width, height),
            self.context.format(),
        );
        self.scene_depth = RenderTarget::depth(device, (width, height));
        self.blit.rebind(device, &self.scene_color.view);
    }

    /// Reconfigure the surface at its current size (after `Lost` or
    /// `Outdated`).
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Current surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    fn upload_uniforms(&mut self, staging: &FrameStaging) {
        let queue = &self.context.queue;
        queue.write_buffer(
            &self.lit.globals_buffer,
            0,
            bytemuck::bytes_of(self.programs.lit().globals()),
        );
        queue.write_buffer(
            &self.light_source.globals_buffer,
            0,
            bytemuck::bytes_of(self.programs.light_source().globals()),
        );

        if staging.arena().is_empty() {
            return;
        }
        let device = &self.context.device;
        if self.locals.write_bytes(device, queue, staging.arena()) {
            self.lit.rebind_locals(device, self.locals.buffer());
            self.light_source.rebind_locals(device, self.locals.buffer());
        }
    }

    fn submit(&mut self, staging: &FrameStaging) -> Result<(), SceneError> {
        let frame = self.context.get_next_frame()?;
        self.upload_uniforms(staging);

        let mut encoder = self.context.create_encoder();
        {
            let (color_load, depth_load) = if self.clear {
                (wgpu::LoadOp::Clear(self.clear_color), wgpu::LoadOp::Clear(1.0))
            } else {
                (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
            };
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene_color.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.scene_depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: depth_load,
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut bound = None;
            for draw in staging.draws() {
                let Some(mesh) = self.meshes.get(draw.mesh) else {
                    log::warn!("Skipping draw of unknown mesh {:?}", draw.mesh);
                    continue;
                };
                let program = match draw.program {
                    Program::Lit => &self.lit,
                    Program::LightSource => &self.light_source,
                };
                if bound != Some(draw.program) {
                    rp.set_pipeline(&program.pipeline);
                    rp.set_bind_group(0, &program.globals_bind_group, &[]);
                    bound = Some(draw.program);
                }
                rp.set_bind_group(1, &program.locals_bind_group, &[draw.offset]);
                mesh.draw(&mut rp);
            }
        }

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.blit.draw(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}

impl RenderBackend for Renderer {
    fn begin_frame(&mut self, clear: bool) {
        self.programs.clear_staging();
        self.clear = clear;
    }

    fn use_program(&mut self, program: Program) -> &mut dyn Shader {
        self.programs.use_program(program)
    }

    fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    fn end_frame(&mut self) -> Result<(), SceneError> {
        let staging = self.programs.take_staging();
        let result = self.submit(&staging);
        self.programs.recycle(staging);
        result
    }
}
