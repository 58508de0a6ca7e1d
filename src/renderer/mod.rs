mod mesh;
mod pipelines;
mod textures;
mod uniforms;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::core::GpuContext;
use crate::geometry::{plane, GeometryLibrary};
use crate::helpers::grid_lines;
use crate::math::hex_to_linear;
use crate::params::Shape;
use crate::scene::{Background, Scene, GROUND_SIZE};
use crate::texture::{disc_mask, CubeImages, DISC_SIZE};
use crate::types::{LineVertex, ObjectUniform, SceneUniform};

pub use mesh::{vertices, GpuMesh, LineBuffer};
pub use textures::{mip_chain, GpuTexture, DEPTH_FORMAT};
pub use uniforms::{ground_uniform, mesh_uniform, points_uniform, scene_uniform, POINT_SIZE};

use pipelines::{Layouts, Pipelines};

/// Everything drawn in one frame besides the GUI
pub struct FrameInput<'a> {
    pub scene: &'a Scene,
    pub camera: &'a OrbitCamera,
    /// Spotlight cone and shadow frustum, depth tested
    pub helper_lines: &'a [LineVertex],
    /// Transform gizmo, drawn over the scene
    pub gizmo_lines: &'a [LineVertex],
}

/// Images the renderer starts with
pub struct RendererAssets {
    pub color_map: RgbaImage,
    pub environment: CubeImages,
}

/// Uniform buffer and the bind group reading it
struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    buffer: &wgpu::Buffer,
    map: &GpuTexture,
    environment: &GpuTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&map.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&map.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(&environment.view),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(&environment.sampler),
            },
        ],
    })
}

impl ObjectSlot {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        map: &GpuTexture,
        environment: &GpuTexture,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[ObjectUniform::new(glam::Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = object_bind_group(device, layout, label, &buffer, map, environment);
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, uniform: &ObjectUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}

pub struct Renderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    layouts: Layouts,
    pipelines: Pipelines,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    shadow_scene_bind_group: wgpu::BindGroup,
    shadow_map: wgpu::TextureView,
    depth: wgpu::TextureView,
    meshes: HashMap<Shape, GpuMesh>,
    ground: GpuMesh,
    mesh_object: ObjectSlot,
    ground_object: ObjectSlot,
    points_object: ObjectSlot,
    color_map: GpuTexture,
    environment: GpuTexture,
    grid: LineBuffer,
    helpers: LineBuffer,
    gizmo: LineBuffer,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, library: &GeometryLibrary, assets: RendererAssets) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let config = gpu.surface_config(&surface, size.width, size.height);
        surface.configure(gpu.device(), &config);

        let device = gpu.device();
        let queue = gpu.queue();

        let layouts = Layouts::new(device);
        let pipelines = Pipelines::new(device, &layouts, config.format);

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform"),
            size: std::mem::size_of::<SceneUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let map_size = crate::scene::SHADOW_MAP_SIZE;
        let shadow_map = textures::depth_target(device, "Shadow Map", map_size, map_size, true);
        let shadow_sampler = textures::shadow_sampler(device);

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &layouts.scene,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_scene_bind_group"),
            layout: &layouts.shadow_scene,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let depth = textures::depth_target(device, "Depth Buffer", config.width, config.height, false);

        let meshes = library
            .iter()
            .map(|(shape, geometry)| (shape, GpuMesh::new(device, shape.label(), geometry)))
            .collect::<HashMap<_, _>>();
        let ground = GpuMesh::new(device, "Ground", &plane(GROUND_SIZE, GROUND_SIZE));

        let color_map = textures::color_map(device, queue, &assets.color_map);
        let environment = textures::environment(device, queue, &assets.environment);
        let sprite = textures::sprite(device, queue, &disc_mask(DISC_SIZE));

        let mesh_object = ObjectSlot::new(device, &layouts.object, "Mesh Object", &color_map, &environment);
        let ground_object = ObjectSlot::new(device, &layouts.object, "Ground Object", &color_map, &environment);
        let points_object = ObjectSlot::new(device, &layouts.object, "Points Object", &sprite, &environment);

        let mut grid = LineBuffer::new(device, "Grid Lines");
        grid.write(device, queue, &grid_lines());
        let helpers = LineBuffer::new(device, "Helper Lines");
        let gizmo = LineBuffer::new(device, "Gizmo Lines");

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(device, config.format, egui_wgpu::RendererOptions::default());

        log::info!(
            "Renderer initialized: {}x{} {:?}, {} shapes",
            config.width,
            config.height,
            config.format,
            meshes.len()
        );

        Ok(Self {
            gpu,
            surface,
            config,
            layouts,
            pipelines,
            scene_buffer,
            scene_bind_group,
            shadow_scene_bind_group,
            shadow_map,
            depth,
            meshes,
            ground,
            mesh_object,
            ground_object,
            points_object,
            color_map,
            environment,
            grid,
            helpers,
            gizmo,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface; zero sizes (minimized) are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(self.gpu.device(), &self.config);
        self.depth = textures::depth_target(self.gpu.device(), "Depth Buffer", width, height, false);
        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Recover from a lost or outdated surface
    pub fn reconfigure(&mut self) {
        let (width, height) = self.size();
        self.resize(width, height);
    }

    /// Swap the mesh's color map
    pub fn set_color_map(&mut self, image: &RgbaImage) {
        let device = self.gpu.device();
        self.color_map = textures::color_map(device, self.gpu.queue(), image);
        self.mesh_object.bind_group = object_bind_group(
            device,
            &self.layouts.object,
            "Mesh Object",
            &self.mesh_object.buffer,
            &self.color_map,
            &self.environment,
        );
        self.ground_object.bind_group = object_bind_group(
            device,
            &self.layouts.object,
            "Ground Object",
            &self.ground_object.buffer,
            &self.color_map,
            &self.environment,
        );
        log::info!("Color map replaced ({}x{})", image.width(), image.height());
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    fn upload(&mut self, frame: &FrameInput<'_>, scale_factor: f32) {
        let queue = self.gpu.queue();
        let viewport = [self.config.width as f32, self.config.height as f32];
        let uniform = scene_uniform(frame.scene, frame.camera, viewport);
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));

        self.mesh_object.write(queue, &mesh_uniform(&frame.scene.mesh));
        self.ground_object.write(queue, &ground_uniform(&frame.scene.ground));
        self.points_object.write(queue, &points_uniform(&frame.scene.mesh, scale_factor));

        let device = self.gpu.device();
        self.helpers.write(device, queue, frame.helper_lines);
        self.gizmo.write(device, queue, frame.gizmo_lines);
    }

    fn shadow_pass(&self, encoder: &mut wgpu::CommandEncoder, scene: &Scene, mesh: &GpuMesh) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let descriptor = scene.mesh.material.descriptor();
        if !scene.mesh.cast_shadow || descriptor.wireframe {
            return;
        }
        pass.set_pipeline(&self.pipelines.shadow);
        pass.set_bind_group(0, &self.shadow_scene_bind_group, &[]);
        pass.set_bind_group(1, &self.mesh_object.bind_group, &[]);
        mesh.draw_triangles(&mut pass);
    }

    fn main_pass(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, scene: &Scene, mesh: &GpuMesh) {
        let clear = match scene.background {
            Background::Color(hex) => {
                let [r, g, b] = hex_to_linear(hex);
                wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: 1.0,
                }
            }
            Background::EnvironmentCube => wgpu::Color::BLACK,
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_bind_group(0, &self.scene_bind_group, &[]);

        if scene.background == Background::EnvironmentCube {
            pass.set_pipeline(&self.pipelines.sky);
            pass.set_bind_group(1, &self.mesh_object.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        if scene.ground.visible {
            pass.set_pipeline(&self.pipelines.mesh);
            pass.set_bind_group(1, &self.ground_object.bind_group, &[]);
            self.ground.draw_triangles(&mut pass);
        }

        pass.set_bind_group(1, &self.mesh_object.bind_group, &[]);
        if scene.mesh.material.descriptor().wireframe {
            pass.set_pipeline(&self.pipelines.wireframe);
            mesh.draw_edges(&mut pass);
        } else {
            pass.set_pipeline(&self.pipelines.mesh);
            mesh.draw_triangles(&mut pass);
        }

        if scene.points_visible {
            pass.set_pipeline(&self.pipelines.points);
            pass.set_bind_group(1, &self.points_object.bind_group, &[]);
            mesh.draw_points(&mut pass);
        }

        pass.set_pipeline(&self.pipelines.lines);
        if scene.grid_visible {
            self.grid.draw(&mut pass);
        }
        self.helpers.draw(&mut pass);

        pass.set_pipeline(&self.pipelines.overlay);
        self.gizmo.draw(&mut pass);
    }

    /// Draw the scene and the GUI built by `ui` into the next surface texture
    pub fn render(
        &mut self,
        window: &Window,
        frame: &FrameInput<'_>,
        ui: impl FnMut(&egui::Context),
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let scale_factor = window.scale_factor() as f32;
        self.upload(frame, scale_factor);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Encoder") });

        // Every shape is uploaded at startup
        if let Some(mesh) = self.meshes.get(&frame.scene.mesh.shape) {
            self.shadow_pass(&mut encoder, frame.scene, mesh);
            self.main_pass(&mut encoder, &view, frame.scene, mesh);
        }

        self.gui_pass(window, &mut encoder, &view, ui);

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn gui_pass(
        &mut self,
        window: &Window,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        ui: impl FnMut(&egui::Context),
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, ui);

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        let device = self.gpu.device();
        let queue = self.gpu.queue();
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
