// SPDX-License-Identifier: Apache-2.0
//! GPU setup and scene resources for the viewer.

use crate::disposal::{DisposalSet, GpuHandle};
use anyhow::Result;
use bytemuck::Zeroable;
use glam::{Mat4, Vec3};
use orrery_scene::{SceneDef, MARKER_RADIUS, VEIL_OPACITY, VEIL_RADIUS};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Upper bound on the device pixel ratio applied to the render buffer.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Color of the translucent veil sphere (alpha comes from the scene).
const VEIL_COLOR: [f32; 3] = [0.45, 0.55, 0.85];

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

/// One instanced sphere: node markers plus the veil.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// One resolved edge, six floats: start xyz then end xyz.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EdgeInstance {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

/// Helper-line vertex (axes, grid).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 3],
    pub ambient: f32,
    pub edge_color: [f32; 3],
    pub _pad: f32,
}

pub struct Mesh {
    pub vbuf: wgpu::Buffer,
    pub ibuf: wgpu::Buffer,
    pub count: u32,
}

pub struct Pipelines {
    pub marker: wgpu::RenderPipeline,
    pub veil: wgpu::RenderPipeline,
    pub edge: wgpu::RenderPipeline,
    pub line: wgpu::RenderPipeline,
}

/// Static scene geometry uploaded once at mount; nodes are immutable.
pub struct SceneBuffers {
    pub marker_instances: wgpu::Buffer,
    pub marker_count: u32,
    /// The veil instance sits after the markers in the same buffer.
    pub veil_offset: u32,
    pub edge_buf: wgpu::Buffer,
    pub edge_count: u32,
    pub axes_buf: wgpu::Buffer,
    pub axes_count: u32,
    pub grid_buf: wgpu::Buffer,
    pub grid_count: u32,
}

pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub sample_count: u32,
    pub max_tex: u32,
    pub scale_factor: f64,
    pub msaa_view: Option<wgpu::TextureView>,
    pub depth: wgpu::TextureView,
    pub mesh_marker: Mesh,
    pub mesh_veil: Mesh,
    pub globals_buf: wgpu::Buffer,
    pub scene: SceneBuffers,
    pub bind_group: wgpu::BindGroup,
    pub pipelines: Pipelines,
    pub manifest: DisposalSet<GpuHandle>,
}

impl Gpu {
    pub async fn new(window: &'static Window, scene: &SceneDef, vsync: bool) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let limits = adapter.limits();
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("orrery-viewer-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(limits.clone()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
            })
            .await?;

        let scale_factor = window.scale_factor();
        let size = render_extent(window.inner_size(), scale_factor);
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let pmode_fast = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::PresentMode::Immediate | wgpu::PresentMode::AutoNoVsync
                )
            })
            .unwrap_or(wgpu::PresentMode::Fifo);
        let pmode_vsync = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| matches!(m, wgpu::PresentMode::Fifo))
            .unwrap_or(pmode_fast);
        let max_dim = limits.max_texture_dimension_2d;
        let sample_count = 4;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.min(max_dim).max(1),
            height: size.height.min(max_dim).max(1),
            present_mode: if vsync { pmode_vsync } else { pmode_fast },
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = create_depth(&device, config.width, config.height, sample_count);
        let msaa_view = create_msaa(
            &device,
            config.format,
            config.width,
            config.height,
            sample_count,
        );

        let mut manifest = DisposalSet::new();

        let mesh_marker = unit_uv_sphere(&device, 24, 16, "marker_sphere");
        let mesh_veil = unit_uv_sphere(&device, 48, 24, "veil_sphere");
        manifest.track(GpuHandle(mesh_marker.vbuf.clone()));
        manifest.track(GpuHandle(mesh_marker.ibuf.clone()));
        manifest.track(GpuHandle(mesh_veil.vbuf.clone()));
        manifest.track(GpuHandle(mesh_veil.ibuf.clone()));

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        manifest.track(GpuHandle(globals_buf.clone()));

        let scene_buffers = build_scene_buffers(&device, scene, &mut manifest);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let shader_markers = device.create_shader_module(wgpu::include_wgsl!("shader_markers.wgsl"));
        let shader_edges = device.create_shader_module(wgpu::include_wgsl!("shader_edges.wgsl"));
        let shader_lines = device.create_shader_module(wgpu::include_wgsl!("shader_lines.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let sphere_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0=>Float32x3,1=>Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2=>Float32x4,
                    3=>Float32x4,
                    4=>Float32x4,
                    5=>Float32x4,
                    6=>Float32x4
                ],
            },
        ];

        let marker = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("marker_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_markers,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &sphere_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_markers,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        // same shader, but double-sided and without depth writes so the
        // veil never occludes the opaque scene
        let veil = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("veil_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_markers,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &sphere_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_markers,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        let edge = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("edge_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_edges,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<EdgeInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0=>Float32x3,1=>Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_edges,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        let line = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_lines,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0=>Float32x3,1=>Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_lines,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sample_count,
            max_tex: max_dim,
            scale_factor,
            msaa_view,
            depth,
            mesh_marker,
            mesh_veil,
            globals_buf,
            scene: scene_buffers,
            bind_group,
            pipelines: Pipelines {
                marker,
                veil,
                edge,
                line,
            },
            manifest,
        })
    }

    /// Reconfigure the surface for a new window size. Zero-area sizes
    /// are ignored; the previous configuration stays in effect.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        let extent = render_extent(size, self.scale_factor);
        self.config.width = extent.width.min(self.max_tex);
        self.config.height = extent.height.min(self.max_tex);
        self.surface.configure(&self.device, &self.config);
        self.depth = create_depth(
            &self.device,
            self.config.width,
            self.config.height,
            self.sample_count,
        );
        self.msaa_view = create_msaa(
            &self.device,
            self.config.format,
            self.config.width,
            self.config.height,
            self.sample_count,
        );
    }

    /// Adopt a new device pixel ratio (clamped on application) and
    /// resize accordingly.
    pub fn rescale(&mut self, scale_factor: f64, size: PhysicalSize<u32>) {
        self.scale_factor = scale_factor;
        self.resize(size);
    }

    /// Release every scene allocation, then the device and surface.
    /// Returns the number of manifest handles released.
    pub fn dispose(mut self) -> usize {
        let released = self.manifest.drain();
        debug_assert!(self.manifest.is_empty());
        released
        // surface and device drop here, detaching the output from the
        // host window and releasing the graphics context
    }
}

/// Render-buffer extent for a physical window size, with the device
/// pixel ratio clamped to [`MAX_PIXEL_RATIO`].
pub fn render_extent(size: PhysicalSize<u32>, scale_factor: f64) -> PhysicalSize<u32> {
    let ratio = if scale_factor > MAX_PIXEL_RATIO && scale_factor.is_finite() {
        MAX_PIXEL_RATIO / scale_factor
    } else {
        1.0
    };
    PhysicalSize::new(
        ((f64::from(size.width) * ratio).round() as u32).max(1),
        ((f64::from(size.height) * ratio).round() as u32).max(1),
    )
}

// Helpers ------------------------------------------------------------

fn build_scene_buffers(
    device: &wgpu::Device,
    scene: &SceneDef,
    manifest: &mut DisposalSet<GpuHandle>,
) -> SceneBuffers {
    let mut instances: Vec<MarkerInstance> = scene
        .nodes
        .iter()
        .map(|n| MarkerInstance {
            model: (Mat4::from_translation(Vec3::from_array(n.position))
                * Mat4::from_scale(Vec3::splat(MARKER_RADIUS)))
            .to_cols_array_2d(),
            color: [n.color[0], n.color[1], n.color[2], 1.0],
        })
        .collect();
    let marker_count = instances.len() as u32;
    let veil_offset = marker_count;
    instances.push(MarkerInstance {
        model: Mat4::from_scale(Vec3::splat(VEIL_RADIUS)).to_cols_array_2d(),
        color: [VEIL_COLOR[0], VEIL_COLOR[1], VEIL_COLOR[2], VEIL_OPACITY],
    });
    let marker_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("marker_instances"),
        contents: bytemuck::cast_slice(&instances),
        usage: wgpu::BufferUsages::VERTEX,
    });
    manifest.track(GpuHandle(marker_instances.clone()));

    let resolved = scene.resolve_edges();
    let mut edges: Vec<EdgeInstance> = resolved
        .segments
        .iter()
        .map(|s| EdgeInstance {
            start: s.start,
            end: s.end,
        })
        .collect();
    let edge_count = edges.len() as u32;
    if edges.is_empty() {
        // keep a non-empty allocation; the draw is skipped via edge_count
        edges.push(EdgeInstance::zeroed());
    }
    let edge_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("edges"),
        contents: bytemuck::cast_slice(&edges),
        usage: wgpu::BufferUsages::VERTEX,
    });
    manifest.track(GpuHandle(edge_buf.clone()));

    let axes = axes_lines(2.0);
    let axes_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("axes"),
        contents: bytemuck::cast_slice(&axes),
        usage: wgpu::BufferUsages::VERTEX,
    });
    manifest.track(GpuHandle(axes_buf.clone()));

    let grid = grid_lines(10.0, 10);
    let grid_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("grid"),
        contents: bytemuck::cast_slice(&grid),
        usage: wgpu::BufferUsages::VERTEX,
    });
    manifest.track(GpuHandle(grid_buf.clone()));

    SceneBuffers {
        marker_instances,
        marker_count,
        veil_offset,
        edge_buf,
        edge_count,
        axes_buf,
        axes_count: axes.len() as u32,
        grid_buf,
        grid_count: grid.len() as u32,
    }
}

fn create_depth(device: &wgpu::Device, w: u32, h: u32, sample_count: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: w.max(1),
            height: h.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_msaa(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    w: u32,
    h: u32,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa_color"),
        size: wgpu::Extent3d {
            width: w.max(1),
            height: h.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(tex.create_view(&wgpu::TextureViewDescriptor::default()))
}

fn unit_uv_sphere(device: &wgpu::Device, segments: u32, rings: u32, label: &str) -> Mesh {
    let mut verts = Vec::new();
    let mut idx = Vec::new();
    for y in 0..=rings {
        let v = y as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let nx = phi.sin() * theta.sin();
            let ny = theta.cos();
            let nz = phi.cos() * theta.sin();
            verts.push(Vertex {
                pos: [nx, ny, nz],
                normal: [nx, ny, nz],
            });
        }
    }
    let stride = segments + 1;
    for y in 0..rings {
        for x in 0..segments {
            let i0 = y * stride + x;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            idx.extend_from_slice(&[i0 as u16, i2 as u16, i1 as u16]);
            idx.extend_from_slice(&[i1 as u16, i2 as u16, i3 as u16]);
        }
    }

    let vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&idx),
        usage: wgpu::BufferUsages::INDEX,
    });
    Mesh {
        vbuf,
        ibuf,
        count: idx.len() as u32,
    }
}

/// Origin-anchored coordinate axes: X red, Y green, Z blue.
fn axes_lines(len: f32) -> Vec<LineVertex> {
    let x = [0.85, 0.25, 0.25];
    let y = [0.3, 0.8, 0.3];
    let z = [0.25, 0.4, 0.9];
    vec![
        LineVertex {
            pos: [0.0, 0.0, 0.0],
            color: x,
        },
        LineVertex {
            pos: [len, 0.0, 0.0],
            color: x,
        },
        LineVertex {
            pos: [0.0, 0.0, 0.0],
            color: y,
        },
        LineVertex {
            pos: [0.0, len, 0.0],
            color: y,
        },
        LineVertex {
            pos: [0.0, 0.0, 0.0],
            color: z,
        },
        LineVertex {
            pos: [0.0, 0.0, len],
            color: z,
        },
    ]
}

/// XZ ground grid centered on the origin; the two center lines are
/// brighter than the rest.
fn grid_lines(size: f32, divisions: u32) -> Vec<LineVertex> {
    let center = [0.27, 0.27, 0.27]; // 0x444444
    let minor = [0.16, 0.16, 0.16]; // 0x282828
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut verts = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let t = -half + i as f32 * step;
        let color = if i * 2 == divisions { center } else { minor };
        verts.push(LineVertex {
            pos: [t, 0.0, -half],
            color,
        });
        verts.push(LineVertex {
            pos: [t, 0.0, half],
            color,
        });
        verts.push(LineVertex {
            pos: [-half, 0.0, t],
            color,
        });
        verts.push(LineVertex {
            pos: [half, 0.0, t],
            color,
        });
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_extent_is_identity_at_or_below_the_clamp() {
        let size = PhysicalSize::new(800, 600);
        assert_eq!(render_extent(size, 1.0), size);
        assert_eq!(render_extent(size, 2.0), size);
    }

    #[test]
    fn render_extent_scales_down_past_the_clamp() {
        // physical = logical * 3, applied ratio must be min(3, 2)
        let size = PhysicalSize::new(900, 600);
        assert_eq!(render_extent(size, 3.0), PhysicalSize::new(600, 400));
        let size = PhysicalSize::new(1200, 800);
        assert_eq!(render_extent(size, 4.0), PhysicalSize::new(600, 400));
    }

    #[test]
    fn render_extent_never_collapses_to_zero() {
        let got = render_extent(PhysicalSize::new(1, 1), 1000.0);
        assert!(got.width >= 1 && got.height >= 1);
    }

    #[test]
    fn grid_has_paired_vertices_and_bright_center_lines() {
        let grid = grid_lines(10.0, 10);
        assert_eq!(grid.len(), 44);
        assert_eq!(grid.len() % 2, 0);
        let bright: Vec<_> = grid.iter().filter(|v| v.color == [0.27, 0.27, 0.27]).collect();
        // two center lines, four vertices
        assert_eq!(bright.len(), 4);
        for v in bright {
            assert!(v.pos[0] == 0.0 || v.pos[2] == 0.0);
        }
    }

    #[test]
    fn axes_start_at_the_origin() {
        let axes = axes_lines(2.0);
        assert_eq!(axes.len(), 6);
        for pair in axes.chunks(2) {
            assert_eq!(pair[0].pos, [0.0, 0.0, 0.0]);
        }
        assert_eq!(axes[1].pos, [2.0, 0.0, 0.0]);
        assert_eq!(axes[3].pos, [0.0, 2.0, 0.0]);
        assert_eq!(axes[5].pos, [0.0, 0.0, 2.0]);
    }

    #[test]
    fn sphere_mesh_indices_stay_in_u16_range() {
        let verts = (48 + 1) * (24 + 1);
        assert!(verts < usize::from(u16::MAX));
    }

    #[test]
    fn globals_layout_matches_the_shader_struct() {
        // mat4x4 + two vec3/f32 pairs, std140-compatible
        assert_eq!(std::mem::size_of::<Globals>(), 96);
    }
}
