// SPDX-License-Identifier: Apache-2.0
//! Per-frame rendering: write globals, draw helpers, edges, markers,
//! then the translucent veil last so blending sees the opaque scene.

use crate::gpu::{EdgeInstance, Globals, Gpu, MarkerInstance};
use glam::Mat4;
use orrery_scene::BACKGROUND_SRGB;
use winit::dpi::PhysicalSize;

const LIGHT_DIR: [f32; 3] = [0.2, 0.7, 0.6];
const AMBIENT: f32 = 0.35;
const EDGE_COLOR: [f32; 3] = [0.62, 0.68, 0.8];

/// Which helper objects to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct HelperFlags {
    pub show_grid: bool,
    pub show_axes: bool,
}

/// Render one frame from the given view-projection.
pub fn render_frame(gpu: &mut Gpu, view_proj: Mat4, helpers: HelperFlags) {
    let globals = Globals {
        view_proj: view_proj.to_cols_array_2d(),
        light_dir: LIGHT_DIR,
        ambient: AMBIENT,
        edge_color: EDGE_COLOR,
        _pad: 0.0,
    };
    gpu.queue
        .write_buffer(&gpu.globals_buf, 0, bytemuck::bytes_of(&globals));

    let frame = match gpu.surface.get_current_texture() {
        Ok(f) => f,
        Err(wgpu::SurfaceError::Lost) => {
            gpu.resize(PhysicalSize::new(gpu.config.width, gpu.config.height));
            match gpu.surface.get_current_texture() {
                Ok(f) => f,
                Err(_) => return,
            }
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            tracing::error!("surface out of memory");
            std::process::exit(1);
        }
        Err(_) => return,
    };
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let (color_view, resolve_view) = if let Some(msaa) = &gpu.msaa_view {
        (msaa, Some(&view))
    } else {
        (&view, None)
    };

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });

    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: resolve_view,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background_clear_color()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &gpu.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if helpers.show_grid {
            rpass.set_pipeline(&gpu.pipelines.line);
            rpass.set_bind_group(0, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.scene.grid_buf.slice(..));
            rpass.draw(0..gpu.scene.grid_count, 0..1);
        }
        if helpers.show_axes {
            rpass.set_pipeline(&gpu.pipelines.line);
            rpass.set_bind_group(0, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.scene.axes_buf.slice(..));
            rpass.draw(0..gpu.scene.axes_count, 0..1);
        }

        if gpu.scene.edge_count > 0 {
            rpass.set_pipeline(&gpu.pipelines.edge);
            rpass.set_bind_group(0, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(
                0,
                gpu.scene.edge_buf.slice(
                    ..(u64::from(gpu.scene.edge_count)
                        * std::mem::size_of::<EdgeInstance>() as u64),
                ),
            );
            rpass.draw(0..2, 0..gpu.scene.edge_count);
        }

        rpass.set_pipeline(&gpu.pipelines.marker);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.mesh_marker.vbuf.slice(..));
        rpass.set_vertex_buffer(
            1,
            gpu.scene.marker_instances.slice(
                ..(u64::from(gpu.scene.marker_count)
                    * std::mem::size_of::<MarkerInstance>() as u64),
            ),
        );
        rpass.set_index_buffer(gpu.mesh_marker.ibuf.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..gpu.mesh_marker.count, 0, 0..gpu.scene.marker_count);

        // translucent veil last: depth writes are off, blending reads
        // whatever the opaque passes left behind
        let veil_bytes = u64::from(gpu.scene.veil_offset) * std::mem::size_of::<MarkerInstance>() as u64;
        rpass.set_pipeline(&gpu.pipelines.veil);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.mesh_veil.vbuf.slice(..));
        rpass.set_vertex_buffer(1, gpu.scene.marker_instances.slice(veil_bytes..));
        rpass.set_index_buffer(gpu.mesh_veil.ibuf.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..gpu.mesh_veil.count, 0, 0..1);
    }

    gpu.queue.submit([encoder.finish()]);
    frame.present();
}

/// The fixed background (#0b0f19) converted to the linear clear color
/// wgpu expects on an sRGB surface.
fn background_clear_color() -> wgpu::Color {
    let [r, g, b] = BACKGROUND_SRGB;
    wgpu::Color {
        r: srgb_to_linear(f64::from(r)),
        g: srgb_to_linear(f64::from(g)),
        b: srgb_to_linear(f64::from(b)),
        a: 1.0,
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn srgb_conversion_matches_reference_points() {
        assert_relative_eq!(srgb_to_linear(0.0), 0.0);
        assert_relative_eq!(srgb_to_linear(1.0), 1.0, epsilon = 1e-9);
        // low end uses the linear segment
        assert_relative_eq!(srgb_to_linear(0.04), 0.04 / 12.92, epsilon = 1e-9);
    }

    #[test]
    fn background_is_dark_blue_ish() {
        let c = background_clear_color();
        assert!(c.b > c.r);
        assert!(c.r < 0.01 && c.g < 0.01 && c.b < 0.02);
        assert_eq!(c.a, 1.0);
    }
}
