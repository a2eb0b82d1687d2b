//! ImGui integration for the host window
//!
//! Owns the ImGui context, the winit platform glue and the wgpu renderer.
//! The host forwards window events here and draws one editor frame per
//! redraw through [`ImGuiHost::render_frame`].

use crate::theme::Theme;
use engine::graphics::GraphicsContext;
use imgui::{ConfigFlags, Ui};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Duration;
use tracing::{debug, error, info};
use winit::event::{Event, WindowEvent};
use winit::window::Window;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

pub struct ImGuiHost {
    context: imgui::Context,
    platform: WinitPlatform,
    renderer: Renderer,
}

impl ImGuiHost {
    pub fn new(
        graphics: &GraphicsContext,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        theme: Theme,
    ) -> Self {
        info!("Initializing ImGui");

        let mut context = imgui::Context::create();
        // Layout comes from the editor's default dock layout on every start
        context.set_ini_filename(None);
        context.io_mut().config_flags |= ConfigFlags::DOCKING_ENABLE;
        theme.apply(context.style_mut());

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Default);

        let renderer_config = RendererConfig {
            texture_format: surface_format,
            ..Default::default()
        };
        let renderer = Renderer::new(
            &mut context,
            &graphics.device,
            &graphics.queue,
            renderer_config,
        );

        debug!(
            "ImGui display size {:?}, scale {}",
            context.io().display_size,
            window.scale_factor()
        );

        Self {
            context,
            platform,
            renderer,
        }
    }

    /// Feed a window event to ImGui
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) {
        self.platform.handle_event::<()>(
            self.context.io_mut(),
            window,
            &Event::WindowEvent {
                window_id: window.id(),
                event: event.clone(),
            },
        );
    }

    pub fn set_theme(&mut self, theme: Theme) {
        theme.apply(self.context.style_mut());
    }

    /// Build the UI with `build` and draw it onto `view`
    pub fn render_frame(
        &mut self,
        window: &Window,
        graphics: &GraphicsContext,
        view: &wgpu::TextureView,
        dt: f32,
        build: impl FnOnce(&Ui),
    ) {
        self.context
            .io_mut()
            .update_delta_time(Duration::from_secs_f32(dt.max(f32::EPSILON)));

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            error!("ImGui prepare_frame failed: {e:?}");
            return;
        }

        let ui = self.context.new_frame();
        build(ui);
        self.platform.prepare_render(ui, window);
        let draw_data = self.context.render();

        let mut encoder = graphics.create_command_encoder(Some("ImGui Render Encoder"));
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ImGui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Err(e) =
                self.renderer
                    .render(draw_data, &graphics.queue, &graphics.device, &mut pass)
            {
                error!("ImGui render failed: {e:?}");
            }
        }
        graphics.submit(std::iter::once(encoder.finish()));
    }
}
