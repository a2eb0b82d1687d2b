//! Editor host: winit window, wgpu surface and the editor frame loop

mod scenes;

use editor::{ConsoleLayer, Editor, EditorSettings, ImGuiHost};
use engine::core::time::FrameClock;
use engine::prelude::*;
use std::sync::Arc;
use tracing::{error, info, warn};
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowAttributes,
};

fn main() {
    engine::init_logging_with(ConsoleLayer::new());
    info!("Starting editor sandbox");

    let config_path = EngineConfig::default_path();
    let config = EngineConfig::load_or_default(&config_path).unwrap_or_else(|e| {
        warn!("Failed to load engine config, using defaults: {e}");
        EngineConfig::default()
    });

    let event_loop = EventLoop::builder()
        .build()
        .expect("Failed to create event loop");
    let (width, height) = config.window_size;
    let window_attributes = WindowAttributes::default()
        .with_title(config.window_title.clone())
        .with_inner_size(PhysicalSize::new(width, height));

    #[allow(deprecated)] // Using create_window on EventLoop for simplicity
    let window = Arc::new(
        event_loop
            .create_window(window_attributes)
            .expect("Failed to create window"),
    );

    let (graphics, surface) =
        pollster::block_on(GraphicsContext::for_window(window.clone(), config.render_api))
            .expect("Failed to create graphics context");

    let size = window.inner_size();
    let mut surface_config = graphics
        .surface_configuration(&surface, size.width, size.height)
        .expect("Failed to configure surface");
    surface.configure(&graphics.device, &surface_config);

    let settings = EditorSettings::load();
    let mut imgui = ImGuiHost::new(&graphics, surface_config.format, &window, settings.theme);

    let mut app = Application::new(config).with_config_path(config_path);
    app.set_graphics_info(graphics.info().clone());
    scenes::register(&mut app.scenes);

    let mut editor = Editor::new(settings).with_settings_path(EditorSettings::default_path());
    editor.on_init(&mut app);

    let mut clock = FrameClock::new();

    #[allow(deprecated)] // Using the simpler closure-based API for now
    let _ = event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent { event, .. } => {
                imgui.handle_event(&window, &event);
                app.handle_window_event(&event);
                editor.on_event(&mut app, &event);

                match event {
                    WindowEvent::Resized(physical_size) => {
                        info!("Window resized to {:?}", physical_size);
                        if physical_size.width > 0 && physical_size.height > 0 {
                            surface_config.width = physical_size.width;
                            surface_config.height = physical_size.height;
                            surface.configure(&graphics.device, &surface_config);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        // Skip rendering if window is minimized
                        let size = window.inner_size();
                        if size.width == 0 || size.height == 0 {
                            return;
                        }

                        let time = clock.tick();
                        if app.begin_frame(time) {
                            editor.on_new_scene(&mut app);
                        }
                        editor.on_update(&mut app, time);
                        if app.should_simulate() {
                            let scene = app.scenes.current_mut();
                            scenes::animate(&mut scene.world, time);
                            scene.update_objects(time);
                        }
                        app.scenes.current_mut().render_objects();
                        editor.on_render(&app);

                        let surface_texture = match surface.get_current_texture() {
                            Ok(texture) => texture,
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                info!("Surface lost, reconfiguring");
                                surface.configure(&graphics.device, &surface_config);
                                return;
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("Out of GPU memory, exiting");
                                elwt.exit();
                                return;
                            }
                            Err(e) => {
                                warn!(error = ?e, "Skipping frame");
                                return;
                            }
                        };
                        let view = surface_texture
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());

                        imgui.render_frame(&window, &graphics, &view, time.dt, |ui| {
                            editor.on_imgui(ui, &mut app);
                        });
                        surface_texture.present();

                        if let Some(theme) = editor.take_pending_theme() {
                            imgui.set_theme(theme);
                        }
                        app.end_frame();
                    }
                    _ => {}
                }

                if app.is_closing() {
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("Shutting down");
                editor.on_shutdown();
            }
            _ => {}
        }
    });
}
