//! Application state shared between the host loop and the editor
//!
//! The host owns one [`Application`], feeds it window events and calls
//! [`Application::begin_frame`] once per frame. Everything the editor needs
//! to reach (scenes, input, virtual files, sounds, render API, play state)
//! hangs off this struct and is passed around as `&mut Application`.

use crate::audio::SoundLibrary;
use crate::config::EngineConfig;
use crate::core::camera::Camera;
use crate::core::entity::update_hierarchy_system;
use crate::core::time::TimeStep;
use crate::graphics::{GraphicsInfo, RenderApi};
use crate::input::InputState;
use crate::io::Vfs;
use crate::scene::SceneManager;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, info};
use winit::event::{MouseScrollDelta, WindowEvent};

/// Simulation play state driven by the editor toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Playing,
    Paused,
    /// Run exactly one update, then pause
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Running,
    Closing,
}

const FRAME_HISTORY: usize = 120;

/// Rolling frame timings for the profiler window
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frame_count: u64,
    pub fps: f32,
    history: VecDeque<f32>,
}

impl FrameStats {
    pub fn record(&mut self, dt: f32) {
        self.frame_count += 1;
        if self.history.len() == FRAME_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(dt * 1000.0);
        let average_ms = self.average_frame_ms();
        self.fps = if average_ms > 0.0 { 1000.0 / average_ms } else { 0.0 };
    }

    /// Frame times in milliseconds, oldest first
    pub fn history_ms(&self) -> Vec<f32> {
        self.history.iter().copied().collect()
    }

    pub fn average_frame_ms(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }
}

pub struct Application {
    pub scenes: SceneManager,
    pub input: InputState,
    pub vfs: Vfs,
    pub sounds: SoundLibrary,
    pub play_state: PlayState,
    pub state: AppState,
    pub render_api: RenderApi,
    pub graphics_info: Option<GraphicsInfo>,
    pub config: EngineConfig,
    /// Where `config` was loaded from; the render API menu writes back here
    pub config_path: Option<PathBuf>,
    /// Size of the scene view in pixels, used for camera aspect ratios
    pub scene_view_size: (u32, u32),
    /// Whether the scene view is hovered or focused and should receive camera input
    pub scene_view_active: bool,
    pub frame_stats: FrameStats,
    pub time: TimeStep,
}

impl Application {
    pub fn new(config: EngineConfig) -> Self {
        info!("Creating Application with config: {:?}", config);
        Self {
            scenes: SceneManager::new(),
            input: InputState::new(),
            vfs: config.build_vfs(),
            sounds: SoundLibrary::new(),
            play_state: PlayState::default(),
            state: AppState::default(),
            render_api: config.render_api,
            graphics_info: None,
            config_path: None,
            scene_view_size: config.window_size,
            scene_view_active: false,
            frame_stats: FrameStats::default(),
            time: TimeStep::default(),
            config,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Record the graphics context actually created by the host
    pub fn set_graphics_info(&mut self, info: GraphicsInfo) {
        self.render_api = info.api;
        self.graphics_info = Some(info);
    }

    /// Start a frame: apply a queued scene switch and propagate transforms.
    ///
    /// Returns true when a new scene was loaded this frame.
    pub fn begin_frame(&mut self, time: TimeStep) -> bool {
        self.time = time;
        self.frame_stats.record(time.dt);

        let new_scene = self.scenes.apply_pending_switch();
        if new_scene {
            debug!(scene = self.scenes.current_name(), "Switched scene");
        }

        let (width, height) = self.scene_view_size;
        if width > 0 && height > 0 {
            let aspect = width as f32 / height as f32;
            for (_, camera) in self.scenes.current_mut().world.query_mut::<&mut Camera>() {
                camera.set_aspect_ratio(aspect);
            }
        }

        update_hierarchy_system(&mut self.scenes.current_mut().world);
        new_scene
    }

    /// Whether simulation should advance this frame. A pending step is consumed.
    pub fn should_simulate(&mut self) -> bool {
        match self.play_state {
            PlayState::Playing => true,
            PlayState::Paused => false,
            PlayState::Step => {
                self.play_state = PlayState::Paused;
                true
            }
        }
    }

    /// End-of-frame bookkeeping
    pub fn end_frame(&mut self) {
        self.input.clear_frame_data();
    }

    pub fn request_close(&mut self) {
        info!("Application close requested");
        self.state = AppState::Closing;
    }

    pub fn is_closing(&self) -> bool {
        self.state == AppState::Closing
    }

    /// Feed window input into [`InputState`]
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.handle_keyboard_event(event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                let old_pos = self.input.mouse_position;
                self.input.set_mouse_position(new_pos.0, new_pos.1);
                self.input
                    .add_mouse_delta(new_pos.0 - old_pos.0, new_pos.1 - old_pos.1);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.input.handle_mouse_button(*button, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                };
                self.input.add_scroll(lines);
            }
            WindowEvent::CloseRequested => self.request_close(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{GlobalTransform, Name, Transform};
    use glam::Vec3;

    fn app_with_scene() -> Application {
        let mut app = Application::new(EngineConfig::default());
        app.scenes.register("Main", |world| {
            world.spawn((
                Name::new("camera"),
                Camera::default(),
                Transform::from_position(Vec3::Z),
            ));
        });
        app
    }

    #[test]
    fn test_begin_frame_loads_first_scene() {
        let mut app = app_with_scene();
        assert!(app.begin_frame(TimeStep::new(0.016, 0.016)));
        assert!(!app.begin_frame(TimeStep::new(0.016, 0.032)));
        assert_eq!(app.scenes.current_name(), "Main");
    }

    #[test]
    fn test_begin_frame_updates_transforms_and_aspect() {
        let mut app = app_with_scene();
        app.scene_view_size = (800, 400);
        app.begin_frame(TimeStep::new(0.016, 0.016));

        let world = &app.scenes.current().world;
        let (entity, camera) = world
            .query::<&Camera>()
            .iter()
            .map(|(entity, camera)| (entity, *camera))
            .next()
            .unwrap();
        assert_eq!(camera.aspect_ratio, 2.0);
        assert_eq!(world.get::<GlobalTransform>(entity).unwrap().position(), Vec3::Z);
    }

    #[test]
    fn test_step_runs_once() {
        let mut app = app_with_scene();
        app.play_state = PlayState::Step;
        assert!(app.should_simulate());
        assert_eq!(app.play_state, PlayState::Paused);
        assert!(!app.should_simulate());
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::default();
        for _ in 0..(FRAME_HISTORY + 10) {
            stats.record(0.02);
        }
        assert_eq!(stats.history_ms().len(), FRAME_HISTORY);
        assert!((stats.fps - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_request_close() {
        let mut app = Application::new(EngineConfig::default());
        assert!(!app.is_closing());
        app.request_close();
        assert!(app.is_closing());
    }
}
