//! The scene editor
//!
//! [`Editor`] owns the dockable windows, the selection, the gizmo state and
//! the editor camera binding. The host drives it once per frame through
//! `on_update`, `on_imgui` and `on_render`, forwards window events to
//! `on_event` and calls `on_new_scene` after a scene switch.

use crate::camera_controller::EditorCameraController;
use crate::camera_transition::{plan_focus, CameraTransition, Focus, FOCUS_DISTANCE, FOCUS_SPEED};
use crate::commands::{CommandQueue, EditorCommand};
use crate::file_types::FileKind;
use crate::gizmo::GizmoState;
use crate::layout::{DockLayout, Rect};
use crate::panels::{
    ApplicationInfoPanel, AssetsPanel, ConsolePanel, GraphicsInfoPanel, HierarchyPanel,
    InspectorPanel, PreviewPanel, ProfilerPanel, ScenePanel, TextEditPanel, TEXT_EDIT_NAME,
};
use crate::picking::{world_bounds, PickTracker};
use crate::scene_operations;
use crate::settings::EditorSettings;
use crate::theme::Theme;
use crate::window::{EditorContext, EditorWindow, WindowId, WindowList};
use engine::audio::SoundNode;
use engine::core::bounds::Ray;
use engine::graphics::debug_draw::{COLOR_BOUNDS, COLOR_FRUSTUM, COLOR_SELECTED};
use engine::graphics::{load_model, LightKind};
use engine::prelude::*;
use engine::utils::paths::file_name;
use engine::winit::event::{MouseButton, WindowEvent};
use engine::winit::keyboard::KeyCode;
use imgui::{Condition, Ui};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

const SOUND_RADIUS_COLOR: Vec4 = Vec4::new(0.2, 0.5, 0.9, 0.4);

pub struct Editor {
    windows: WindowList,
    selection: Option<Entity>,
    gizmo: GizmoState,
    picker: PickTracker,
    transition: Option<CameraTransition>,
    camera_controller: EditorCameraController,
    editor_camera: Option<Entity>,
    debug: DebugRenderer,
    settings: EditorSettings,
    settings_path: Option<PathBuf>,
    commands: CommandQueue,
    restart_needed: bool,
    show_demo: bool,
    pending_theme: Option<Theme>,
    text_input_active: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let gizmo = GizmoState {
            show: settings.show_gizmos,
            snap_amount: settings.snap_amount,
            ..GizmoState::default()
        };
        Self {
            windows: WindowList::new(),
            selection: None,
            gizmo,
            picker: PickTracker::default(),
            transition: None,
            camera_controller: EditorCameraController::default(),
            editor_camera: None,
            debug: DebugRenderer::new(),
            settings,
            settings_path: None,
            commands: CommandQueue::new(),
            restart_needed: false,
            show_demo: false,
            pending_theme: None,
            text_input_active: false,
        }
    }

    /// Persist settings to `path` on shutdown
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn selection(&self) -> Option<Entity> {
        self.selection
    }

    pub fn set_selection(&mut self, entity: Option<Entity>) {
        self.selection = entity;
    }

    pub fn windows(&self) -> &WindowList {
        &self.windows
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn editor_camera(&self) -> Option<Entity> {
        self.editor_camera
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a render API change is waiting for a restart
    pub fn restart_needed(&self) -> bool {
        self.restart_needed
    }

    pub fn debug_renderer(&self) -> &DebugRenderer {
        &self.debug
    }

    /// A theme chosen from the Style menu, for the host to apply to ImGui
    pub fn take_pending_theme(&mut self) -> Option<Theme> {
        self.pending_theme.take()
    }

    pub fn add_window(&mut self, window: Box<dyn EditorWindow>) -> WindowId {
        self.windows.add(window)
    }

    /// Remove a window; unknown ids are ignored
    pub fn remove_window(&mut self, id: WindowId) {
        if self.windows.remove(id) {
            debug!(?id, "Removed editor window");
        }
    }

    pub fn on_init(&mut self, app: &mut Application) {
        info!("Initializing editor");
        let windows: [Box<dyn EditorWindow>; 9] = [
            Box::new(ConsolePanel::new()),
            Box::new(ScenePanel::new()),
            Box::new(ProfilerPanel::new()),
            Box::new(InspectorPanel::new()),
            Box::new(HierarchyPanel::new()),
            Box::new(GraphicsInfoPanel::new()),
            Box::new(ApplicationInfoPanel::new()),
            Box::new(AssetsPanel::new()),
            Box::new(PreviewPanel::new()),
        ];
        for window in windows {
            self.windows.add(window);
        }

        for entry in self.windows.iter_mut() {
            if let Some(open) = self.settings.open_windows.get(entry.window.simple_name()) {
                entry.active = *open;
            }
        }

        self.bind_editor_camera(&app.scenes.current().world);
    }

    pub fn on_update(&mut self, app: &mut Application, time: TimeStep) {
        let world = &app.scenes.current().world;
        if self.selection.is_some_and(|entity| !world.contains(entity)) {
            self.selection = None;
        }
        if self
            .editor_camera
            .map_or(true, |camera| !world.has::<Camera>(camera) || !world.has::<Transform>(camera))
        {
            self.bind_editor_camera(world);
        }

        if !self.text_input_active {
            self.gizmo.handle_keys(&app.input);
            if app.input.is_key_just_pressed(KeyCode::KeyF)
                && !app.input.is_mouse_button_pressed(MouseButton::Right)
            {
                self.focus_selection(app, time.elapsed);
            }
        }

        let Some(camera_entity) = self.editor_camera else {
            return;
        };
        let world = &mut app.scenes.current_mut().world;

        if let Some(transition) = self.transition {
            let (position, done) = transition.sample(time.elapsed);
            if let Some(transform) = world.try_get_mut::<Transform>(camera_entity) {
                transform.position = position;
            }
            if done {
                self.transition = None;
                if let Some(transform) = world.try_get::<Transform>(camera_entity) {
                    self.camera_controller.sync_from(&transform);
                }
            }
        } else if app.scene_view_active {
            if let Ok((transform, camera)) =
                world.query_one_mut::<(&mut Transform, &mut Camera)>(camera_entity)
            {
                self.camera_controller
                    .update(transform, camera, &app.input, time.dt);
            }
        }
    }

    pub fn on_imgui(&mut self, ui: &Ui, app: &mut Application) {
        self.text_input_active = ui.io().want_text_input;
        self.menu_bar(ui, app);
        ui.dockspace_over_main_viewport();

        let display = ui.io().display_size;
        let menu_height = ui.frame_height();
        let layout = DockLayout::compute(Rect::new(
            [0.0, menu_height],
            [display[0], (display[1] - menu_height).max(0.0)],
        ));

        let Self {
            windows,
            selection,
            commands,
            gizmo,
            settings,
            debug,
            editor_camera,
            ..
        } = self;
        for entry in windows.iter_mut() {
            if !entry.active {
                continue;
            }
            let rect = layout.region(entry.window.default_region());
            let id = entry.id;
            let window = &mut entry.window;
            let mut open = true;
            ui.window(window.name())
                .opened(&mut open)
                .position(rect.position, Condition::FirstUseEver)
                .size(rect.size, Condition::FirstUseEver)
                .flags(window.flags())
                .build(|| {
                    let mut ctx = EditorContext {
                        app: &mut *app,
                        selection: &mut *selection,
                        commands: &mut *commands,
                        gizmo: &mut *gizmo,
                        settings: &mut *settings,
                        debug_lines: debug.lines(),
                        editor_camera: *editor_camera,
                        window_id: id,
                    };
                    window.on_imgui(ui, &mut ctx);
                });
            entry.active = open;
        }

        if self.show_demo {
            ui.show_demo_window(&mut self.show_demo);
        }

        for command in self.commands.take() {
            self.execute(app, command);
        }
    }

    /// Collect debug lines for the Scene window to overlay on the next frame
    pub fn on_render(&mut self, app: &Application) {
        self.debug.clear();
        let scene = app.scenes.current();
        let world = &scene.world;
        let flags = self.settings.debug_draw;

        if flags.contains(DebugDrawFlags::MESH_BOUNDING_BOXES) {
            for (entity, (mesh, _)) in world.query::<(&MeshComponent, &Transform)>().iter() {
                if let Some(mesh) = mesh.active_mesh() {
                    let bounds = mesh.bounding_box().transform(world.world_matrix(entity));
                    self.debug.aabb(&bounds, COLOR_BOUNDS);
                }
            }
        }
        if flags.contains(DebugDrawFlags::SPRITE_BOXES) {
            for (entity, (sprite, _)) in world.query::<(&Sprite, &Transform)>().iter() {
                let bounds = sprite.bounding_box().transform(world.world_matrix(entity));
                self.debug.aabb(&bounds, COLOR_BOUNDS);
            }
        }
        if flags.contains(DebugDrawFlags::CAMERA_FRUSTUM) {
            for (entity, camera) in world.query::<&Camera>().iter() {
                if Some(entity) != self.editor_camera {
                    let corners = camera.frustum_corners(world.world_matrix(entity));
                    self.debug.frustum(&corners, COLOR_FRUSTUM);
                }
            }
        }
        for object in &scene.objects {
            object.debug_draw(flags, &mut self.debug);
        }

        if let Some(selected) = self.selection.filter(|e| world.contains(*e)) {
            self.draw_selection(world, selected);
        }
    }

    fn draw_selection(&mut self, world: &World, selected: Entity) {
        if let Some(bounds) = world_bounds(world, selected) {
            self.debug.aabb(&bounds, COLOR_SELECTED);
        }
        let matrix = world.world_matrix(selected);
        if Some(selected) != self.editor_camera {
            if let Some(camera) = world.try_get::<Camera>(selected) {
                self.debug.frustum(&camera.frustum_corners(matrix), COLOR_FRUSTUM);
            }
        }
        if let Some(light) = world.try_get::<Light>(selected) {
            if light.kind != LightKind::Directional {
                self.debug
                    .sphere(matrix.w_axis.truncate(), light.radius, light.color.extend(0.6));
            }
        }
        if let Some(node) = world.try_get::<SoundNode>(selected) {
            self.debug.sphere(node.position, node.radius, SOUND_RADIUS_COLOR);
        }
    }

    pub fn on_event(&mut self, app: &mut Application, event: &WindowEvent) {
        if let WindowEvent::DroppedFile(path) = event {
            self.file_open_callback(app, &path.to_string_lossy());
        }
    }

    /// Reset per-scene state after the host loaded a different scene
    pub fn on_new_scene(&mut self, app: &mut Application) {
        self.selection = None;
        self.transition = None;
        self.editor_camera = None;
        let scene = app.scenes.current();
        self.bind_editor_camera(&scene.world);
        for entry in self.windows.iter_mut() {
            entry.window.on_new_scene(scene);
        }
        info!(scene = scene.name(), "Editor switched scene");
    }

    /// Write settings, including which windows are open, to the settings path
    pub fn on_shutdown(&mut self) {
        for entry in self.windows.iter() {
            let name = entry.window.simple_name();
            if name != TEXT_EDIT_NAME {
                self.settings.open_windows.insert(name.to_string(), entry.active);
            }
        }
        self.settings.show_gizmos = self.gizmo.show;
        self.settings.snap_amount = self.gizmo.snap_amount;

        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save_to(path) {
                error!("Failed to save editor settings: {e}");
            }
        }
    }

    /// Apply a request raised by a window or a menu
    pub fn execute(&mut self, app: &mut Application, command: EditorCommand) {
        debug!(?command, "Executing editor command");
        match command {
            EditorCommand::OpenFile(path) => self.file_open_callback(app, &path),
            EditorCommand::OpenTextFile(path) => self.open_text_file(app, &path),
            EditorCommand::SelectRay(ray) => self.select_object(app, &ray),
            EditorCommand::FocusSelection => {
                let now = app.time.elapsed;
                self.focus_selection(app, now);
            }
            EditorCommand::SwitchScene(name) => {
                app.scenes.switch_scene(&name);
            }
            EditorCommand::ReloadScene => app.scenes.reload(),
            EditorCommand::SpawnEmpty => {
                let world = &mut app.scenes.current_mut().world;
                self.selection = Some(scene_operations::spawn_empty(world));
            }
            EditorCommand::SpawnPrimitive(primitive) => {
                let world = &mut app.scenes.current_mut().world;
                self.selection = Some(scene_operations::spawn_primitive(world, primitive));
            }
            EditorCommand::DeleteEntity(entity) => {
                let world = &mut app.scenes.current_mut().world;
                scene_operations::delete_entity(world, entity);
                if self.selection.is_some_and(|e| !world.contains(e)) {
                    self.selection = None;
                }
            }
            EditorCommand::SetRenderApi(api) => self.set_render_api(app, api),
            EditorCommand::SetTheme(theme) => {
                self.settings.theme = theme;
                self.pending_theme = Some(theme);
            }
            EditorCommand::CloseWindow(id) => self.remove_window(id),
        }
    }

    /// Open `path` in the text editor, replacing any open text editor window
    pub fn open_text_file(&mut self, app: &Application, path: &str) {
        let physical = match app.vfs.resolve_physical_path(path) {
            Ok(physical) => physical,
            Err(e) => {
                error!("Cannot open text file: {e}");
                return;
            }
        };
        let removed = self.windows.remove_by_simple_name(TEXT_EDIT_NAME);
        if removed > 0 {
            debug!(removed, "Closed previous text editor");
        }
        info!(path = %physical.display(), "Opening text file");
        self.windows.add(Box::new(TextEditPanel::new(physical)));
    }

    /// Dispatch a file by extension
    pub fn file_open_callback(&mut self, app: &mut Application, path: &str) {
        match FileKind::from_path(path) {
            FileKind::Text => self.open_text_file(app, path),
            FileKind::Model => {
                let physical = match app.vfs.resolve_physical_path(path) {
                    Ok(physical) => physical,
                    Err(e) => {
                        error!("Cannot open model: {e}");
                        return;
                    }
                };
                match load_model(&mut app.scenes.current_mut().world, &physical) {
                    Ok(entity) => self.selection = Some(entity),
                    Err(e) => error!(path, "Failed to load model: {e}"),
                }
            }
            FileKind::Audio => {
                let physical = match app.vfs.resolve_physical_path(path) {
                    Ok(physical) => physical,
                    Err(e) => {
                        error!("Cannot open sound: {e}");
                        return;
                    }
                };
                match app.sounds.load(file_name(path), &physical) {
                    Ok(sound) => {
                        let world = &mut app.scenes.current_mut().world;
                        self.selection = Some(scene_operations::spawn_sound(world, sound));
                    }
                    Err(e) => error!(path, "Failed to load sound: {e}"),
                }
            }
            FileKind::Unknown => warn!(path, "Unsupported file type, ignoring"),
        }
    }

    /// Pick along `ray`; a quick second click on the selection focuses it
    pub fn select_object(&mut self, app: &mut Application, ray: &Ray) {
        let now = app.time.elapsed;
        let outcome = self.picker.select(
            &app.scenes.current().world,
            ray,
            self.selection,
            now,
        );
        self.selection = outcome.selection;
        if let Some((point, distance)) = outcome.focus {
            self.focus_camera(app, point, distance, FOCUS_SPEED, now);
        }
    }

    /// Choose the render API for the next start
    pub fn set_render_api(&mut self, app: &mut Application, api: RenderApi) {
        self.restart_needed = api != app.render_api;
        app.config.render_api = api;
        if let Some(path) = &app.config_path {
            if let Err(e) = EngineConfig::write_render_api(path, api) {
                error!("Failed to store render API: {e}");
                return;
            }
        }
        info!(api = api.label(), restart = self.restart_needed, "Render API selected");
    }

    fn focus_selection(&mut self, app: &mut Application, now: f32) {
        let world = &app.scenes.current().world;
        let Some(selected) = self.selection.filter(|e| world.contains(*e)) else {
            return;
        };
        let point = world.world_matrix(selected).w_axis.truncate();
        self.focus_camera(app, point, FOCUS_DISTANCE, FOCUS_SPEED, now);
    }

    fn focus_camera(
        &mut self,
        app: &mut Application,
        point: Vec3,
        distance: f32,
        speed: f32,
        now: f32,
    ) {
        let Some(camera_entity) = self.editor_camera else {
            return;
        };
        let world = &mut app.scenes.current_mut().world;
        let camera_world = world.world_matrix(camera_entity);
        let Some(camera) = world.try_get::<Camera>(camera_entity).map(|c| *c) else {
            return;
        };

        match plan_focus(&camera, camera_world, point, distance, speed, now) {
            Focus::Jump {
                position,
                ortho_height,
            } => {
                if let Ok((transform, camera)) =
                    world.query_one_mut::<(&mut Transform, &mut Camera)>(camera_entity)
                {
                    transform.position = position;
                    camera.set_ortho_height(ortho_height);
                }
                self.transition = None;
            }
            Focus::Transition(transition) => self.transition = Some(transition),
        }
    }

    fn bind_editor_camera(&mut self, world: &World) {
        let found = world
            .query::<(&Camera, &Transform)>()
            .iter()
            .map(|(entity, (_, transform))| (entity, *transform))
            .next();
        self.editor_camera = found.map(|(entity, transform)| {
            self.camera_controller.sync_from(&transform);
            debug!(?entity, "Bound editor camera");
            entity
        });
    }

    fn menu_bar(&mut self, ui: &Ui, app: &mut Application) {
        ui.main_menu_bar(|| {
            ui.menu("File", || {
                if ui.menu_item("Open File") {
                    if let Some(path) = rfd::FileDialog::new().pick_file() {
                        self.commands
                            .push(EditorCommand::OpenFile(path.display().to_string()));
                    }
                }
                ui.menu("Style", || {
                    for theme in Theme::ALL {
                        if ui
                            .menu_item_config(theme.name())
                            .selected(self.settings.theme == theme)
                            .build()
                        {
                            self.commands.push(EditorCommand::SetTheme(theme));
                        }
                    }
                });
                ui.separator();
                if ui.menu_item("Exit") {
                    app.request_close();
                }
            });

            ui.menu("Edit", || {
                for (label, shortcut) in [
                    ("Undo", "Ctrl+Z"),
                    ("Redo", "Ctrl+Y"),
                    ("Cut", "Ctrl+X"),
                    ("Copy", "Ctrl+C"),
                    ("Paste", "Ctrl+V"),
                ] {
                    ui.menu_item_config(label)
                        .shortcut(shortcut)
                        .enabled(false)
                        .build();
                }
            });

            ui.menu("Windows", || {
                for entry in self.windows.iter_mut() {
                    ui.menu_item_config(entry.window.simple_name())
                        .build_with_ref(&mut entry.active);
                }
                ui.separator();
                ui.menu_item_config("ImGui Demo")
                    .build_with_ref(&mut self.show_demo);
            });

            ui.menu("Scenes", || {
                let current = app.scenes.current_name().to_string();
                let names: Vec<String> = app.scenes.scene_names().map(str::to_string).collect();
                for name in names {
                    if ui.menu_item_config(&name).selected(name == current).build() {
                        self.commands.push(EditorCommand::SwitchScene(name));
                    }
                }
                ui.separator();
                if ui.menu_item("Reload") {
                    self.commands.push(EditorCommand::ReloadScene);
                }
            });

            ui.menu("Entity", || {
                if ui.menu_item("Create Empty") {
                    self.commands.push(EditorCommand::SpawnEmpty);
                }
                ui.separator();
                for primitive in PrimitiveType::ALL {
                    if ui.menu_item(primitive.name()) {
                        self.commands.push(EditorCommand::SpawnPrimitive(primitive));
                    }
                }
            });

            ui.menu("Graphics", || {
                if ui.menu_item("Recompile Shaders") {
                    info!("Shader recompilation requested");
                }
                let label = if self.restart_needed {
                    "*Render API###render_api"
                } else {
                    "Render API###render_api"
                };
                ui.menu(label, || {
                    for api in RenderApi::available() {
                        if ui
                            .menu_item_config(api.label())
                            .selected(app.config.render_api == api)
                            .build()
                        {
                            self.commands.push(EditorCommand::SetRenderApi(api));
                        }
                    }
                    if self.restart_needed {
                        ui.separator();
                        ui.text_disabled("Restart to apply");
                    }
                });
            });

            ui.menu("About", || {
                ui.text(format!("Editor {}", env!("CARGO_PKG_VERSION")));
                let repository = env!("CARGO_PKG_REPOSITORY");
                if !repository.is_empty() {
                    ui.text(repository);
                }
                ui.text(format!("Render API: {}", app.render_api.label()));
            });

            ui.separator();
            let play_state = app.play_state;
            if ui
                .menu_item_config("Play")
                .selected(play_state == PlayState::Playing)
                .build()
            {
                app.play_state = PlayState::Playing;
            }
            if ui
                .menu_item_config("Pause")
                .selected(play_state == PlayState::Paused)
                .build()
            {
                app.play_state = PlayState::Paused;
            }
            if ui.menu_item("Step") {
                app.play_state = PlayState::Step;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn app_with_scene() -> Application {
        let mut app = Application::new(EngineConfig::default());
        app.scenes.register("Main", |world| {
            world.spawn_with_transform((
                Name::new("camera"),
                Camera::default(),
                Transform::from_position(Vec3::new(0.0, 0.0, 10.0)),
            ));
            world.spawn_with_transform((
                Name::new("cube"),
                MeshComponent::new(Mesh::cube(1.0)),
            ));
        });
        app.scenes.register("Other", |world| {
            world.spawn((Name::new("lonely"),));
        });
        app.begin_frame(TimeStep::new(0.016, 0.016));
        app
    }

    fn initialized() -> (Editor, Application) {
        let mut app = app_with_scene();
        let mut editor = Editor::default();
        editor.on_init(&mut app);
        (editor, app)
    }

    fn find(app: &Application, name: &str) -> Entity {
        app.scenes
            .current()
            .world
            .query::<&Name>()
            .iter()
            .find(|(_, n)| n.0 == name)
            .map(|(e, _)| e)
            .unwrap()
    }

    #[test]
    fn test_init_registers_windows_and_camera() {
        let (editor, app) = initialized();
        assert_eq!(editor.windows().len(), 9);
        assert!(editor.windows().find_by_simple_name("Scene").is_some());
        assert_eq!(editor.editor_camera(), Some(find(&app, "camera")));
    }

    #[test]
    fn test_settings_close_windows() {
        let mut app = app_with_scene();
        let mut settings = EditorSettings::default();
        settings.open_windows.insert("Profiler".to_string(), false);
        let mut editor = Editor::new(settings);
        editor.on_init(&mut app);

        let profiler = editor.windows().find_by_simple_name("Profiler").unwrap();
        assert!(!profiler.active);
        assert!(editor.windows().find_by_simple_name("Console").unwrap().active);
    }

    #[test]
    fn test_single_text_editor() {
        let (mut editor, app) = initialized();
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.lua");
        let second = dir.path().join("b.wgsl");
        fs::write(&first, "print(1)").unwrap();
        fs::write(&second, "// shader").unwrap();

        editor.open_text_file(&app, &first.to_string_lossy());
        editor.open_text_file(&app, &second.to_string_lossy());
        assert_eq!(editor.windows().count_by_simple_name(TEXT_EDIT_NAME), 1);
        assert_eq!(editor.windows().len(), 10);
    }

    #[test]
    fn test_unresolved_text_file_is_ignored() {
        let (mut editor, app) = initialized();
        editor.open_text_file(&app, "/Scripts/definitely_missing.lua");
        assert_eq!(editor.windows().count_by_simple_name(TEXT_EDIT_NAME), 0);
    }

    #[test]
    fn test_remove_window_twice() {
        let (mut editor, _app) = initialized();
        let id = editor.add_window(Box::new(PreviewPanel::new()));
        editor.remove_window(id);
        editor.remove_window(id);
        assert_eq!(editor.windows().len(), 9);
    }

    #[test]
    fn test_close_window_command() {
        let (mut editor, mut app) = initialized();
        let id = editor.add_window(Box::new(PreviewPanel::new()));
        editor.execute(&mut app, EditorCommand::CloseWindow(id));
        assert_eq!(editor.windows().len(), 9);
    }

    #[test]
    fn test_open_model_selects_it() {
        let (mut editor, mut app) = initialized();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.obj");
        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        editor.file_open_callback(&mut app, &path.to_string_lossy());
        let selected = editor.selection().unwrap();
        let world = &app.scenes.current().world;
        assert!(world.has::<MeshComponent>(selected));
        assert_eq!(world.get::<Name>(selected).unwrap().0, "triangle");
    }

    #[test]
    fn test_open_sound_spawns_emitter() {
        let (mut editor, mut app) = initialized();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.wav");
        let mut data = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
        data.extend_from_slice(&[0; 16]);
        fs::write(&path, data).unwrap();

        editor.file_open_callback(&mut app, &path.to_string_lossy());
        let selected = editor.selection().unwrap();
        assert!(app.sounds.contains("beep.wav"));

        let world = &app.scenes.current().world;
        let node = world.get::<SoundNode>(selected).unwrap();
        assert_eq!(node.volume, 1.0);
        assert_eq!(node.position, Vec3::new(0.1, 10.0, 10.0));
        assert!(node.looping);
        assert!(!node.is_global);
        assert!(!node.paused);
        assert_eq!(node.reference_distance, 1.0);
        assert_eq!(node.radius, 30.0);
    }

    #[test]
    fn test_unknown_file_changes_nothing() {
        let (mut editor, mut app) = initialized();
        let entities = app.scenes.current().world.len();
        editor.file_open_callback(&mut app, "/Assets/readme.md");
        assert_eq!(app.scenes.current().world.len(), entities);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_select_ray_and_double_click_focus() {
        let (mut editor, mut app) = initialized();
        let cube = find(&app, "cube");
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        app.time = TimeStep::new(0.016, 5.0);
        editor.execute(&mut app, EditorCommand::SelectRay(ray));
        assert_eq!(editor.selection(), Some(cube));
        assert!(!editor.is_transitioning());

        app.time = TimeStep::new(0.016, 5.3);
        editor.execute(&mut app, EditorCommand::SelectRay(ray));
        assert_eq!(editor.selection(), Some(cube));
        assert!(editor.is_transitioning());

        // The transition lands the camera in front of the cube
        editor.on_update(&mut app, TimeStep::new(1.0, 10.0));
        assert!(!editor.is_transitioning());
        let camera = editor.editor_camera().unwrap();
        let position = app.scenes.current().world.get::<Transform>(camera).unwrap().position;
        let expected = Vec3::new(0.0, 0.0, Vec3::splat(1.0).length());
        assert!((position - expected).length() < 1e-4);
    }

    #[test]
    fn test_miss_clears_selection() {
        let (mut editor, mut app) = initialized();
        editor.set_selection(Some(find(&app, "cube")));
        let ray = Ray::new(Vec3::new(50.0, 0.0, 10.0), Vec3::NEG_Z);
        editor.select_object(&mut app, &ray);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_new_scene_clears_selection() {
        let (mut editor, mut app) = initialized();
        editor.set_selection(Some(find(&app, "cube")));

        app.scenes.switch_scene("Other");
        assert!(app.begin_frame(TimeStep::new(0.016, 0.032)));
        editor.on_new_scene(&mut app);
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.editor_camera(), None);
    }

    #[test]
    fn test_deleted_selection_is_dropped() {
        let (mut editor, mut app) = initialized();
        let cube = find(&app, "cube");
        editor.set_selection(Some(cube));
        editor.execute(&mut app, EditorCommand::DeleteEntity(cube));
        assert_eq!(editor.selection(), None);
        assert!(!app.scenes.current().world.contains(cube));
    }

    #[test]
    fn test_spawn_commands_select_new_entity() {
        let (mut editor, mut app) = initialized();
        editor.execute(&mut app, EditorCommand::SpawnPrimitive(PrimitiveType::Sphere));
        let sphere = editor.selection().unwrap();
        assert_eq!(app.scenes.current().world.get::<Name>(sphere).unwrap().0, "Sphere");

        editor.execute(&mut app, EditorCommand::SpawnEmpty);
        assert_ne!(editor.selection(), Some(sphere));
    }

    #[test]
    fn test_render_api_change_needs_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("engine_config.json");
        EngineConfig::default().save_to(&config_path).unwrap();

        let mut app = Application::new(EngineConfig::default()).with_config_path(&config_path);
        let mut editor = Editor::default();
        let other = if app.render_api == RenderApi::OpenGl {
            RenderApi::Vulkan
        } else {
            RenderApi::OpenGl
        };

        editor.set_render_api(&mut app, other);
        assert!(editor.restart_needed());
        assert_eq!(EngineConfig::load_from(&config_path).unwrap().render_api, other);

        let current = app.render_api;
        editor.set_render_api(&mut app, current);
        assert!(!editor.restart_needed());
    }

    #[test]
    fn test_theme_command_is_handed_to_host() {
        let (mut editor, mut app) = initialized();
        editor.execute(&mut app, EditorCommand::SetTheme(Theme::Dracula));
        assert_eq!(editor.settings().theme, Theme::Dracula);
        assert_eq!(editor.take_pending_theme(), Some(Theme::Dracula));
        assert_eq!(editor.take_pending_theme(), None);
    }

    #[test]
    fn test_debug_draw_for_selection() {
        let (mut editor, mut app) = initialized();
        editor.on_render(&app);
        assert!(editor.debug_renderer().lines().is_empty());

        editor.set_selection(Some(find(&app, "cube")));
        editor.on_render(&app);
        assert_eq!(editor.debug_renderer().lines().len(), 12);

        editor.execute(&mut app, EditorCommand::SpawnEmpty);
        editor.settings.debug_draw = DebugDrawFlags::MESH_BOUNDING_BOXES;
        editor.set_selection(None);
        editor.on_render(&app);
        assert_eq!(editor.debug_renderer().lines().len(), 12);
    }

    #[test]
    fn test_shutdown_writes_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor_settings.json");
        let mut app = app_with_scene();
        let mut editor = Editor::default().with_settings_path(&path);
        editor.on_init(&mut app);
        editor.on_shutdown();

        let saved = EditorSettings::load_from(&path).unwrap();
        assert_eq!(saved.open_windows.get("Console"), Some(&true));
        assert_eq!(saved.open_windows.len(), 9);
    }
}
