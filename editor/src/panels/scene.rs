//! Scene view panel
//!
//! Looks at the scene through the editor camera. Draws the grid, debug lines
//! and the transform gizmo over the view, turns clicks into pick rays and
//! reports its size and focus back to the application.

use crate::commands::EditorCommand;
use crate::gizmo::{
    apply_gizmo_delta, AxisManipulator, GizmoOperation, Manipulator, ManipulatorFrame,
};
use crate::layout::{DockRegion, Rect};
use crate::window::{EditorContext, EditorWindow};
use engine::graphics::DebugDrawFlags;
use engine::prelude::{Camera, Mat4, Transform, Vec3, Vec4};
use imgui::{DrawListMut, MouseButton, Ui, WindowFlags};

const BACKGROUND: [f32; 4] = [0.08, 0.08, 0.1, 1.0];
const GRID_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.25];
const GRID_MAJOR_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 0.5];
const GRID_EXTENT: i32 = 20;

/// Maps world positions into scene view pixels
#[derive(Debug, Clone, Copy)]
pub struct ViewProjector {
    pub view_projection: Mat4,
    pub viewport: Rect,
}

impl ViewProjector {
    /// Screen position of a world point; `None` behind the camera
    pub fn project(&self, point: Vec3) -> Option<[f32; 2]> {
        let clip = self.view_projection * point.extend(1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some([
            self.viewport.position[0] + (ndc.x * 0.5 + 0.5) * self.viewport.size[0],
            self.viewport.position[1] + (0.5 - ndc.y * 0.5) * self.viewport.size[1],
        ])
    }

    /// Normalised viewport coordinates of a screen point, top-left origin
    pub fn normalized(&self, screen: [f32; 2]) -> (f32, f32) {
        (
            (screen[0] - self.viewport.position[0]) / self.viewport.size[0].max(1.0),
            (screen[1] - self.viewport.position[1]) / self.viewport.size[1].max(1.0),
        )
    }

    fn line(&self, draw_list: &DrawListMut<'_>, start: Vec3, end: Vec3, color: [f32; 4]) {
        if let (Some(a), Some(b)) = (self.project(start), self.project(end)) {
            draw_list.add_line(a, b, color).build();
        }
    }
}

pub struct ScenePanel {
    manipulator: AxisManipulator,
}

impl Default for ScenePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenePanel {
    pub fn new() -> Self {
        Self {
            manipulator: AxisManipulator::new(),
        }
    }

    fn toolbar(&self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        for operation in GizmoOperation::ALL {
            let label = format!("{} ({})", operation.label(), operation.shortcut());
            if ui.radio_button_bool(&label, ctx.gizmo.operation == operation) {
                ctx.gizmo.operation = operation;
            }
            ui.same_line();
        }
        ui.checkbox("Snap (Y)", &mut ctx.gizmo.snap);
        if ctx.gizmo.snap {
            ui.same_line();
            ui.set_next_item_width(60.0);
            imgui::Drag::new("##snap_amount")
                .speed(0.05)
                .range(0.01, 100.0)
                .build(ui, &mut ctx.gizmo.snap_amount);
        }
        ui.same_line();
        ui.checkbox("Gizmos", &mut ctx.gizmo.show);
        ui.same_line();
        ui.checkbox("Grid", &mut ctx.settings.show_grid);
        ui.same_line();
        debug_flags_popup(ui, ctx);
    }

    fn draw_grid(
        projector: &ViewProjector,
        draw_list: &DrawListMut<'_>,
        orthographic: bool,
        center: Vec3,
    ) {
        // Grid follows the camera in whole units so it appears infinite
        let origin = center.round();
        for i in -GRID_EXTENT..=GRID_EXTENT {
            let offset = i as f32;
            let extent = GRID_EXTENT as f32;
            let major = (origin.x as i32 + i) % 10 == 0;
            let color = if major { GRID_MAJOR_COLOR } else { GRID_COLOR };
            if orthographic {
                projector.line(
                    draw_list,
                    Vec3::new(origin.x + offset, origin.y - extent, 0.0),
                    Vec3::new(origin.x + offset, origin.y + extent, 0.0),
                    color,
                );
                let major = (origin.y as i32 + i) % 10 == 0;
                let color = if major { GRID_MAJOR_COLOR } else { GRID_COLOR };
                projector.line(
                    draw_list,
                    Vec3::new(origin.x - extent, origin.y + offset, 0.0),
                    Vec3::new(origin.x + extent, origin.y + offset, 0.0),
                    color,
                );
                // Small graduations between unit lines
                for tick in 1..4 {
                    let x = origin.x + offset + tick as f32 * 0.25;
                    projector.line(
                        draw_list,
                        Vec3::new(x, origin.y - 0.05, 0.0),
                        Vec3::new(x, origin.y + 0.05, 0.0),
                        GRID_COLOR,
                    );
                }
            } else {
                projector.line(
                    draw_list,
                    Vec3::new(origin.x + offset, 0.0, origin.z - extent),
                    Vec3::new(origin.x + offset, 0.0, origin.z + extent),
                    color,
                );
                let major = (origin.z as i32 + i) % 10 == 0;
                let color = if major { GRID_MAJOR_COLOR } else { GRID_COLOR };
                projector.line(
                    draw_list,
                    Vec3::new(origin.x - extent, 0.0, origin.z + offset),
                    Vec3::new(origin.x + extent, 0.0, origin.z + offset),
                    color,
                );
            }
        }
    }
}

fn debug_flags_popup(ui: &Ui, ctx: &mut EditorContext<'_>) {
    if ui.button("Debug Draw") {
        ui.open_popup("##debug_draw_flags");
    }
    ui.popup("##debug_draw_flags", || {
        let flags = [
            ("Mesh Bounding Boxes", DebugDrawFlags::MESH_BOUNDING_BOXES),
            ("Sprite Boxes", DebugDrawFlags::SPRITE_BOXES),
            ("Camera Frustums", DebugDrawFlags::CAMERA_FRUSTUM),
            ("Bounding Radius", DebugDrawFlags::BOUNDING_RADIUS),
        ];
        for (label, flag) in flags {
            let mut enabled = ctx.settings.debug_draw.contains(flag);
            if ui.checkbox(label, &mut enabled) {
                ctx.settings.debug_draw.set(flag, enabled);
            }
        }
    });
}

fn to_color(color: Vec4) -> [f32; 4] {
    color.to_array()
}

impl EditorWindow for ScenePanel {
    fn name(&self) -> String {
        "Scene".to_string()
    }

    fn simple_name(&self) -> &'static str {
        "Scene"
    }

    fn default_region(&self) -> DockRegion {
        DockRegion::Middle
    }

    fn flags(&self) -> WindowFlags {
        WindowFlags::NO_SCROLLBAR | WindowFlags::NO_SCROLL_WITH_MOUSE
    }

    fn on_imgui(&mut self, ui: &Ui, ctx: &mut EditorContext<'_>) {
        self.toolbar(ui, ctx);

        let position = ui.cursor_screen_pos();
        let size = ui.content_region_avail();
        if size[0] < 1.0 || size[1] < 1.0 {
            return;
        }
        let viewport = Rect::new(position, size);
        ctx.app.scene_view_size = (size[0] as u32, size[1] as u32);

        ui.invisible_button("##scene_view", size);
        let hovered = ui.is_item_hovered();
        ctx.app.scene_view_active = hovered || ui.is_item_active();

        let draw_list = ui.get_window_draw_list();
        draw_list
            .add_rect(position, viewport.max(), BACKGROUND)
            .filled(true)
            .build();

        let Some(camera_entity) = ctx.editor_camera else {
            draw_list.add_text(
                [position[0] + 10.0, position[1] + 10.0],
                [1.0, 1.0, 1.0, 1.0],
                "No camera in scene",
            );
            return;
        };

        let show_grid = ctx.settings.show_grid;
        let debug_lines = ctx.debug_lines;
        let selection = *ctx.selection;
        let gizmo = *ctx.gizmo;
        let world = &mut ctx.app.scenes.current_mut().world;
        let Some(camera) = world.try_get::<Camera>(camera_entity).map(|camera| *camera) else {
            return;
        };
        let camera_world = world.world_matrix(camera_entity);
        let projector = ViewProjector {
            view_projection: camera.projection_matrix() * camera_world.inverse(),
            viewport,
        };

        let manipulator = &mut self.manipulator;
        draw_list.with_clip_rect_intersect(position, viewport.max(), || {
            if show_grid {
                Self::draw_grid(
                    &projector,
                    &draw_list,
                    camera.is_orthographic(),
                    camera_world.w_axis.truncate(),
                );
            }

            for line in debug_lines {
                projector.line(&draw_list, line.start, line.end, to_color(line.color));
            }

            let Some(selected) = selection else {
                return;
            };
            if !gizmo.show
                || gizmo.operation == GizmoOperation::None
                || !world.has::<Transform>(selected)
            {
                return;
            }
            let frame = ManipulatorFrame {
                view_projection: projector.view_projection,
                viewport,
                model: world.world_matrix(selected),
                operation: gizmo.operation,
                snap: gizmo.snap_value(),
                mouse_position: ui.io().mouse_pos,
                mouse_clicked: hovered && ui.is_mouse_clicked(MouseButton::Left),
                mouse_down: ui.is_mouse_down(MouseButton::Left),
            };
            if let Some(delta) = manipulator.manipulate(&frame) {
                apply_gizmo_delta(world, selected, gizmo.operation, delta);
            }
            manipulator.draw(&draw_list, &frame);
        });

        let over_gizmo = self.manipulator.is_hovered() || self.manipulator.is_using();
        if hovered && ui.is_mouse_clicked(MouseButton::Left) && !over_gizmo {
            let (x, y) = projector.normalized(ui.io().mouse_pos);
            let ray = camera.screen_ray(x, y, camera_world);
            ctx.commands.push(EditorCommand::SelectRay(ray));
        }

        let mode = if camera.is_orthographic() { "2D" } else { "3D" };
        draw_list.add_text(
            [position[0] + 6.0, viewport.max()[1] - 20.0],
            [0.8, 0.8, 0.8, 0.8],
            format!("{mode} | {}x{}", size[0] as u32, size[1] as u32),
        );
    }
}
