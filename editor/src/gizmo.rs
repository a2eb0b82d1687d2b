//! Transform gizmo
//!
//! [`GizmoState`] holds the current operation and snapping, driven by the
//! Q/W/E/R/T/Y keys. A [`Manipulator`] turns mouse drags over the scene view
//! into a world-space delta matrix, which [`apply_gizmo_delta`] folds into the
//! selected entity's transform and any physics body attached to it.

use crate::layout::Rect;
use engine::physics::{Physics2D, Physics3D};
use engine::prelude::{Entity, InputState, Mat4, Quat, Transform, Vec2, Vec3, Vec4, World};
use engine::winit::event::MouseButton;
use engine::winit::keyboard::KeyCode;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoOperation {
    #[default]
    Translate,
    Rotate,
    Scale,
    Bounds,
    None,
}

impl GizmoOperation {
    pub const ALL: [GizmoOperation; 5] = [
        GizmoOperation::None,
        GizmoOperation::Translate,
        GizmoOperation::Rotate,
        GizmoOperation::Scale,
        GizmoOperation::Bounds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GizmoOperation::Translate => "Translate",
            GizmoOperation::Rotate => "Rotate",
            GizmoOperation::Scale => "Scale",
            GizmoOperation::Bounds => "Bounds",
            GizmoOperation::None => "Select",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            GizmoOperation::None => "Q",
            GizmoOperation::Translate => "W",
            GizmoOperation::Rotate => "E",
            GizmoOperation::Scale => "R",
            GizmoOperation::Bounds => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoState {
    pub operation: GizmoOperation,
    pub show: bool,
    pub snap: bool,
    pub snap_amount: f32,
}

impl Default for GizmoState {
    fn default() -> Self {
        Self {
            operation: GizmoOperation::Translate,
            show: true,
            snap: false,
            snap_amount: 1.0,
        }
    }
}

impl GizmoState {
    /// Apply the gizmo shortcuts. Ignored while the right mouse button is
    /// held, since WASDQE then fly the camera.
    pub fn handle_keys(&mut self, input: &InputState) {
        if input.is_mouse_button_pressed(MouseButton::Right) {
            return;
        }
        let bindings = [
            (KeyCode::KeyQ, GizmoOperation::None),
            (KeyCode::KeyW, GizmoOperation::Translate),
            (KeyCode::KeyE, GizmoOperation::Rotate),
            (KeyCode::KeyR, GizmoOperation::Scale),
            (KeyCode::KeyT, GizmoOperation::Bounds),
        ];
        for (key, operation) in bindings {
            if input.is_key_just_pressed(key) {
                self.operation = operation;
            }
        }
        if input.is_key_just_pressed(KeyCode::KeyY) {
            self.snap = !self.snap;
        }
    }

    pub fn snap_value(&self) -> Option<f32> {
        (self.snap && self.snap_amount > 0.0).then_some(self.snap_amount)
    }
}

/// Fold a gizmo delta into an entity.
///
/// Scaling multiplies the local scale. Every other operation premultiplies the
/// local matrix and then pushes the result into a 2D body (position) or, when
/// there is none, a 3D body (position and orientation).
pub fn apply_gizmo_delta(
    world: &mut World,
    entity: Entity,
    operation: GizmoOperation,
    delta: Mat4,
) -> bool {
    let matrix = {
        let Some(transform) = world.try_get_mut::<Transform>(entity) else {
            return false;
        };

        if operation == GizmoOperation::Scale {
            let (scale, _, _) = delta.to_scale_rotation_translation();
            transform.scale *= scale;
            return true;
        }

        let matrix = delta * transform.to_matrix();
        transform.set_from_matrix(matrix);
        matrix
    };

    let (_, rotation, translation) = matrix.to_scale_rotation_translation();
    if let Some(body) = world.try_get_mut::<Physics2D>(entity) {
        body.object.set_position(translation.truncate());
    } else if let Some(body) = world.try_get_mut::<Physics3D>(entity) {
        body.object.set_position(translation);
        body.object.set_orientation(rotation);
    }
    trace!(entity = ?entity, ?operation, "Applied gizmo delta");
    true
}

/// Everything a manipulator needs to know for one frame
#[derive(Debug, Clone, Copy)]
pub struct ManipulatorFrame {
    pub view_projection: Mat4,
    /// Screen rectangle of the scene view
    pub viewport: Rect,
    /// World matrix of the manipulated entity
    pub model: Mat4,
    pub operation: GizmoOperation,
    pub snap: Option<f32>,
    pub mouse_position: [f32; 2],
    pub mouse_clicked: bool,
    pub mouse_down: bool,
}

/// Screen-space gizmo widget
pub trait Manipulator {
    /// Track the mouse; returns a world-space delta while the widget is dragged
    fn manipulate(&mut self, frame: &ManipulatorFrame) -> Option<Mat4>;

    /// Whether the widget currently owns the mouse
    fn is_using(&self) -> bool;

    /// Whether the mouse is over one of the widget's handles
    fn is_hovered(&self) -> bool;

    fn draw(&self, draw_list: &imgui::DrawListMut<'_>, frame: &ManipulatorFrame);
}

const AXIS_COLORS: [[f32; 4]; 3] = [
    [0.9, 0.2, 0.2, 1.0],
    [0.2, 0.9, 0.2, 1.0],
    [0.2, 0.4, 0.95, 1.0],
];
const HIGHLIGHT: [f32; 4] = [1.0, 0.85, 0.1, 1.0];
/// Handle length as a fraction of the viewport height
const HANDLE_SCREEN_FRACTION: f32 = 0.12;
const HIT_PIXELS: f32 = 7.0;
/// Radians per handle length of mouse travel
const ROTATE_RATE: f32 = std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    axis: usize,
    /// Raw amount dragged so far along the axis
    accumulated: f32,
    /// Amount already emitted, after snapping
    applied: f32,
    last_mouse: [f32; 2],
}

/// Three axis handles drawn with the ImGui draw list
#[derive(Debug, Default)]
pub struct AxisManipulator {
    drag: Option<Drag>,
    hovered_axis: Option<usize>,
}

/// Projected handle endpoints for one frame
struct Handles {
    origin: Vec2,
    ends: [Vec2; 3],
    world_origin: Vec3,
    world_length: f32,
}

fn project(view_projection: Mat4, viewport: &Rect, point: Vec3) -> Option<Vec2> {
    let clip = view_projection * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        viewport.position[0] + (ndc.x * 0.5 + 0.5) * viewport.size[0],
        viewport.position[1] + (0.5 - ndc.y * 0.5) * viewport.size[1],
    ))
}

fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

impl AxisManipulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn handles(frame: &ManipulatorFrame) -> Option<Handles> {
        let world_origin = frame.model.w_axis.truncate();
        let origin = project(frame.view_projection, &frame.viewport, world_origin)?;

        // Size handles so they cover a fixed share of the screen
        let unit_up = project(frame.view_projection, &frame.viewport, world_origin + Vec3::Y)
            .or_else(|| project(frame.view_projection, &frame.viewport, world_origin + Vec3::X))?;
        let pixels_per_unit = unit_up.distance(origin).max(f32::EPSILON);
        let world_length = frame.viewport.size[1] * HANDLE_SCREEN_FRACTION / pixels_per_unit;

        let mut ends = [origin; 3];
        for (axis, end) in ends.iter_mut().enumerate() {
            let direction = Vec3::AXES[axis] * world_length;
            *end = project(frame.view_projection, &frame.viewport, world_origin + direction)?;
        }

        Some(Handles {
            origin,
            ends,
            world_origin,
            world_length,
        })
    }

    fn axis_under_mouse(handles: &Handles, mouse: Vec2) -> Option<usize> {
        (0..3)
            .map(|axis| (axis, distance_to_segment(mouse, handles.origin, handles.ends[axis])))
            .filter(|(_, distance)| *distance < HIT_PIXELS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| axis)
    }

    fn delta_for(operation: GizmoOperation, axis: usize, amount: f32, origin: Vec3) -> Mat4 {
        let direction = Vec3::AXES[axis];
        match operation {
            GizmoOperation::Translate => Mat4::from_translation(direction * amount),
            GizmoOperation::Rotate => {
                Mat4::from_translation(origin)
                    * Mat4::from_quat(Quat::from_axis_angle(direction, amount * ROTATE_RATE))
                    * Mat4::from_translation(-origin)
            }
            GizmoOperation::Scale | GizmoOperation::Bounds => {
                Mat4::from_scale(Vec3::ONE + direction * amount)
            }
            GizmoOperation::None => Mat4::IDENTITY,
        }
    }
}

impl Manipulator for AxisManipulator {
    fn manipulate(&mut self, frame: &ManipulatorFrame) -> Option<Mat4> {
        if frame.operation == GizmoOperation::None {
            self.drag = None;
            self.hovered_axis = None;
            return None;
        }

        let handles = Self::handles(frame)?;
        let mouse = Vec2::from(frame.mouse_position);
        self.hovered_axis = Self::axis_under_mouse(&handles, mouse);

        if !frame.mouse_down {
            self.drag = None;
            return None;
        }

        if self.drag.is_none() {
            if frame.mouse_clicked {
                if let Some(axis) = self.hovered_axis {
                    self.drag = Some(Drag {
                        axis,
                        accumulated: 0.0,
                        applied: 0.0,
                        last_mouse: frame.mouse_position,
                    });
                }
            }
            return None;
        }

        let drag = self.drag.as_mut()?;
        let screen_axis = handles.ends[drag.axis] - handles.origin;
        let screen_length = screen_axis.length();
        if screen_length <= f32::EPSILON {
            return None;
        }

        let movement = mouse - Vec2::from(drag.last_mouse);
        drag.last_mouse = frame.mouse_position;
        // Handle length in pixels corresponds to `world_length` units
        let along = movement.dot(screen_axis / screen_length) / screen_length;
        drag.accumulated += along * handles.world_length;

        let target = match frame.snap {
            Some(step) => (drag.accumulated / step).round() * step,
            None => drag.accumulated,
        };
        let amount = target - drag.applied;
        if amount == 0.0 {
            return None;
        }

        let delta = match frame.operation {
            // Scale deltas are relative to the size at the previous step
            GizmoOperation::Scale | GizmoOperation::Bounds => {
                let previous = 1.0 + drag.applied;
                let ratio = if previous.abs() > f32::EPSILON {
                    (1.0 + target) / previous - 1.0
                } else {
                    amount
                };
                Self::delta_for(frame.operation, drag.axis, ratio, handles.world_origin)
            }
            operation => Self::delta_for(operation, drag.axis, amount, handles.world_origin),
        };
        drag.applied = target;
        Some(delta)
    }

    fn is_using(&self) -> bool {
        self.drag.is_some()
    }

    fn is_hovered(&self) -> bool {
        self.hovered_axis.is_some()
    }

    fn draw(&self, draw_list: &imgui::DrawListMut<'_>, frame: &ManipulatorFrame) {
        if frame.operation == GizmoOperation::None {
            return;
        }
        let Some(handles) = Self::handles(frame) else {
            return;
        };
        let active_axis = self.drag.map(|drag| drag.axis).or(self.hovered_axis);

        for axis in 0..3 {
            let color = if active_axis == Some(axis) {
                HIGHLIGHT
            } else {
                AXIS_COLORS[axis]
            };
            let start = handles.origin.to_array();
            let end = handles.ends[axis].to_array();
            draw_list.add_line(start, end, color).thickness(3.0).build();
            match frame.operation {
                GizmoOperation::Scale | GizmoOperation::Bounds => {
                    draw_list
                        .add_rect([end[0] - 4.0, end[1] - 4.0], [end[0] + 4.0, end[1] + 4.0], color)
                        .filled(true)
                        .build();
                }
                GizmoOperation::Rotate => {
                    draw_list.add_circle(end, 5.0, color).thickness(2.0).build();
                }
                _ => {
                    draw_list.add_circle(end, 4.0, color).filled(true).build();
                }
            }
        }
        draw_list
            .add_circle(handles.origin.to_array(), 3.0, Vec4::ONE.to_array())
            .filled(true)
            .build();
    }
}
