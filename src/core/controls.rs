// Input-to-rotation mapping, drag tracking and zoom.
//
// Handlers only ever write `RotationState::target`; the frame loop is the
// single writer of `RotationState::current`.

use super::constants::{
    MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE, ROTATION_PER_PX, ZOOM_DELTA_SCALE, ZOOM_SPEED,
};
use glam::{Quat, Vec2};

/// Hull rotation in radians; `x` is pitch, `y` is yaw.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct RotationState {
    pub current: Vec2,
    pub target: Vec2,
}

impl RotationState {
    /// Add a drag delta (pixels) to the target: horizontal drags yaw, vertical drags pitch.
    pub fn nudge_target(&mut self, delta_px: Vec2) {
        let next = self.target + Vec2::new(delta_px.y, delta_px.x) * ROTATION_PER_PX;
        if next.is_finite() {
            self.target = next;
        }
    }

    /// Close `blend` of the remaining gap on each axis.
    pub fn step(&mut self, blend: f32) {
        let blend = blend.clamp(0.0, 1.0);
        self.current += (self.target - self.current) * blend;
    }

    pub fn quat(&self) -> Quat {
        euler_xy(self.current)
    }
}

/// Rotation for an XYZ-ordered Euler pair with no roll.
#[inline]
pub fn euler_xy(rot: Vec2) -> Quat {
    Quat::from_rotation_x(rot.x) * Quat::from_rotation_y(rot.y)
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        last: Vec2,
    },
}

/// Shared press/move/release tracker for mouse and single-touch input.
#[derive(Default, Clone, Copy, Debug)]
pub struct Controls {
    pub rotation: RotationState,
    pub drag: DragPhase,
    pub camera_distance: f32,
}

impl Controls {
    pub fn new(camera_distance: f32) -> Self {
        Self {
            camera_distance: clamp_distance(camera_distance),
            ..Default::default()
        }
    }

    pub fn press(&mut self, pos: Vec2) {
        self.drag = DragPhase::Dragging { last: pos };
    }

    /// Returns the applied delta when a drag is in progress.
    pub fn move_to(&mut self, pos: Vec2) -> Option<Vec2> {
        match self.drag {
            DragPhase::Idle => None,
            DragPhase::Dragging { last } => {
                let delta = pos - last;
                self.rotation.nudge_target(delta);
                self.drag = DragPhase::Dragging { last: pos };
                Some(delta)
            }
        }
    }

    /// Ends any drag. Returns whether one was active.
    pub fn release(&mut self) -> bool {
        let was = matches!(self.drag, DragPhase::Dragging { .. });
        self.drag = DragPhase::Idle;
        was
    }

    pub fn wheel(&mut self, delta_y: f32) -> f32 {
        self.camera_distance = zoom_distance(self.camera_distance, delta_y);
        self.camera_distance
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragPhase::Dragging { .. })
    }
}

#[inline]
pub fn clamp_distance(z: f32) -> f32 {
    if z.is_nan() {
        return MIN_CAMERA_DISTANCE;
    }
    z.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE)
}

/// Apply one wheel delta to the camera distance.
#[inline]
pub fn zoom_distance(current: f32, delta_y: f32) -> f32 {
    if !delta_y.is_finite() {
        return clamp_distance(current);
    }
    clamp_distance(current + delta_y * ZOOM_SPEED * ZOOM_DELTA_SCALE)
}
