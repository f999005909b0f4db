use glam::{Mat4, Vec2, Vec3};

use crate::input::{FrameInput, HeldActions, KeyAction};
use crate::options::CameraOptions;

/// Degrees of rotation per pixel of cursor travel.
pub const MOUSE_SENSITIVITY: f32 = 0.1;
/// Pitch limit in degrees; keeps `front` away from the poles.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable by zooming, in degrees.
pub const MIN_FOV: f32 = 1.0;
/// Widest field of view reachable by zooming, in degrees.
pub const MAX_FOV: f32 = 90.0;

/// First-person fly camera.
///
/// All transitions consume the camera and return the updated value, so a
/// frame's camera update reads `camera = camera.update(&input, dt, true)`
/// and tests can replay input without a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// World up reference vector (never changes).
    pub up: Vec3,
    front: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    /// Units per second when a movement action is held.
    pub movement_speed: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    last_cursor: Vec2,
    first_mouse: bool,
}

/// Unit look direction for the given Euler angles (degrees).
#[must_use]
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

impl Camera {
    /// Camera at `position` looking along (yaw, pitch) with a 45° field of
    /// view and default speed and clip planes.
    #[must_use]
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: front_from_angles(yaw, pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)),
            ..Self::default()
        }
    }

    /// Build the start-of-session camera from configuration.
    #[must_use]
    pub fn from_options(opts: &CameraOptions) -> Self {
        let pitch = opts.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position: Vec3::from_array(opts.position),
            up: Vec3::Y,
            front: front_from_angles(opts.yaw, pitch),
            yaw: opts.yaw,
            pitch,
            fov: opts.fovy.clamp(MIN_FOV, MAX_FOV),
            movement_speed: opts.movement_speed,
            znear: opts.znear,
            zfar: opts.zfar,
            last_cursor: Vec2::ZERO,
            first_mouse: true,
        }
    }

    /// Unit look direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Heading in degrees (unbounded).
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees, always within `±PITCH_LIMIT`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees, always within
    /// `[MIN_FOV, MAX_FOV]`.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Translate along `front` and its strafe axis for every held movement
    /// action, scaled by `movement_speed * delta_seconds`.
    #[must_use]
    pub fn process_movement(mut self, held: HeldActions, delta_seconds: f32) -> Self {
        let step = self.movement_speed * delta_seconds;
        let right = self.front.cross(self.up).normalize();
        if held.contains(KeyAction::MoveForward) {
            self.position += self.front * step;
        }
        if held.contains(KeyAction::MoveBackward) {
            self.position -= self.front * step;
        }
        if held.contains(KeyAction::StrafeLeft) {
            self.position -= right * step;
        }
        if held.contains(KeyAction::StrafeRight) {
            self.position += right * step;
        }
        self
    }

    /// Feed an absolute cursor position in pixels.
    ///
    /// The first sample only records a baseline so the view does not jump
    /// to wherever the cursor happened to be when the window opened.
    #[must_use]
    pub fn apply_cursor(mut self, position: Vec2) -> Self {
        if !position.is_finite() {
            return self;
        }
        if self.first_mouse {
            self.last_cursor = position;
            self.first_mouse = false;
            return self;
        }
        // Screen y grows downward, pitch grows upward.
        let dx = position.x - self.last_cursor.x;
        let dy = self.last_cursor.y - position.y;
        self.last_cursor = position;
        self.apply_mouse_delta(dx, dy)
    }

    /// Rotate by a cursor offset in pixels. Non-finite offsets are ignored.
    #[must_use]
    pub fn apply_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        if !(dx.is_finite() && dy.is_finite()) {
            return self;
        }
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch + dy * MOUSE_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
        self
    }

    /// Zoom by a scroll offset (positive narrows the field of view).
    /// Non-finite offsets are ignored.
    #[must_use]
    pub fn apply_scroll_delta(mut self, dy: f32) -> Self {
        if !dy.is_finite() {
            return self;
        }
        self.fov = (self.fov - dy).clamp(MIN_FOV, MAX_FOV);
        self
    }

    /// Apply one frame's input snapshot: movement, then mouse look, then
    /// zoom.
    #[must_use]
    pub fn update(self, input: &FrameInput, delta_seconds: f32, mouse_look: bool) -> Self {
        let mut camera = self.process_movement(input.held, delta_seconds);
        if mouse_look {
            if let Some(cursor) = input.cursor {
                camera = camera.apply_cursor(cursor);
            }
        }
        if input.scroll != 0.0 {
            camera = camera.apply_scroll_delta(input.scroll);
        }
        camera
    }

    /// World-to-view transform looking from `position` along `front`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View-to-clip transform for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.znear, self.zfar)
    }
}
