use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Start pose, projection and control parameters for the fly camera.
pub struct CameraOptions {
    /// Start position in world space.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Start heading in degrees (90 looks down +Z).
    #[schemars(title = "Yaw", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub yaw: f32,
    /// Start elevation in degrees.
    #[schemars(title = "Pitch", range(min = -89.0, max = 89.0), extend("step" = 1.0))]
    pub pitch: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 1.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Fly speed in units per second.
    #[schemars(title = "Move Speed", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub movement_speed: f32,
    /// Rotate the view with the cursor.
    #[schemars(title = "Mouse Look")]
    pub mouse_look: bool,
    /// Confine and hide the cursor while the window has focus.
    #[schemars(title = "Grab Cursor")]
    pub grab_cursor: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -7.0],
            yaw: 90.0,
            pitch: 0.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            movement_speed: 2.5,
            mouse_look: true,
            grab_cursor: false,
        }
    }
}
