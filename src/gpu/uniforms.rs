//! CPU mirrors of the WGSL uniform blocks, plus GLSL-style name dispatch.
//!
//! wgpu has no notion of a named uniform, so each block is a `#[repr(C)]`
//! `Pod` struct laid out to the WGSL uniform address-space rules, and
//! [`UniformBlock::set`] routes a parsed name such as
//! `pointLights[3].position` to the matching field.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Point-light slots in the lit shader: the candle plus up to 63 stars.
pub const MAX_POINT_LIGHTS: usize = 64;
/// Spotlight slots in the lit shader.
pub const MAX_SPOT_LIGHTS: usize = 1;

/// A value written through the named-uniform interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `float` uniform.
    Float(f32),
    /// `vec3` uniform.
    Vec3(Vec3),
    /// `bool` uniform (stored as `u32` on the GPU).
    Bool(bool),
    /// `mat4` uniform.
    Mat4(Mat4),
}

/// A parsed uniform name: `root[index].field`, with index and field
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformPath<'a> {
    /// Leading identifier (`pointLights`, `material`, `model`).
    pub root: &'a str,
    /// Array subscript, if any.
    pub index: Option<usize>,
    /// Member after the dot, if any.
    pub field: Option<&'a str>,
}

impl<'a> UniformPath<'a> {
    /// Parse a GLSL-style uniform name. Returns `None` for malformed names
    /// (empty parts, unclosed brackets, non-numeric subscripts).
    #[must_use]
    pub fn parse(name: &'a str) -> Option<Self> {
        let (head, field) = match name.split_once('.') {
            Some((head, field)) => (head, Some(field)),
            None => (name, None),
        };
        if field.is_some_and(|f| f.is_empty() || f.contains(['.', '[', ']'])) {
            return None;
        }

        let (root, index) = match head.split_once('[') {
            Some((root, rest)) => {
                let digits = rest.strip_suffix(']')?;
                (root, Some(digits.parse().ok()?))
            }
            None => (head, None),
        };
        if root.is_empty() || root.contains(']') {
            return None;
        }
        Some(Self { root, index, field })
    }

    fn is(&self, root: &str) -> bool {
        self.root == root && self.index.is_none() && self.field.is_none()
    }

    fn member(&self, root: &str) -> Option<&'a str> {
        if self.root == root && self.index.is_none() {
            self.field
        } else {
            None
        }
    }

    fn element(&self, root: &str, len: usize) -> Option<(usize, &'a str)> {
        match (self.index, self.field) {
            (Some(i), Some(field)) if self.root == root && i < len => {
                Some((i, field))
            }
            _ => None,
        }
    }
}

/// A uniform block that accepts named writes.
pub trait UniformBlock: Pod {
    /// Write `value` to the field named by `path`. Returns `false` when the
    /// name is not part of this block or the value has the wrong type.
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool;
}

fn assign_f32(dst: &mut f32, value: UniformValue) -> bool {
    match value {
        UniformValue::Float(v) => {
            *dst = v;
            true
        }
        _ => false,
    }
}

fn assign_vec3(dst: &mut [f32; 3], value: UniformValue) -> bool {
    match value {
        UniformValue::Vec3(v) => {
            *dst = v.to_array();
            true
        }
        _ => false,
    }
}

fn assign_bool(dst: &mut u32, value: UniformValue) -> bool {
    match value {
        UniformValue::Bool(v) => {
            *dst = u32::from(v);
            true
        }
        _ => false,
    }
}

fn assign_mat4(dst: &mut [[f32; 4]; 4], value: UniformValue) -> bool {
    match value {
        UniformValue::Mat4(m) => {
            *dst = m.to_cols_array_2d();
            true
        }
        _ => false,
    }
}

/// `pantheon::camera::Camera`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World to camera.
    pub view: [[f32; 4]; 4],
    /// Camera to clip space.
    pub projection: [[f32; 4]; 4],
    /// `viewPos`: camera position in world space.
    pub position: [f32; 3],
    _pad: f32,
}

impl CameraUniform {
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool {
        if path.is("view") {
            assign_mat4(&mut self.view, value)
        } else if path.is("projection") {
            assign_mat4(&mut self.projection, value)
        } else if path.is("viewPos") {
            assign_vec3(&mut self.position, value)
        } else {
            false
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }
}

/// `pantheon::fog::Fog`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct FogUniform {
    /// Colour blended in with distance.
    pub color: [f32; 3],
    /// Exponential fog density.
    pub density: f32,
    /// `useFog` as 0 or 1.
    pub use_fog: u32,
    _pad: [u32; 3],
}

impl FogUniform {
    fn set(&mut self, field: &str, value: UniformValue) -> bool {
        match field {
            "useFog" => assign_bool(&mut self.use_fog, value),
            "color" => assign_vec3(&mut self.color, value),
            "density" => assign_f32(&mut self.density, value),
            _ => false,
        }
    }
}

/// `DirLight` in `lit.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DirLightUniform {
    /// Direction the light travels.
    pub direction: [f32; 3],
    _pad0: f32,
    /// Ambient term.
    pub ambient: [f32; 3],
    _pad1: f32,
    /// Diffuse term.
    pub diffuse: [f32; 3],
    _pad2: f32,
    /// Specular term.
    pub specular: [f32; 3],
    _pad3: f32,
}

impl DirLightUniform {
    fn set(&mut self, field: &str, value: UniformValue) -> bool {
        match field {
            "direction" => assign_vec3(&mut self.direction, value),
            "ambient" => assign_vec3(&mut self.ambient, value),
            "diffuse" => assign_vec3(&mut self.diffuse, value),
            "specular" => assign_vec3(&mut self.specular, value),
            _ => false,
        }
    }
}

/// Scalars ride in the tail padding of the preceding `vec3`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PointLightUniform {
    /// World position.
    pub position: [f32; 3],
    /// Constant attenuation.
    pub constant: f32,
    /// Ambient term.
    pub ambient: [f32; 3],
    /// Linear attenuation.
    pub linear: f32,
    /// Diffuse term.
    pub diffuse: [f32; 3],
    /// Quadratic attenuation.
    pub quadratic: f32,
    /// Specular term.
    pub specular: [f32; 3],
    _pad: f32,
}

impl PointLightUniform {
    fn set(&mut self, field: &str, value: UniformValue) -> bool {
        match field {
            "position" => assign_vec3(&mut self.position, value),
            "ambient" => assign_vec3(&mut self.ambient, value),
            "diffuse" => assign_vec3(&mut self.diffuse, value),
            "specular" => assign_vec3(&mut self.specular, value),
            "constant" => assign_f32(&mut self.constant, value),
            "linear" => assign_f32(&mut self.linear, value),
            "quadratic" => assign_f32(&mut self.quadratic, value),
            _ => false,
        }
    }
}

/// `SpotLight` in `lit.wgsl`, laid out like [`PointLightUniform`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SpotLightUniform {
    /// World position.
    pub position: [f32; 3],
    /// Cosine of the inner cone half-angle.
    pub cut_off: f32,
    /// Cone axis.
    pub direction: [f32; 3],
    /// Cosine of the outer cone half-angle.
    pub outer_cut_off: f32,
    /// Ambient term.
    pub ambient: [f32; 3],
    /// Constant attenuation.
    pub constant: f32,
    /// Diffuse term.
    pub diffuse: [f32; 3],
    /// Linear attenuation.
    pub linear: f32,
    /// Specular term.
    pub specular: [f32; 3],
    /// Quadratic attenuation.
    pub quadratic: f32,
}

impl SpotLightUniform {
    fn set(&mut self, field: &str, value: UniformValue) -> bool {
        match field {
            "position" => assign_vec3(&mut self.position, value),
            "direction" => assign_vec3(&mut self.direction, value),
            "cutOff" => assign_f32(&mut self.cut_off, value),
            "outerCutOff" => assign_f32(&mut self.outer_cut_off, value),
            "ambient" => assign_vec3(&mut self.ambient, value),
            "diffuse" => assign_vec3(&mut self.diffuse, value),
            "specular" => assign_vec3(&mut self.specular, value),
            "constant" => assign_f32(&mut self.constant, value),
            "linear" => assign_f32(&mut self.linear, value),
            "quadratic" => assign_f32(&mut self.quadratic, value),
            _ => false,
        }
    }
}

/// Group 0 of `lit.wgsl`: camera, fog and the whole light rig.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LitGlobals {
    /// View, projection and `viewPos`.
    pub camera: CameraUniform,
    /// Clear colour, also the fog target.
    pub background_color: [f32; 3],
    /// Active entries of `point_lights`.
    pub point_light_count: u32,
    /// Distance fog.
    pub fog: FogUniform,
    /// The single directional light.
    pub dir_light: DirLightUniform,
    /// Candle first, then one per star.
    pub point_lights: [PointLightUniform; MAX_POINT_LIGHTS],
    /// Spotlights; only the first is used.
    pub spot_lights: [SpotLightUniform; MAX_SPOT_LIGHTS],
}

impl Default for LitGlobals {
    fn default() -> Self {
        Self {
            camera: CameraUniform::default(),
            ..Zeroable::zeroed()
        }
    }
}

impl UniformBlock for LitGlobals {
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool {
        if self.camera.set(path, value) {
            return true;
        }
        if path.is("backgroundColor") {
            return assign_vec3(&mut self.background_color, value);
        }
        if path.is("pointLightCount") {
            return match value {
                UniformValue::Float(n) if n >= 0.0 => {
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss
                    )]
                    let n = (n.round() as u32).min(MAX_POINT_LIGHTS as u32);
                    self.point_light_count = n;
                    true
                }
                _ => false,
            };
        }
        if let Some(field) = path.member("fog") {
            return self.fog.set(field, value);
        }
        if let Some(field) = path.member("dirLight") {
            return self.dir_light.set(field, value);
        }
        if let Some((i, field)) = path.element("pointLights", MAX_POINT_LIGHTS)
        {
            return self.point_lights[i].set(field, value);
        }
        if let Some((i, field)) = path.element("spotLights", MAX_SPOT_LIGHTS) {
            return self.spot_lights[i].set(field, value);
        }
        false
    }
}

/// `Material` in `lit.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Ambient reflectance.
    pub ambient: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
    /// Diffuse reflectance.
    pub diffuse: [f32; 3],
    _pad0: f32,
    /// Specular reflectance.
    pub specular: [f32; 3],
    _pad1: f32,
}

/// Group 1 of `lit.wgsl`, snapshotted once per draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LitObject {
    /// Object to world.
    pub model: [[f32; 4]; 4],
    /// `mat3x3<f32>`: three columns padded to `vec4`.
    pub normal_matrix: [[f32; 4]; 3],
    /// Surface response.
    pub material: MaterialUniform,
    /// `useDirectionalLight` as 0 or 1.
    pub use_directional_light: u32,
    _pad: [u32; 3],
}

impl Default for LitObject {
    fn default() -> Self {
        let mut object: Self = Zeroable::zeroed();
        object.set_model(Mat4::IDENTITY);
        object
    }
}

impl LitObject {
    /// Set the model matrix and derive the normal matrix from it.
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model.to_cols_array_2d();
        self.normal_matrix = normal_matrix(model);
    }
}

impl UniformBlock for LitObject {
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool {
        if path.is("model") {
            return match value {
                UniformValue::Mat4(m) => {
                    self.set_model(m);
                    true
                }
                _ => false,
            };
        }
        if path.is("useDirectionalLight") {
            return assign_bool(&mut self.use_directional_light, value);
        }
        match path.member("material") {
            Some("ambient") => assign_vec3(&mut self.material.ambient, value),
            Some("diffuse") => assign_vec3(&mut self.material.diffuse, value),
            Some("specular") => {
                assign_vec3(&mut self.material.specular, value)
            }
            Some("shininess") => {
                assign_f32(&mut self.material.shininess, value)
            }
            _ => false,
        }
    }
}

/// Group 0 of `light_source.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightSourceGlobals {
    /// View, projection and `viewPos`.
    pub camera: CameraUniform,
    /// Distance fog.
    pub fog: FogUniform,
}

impl UniformBlock for LightSourceGlobals {
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool {
        if self.camera.set(path, value) {
            return true;
        }
        path.member("fog")
            .is_some_and(|field| self.fog.set(field, value))
    }
}

/// Group 1 of `light_source.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightSourceObject {
    /// Object to world.
    pub model: [[f32; 4]; 4],
    /// Flat emitted colour.
    pub light_color: [f32; 3],
    _pad: f32,
}

impl Default for LightSourceObject {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            light_color: [1.0; 3],
            _pad: 0.0,
        }
    }
}

impl UniformBlock for LightSourceObject {
    fn set(&mut self, path: &UniformPath<'_>, value: UniformValue) -> bool {
        if path.is("model") {
            assign_mat4(&mut self.model, value)
        } else if path.is("lightColor") {
            assign_vec3(&mut self.light_color, value)
        } else {
            false
        }
    }
}

/// Inverse transpose of the upper-left 3x3, columns padded to `vec4`.
fn normal_matrix(model: Mat4) -> [[f32; 4]; 3] {
    let m = Mat3::from_mat4(model).inverse().transpose();
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_sizes_match_wgsl_layout() {
        assert_eq!(size_of::<CameraUniform>(), 144);
        assert_eq!(size_of::<FogUniform>(), 32);
        assert_eq!(size_of::<DirLightUniform>(), 64);
        assert_eq!(size_of::<PointLightUniform>(), 64);
        assert_eq!(size_of::<SpotLightUniform>(), 80);
        assert_eq!(size_of::<MaterialUniform>(), 48);
        assert_eq!(size_of::<LitGlobals>(), 144 + 16 + 32 + 64 + 64 * 64 + 80);
        assert_eq!(size_of::<LitObject>(), 176);
        assert_eq!(size_of::<LightSourceGlobals>(), 176);
        assert_eq!(size_of::<LightSourceObject>(), 80);
        assert_eq!(size_of::<LitGlobals>() % 16, 0);
    }

    #[test]
    fn parses_indexed_member_paths() {
        let path = UniformPath::parse("pointLights[12].quadratic").unwrap();
        assert_eq!(path.root, "pointLights");
        assert_eq!(path.index, Some(12));
        assert_eq!(path.field, Some("quadratic"));

        let path = UniformPath::parse("model").unwrap();
        assert_eq!((path.root, path.index, path.field), ("model", None, None));

        for bad in ["", "a[", "a[x].b", "a.", "a.b.c", "[1].x", "a]1"] {
            assert_eq!(UniformPath::parse(bad), None, "{bad}");
        }
    }

    #[test]
    fn point_light_fields_land_in_their_slot() {
        let mut globals = LitGlobals::default();
        let path = UniformPath::parse("pointLights[3].position").unwrap();
        assert!(globals.set(&path, UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0))));
        let path = UniformPath::parse("pointLights[3].linear").unwrap();
        assert!(globals.set(&path, UniformValue::Float(0.14)));

        assert_eq!(globals.point_lights[3].position, [1.0, 2.0, 3.0]);
        assert_eq!(globals.point_lights[3].linear, 0.14);
        assert_eq!(globals.point_lights[2], PointLightUniform::default());
    }

    #[test]
    fn out_of_range_and_mistyped_writes_are_rejected() {
        let mut globals = LitGlobals::default();
        let before = globals;
        let too_far = UniformPath::parse("pointLights[64].position").unwrap();
        assert!(!globals.set(&too_far, UniformValue::Vec3(Vec3::ONE)));
        let spot = UniformPath::parse("spotLights[1].cutOff").unwrap();
        assert!(!globals.set(&spot, UniformValue::Float(0.5)));
        let density = UniformPath::parse("fog.density").unwrap();
        assert!(!globals.set(&density, UniformValue::Vec3(Vec3::ONE)));
        let unknown = UniformPath::parse("fog.thickness").unwrap();
        assert!(!globals.set(&unknown, UniformValue::Float(1.0)));
        assert_eq!(globals, before);
    }

    #[test]
    fn camera_and_fog_are_shared_names() {
        let mut lit = LitGlobals::default();
        let mut glow = LightSourceGlobals::default();
        let view_pos = UniformPath::parse("viewPos").unwrap();
        let use_fog = UniformPath::parse("fog.useFog").unwrap();
        assert!(lit.set(&view_pos, UniformValue::Vec3(Vec3::X)));
        assert!(glow.set(&view_pos, UniformValue::Vec3(Vec3::X)));
        assert!(lit.set(&use_fog, UniformValue::Bool(true)));
        assert!(glow.set(&use_fog, UniformValue::Bool(true)));
        assert_eq!(lit.camera.position, [1.0, 0.0, 0.0]);
        assert_eq!(glow.camera.position, [1.0, 0.0, 0.0]);
        assert_eq!(lit.fog.use_fog, 1);
        assert_eq!(glow.fog.use_fog, 1);
    }

    #[test]
    fn point_light_count_is_clamped() {
        let mut globals = LitGlobals::default();
        let path = UniformPath::parse("pointLightCount").unwrap();
        assert!(globals.set(&path, UniformValue::Float(51.0)));
        assert_eq!(globals.point_light_count, 51);
        assert!(globals.set(&path, UniformValue::Float(500.0)));
        assert_eq!(globals.point_light_count, 64);
        assert!(!globals.set(&path, UniformValue::Float(-1.0)));
    }

    #[test]
    fn model_write_derives_normal_matrix() {
        let mut object = LitObject::default();
        let path = UniformPath::parse("model").unwrap();
        let model = Mat4::from_scale(Vec3::splat(2.0));
        assert!(object.set(&path, UniformValue::Mat4(model)));
        assert_eq!(object.model, model.to_cols_array_2d());
        assert!((object.normal_matrix[0][0] - 0.5).abs() < 1e-6);
        assert!((object.normal_matrix[1][1] - 0.5).abs() < 1e-6);
        assert_eq!(object.normal_matrix[0][3], 0.0);
    }

    #[test]
    fn material_and_flags() {
        let mut object = LitObject::default();
        let shininess = UniformPath::parse("material.shininess").unwrap();
        let flag = UniformPath::parse("useDirectionalLight").unwrap();
        assert!(object.set(&shininess, UniformValue::Float(16.0)));
        assert!(object.set(&flag, UniformValue::Bool(true)));
        assert_eq!(object.material.shininess, 16.0);
        assert_eq!(object.use_directional_light, 1);
        let color = UniformPath::parse("lightColor").unwrap();
        assert!(!object.set(&color, UniformValue::Vec3(Vec3::ONE)));
    }
}
