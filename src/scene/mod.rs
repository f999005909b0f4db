//! The per-frame update-and-draw loop.
//!
//! A [`Scene`] owns the camera, the frame clock, the light rig and the
//! ordered drawables. Each call to [`Scene::frame`] advances all of them to
//! the given absolute time and issues one frame of draw calls against a
//! [`RenderBackend`], so the loop runs the same against wgpu and against a
//! recording backend in tests.

use std::path::Path;
use std::rc::Rc;

use glam::Vec3;

use crate::camera::Camera;
use crate::drawable::{
    CandleLight, Cupcake, Drawable, Jupiter, LightOfGabriel, Orbit,
    PointyHand, Stars, Zeus,
};
use crate::error::SceneError;
use crate::gpu::{Model, Program, Shader};
use crate::input::{FrameInput, KeyAction};
use crate::lights::LightRig;
use crate::options::{Options, SceneOptions};
use crate::util::FrameClock;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// What the scene needs from a renderer.
pub trait RenderBackend {
    /// Start a frame. With `clear == false` the previous frame's colour and
    /// depth are kept and drawn over.
    fn begin_frame(&mut self, clear: bool);

    /// Make `program` current and hand back its uniform/draw interface.
    fn use_program(&mut self, program: Program) -> &mut dyn Shader;

    /// Width over height of the render target.
    fn aspect_ratio(&self) -> f32;

    /// Submit and present everything drawn since [`Self::begin_frame`].
    ///
    /// # Errors
    ///
    /// Surface errors while acquiring the frame.
    fn end_frame(&mut self) -> Result<(), SceneError>;
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// The loaded models the scene is built from. The star model is shared by
/// the candle, the light of Gabriel and every star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneModels {
    /// The statue.
    pub zeus: Model,
    /// The planet.
    pub jupiter: Model,
    /// Light-source mesh.
    pub star: Model,
    /// The hovering hand.
    pub pointy_hand: Model,
    /// The orbiting cupcake.
    pub cupcake: Model,
}

impl SceneModels {
    /// Load every model named in `opts` through `load`.
    ///
    /// # Errors
    ///
    /// The first error `load` returns.
    pub fn load(
        opts: &SceneOptions,
        mut load: impl FnMut(&Path) -> Result<Model, SceneError>,
    ) -> Result<Self, SceneError> {
        let files = &opts.models;
        Ok(Self {
            zeus: load(&opts.model_path(&files.zeus))?,
            jupiter: load(&opts.model_path(&files.jupiter))?,
            star: load(&opts.model_path(&files.star))?,
            pointy_hand: load(&opts.model_path(&files.pointy_hand))?,
            cupcake: load(&opts.model_path(&files.cupcake))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Lifecycle of a [`Scene`]. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneState {
    /// Frames are drawn.
    #[default]
    Running,
    /// Close was requested; frames draw nothing.
    Closed,
}

/// Camera, clock, light rig and drawables of the pantheon.
pub struct Scene {
    camera: Camera,
    clock: FrameClock,
    lights: LightRig,
    drawables: Vec<(Rc<dyn Drawable>, Program)>,
    stars: Rc<Stars>,
    spot_orbit: Orbit,
    candle: Vec3,
    mouse_look: bool,
    state: SceneState,
    initialized: bool,
    last_fps_log: f64,
}

impl Scene {
    /// Build the scene from configuration and loaded models.
    #[must_use]
    pub fn new(options: &Options, models: SceneModels) -> Self {
        let stars = Rc::new(Stars::new(
            models.star,
            options.scene.effective_star_count(),
            options.scene.star_seed,
        ));
        let gabriel = LightOfGabriel::new(models.star);
        let spot_orbit = gabriel.orbit();

        let mut drawables: Vec<(Rc<dyn Drawable>, Program)> = Vec::with_capacity(7);
        drawables.push((Rc::new(Zeus::new(models.zeus)), Program::Lit));
        drawables.push((Rc::new(CandleLight::new(models.star)), Program::LightSource));
        drawables.push((Rc::new(gabriel), Program::LightSource));
        let sky: Rc<dyn Drawable> = stars.clone();
        drawables.push((sky, Program::LightSource));
        drawables.push((Rc::new(Jupiter::new(models.jupiter)), Program::Lit));
        drawables.push((Rc::new(PointyHand::new(models.pointy_hand)), Program::Lit));
        drawables.push((Rc::new(Cupcake::new(models.cupcake)), Program::Lit));

        log::info!(
            "Scene ready: {} drawables, {} stars",
            drawables.len(),
            stars.len()
        );

        Self {
            camera: Camera::from_options(&options.camera),
            clock: FrameClock::default(),
            lights: LightRig::new(
                &options.lighting,
                &options.fog,
                options.display.background_color,
            ),
            drawables,
            stars,
            spot_orbit,
            candle: CandleLight::POSITION,
            mouse_look: options.camera.mouse_look,
            state: SceneState::Running,
            initialized: false,
            last_fps_log: 0.0,
        }
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Whether [`Self::request_close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == SceneState::Closed
    }

    /// Stop drawing. Irreversible.
    pub fn request_close(&mut self) {
        if self.state == SceneState::Running {
            log::info!("Scene closing");
        }
        self.state = SceneState::Closed;
    }

    /// Draw one frame at absolute scene time `now` (seconds).
    ///
    /// Does nothing once the scene is closed. Holding the quit action
    /// closes the scene instead of drawing; holding freeze-frame skips the
    /// clear so the new frame is drawn over the previous one.
    ///
    /// # Errors
    ///
    /// Whatever [`RenderBackend::end_frame`] returns.
    pub fn frame(
        &mut self,
        now: f64,
        input: &FrameInput,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), SceneError> {
        if self.is_closed() {
            return Ok(());
        }
        if input.is_held(KeyAction::Quit) {
            self.request_close();
            return Ok(());
        }

        backend.begin_frame(!input.is_held(KeyAction::FreezeFrame));

        let delta = self.clock.tick(now);
        self.camera = self.camera.update(input, delta, self.mouse_look);
        #[allow(clippy::cast_possible_truncation)]
        let time = now as f32;

        if !self.initialized {
            self.setup(backend, time);
            self.initialized = true;
        }

        self.lights.animate(
            backend.use_program(Program::Lit),
            time,
            &self.spot_orbit,
            &self.stars,
        );

        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(backend.aspect_ratio());
        for program in [Program::Lit, Program::LightSource] {
            let shader = backend.use_program(program);
            shader.set_mat4("view", view);
            shader.set_mat4("projection", projection);
            shader.set_vec3("viewPos", self.camera.position);
        }

        for (drawable, program) in &self.drawables {
            drawable.draw(time, backend.use_program(*program));
        }

        self.log_fps(now);
        backend.end_frame()
    }

    fn setup(&self, backend: &mut dyn RenderBackend, time: f32) {
        let view_pos = self.camera.position;
        self.lights.setup_lit(
            backend.use_program(Program::Lit),
            view_pos,
            self.candle,
            &self.stars,
            time,
        );
        self.lights
            .setup_light_source(backend.use_program(Program::LightSource), view_pos);
        log::debug!("Start-up uniforms written");
    }

    fn log_fps(&mut self, now: f64) {
        if now - self.last_fps_log >= 1.0 {
            log::debug!("{:.1} fps", self.clock.fps());
            self.last_fps_log = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::gpu::mesh::MeshId;
    use crate::gpu::UniformValue;
    use crate::input::HeldActions;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Begin(bool),
        Set(Program, String, UniformValue),
        Draw(Program, MeshId),
        End,
    }

    /// Logs every call; stands in for the wgpu renderer.
    struct RecordingBackend {
        current: Program,
        calls: Vec<Call>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                current: Program::Lit,
                calls: Vec::new(),
            }
        }

        fn draws(&self) -> Vec<(Program, MeshId)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Draw(p, m) => Some((*p, *m)),
                    _ => None,
                })
                .collect()
        }

        fn sets_of(&self, name: &str) -> Vec<(Program, UniformValue)> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Set(p, n, v) if n == name => Some((*p, *v)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Shader for RecordingBackend {
        fn set_uniform(&mut self, name: &str, value: UniformValue) {
            self.calls
                .push(Call::Set(self.current, name.to_owned(), value));
        }

        fn draw_mesh(&mut self, mesh: MeshId) {
            self.calls.push(Call::Draw(self.current, mesh));
        }
    }

    impl RenderBackend for RecordingBackend {
        fn begin_frame(&mut self, clear: bool) {
            self.calls.push(Call::Begin(clear));
        }

        fn use_program(&mut self, program: Program) -> &mut dyn Shader {
            self.current = program;
            self
        }

        fn aspect_ratio(&self) -> f32 {
            4.0 / 3.0
        }

        fn end_frame(&mut self) -> Result<(), SceneError> {
            self.calls.push(Call::End);
            Ok(())
        }
    }

    const ZEUS: MeshId = MeshId::new(0);
    const JUPITER: MeshId = MeshId::new(1);
    const STAR: MeshId = MeshId::new(2);
    const HAND: MeshId = MeshId::new(3);
    const CUPCAKE: MeshId = MeshId::new(4);

    fn models() -> SceneModels {
        SceneModels {
            zeus: Model::new(ZEUS),
            jupiter: Model::new(JUPITER),
            star: Model::new(STAR),
            pointy_hand: Model::new(HAND),
            cupcake: Model::new(CUPCAKE),
        }
    }

    fn scene(stars: u32) -> Scene {
        let mut options = Options::default();
        options.scene.star_count = stars;
        Scene::new(&options, models())
    }

    fn held(actions: &[KeyAction]) -> FrameInput {
        let mut held = HeldActions::default();
        for a in actions {
            held.insert(*a);
        }
        FrameInput {
            held,
            ..FrameInput::default()
        }
    }

    #[test]
    fn draws_follow_fixed_order() {
        let mut scene = scene(2);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.5, &FrameInput::default(), &mut backend)
            .unwrap();

        let expected = vec![
            (Program::Lit, ZEUS),
            (Program::LightSource, STAR), // candle
            (Program::LightSource, STAR), // gabriel
            (Program::LightSource, STAR), // star 0
            (Program::LightSource, STAR), // star 1
            (Program::Lit, JUPITER),
            (Program::Lit, HAND),
            (Program::Lit, CUPCAKE),
        ];
        assert_eq!(backend.draws(), expected);
        assert_eq!(backend.calls.first(), Some(&Call::Begin(true)));
        assert_eq!(backend.calls.last(), Some(&Call::End));
    }

    #[test]
    fn freeze_frame_skips_the_clear() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.0, &held(&[KeyAction::FreezeFrame]), &mut backend)
            .unwrap();
        assert_eq!(backend.calls.first(), Some(&Call::Begin(false)));
        assert_eq!(backend.draws().len(), 6);
    }

    #[test]
    fn closed_scene_draws_nothing() {
        let mut scene = scene(3);
        scene.request_close();
        assert!(scene.is_closed());
        let mut backend = RecordingBackend::new();
        scene
            .frame(1.0, &FrameInput::default(), &mut backend)
            .unwrap();
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn quit_closes_the_scene() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.0, &held(&[KeyAction::Quit]), &mut backend)
            .unwrap();
        assert_eq!(scene.state(), SceneState::Closed);
        assert!(backend.calls.is_empty());

        scene
            .frame(1.0, &FrameInput::default(), &mut backend)
            .unwrap();
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn startup_uniforms_written_once() {
        let mut scene = scene(1);
        let mut backend = RecordingBackend::new();
        for i in 0..3 {
            scene
                .frame(f64::from(i) * 0.016, &FrameInput::default(), &mut backend)
                .unwrap();
        }
        assert_eq!(backend.sets_of("dirLight.direction").len(), 1);
        assert_eq!(backend.sets_of("pointLights[0].position").len(), 1);
        assert_eq!(backend.sets_of("spotLights[0].cutOff").len(), 1);
        let fog = backend.sets_of("fog.density");
        assert_eq!(fog.len(), 2);
        assert!(fog.iter().any(|(p, _)| *p == Program::Lit));
        assert!(fog.iter().any(|(p, _)| *p == Program::LightSource));
        // Moving lights every frame.
        assert_eq!(backend.sets_of("spotLights[0].position").len(), 3);
        assert_eq!(backend.sets_of("pointLights[1].position").len(), 4);
    }

    #[test]
    fn setup_precedes_first_animation_and_draw() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.0, &FrameInput::default(), &mut backend)
            .unwrap();
        let first = |name: &str| {
            backend
                .calls
                .iter()
                .position(|c| matches!(c, Call::Set(_, n, _) if n == name))
                .unwrap()
        };
        let setup = first("dirLight.direction");
        let animate = first("spotLights[0].position");
        let draw = backend
            .calls
            .iter()
            .position(|c| matches!(c, Call::Draw(..)))
            .unwrap();
        assert!(setup < animate && animate < draw);
    }

    #[test]
    fn spotlight_tracks_gabriel_every_frame() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        let t = 1.75;
        scene
            .frame(t, &FrameInput::default(), &mut backend)
            .unwrap();
        let p = LightOfGabriel::ORBIT.position(t as f32);
        assert_eq!(
            backend.sets_of("spotLights[0].position"),
            vec![(Program::Lit, UniformValue::Vec3(p))]
        );
    }

    #[test]
    fn star_drives_next_point_light() {
        let mut scene = scene(2);
        let mut backend = RecordingBackend::new();
        scene
            .frame(3.0, &FrameInput::default(), &mut backend)
            .unwrap();
        let expected = Stars::new(Model::new(STAR), 2, Options::default().scene.star_seed)
            .position(1, 3.0)
            .unwrap();
        assert_eq!(
            backend.sets_of("pointLights[2].position").last(),
            Some(&(Program::Lit, UniformValue::Vec3(expected)))
        );
    }

    #[test]
    fn view_and_projection_reach_both_programs() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.0, &FrameInput::default(), &mut backend)
            .unwrap();
        let views = backend.sets_of("view");
        assert_eq!(views.len(), 2);
        let expected = UniformValue::Mat4(scene.camera().view_matrix());
        assert!(views.iter().all(|(_, v)| *v == expected));
        assert_eq!(backend.sets_of("projection").len(), 2);
    }

    #[test]
    fn movement_uses_clock_delta() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        let start = scene.camera().position;
        scene
            .frame(0.0, &FrameInput::default(), &mut backend)
            .unwrap();
        scene
            .frame(0.5, &held(&[KeyAction::MoveForward]), &mut backend)
            .unwrap();
        let moved = scene.camera().position - start;
        // Default camera looks down +Z at 2.5 units/s.
        assert!((moved - Vec3::new(0.0, 0.0, 1.25)).length() < 1e-4);
    }

    #[test]
    fn star_count_is_clamped_to_light_capacity() {
        let scene = scene(500);
        assert_eq!(scene.stars.len(), 63);
    }

    #[test]
    fn models_load_from_configured_paths() {
        let opts = SceneOptions::default();
        let mut seen = Vec::new();
        let models = SceneModels::load(&opts, |path| {
            seen.push(path.to_path_buf());
            #[allow(clippy::cast_possible_truncation)]
            Ok(Model::new(MeshId::new(seen.len() as u32)))
        })
        .unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0], opts.model_path("zeus.glb"));
        assert_eq!(models.cupcake, Model::new(MeshId::new(5)));
    }

    #[test]
    fn model_load_failure_propagates() {
        let opts = SceneOptions::default();
        let err = SceneModels::load(&opts, |path| {
            Err(SceneError::ModelLoad {
                path: path.display().to_string(),
                reason: "missing".into(),
            })
        })
        .unwrap_err();
        assert!(matches!(err, SceneError::ModelLoad { .. }));
    }

    #[test]
    fn model_matrix_set_before_each_draw() {
        let mut scene = scene(0);
        let mut backend = RecordingBackend::new();
        scene
            .frame(0.0, &FrameInput::default(), &mut backend)
            .unwrap();
        let mut last_model = None;
        for call in &backend.calls {
            match call {
                Call::Set(_, n, UniformValue::Mat4(m)) if n == "model" => {
                    last_model = Some(*m);
                }
                Call::Draw(..) => {
                    assert!(last_model.take().is_some_and(|m| m != Mat4::ZERO));
                }
                _ => {}
            }
        }
    }
}
