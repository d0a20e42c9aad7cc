use prism_engine::paint::Color;
use prism_engine::render::{Camera, MeshUploader, RenderBackend, Viewport};
use prism_engine::time::animation_time;

use crate::config::{ConfigChanges, PanelEvent, ShaderKind, ShapeKind, ViewerContext};
use crate::panel::ControlPanel;
use crate::scene::{SceneSelector, ShaderSet};

/// What one [`FrameDriver::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub changes:        ConfigChanges,
    /// The icosphere was rebuilt because the tessellation level drifted.
    pub rebuilt:        bool,
    pub animation_time: f32,
    pub color:          Color,
    pub shape:          ShapeKind,
    pub shader:         ShaderKind,
}

/// Per-frame orchestration.
///
/// Owns the configuration context, the scene and the camera. Panel events are
/// posted between frames and applied at the start of the next
/// [`tick`](Self::tick); configuration fields are re-read every tick, except
/// the tessellation level the icosphere was last built with.
pub struct FrameDriver<M, P> {
    context: ViewerContext,
    scene:   SceneSelector<M, P>,
    camera:  Camera,
}

impl<M, P> FrameDriver<M, P> {
    pub fn new(context: ViewerContext, scene: SceneSelector<M, P>, camera: Camera) -> Self {
        Self { context, scene, camera }
    }

    pub fn context(&self) -> &ViewerContext {
        &self.context
    }

    /// Queues a configuration change for the next tick.
    pub fn post(&mut self, event: PanelEvent) {
        self.context.post(event);
    }

    pub fn scene(&self) -> &SceneSelector<M, P> {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Display resize: `viewport` size, then camera aspect, then the
    /// projection matrix. Zero extents (minimized window) are ignored.
    pub fn resize<V: Viewport>(&mut self, viewport: &mut V, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        viewport.set_viewport_size(width, height);
        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.camera.update_projection_matrix();
    }

    /// Runs one frame against `backend`.
    ///
    /// Order: pending panel events, camera update, viewport sync, clear,
    /// tessellation drift check, time uniforms, color, render.
    pub fn tick<B>(
        &mut self,
        backend: &mut B,
        panel: &mut ControlPanel,
        viewport: (u32, u32),
        wall_ms: u64,
    ) -> FrameReport
    where
        B: RenderBackend<Mesh = M, Program = P>,
    {
        let changes = self.context.apply_pending();
        if changes.any() {
            self.scene.apply_changes(backend, self.context.config(), &changes, panel);
        }
        let config = *self.context.config();

        self.camera.update();

        let (w, h) = viewport;
        backend.set_viewport_size(w, h);
        backend.clear();

        let rebuilt = self.scene.sync_tessellation(backend, config.tessellation_level);

        let time = animation_time(wall_ms);
        for kind in ShaderKind::ALL {
            if kind.has_time_uniform() {
                backend.set_time(self.scene.resolve_shader(kind), time);
            }
        }

        let color = Color::from_rgb_u8(config.color);

        backend.render(
            &self.camera,
            self.scene.resolve_current_shader(),
            &[self.scene.resolve_current_shape()],
            color,
        );

        FrameReport {
            changes,
            rebuilt,
            animation_time: time,
            color,
            shape: self.scene.current_shape(),
            shader: self.scene.current_shader(),
        }
    }

    /// Releases every drawable; the programs are handed back to the caller.
    pub fn release<U>(self, uploader: &mut U) -> ShaderSet<P>
    where
        U: MeshUploader<Mesh = M>,
    {
        self.scene.release(uploader)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{Mat4, Vec3};
    use prism_engine::input::{Key, Modifiers};

    use super::*;
    use crate::config::Configuration;
    use crate::panel::PanelAction;
    use crate::testing::{Call, MockMesh, Recorder};

    const VIEWPORT: (u32, u32) = (800, 600);

    fn driver(rec: &mut Recorder, config: Configuration) -> FrameDriver<MockMesh, &'static str> {
        let programs = ShaderSet { lambert: "lambert", custom: "custom" };
        let scene = SceneSelector::load(rec, programs, &config);
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        FrameDriver::new(ViewerContext::new(config), scene, camera)
    }

    #[test]
    fn tick_runs_steps_in_order() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        let ico = d.scene().resolve_shape(ShapeKind::Icosphere).id;
        rec.clear();

        d.tick(&mut rec, &mut panel, VIEWPORT, 1_500);

        assert_eq!(
            rec.calls,
            vec![
                Call::SetViewport(800, 600),
                Call::Clear,
                Call::SetTime { program: "custom", time: 1.5 },
                Call::Render { program: "custom", meshes: vec![ico], color: Color::new(1.0, 0.0, 0.0, 1.0) },
            ]
        );
    }

    #[test]
    fn repeated_ticks_without_changes_do_not_rebuild() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        rec.clear();

        for ms in 0..3 {
            let report = d.tick(&mut rec, &mut panel, VIEWPORT, ms);
            assert!(!report.rebuilt);
        }
        assert_eq!(rec.created(), 0);
        assert_eq!(rec.destroyed(), 0);
    }

    #[test]
    fn each_tessellation_change_rebuilds_once() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        rec.clear();

        let mut rebuilt_levels = Vec::new();
        for level in [5, 5, 7, 7, 7, 2] {
            d.post(PanelEvent::SetTessellation(level));
            if d.tick(&mut rec, &mut panel, VIEWPORT, 0).rebuilt {
                rebuilt_levels.push(d.scene().built_tessellation());
            }
        }

        assert_eq!(rebuilt_levels, vec![7, 2]);
        assert_eq!(rec.created(), 2);
        assert_eq!(rec.destroyed(), 2);
    }

    #[test]
    fn end_to_end_rebuild_is_used_by_the_next_render() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        let old = d.scene().resolve_shape(ShapeKind::Icosphere).id;
        rec.clear();

        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 0);
        assert!(!report.rebuilt);
        assert_eq!(report.shape, ShapeKind::Icosphere);
        assert_eq!(report.shader, ShaderKind::Custom);
        assert_eq!(rec.created(), 0);
        match rec.renders()[..] {
            [Call::Render { program, meshes, .. }] => {
                assert_eq!(*program, "custom");
                assert_eq!(meshes, &vec![old]);
            }
            ref other => panic!("unexpected renders: {other:?}"),
        }

        rec.clear();
        d.post(PanelEvent::SetTessellation(6));
        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 16);
        assert!(report.rebuilt);
        assert_eq!(rec.created(), 1);

        let new = d.scene().resolve_shape(ShapeKind::Icosphere).id;
        assert_ne!(new, old);
        assert!(rec.calls.contains(&Call::CreateMesh { id: new, triangles: 20 * 4usize.pow(6) }));
        assert!(rec.calls.contains(&Call::DestroyMesh(old)));
        match rec.renders()[..] {
            [Call::Render { meshes, .. }] => assert_eq!(meshes, &vec![new]),
            ref other => panic!("unexpected renders: {other:?}"),
        }
    }

    #[test]
    fn shape_and_shader_switch_at_the_next_tick() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        let cube = d.scene().resolve_shape(ShapeKind::Cube).id;

        d.post(PanelEvent::SetShape(ShapeKind::Cube));
        d.post(PanelEvent::SetShader(ShaderKind::Lambert));
        d.post(PanelEvent::SetColor([0, 0, 0]));
        rec.clear();

        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 0);
        assert!(report.changes.shape_changed && report.changes.shader_changed);
        assert!(panel.has_color_control());
        assert_eq!(report.color, Color::new(0.0, 0.0, 0.0, 1.0));

        // Time still reaches the custom program even while lambert is drawn.
        assert!(rec.calls.contains(&Call::SetTime { program: "custom", time: 0.0 }));
        assert_eq!(
            rec.renders(),
            vec![&Call::Render { program: "lambert", meshes: vec![cube], color: Color::new(0.0, 0.0, 0.0, 1.0) }]
        );
    }

    #[test]
    fn load_scene_rebuilds_all_without_drift() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        rec.clear();

        d.post(PanelEvent::LoadScene);
        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 0);
        assert!(!report.rebuilt);
        assert_eq!(rec.created(), 3);
        assert_eq!(rec.destroyed(), 3);
    }

    #[test]
    fn color_maps_linearly() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let config = Configuration { color: [51, 102, 255], ..Configuration::default() };
        let mut d = driver(&mut rec, config);

        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 0);
        assert_relative_eq!(report.color.r, 0.2);
        assert_relative_eq!(report.color.g, 0.4);
        assert_relative_eq!(report.color.b, 1.0);
        assert_eq!(report.color.a, 1.0);
    }

    #[test]
    fn resize_sets_viewport_then_camera_projection() {
        let mut rec = Recorder::default();
        let mut d = driver(&mut rec, Configuration::default());
        let before = d.camera().projection();
        rec.clear();

        d.resize(&mut rec, 1600, 800);
        assert_eq!(rec.calls, vec![Call::SetViewport(1600, 800)]);
        assert_relative_eq!(d.camera().aspect(), 2.0);

        let expected = Mat4::perspective_rh(45f32.to_radians(), 2.0, 0.1, 1000.0);
        assert_ne!(d.camera().projection(), before);
        assert!(d.camera().projection().abs_diff_eq(expected, 1e-6));

        // The next frame renders with the resized viewport and projection.
        let mut panel = ControlPanel::new();
        rec.clear();
        d.tick(&mut rec, &mut panel, (1600, 800), 0);
        assert_eq!(rec.calls[0], Call::SetViewport(1600, 800));
    }

    #[test]
    fn resize_ignores_zero_extents() {
        let mut rec = Recorder::default();
        let mut d = driver(&mut rec, Configuration::default());
        d.resize(&mut rec, 1600, 800);
        let projection = d.camera().projection();
        rec.clear();

        d.resize(&mut rec, 0, 800);
        assert!(rec.calls.is_empty());
        assert_relative_eq!(d.camera().aspect(), 2.0);
        assert_eq!(d.camera().projection(), projection);
    }

    #[test]
    fn key_presses_accumulate_across_skipped_frames() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());
        rec.clear();

        // Two frames of input with no tick in between, as when the surface
        // is lost and the frame is skipped.
        for _ in 0..2 {
            let actions = panel.handle_keys(&[Key::ArrowUp], Modifiers::default(), &d.context().preview());
            for action in actions {
                if let PanelAction::Post(event) = action {
                    d.post(event);
                }
            }
        }

        let report = d.tick(&mut rec, &mut panel, VIEWPORT, 0);
        assert!(report.rebuilt);
        assert_eq!(d.context().config().tessellation_level, 7);
        assert_eq!(d.scene().built_tessellation(), 7);
        assert_eq!(rec.created(), 1);
    }

    #[test]
    fn animation_time_wraps() {
        let mut rec = Recorder::default();
        let mut panel = ControlPanel::new();
        let mut d = driver(&mut rec, Configuration::default());

        let a = d.tick(&mut rec, &mut panel, VIEWPORT, 1_234_567).animation_time;
        let b = d.tick(&mut rec, &mut panel, VIEWPORT, 1_234_567 + 1_000_000).animation_time;
        assert_eq!(a, b);
        assert!((0.0..1000.0).contains(&a));
    }

    #[test]
    fn release_destroys_scene_drawables() {
        let mut rec = Recorder::default();
        let d = driver(&mut rec, Configuration::default());
        rec.clear();

        d.release(&mut rec);
        assert_eq!(rec.destroyed(), 3);
    }
}
