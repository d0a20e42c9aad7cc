use glam::Vec3;

use prism_engine::geometry::{cube, icosphere, square, MeshData};
use prism_engine::render::MeshUploader;

use crate::config::{ConfigChanges, Configuration, ShaderKind, ShapeKind};
use crate::panel::ControlPanel;

const ICOSPHERE_RADIUS: f32 = 1.0;

/// The two compiled programs the viewer switches between.
pub struct ShaderSet<P> {
    pub lambert: P,
    pub custom:  P,
}

/// One drawable per [`ShapeKind`].
struct Shapes<M> {
    cube:      M,
    icosphere: M,
    square:    M,
}

/// Owns every drawable and program and tracks the current shape/shader pair.
///
/// Drawables are created through a [`MeshUploader`] and are destroyed through
/// one when replaced, so GPU buffers never outlive their last use.
pub struct SceneSelector<M, P> {
    shapes:   Shapes<M>,
    programs: ShaderSet<P>,

    current_shape:  ShapeKind,
    current_shader: ShaderKind,

    /// Tessellation level the current icosphere was built with.
    built_tessellation: u32,
}

impl<M, P> SceneSelector<M, P> {
    /// Builds every drawable from `config` and selects its shape and shader.
    pub fn load<U>(uploader: &mut U, programs: ShaderSet<P>, config: &Configuration) -> Self
    where
        U: MeshUploader<Mesh = M>,
    {
        let level = config.tessellation_level;
        let shapes = Shapes {
            icosphere: uploader.create_mesh(&build_icosphere(level)),
            square:    uploader.create_mesh(&square(Vec3::ZERO)),
            cube:      uploader.create_mesh(&cube(Vec3::ZERO)),
        };
        log::info!("scene loaded (tessellation {level})");

        Self {
            shapes,
            programs,
            current_shape: config.shape,
            current_shader: config.shader,
            built_tessellation: level,
        }
    }

    /// Rebuilds every drawable at `level`, destroying the previous ones.
    pub fn rebuild_geometry<U>(&mut self, uploader: &mut U, level: u32)
    where
        U: MeshUploader<Mesh = M>,
    {
        self.rebuild_icosphere(uploader, level);
        let old = std::mem::replace(&mut self.shapes.square, uploader.create_mesh(&square(Vec3::ZERO)));
        uploader.destroy_mesh(old);
        let old = std::mem::replace(&mut self.shapes.cube, uploader.create_mesh(&cube(Vec3::ZERO)));
        uploader.destroy_mesh(old);
        log::info!("scene reloaded (tessellation {level})");
    }

    /// Rebuilds only the icosphere at `level`, destroying the previous one.
    pub fn rebuild_icosphere<U>(&mut self, uploader: &mut U, level: u32)
    where
        U: MeshUploader<Mesh = M>,
    {
        let data = build_icosphere(level);
        log::debug!("icosphere rebuilt: level {level}, {} triangles", data.triangle_count());
        let old = std::mem::replace(&mut self.shapes.icosphere, uploader.create_mesh(&data));
        uploader.destroy_mesh(old);
        self.built_tessellation = level;
    }

    /// Rebuilds the icosphere if `level` differs from the level it was built
    /// with. Returns whether a rebuild happened.
    pub fn sync_tessellation<U>(&mut self, uploader: &mut U, level: u32) -> bool
    where
        U: MeshUploader<Mesh = M>,
    {
        if level == self.built_tessellation {
            return false;
        }
        log::info!("tessellation {} -> {level}", self.built_tessellation);
        self.rebuild_icosphere(uploader, level);
        true
    }

    /// Reacts to the discrete changes of one frame boundary.
    pub fn apply_changes<U>(
        &mut self,
        uploader: &mut U,
        config: &Configuration,
        changes: &ConfigChanges,
        panel: &mut ControlPanel,
    ) where
        U: MeshUploader<Mesh = M>,
    {
        if changes.load_scene {
            self.rebuild_geometry(uploader, config.tessellation_level);
        }
        if changes.shape_changed {
            self.current_shape = config.shape;
            log::info!("shape: {}", config.shape.name());
        }
        if changes.shader_changed {
            self.current_shader = config.shader;
            log::info!("shader: {}", config.shader.name());
            self.sync_color_control_visibility(panel);
        }
    }

    /// Drawable for `kind`.
    pub fn resolve_shape(&self, kind: ShapeKind) -> &M {
        match kind {
            ShapeKind::Cube => &self.shapes.cube,
            ShapeKind::Icosphere => &self.shapes.icosphere,
            ShapeKind::Square => &self.shapes.square,
        }
    }

    /// Program for `kind`.
    pub fn resolve_shader(&self, kind: ShaderKind) -> &P {
        match kind {
            ShaderKind::Lambert => &self.programs.lambert,
            ShaderKind::Custom => &self.programs.custom,
        }
    }

    pub fn resolve_current_shape(&self) -> &M {
        self.resolve_shape(self.current_shape)
    }

    pub fn resolve_current_shader(&self) -> &P {
        self.resolve_shader(self.current_shader)
    }

    pub fn current_shape(&self) -> ShapeKind {
        self.current_shape
    }

    pub fn current_shader(&self) -> ShaderKind {
        self.current_shader
    }

    pub fn built_tessellation(&self) -> u32 {
        self.built_tessellation
    }

    /// Shows the color control exactly while a color-reading shader is current.
    pub fn sync_color_control_visibility(&self, panel: &mut ControlPanel) {
        panel.set_color_control_visible(self.current_shader.uses_color());
    }

    /// Destroys every drawable and hands the programs back.
    pub fn release<U>(self, uploader: &mut U) -> ShaderSet<P>
    where
        U: MeshUploader<Mesh = M>,
    {
        let Shapes { cube, icosphere, square } = self.shapes;
        uploader.destroy_mesh(icosphere);
        uploader.destroy_mesh(square);
        uploader.destroy_mesh(cube);
        self.programs
    }
}

fn build_icosphere(level: u32) -> MeshData {
    icosphere(Vec3::ZERO, ICOSPHERE_RADIUS, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, Recorder};

    fn programs() -> ShaderSet<&'static str> {
        ShaderSet { lambert: "lambert", custom: "custom" }
    }

    #[test]
    fn load_creates_one_drawable_per_shape() {
        let mut rec = Recorder::default();
        let scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());

        assert_eq!(rec.created(), 3);
        assert_eq!(rec.destroyed(), 0);
        assert_eq!(scene.built_tessellation(), 5);
        assert_eq!(scene.resolve_current_shape().triangles, 20 * 4usize.pow(5));
        assert_eq!(*scene.resolve_current_shader(), "custom");
    }

    #[test]
    fn resolvers_cover_every_kind() {
        let mut rec = Recorder::default();
        let scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());

        let mut ids: Vec<u32> = ShapeKind::ALL.iter().map(|k| scene.resolve_shape(*k).id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        assert_eq!(scene.resolve_shape(ShapeKind::Cube).triangles, 12);
        assert_eq!(scene.resolve_shape(ShapeKind::Square).triangles, 2);
        assert_eq!(*scene.resolve_shader(ShaderKind::Lambert), "lambert");
        assert_eq!(*scene.resolve_shader(ShaderKind::Custom), "custom");

        // Unknown names resolve to the documented defaults.
        assert_eq!(
            scene.resolve_shape(ShapeKind::from_name("dodecahedron")).id,
            scene.resolve_shape(ShapeKind::Icosphere).id
        );
        assert_eq!(*scene.resolve_shader(ShaderKind::from_name("toon")), "custom");
    }

    #[test]
    fn sync_tessellation_is_idempotent() {
        let mut rec = Recorder::default();
        let mut scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());
        rec.clear();

        assert!(scene.sync_tessellation(&mut rec, 6));
        assert!(!scene.sync_tessellation(&mut rec, 6));
        assert_eq!(rec.created(), 1);
        assert_eq!(rec.destroyed(), 1);
        assert_eq!(scene.built_tessellation(), 6);
    }

    #[test]
    fn replaced_drawables_are_destroyed_after_the_new_one_exists() {
        let mut rec = Recorder::default();
        let mut scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());
        let old = scene.resolve_shape(ShapeKind::Icosphere).id;
        rec.clear();

        scene.rebuild_icosphere(&mut rec, 2);
        let new = scene.resolve_shape(ShapeKind::Icosphere).id;
        assert_ne!(old, new);
        assert_eq!(
            rec.calls,
            vec![Call::CreateMesh { id: new, triangles: 320 }, Call::DestroyMesh(old)]
        );
    }

    #[test]
    fn load_scene_rebuilds_everything() {
        let mut rec = Recorder::default();
        let mut scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());
        let mut panel = ControlPanel::new();
        rec.clear();

        let changes = ConfigChanges { load_scene: true, ..ConfigChanges::default() };
        scene.apply_changes(&mut rec, &Configuration::default(), &changes, &mut panel);

        assert_eq!(rec.created(), 3);
        assert_eq!(rec.destroyed(), 3);
    }

    #[test]
    fn color_control_follows_shader_selection() {
        let mut rec = Recorder::default();
        let mut scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());
        let mut panel = ControlPanel::new();
        scene.sync_color_control_visibility(&mut panel);
        assert!(!panel.has_color_control());

        let mut config = Configuration::default();
        let changes = ConfigChanges { shader_changed: true, ..ConfigChanges::default() };

        for shader in [ShaderKind::Lambert, ShaderKind::Custom, ShaderKind::Lambert, ShaderKind::Lambert] {
            config.shader = shader;
            scene.apply_changes(&mut rec, &config, &changes, &mut panel);
            assert_eq!(panel.has_color_control(), shader == ShaderKind::Lambert);
            assert!(panel.controls().iter().filter(|c| **c == crate::panel::Control::Color).count() <= 1);
        }
    }

    #[test]
    fn release_destroys_all_drawables() {
        let mut rec = Recorder::default();
        let scene = SceneSelector::load(&mut rec, programs(), &Configuration::default());
        let programs = scene.release(&mut rec);

        assert_eq!(rec.destroyed(), 3);
        assert_eq!(programs.lambert, "lambert");
    }
}
