use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec3;
use prism_engine::paint::Color;

/// Highest tessellation level the panel offers.
pub const MAX_TESSELLATION: u32 = 8;

// ── Kinds ─────────────────────────────────────────────────────────────────

/// Selectable procedural shape.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Cube,
    #[default]
    Icosphere,
    Square,
}

impl ShapeKind {
    /// Panel order.
    pub const ALL: [Self; 3] = [Self::Cube, Self::Icosphere, Self::Square];

    /// Parses a panel name; anything unrecognized selects [`ShapeKind::Icosphere`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cube" => Self::Cube,
            "square" => Self::Square,
            _ => Self::Icosphere,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Icosphere => "icosphere",
            Self::Square => "square",
        }
    }
}

/// Selectable shader program.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Lambert,
    #[default]
    Custom,
}

impl ShaderKind {
    /// Panel order.
    pub const ALL: [Self; 2] = [Self::Lambert, Self::Custom];

    /// Parses a panel name; anything unrecognized selects [`ShaderKind::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "lambert" => Self::Lambert,
            _ => Self::Custom,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lambert => "lambert",
            Self::Custom => "custom",
        }
    }

    /// Whether the program reads the color uniform.
    pub fn uses_color(self) -> bool {
        matches!(self, Self::Lambert)
    }

    /// Whether the program reads the animation time uniform.
    pub fn has_time_uniform(self) -> bool {
        matches!(self, Self::Custom)
    }
}

// ── Configuration ─────────────────────────────────────────────────────────

/// User-editable viewer parameters.
///
/// `tessellation_level` is kept in `0..=MAX_TESSELLATION` by the panel; the
/// frame loop builds whatever level it finds here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Configuration {
    pub tessellation_level: u32,
    pub shape:              ShapeKind,
    pub shader:             ShaderKind,
    pub color:              [u8; 3],
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tessellation_level: 5,
            shape:              ShapeKind::Icosphere,
            shader:             ShaderKind::Custom,
            color:              [255, 0, 0],
        }
    }
}

impl Configuration {
    /// Applies one panel event to this record.
    pub fn apply_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::SetTessellation(level) => self.tessellation_level = level,
            PanelEvent::SetShape(shape) => self.shape = shape,
            PanelEvent::SetShader(shader) => self.shader = shader,
            PanelEvent::SetColor(color) => self.color = color,
            PanelEvent::LoadScene => {}
        }
    }
}

/// Change request emitted by the control panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PanelEvent {
    SetTessellation(u32),
    SetShape(ShapeKind),
    SetShader(ShaderKind),
    SetColor([u8; 3]),
    /// Rebuild every drawable regardless of drift.
    LoadScene,
}

/// Discrete changes produced by one [`ViewerContext::apply_pending`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ConfigChanges {
    pub shape_changed:  bool,
    pub shader_changed: bool,
    pub load_scene:     bool,
}

impl ConfigChanges {
    pub fn any(&self) -> bool {
        self.shape_changed || self.shader_changed || self.load_scene
    }
}

/// Configuration plus the queue of panel events not yet applied.
///
/// Events are only applied at a frame boundary through
/// [`apply_pending`](Self::apply_pending), so a rebuild never observes a
/// half-applied configuration.
#[derive(Debug, Default)]
pub struct ViewerContext {
    config:  Configuration,
    pending: VecDeque<PanelEvent>,
}

impl ViewerContext {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            pending: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Queues an event for the next frame.
    pub fn post(&mut self, event: PanelEvent) {
        self.pending.push_back(event);
    }

    /// The configuration as it will be once the queued events are applied.
    ///
    /// Input handlers build new events from this, so presses made while a
    /// frame is skipped still accumulate.
    pub fn preview(&self) -> Configuration {
        let mut config = self.config;
        for event in &self.pending {
            config.apply_event(*event);
        }
        config
    }

    /// Applies queued events in order and reports which discrete selections
    /// changed. Re-selecting the current shape or shader is not a change.
    pub fn apply_pending(&mut self) -> ConfigChanges {
        let mut changes = ConfigChanges::default();

        while let Some(event) = self.pending.pop_front() {
            let before = self.config;
            self.config.apply_event(event);
            changes.shape_changed |= before.shape != self.config.shape;
            changes.shader_changed |= before.shader != self.config.shader;
            changes.load_scene |= event == PanelEvent::LoadScene;
        }

        changes
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Startup options of the viewer.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub config:         Configuration,
    pub clear_color:    Color,
    pub camera_eye:     Vec3,
    pub camera_target:  Vec3,
    /// How often frame statistics are logged.
    pub stats_interval: Duration,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            config:         Configuration::default(),
            clear_color:    Color::new(0.2, 0.2, 0.2, 1.0),
            camera_eye:     Vec3::new(0.0, 0.0, 5.0),
            camera_target:  Vec3::ZERO,
            stats_interval: Duration::from_secs(5),
        }
    }
}
