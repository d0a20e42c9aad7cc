use prism_engine::input::{Key, Modifiers};

use crate::config::{Configuration, PanelEvent, ShaderKind, ShapeKind, MAX_TESSELLATION};

/// Color channel change per key press.
const COLOR_STEP: u8 = 16;

/// A control registered on the panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Tessellation,
    LoadScene,
    Shape,
    Shader,
    Color,
}

/// Result of a key press on the panel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PanelAction {
    Post(PanelEvent),
    Exit,
}

/// Keyboard-driven parameter panel.
///
/// Key map:
/// - `Up` / `Down`: tessellation level, clamped to `0..=MAX_TESSELLATION`
/// - `C` / `I` / `S`: cube / icosphere / square
/// - `L` / `K`: lambert / custom shader
/// - `R` / `G` / `B`: raise a color channel, with `Shift` lower it (only while
///   the color control is registered)
/// - `Space`: Load Scene
/// - `Escape`: exit
///
/// The panel never mutates the configuration; it emits [`PanelEvent`]s that
/// the frame loop applies at the next frame boundary.
#[derive(Debug)]
pub struct ControlPanel {
    controls: Vec<Control>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            controls: vec![Control::Tessellation, Control::LoadScene, Control::Shape, Control::Shader],
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn has_color_control(&self) -> bool {
        self.controls.contains(&Control::Color)
    }

    /// Removes the color control if registered, then re-registers it when
    /// `visible`. At most one color control exists afterwards.
    pub fn set_color_control_visible(&mut self, visible: bool) {
        let had = self.has_color_control();
        self.controls.retain(|c| *c != Control::Color);
        if visible {
            self.controls.push(Control::Color);
        }
        if had != visible {
            log::debug!("color control {}", if visible { "registered" } else { "removed" });
        }
    }

    /// Maps this frame's key presses to actions.
    ///
    /// Presses are folded into a local copy of `config` so that several
    /// presses within one frame accumulate.
    pub fn handle_keys(&self, keys: &[Key], modifiers: Modifiers, config: &Configuration) -> Vec<PanelAction> {
        let mut view = *config;
        let mut actions = Vec::new();

        for &key in keys {
            let Some(action) = self.map_key(key, modifiers, &view) else { continue };
            if let PanelAction::Post(event) = action {
                view.apply_event(event);
            }
            actions.push(action);
        }

        actions
    }

    fn map_key(&self, key: Key, modifiers: Modifiers, config: &Configuration) -> Option<PanelAction> {
        let event = match key {
            Key::Escape => return Some(PanelAction::Exit),

            Key::ArrowUp => {
                PanelEvent::SetTessellation((config.tessellation_level + 1).min(MAX_TESSELLATION))
            }
            Key::ArrowDown => {
                PanelEvent::SetTessellation(config.tessellation_level.saturating_sub(1).min(MAX_TESSELLATION))
            }
            Key::Space => PanelEvent::LoadScene,

            Key::C => PanelEvent::SetShape(ShapeKind::Cube),
            Key::I => PanelEvent::SetShape(ShapeKind::Icosphere),
            Key::S => PanelEvent::SetShape(ShapeKind::Square),

            Key::L => PanelEvent::SetShader(ShaderKind::Lambert),
            Key::K => PanelEvent::SetShader(ShaderKind::Custom),

            Key::R | Key::G | Key::B if self.has_color_control() => {
                let channel = match key {
                    Key::R => 0,
                    Key::G => 1,
                    _ => 2,
                };
                let mut color = config.color;
                color[channel] = if modifiers.shift {
                    color[channel].saturating_sub(COLOR_STEP)
                } else {
                    color[channel].saturating_add(COLOR_STEP)
                };
                PanelEvent::SetColor(color)
            }

            _ => return None,
        };

        Some(PanelAction::Post(event))
    }

    /// On-screen readout of the panel state, shown in the window title.
    pub fn title(&self, config: &Configuration, fps: Option<f32>) -> String {
        let mut title = format!(
            "prism | {} | tessellation {} | {}",
            config.shape.name(),
            config.tessellation_level,
            config.shader.name(),
        );
        if self.has_color_control() {
            let [r, g, b] = config.color;
            title.push_str(&format!(" | rgb({r}, {g}, {b})"));
        }
        if let Some(fps) = fps {
            title.push_str(&format!(" | {fps:.0} fps"));
        }
        title
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}
