use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Call order: `on_start` once after the GPU is up, then `on_resize` with the
/// initial drawable size, then `on_frame` once per display refresh, with
/// `on_resize` / `on_window_event` interleaved between frames. `on_exit` runs
/// once before the window and GPU are torn down.
pub trait App {
    /// Called once the window and GPU context exist. An error aborts startup.
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called when the drawable size changes (physical pixels, never zero).
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before shutdown; release GPU resources here.
    fn on_exit(&mut self) {}
}
