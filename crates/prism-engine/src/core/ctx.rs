use winit::window::{Window, WindowId};

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App::on_start`.
pub struct StartCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu:    &'a Gpu<'w>,
}

/// Everything needed to record one frame.
pub struct RenderTarget<'a> {
    pub device:     &'a wgpu::Device,
    pub queue:      &'a wgpu::Queue,
    pub encoder:    &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    /// Drawable size in physical pixels.
    pub size:       (u32, u32),
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:      WindowCtx<'a>,
    pub gpu:         &'a mut Gpu<'w>,
    pub input:       &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time:        FrameTime,
    pub runtime:     &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the next surface texture, calls `draw` with a ready
    /// [`RenderTarget`], then submits and presents the frame.
    ///
    /// Surface errors are resolved here: lost/outdated surfaces are
    /// reconfigured and the frame is skipped; fatal errors return `Exit`.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let size = self.gpu.size();

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget {
                device:     self.gpu.device(),
                queue:      self.gpu.queue(),
                encoder:    &mut frame.encoder,
                color_view: &frame.view,
                size:       (size.width, size.height),
            };
            draw(&mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
