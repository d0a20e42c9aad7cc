use anyhow::ensure;

use prism_engine::core::{App, AppControl, FrameCtx, StartCtx};
use prism_engine::input::MouseButton;
use prism_engine::render::{Camera, GpuMesh, GpuUploader, ProgramDesc, Renderer, ShaderProgram};

use crate::config::{ViewerContext, ViewerOptions, MAX_TESSELLATION};
use crate::driver::FrameDriver;
use crate::panel::{ControlPanel, PanelAction};
use crate::scene::{SceneSelector, ShaderSet};
use crate::stats::FrameStats;

/// GPU-side state, created in `on_start`.
struct GpuState {
    device:   wgpu::Device,
    renderer: Renderer,
    driver:   FrameDriver<GpuMesh, ShaderProgram>,
}

/// The viewer application driven by the engine runtime.
pub struct ViewerApp {
    options:   ViewerOptions,
    panel:     ControlPanel,
    stats:     FrameStats,
    shown_fps: Option<f32>,
    title:     String,
    gpu:       Option<GpuState>,
}

impl ViewerApp {
    pub fn new(options: ViewerOptions) -> Self {
        let stats = FrameStats::new(options.stats_interval);
        Self {
            options,
            panel: ControlPanel::new(),
            stats,
            shown_fps: None,
            title: String::new(),
            gpu: None,
        }
    }

    fn handle_input(&mut self, ctx: &FrameCtx<'_, '_>) -> AppControl {
        let Some(state) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let actions = self.panel.handle_keys(
            &ctx.input_frame.keys_pressed,
            ctx.input.modifiers,
            &state.driver.context().preview(),
        );
        for action in actions {
            match action {
                PanelAction::Post(event) => state.driver.post(event),
                PanelAction::Exit => return AppControl::Exit,
            }
        }

        let camera = state.driver.camera_mut();
        if ctx.input.button_down(MouseButton::Left) {
            let (dx, dy) = ctx.input_frame.pointer_delta;
            camera.orbit(dx, dy);
        }
        if ctx.input_frame.wheel_lines != 0.0 {
            camera.zoom(ctx.input_frame.wheel_lines);
        }

        AppControl::Continue
    }

    fn refresh_title(&mut self, ctx: &FrameCtx<'_, '_>) {
        let Some(state) = self.gpu.as_ref() else { return };
        let title = self.panel.title(state.driver.context().config(), self.shown_fps);
        if title != self.title {
            ctx.window.set_title(&title);
            self.title = title;
        }
    }
}

impl App for ViewerApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> anyhow::Result<()> {
        let config = self.options.config;
        ensure!(
            config.tessellation_level <= MAX_TESSELLATION,
            "initial tessellation {} exceeds {MAX_TESSELLATION}",
            config.tessellation_level,
        );

        let info = ctx.gpu.adapter_info();
        log::info!("rendering to {:?} on {}", ctx.gpu.surface_format(), info.name);

        let device = ctx.gpu.device().clone();
        let mut renderer = Renderer::new(ctx.gpu.surface_format());
        renderer.set_clear_color(self.options.clear_color);

        let programs = ShaderSet {
            lambert: renderer.create_program(&device, &ProgramDesc::LAMBERT),
            custom:  renderer.create_program(&device, &ProgramDesc::CUSTOM),
        };

        let scene = SceneSelector::load(&mut GpuUploader::new(&device), programs, &config);
        scene.sync_color_control_visibility(&mut self.panel);

        let camera = Camera::new(self.options.camera_eye, self.options.camera_target);
        let driver = FrameDriver::new(ViewerContext::new(config), scene, camera);

        self.title = self.panel.title(&config, None);
        ctx.window.set_title(&self.title);

        self.gpu = Some(GpuState { device, renderer, driver });
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(state) = self.gpu.as_mut() {
            state.driver.resize(&mut state.renderer, width, height);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_input(ctx) == AppControl::Exit {
            return AppControl::Exit;
        }

        let Some(state) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };

        let panel = &mut self.panel;
        let renderer = &mut state.renderer;
        let driver = &mut state.driver;
        let wall_ms = ctx.time.wall_ms;

        let control = ctx.render(|target| {
            let mut backend = renderer.frame(target.device, target.queue, target.encoder, target.color_view);
            driver.tick(&mut backend, panel, target.size, wall_ms);
        });
        if control == AppControl::Exit {
            return AppControl::Exit;
        }

        if self.stats.record(ctx.time.dt, ctx.time.now) {
            self.shown_fps = self.stats.fps();
        }
        self.refresh_title(ctx);

        AppControl::Continue
    }

    fn on_exit(&mut self) {
        if let Some(state) = self.gpu.take() {
            drop(state.driver.release(&mut GpuUploader::new(&state.device)));
            log::info!("scene released");
        }
    }
}
