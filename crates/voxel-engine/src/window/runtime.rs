use std::time::Duration;

use anyhow::Context;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::draw::{DrawList, Frame};
use crate::error::{EngineError, Result};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::paint::Color;
use crate::render::{MeshRenderer, RenderCtx, RenderTarget};
use crate::surface::Surface;

use super::WindowConfig;

/// Upper bound on pumps while waiting for the platform to resume the app.
const STARTUP_PUMPS: u32 = 200;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Receives winit callbacks during a pump.
struct Handler {
    config: WindowConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    startup_error: Option<anyhow::Error>,

    input: InputState,
    input_frame: InputFrame,
    close_requested: bool,
}

impl Handler {
    fn new(config: WindowConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            startup_error: None,
            input: InputState::default(),
            input_frame: InputFrame::default(),
            close_requested: false,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.startup_error.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                log::info!("window `{}` created", self.config.title);
                // Some platforms never send an initial Focused(true).
                let focused = entry.with_window(|w| w.has_focus());
                self.input.apply_event(&mut self.input_frame, InputEvent::Focused(focused));
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("failed to create window: {err:#}");
                self.startup_error = Some(err);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = entry.with_window(|w| translate_window_event(w, &event)) {
            self.input.apply_event(&mut self.input_frame, ev);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                log::debug!("resized to {}x{}", size.width, size.height);
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }
            _ => {}
        }
    }
}

/// A winit window with a wgpu swapchain, driven by explicit event pumping.
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    handler: Handler,

    draw_list: DrawList,
    renderer: MeshRenderer,
}

impl WindowSurface {
    /// Opens the window and initializes the GPU.
    ///
    /// Blocks until the platform has created the window or failed to.
    pub fn open(config: WindowConfig, gpu_init: GpuInit) -> Result<Self> {
        let mut event_loop = EventLoop::new()
            .map_err(|err| EngineError::Startup(format!("failed to create event loop: {err}")))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut handler = Handler::new(config, gpu_init);

        // The window is created from `resumed`, which only fires while pumping.
        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);

            if let Some(err) = handler.startup_error.take() {
                return Err(EngineError::Startup(format!("{err:#}")));
            }
            if handler.entry.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(EngineError::Startup(format!(
                    "event loop exited during startup (code {code})"
                )));
            }
        }

        if handler.entry.is_none() {
            return Err(EngineError::Startup("platform never resumed the application".to_string()));
        }

        Ok(Self {
            event_loop,
            handler,
            draw_list: DrawList::new(),
            renderer: MeshRenderer::new(),
        })
    }

    /// Current inner size in logical pixels, rounded.
    ///
    /// `None` before the window exists and while it is minimized.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        let entry = self.handler.entry.as_ref()?;
        let size: LogicalSize<u32> =
            entry.with_window(|w| w.inner_size().to_logical(w.scale_factor()));
        (size.width > 0 && size.height > 0).then_some((size.width, size.height))
    }
}

impl Surface for WindowSurface {
    fn poll_events(&mut self) -> Result<()> {
        self.handler.input_frame.clear();

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            log::info!("event loop exited (code {code})");
            self.handler.close_requested = true;
        }
        Ok(())
    }

    fn present_frame(&mut self) -> Result<()> {
        let clear = self.handler.config.clear_color;
        let result = match self.handler.entry.as_mut() {
            Some(entry) => entry.with_mut(|fields| {
                render_frame(fields.window, fields.gpu, &mut self.renderer, &self.draw_list, clear)
            }),
            None => Ok(()),
        };
        self.draw_list.clear();
        result
    }

    fn requested_close(&self) -> bool {
        self.handler.close_requested
    }

    fn dimensions(&self) -> Viewport {
        match self.handler.entry.as_ref() {
            Some(entry) => entry.with_window(logical_viewport),
            None => {
                let size = self.handler.config.initial_size;
                Viewport::new(size.width as f32, size.height as f32)
            }
        }
    }

    fn input(&self) -> &InputState {
        &self.handler.input
    }

    fn input_frame(&self) -> &InputFrame {
        &self.handler.input_frame
    }

    fn set_cursor_position(&mut self, x: f32, y: f32) {
        if let Some(entry) = self.handler.entry.as_ref() {
            let pos = LogicalPosition::new(f64::from(x), f64::from(y));
            if let Err(err) = entry.with_window(|w| w.set_cursor_position(pos)) {
                log::debug!("cursor warp not supported: {err}");
            }
        }
        self.handler.input.pointer_pos = Some((x, y));
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let Some(entry) = self.handler.entry.as_ref() else {
            return;
        };

        entry.with_window(|w| {
            let grab = if captured {
                w.set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| w.set_cursor_grab(CursorGrabMode::Locked))
            } else {
                w.set_cursor_grab(CursorGrabMode::None)
            };
            if let Err(err) = grab {
                log::warn!("cursor grab change failed: {err}");
            }
            w.set_cursor_visible(!captured);
        });
    }

    fn set_title(&mut self, title: &str) {
        if let Some(entry) = self.handler.entry.as_ref() {
            entry.with_window(|w| w.set_title(title));
        }
        self.handler.config.title = title.to_string();
    }

    fn frame(&mut self) -> Frame<'_> {
        let viewport = self.dimensions();
        Frame::new(viewport, &mut self.draw_list)
    }
}

fn logical_viewport(window: &Window) -> Viewport {
    let size: LogicalSize<f32> = window.inner_size().to_logical(window.scale_factor());
    Viewport::new(size.width, size.height)
}

fn render_frame(
    window: &Window,
    gpu: &mut Gpu<'_>,
    renderer: &mut MeshRenderer,
    list: &DrawList,
    clear: Color,
) -> Result<()> {
    // Minimized; nothing to draw into.
    if !gpu.is_drawable() {
        return Ok(());
    }

    let mut frame = match gpu.begin_frame() {
        Ok(frame) => frame,
        Err(err) => {
            return match gpu.handle_surface_error(&err) {
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                    log::warn!("dropping frame: {err}");
                    Ok(())
                }
                SurfaceErrorAction::Fatal => {
                    log::error!("unrecoverable surface error: {err}");
                    Err(EngineError::Surface(err.to_string()))
                }
            };
        }
    };

    let ctx = RenderCtx {
        device: gpu.device(),
        queue: gpu.queue(),
        surface_format: gpu.surface_format(),
        viewport: logical_viewport(window),
    };
    let mut target = RenderTarget {
        encoder: &mut frame.encoder,
        color_view: &frame.view,
    };
    renderer.render(&ctx, &mut target, list, clear);

    window.pre_present_notify();
    gpu.submit(frame);
    Ok(())
}
