use std::sync::Arc;

use anyhow::{anyhow, Result};
use effect::Session;
use tracing::{error, info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::driver::FrameDriver;
use crate::gpu::GpuState;
use crate::runtime::{time_source_for_policy, RenderPolicy};
use crate::types::RendererConfig;

/// Window, GPU and frame bookkeeping for the interactive path.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    driver: FrameDriver,
    animate: bool,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig, session: Session) -> Result<Self> {
        let size = window.inner_size();
        let driver = FrameDriver::new(
            session,
            (size.width, size.height),
            time_source_for_policy(&config.policy),
        );
        let gpu = GpuState::new(window.as_ref(), size, driver.session(), driver.layout())?;

        Ok(Self {
            window,
            gpu,
            driver,
            animate: matches!(config.policy, RenderPolicy::Animate),
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.driver.resize((new_size.width, new_size.height));
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.driver
            .pointer_moved((position.x as f32, position.y as f32));
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.driver.next_frame();
        tracing::trace!(time = frame.time, "presenting frame");
        self.gpu.render(&frame, self.driver.layout())
    }
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed && matches!(event.logical_key, Key::Named(NamedKey::Escape))
}

/// Opens the window and drives frames until it is closed.
pub(crate) fn run(config: &RendererConfig, session: Session) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window, config, session)
        .map_err(|err| anyhow!("failed to initialise window renderer: {err:#}"))?;
    info!(
        width = window_size.width,
        height = window_size.height,
        animate = state.animate,
        "window ready"
    );
    state.window().request_redraw();

    let mut result = Ok(());
    let run_result = event_loop.run(|event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
            match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } if is_escape(&event) => {
                    elwt.exit();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    state.handle_cursor_moved(position);
                    if !state.animate {
                        state.window().request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    state.driver.pointer_left();
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                    state.window().request_redraw();
                }
                WindowEvent::RedrawRequested => match state.render_frame() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("surface lost or outdated; reconfiguring");
                        state.gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        result = Err(anyhow!("surface out of memory"));
                        elwt.exit();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        warn!("surface timeout; retrying next frame");
                    }
                    Err(other) => {
                        warn!("surface error: {other:?}; retrying next frame");
                    }
                },
                _ => {}
            }
        }
        Event::AboutToWait => {
            if state.animate {
                state.window().request_redraw();
            }
            elwt.set_control_flow(ControlFlow::Wait);
        }
        _ => {}
    });

    if let Err(err) = run_result {
        error!("window event loop error: {err}");
        result = Err(anyhow!("window event loop error: {err}"));
    }

    info!(size = ?state.gpu.size(), "window closed");
    result
}
