//=========================================================================
// Platform Subsystem
//
// Bridges the native stack (Winit window/input, gilrs gamepads) with the
// application thread via the event queue.
//
// Architecture:
// ```text
//  Controller Thread:                Application Thread:
//  ┌──────────────────────────┐     ┌──────────────────────┐
//  │  Winit Event Loop        │     │  app entry fn        │
//  │   ↓                      │     │                      │
//  │  Controller              │     │  EventReader.poll()  │
//  │   ├─ decodes events      │     │  WindowApi requests  │
//  │   ↓                      │     └──────────────────────┘
//  │  EventPump               │               ↑ │
//  │   ├─ translates          │    Event      │ │ WindowRequest
//  │   └─ synthesizes         │    channel    │ │ (proxy)
//  │   ↓                      │               │ ↓
//  │  EventQueue ─────────────┼───────────────┘ │
//  │  user_event() ◄──────────┼─────────────────┘
//  └──────────────────────────┘
//
//  Frame boundary: RedrawRequested
//    → render tick (one frame slot for the attached Renderer)
//    → gilrs events drained and translated
//    → next redraw requested
// ```
//
// Key Design Decisions:
// - **Controller thread owns everything native**: the window, the gilrs
//   context, and all geometry state live here; the application thread
//   sees only the queue, the proxy, and the handle arena.
// - **Cooperative shutdown**: CloseRequested posts `Exit`, drains the
//   renderer, then joins the application thread. A hung application
//   hangs shutdown; there is no cancellation primitive.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Shell::run`.
//
//=========================================================================

//=== Submodules ==========================================================

mod keymap;
mod padmap;
mod pump;
mod requests;

pub use requests::{WindowApi, WindowFlags};
pub(crate) use requests::WindowRequest;

//=== Standard Library Imports ============================================

use std::thread::JoinHandle;

//=== External Crates =====================================================

use gilrs::{EventType, Gilrs};
use log::{debug, error, info, trace, warn};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::handle::WindowHandle;
use crate::core::queue::EventQueue;
use crate::render::{FrameStatus, Renderer};
use crate::shell::{AppEnv, ShellError};
use pump::EventPump;

//=== Phase ===============================================================

/// Run-loop lifecycle state.
///
/// `Uninitialized → Running → ShuttingDown → Terminated`, strictly
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Before the native window exists.
    Uninitialized,
    /// Pumping events and rendering.
    Running,
    /// Exit observed; draining the renderer and joining the application.
    ShuttingDown,
    /// Application joined, window closed, loop exiting.
    Terminated,
}

//=== Controller ==========================================================

/// Window owner and run-loop driver.
///
/// Created by `Shell::run`, driven by Winit through `ApplicationHandler`.
/// Not `Send`; it never leaves the thread the event loop runs on.
pub(crate) struct Controller {
    //--- Configuration (from the builder) ---------------------------------
    title: String,
    width: u32,
    height: u32,

    //--- Native State -----------------------------------------------------
    window: Option<Window>,
    gilrs: Option<Gilrs>,

    //--- Translation & Forwarding -----------------------------------------
    pump: EventPump,
    renderer: Box<dyn Renderer>,

    //--- Application Lifecycle --------------------------------------------
    app: Option<Box<dyn FnOnce(AppEnv) -> i32 + Send>>,
    env: Option<AppEnv>,
    app_thread: Option<JoinHandle<i32>>,

    phase: Phase,
    outcome: Option<Result<i32, ShellError>>,
}

impl Controller {
    pub(crate) fn new(
        title: String,
        width: u32,
        height: u32,
        queue: EventQueue,
        renderer: Box<dyn Renderer>,
        env: AppEnv,
        app: Box<dyn FnOnce(AppEnv) -> i32 + Send>,
    ) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!(target: "platform::pad", "Gamepad support unavailable: {}", e);
                None
            }
        };

        Self {
            title,
            width,
            height,
            window: None,
            gilrs,
            pump: EventPump::new(queue),
            renderer,
            app: Some(app),
            env: Some(env),
            app_thread: None,
            phase: Phase::Uninitialized,
            outcome: None,
        }
    }

    /// The run's result, consumed by `Shell::run` after the loop exits.
    pub(crate) fn into_outcome(self) -> Result<i32, ShellError> {
        self.outcome.unwrap_or(Ok(0))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Drains pending gilrs events into the pump. Called once per frame.
    fn pump_gamepads(&mut self) {
        let Some(gilrs) = &mut self.gilrs else { return };

        while let Some(gilrs::Event { id, event, .. }) = gilrs.next_event() {
            let native: usize = id.into();
            match event {
                EventType::Connected => self.pump.pad_connected(native),
                EventType::Disconnected => self.pump.pad_disconnected(native),
                EventType::ButtonPressed(button, _) => self.pump.pad_button(native, button, true),
                EventType::ButtonReleased(button, _) => self.pump.pad_button(native, button, false),
                EventType::AxisChanged(axis, value, _) => self.pump.pad_axis(native, axis, value),
                _ => {}
            }
        }
    }

    /// Running → ShuttingDown → Terminated: post `Exit`, drain the
    /// renderer, join the application thread, close the window.
    fn begin_shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::ShuttingDown;
        info!(target: "platform", "Close requested, shutting down");

        self.pump.close_requested();

        // Keep granting frame slots until the pipeline is drained.
        while self.renderer.frame() == FrameStatus::Render {}

        if let Some(handle) = self.app_thread.take() {
            match handle.join() {
                Ok(code) => {
                    info!(target: "platform", "Application exited with code {}", code);
                    self.outcome = Some(Ok(code));
                }
                Err(_) => {
                    error!(target: "platform", "Application thread panicked");
                    self.outcome = Some(Err(ShellError::AppPanicked));
                }
            }
        }

        self.window = None;
        self.phase = Phase::Terminated;
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<WindowRequest> for Controller {
    /// Uninitialized → Running: create the window, attach the renderer,
    /// start the application thread, force the initial size event.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.outcome = Some(Err(ShellError::PlatformUnavailable(e.to_string())));
                self.phase = Phase::Terminated;
                event_loop.exit();
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        match (window.window_handle(), window.display_handle()) {
            (Ok(wh), Ok(dh)) => self.renderer.attach(wh.as_raw(), dh.as_raw()),
            _ => warn!(target: "platform", "Native handles unavailable, renderer not attached"),
        }

        // The application learns the real resolution before its first
        // frame, even when it matches the requested one.
        let size = window.inner_size();
        self.pump.set_size(size.width, size.height, true);

        if let (Some(app), Some(env)) = (self.app.take(), self.env.take()) {
            let spawned = std::thread::Builder::new()
                .name("casement-app".into())
                .spawn(move || app(env));
            match spawned {
                Ok(handle) => {
                    self.app_thread = Some(handle);
                    info!(target: "platform", "Application thread spawned");
                }
                Err(e) => {
                    error!(target: "platform", "Failed to spawn application thread: {}", e);
                    self.outcome = Some(Err(ShellError::PlatformUnavailable(format!(
                        "failed to spawn application thread: {}",
                        e
                    ))));
                    self.phase = Phase::Terminated;
                    event_loop.exit();
                    return;
                }
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.phase = Phase::Running;
    }

    /// Translates per-window native events through the pump.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.begin_shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.pump.resized(size.width, size.height);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pump.mouse_move(position.x, position.y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.pump.mouse_button(button, state.is_pressed());
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.pump.scroll(wheel_lines(delta));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    if !key_event.repeat {
                        self.pump.key(code, key_event.state.is_pressed());
                    }
                }
                if key_event.state.is_pressed() {
                    if let Some(text) = key_event.text.as_ref() {
                        for ch in text.chars() {
                            self.pump.text(ch);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if self.phase != Phase::Running {
                    return;
                }

                // Frame boundary: one slot for the renderer, then the
                // gamepad drain.
                self.renderer.frame();
                self.pump_gamepads();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Focus, IME, occlusion: not part of the portable surface.
            }
        }
    }

    /// Applies window requests sent by the application thread.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, request: WindowRequest) {
        let Some(window) = &self.window else { return };

        match request {
            WindowRequest::Create { handle, width, height, title, .. } => {
                // Single-window core: the request retargets the one
                // native window rather than opening another.
                debug!(target: "platform", "Create request for {:?} applied to the main window", handle);
                window.set_title(&title);
                if let Some(size) = window.request_inner_size(PhysicalSize::new(width, height)) {
                    self.pump.set_size(size.width, size.height, false);
                }
            }

            WindowRequest::Destroy { handle } => {
                if handle == WindowHandle::DEFAULT {
                    warn!(target: "platform", "Refusing to destroy the main window; close it instead");
                } else {
                    debug!(target: "platform", "Destroy request for {:?} acknowledged", handle);
                }
            }

            WindowRequest::SetPos { x, y, .. } => {
                window.set_outer_position(PhysicalPosition::new(x, y));
            }

            WindowRequest::SetSize { width, height, .. } => {
                if let Some(size) = window.request_inner_size(PhysicalSize::new(width, height)) {
                    self.pump.set_size(size.width, size.height, false);
                }
            }

            WindowRequest::SetTitle { title, .. } => {
                window.set_title(&title);
            }

            // Explicitly unimplemented in the single-window core.
            WindowRequest::SetFlags { handle, flags, enabled } => {
                debug!(
                    target: "platform",
                    "SetFlags({:?}, {:?}, {}) acknowledged, not actuated",
                    handle, flags, enabled
                );
            }
            WindowRequest::ToggleFullscreen { handle } => {
                debug!(target: "platform", "ToggleFullscreen({:?}) acknowledged, not actuated", handle);
            }
            WindowRequest::SetMouseLock { handle, lock } => {
                debug!(target: "platform", "SetMouseLock({:?}, {}) acknowledged, not actuated", handle, lock);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        trace!(target: "platform", "Idle, phase {:?}", self.phase);
    }
}

//=== Wheel Normalization =================================================

/// Reference pixel height of one scroll line for pixel-delta devices.
const PIXELS_PER_LINE: f64 = 20.0;

/// Normalizes Winit wheel deltas to line units for the accumulator.
fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition as Pos;

    // Controller itself needs a live display to exercise; its moving
    // parts (pump, keymap, padmap, queue) carry their own tests.

    #[test]
    fn line_deltas_pass_through() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, 1.0)), 1.0);
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(3.0, -2.0)), -2.0);
    }

    #[test]
    fn pixel_deltas_normalize_to_lines() {
        let delta = MouseScrollDelta::PixelDelta(Pos::new(0.0, 40.0));
        assert_eq!(wheel_lines(delta), 2.0);

        let delta = MouseScrollDelta::PixelDelta(Pos::new(0.0, -20.0));
        assert_eq!(wheel_lines(delta), -1.0);
    }

    #[test]
    fn phase_guard_blocks_shutdown_reentry() {
        // begin_shutdown only fires from Running; the enum distinctions
        // below are what that guard relies on.
        assert_ne!(Phase::Uninitialized, Phase::Running);
        assert_ne!(Phase::Running, Phase::ShuttingDown);
        assert_ne!(Phase::ShuttingDown, Phase::Terminated);
    }
}
