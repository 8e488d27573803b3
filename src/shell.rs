//=========================================================================
// Casement Shell
//
// Main entry point and coordinator for the windowed application shell.
//
// Architecture:
// ```text
//     ShellBuilder  ──build()──>  Shell  ──run(app)──>  [Runtime]
//         │                        │
//         ├─ with_title()          └─ creates event channel
//         ├─ with_size()              runs the native event loop
//         └─ with_renderer()          spawns the application thread
//                                     blocks until exit, returns code
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex};

//=== External Crates =====================================================

use log::info;
use thiserror::Error;
use winit::event_loop::EventLoop;

//=== Internal Dependencies ===============================================

use crate::core::handle::{HandleArena, WindowHandle, MAX_WINDOWS};
use crate::core::queue::{self, EventReader};
use crate::platform::{Controller, WindowApi, WindowRequest};
use crate::render::{Headless, Renderer};

//=== ShellError ==========================================================

/// Fatal shell failures.
///
/// Everything recoverable is handled inside the run loop (dropped
/// events, exhausted handle arenas, unmapped input); these variants are
/// the conditions under which no application can run at all, plus the
/// one post-mortem case.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The native windowing stack could not be initialized.
    #[error("platform unavailable: {0}")]
    PlatformUnavailable(String),

    /// The native event loop failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The application thread panicked; there is no exit code to
    /// propagate.
    #[error("application thread panicked")]
    AppPanicked,
}

//=== AppEnv ==============================================================

/// Everything the embedded application receives.
///
/// Moved into the application thread at startup. `events` is the only
/// way input reaches the application; `window` is the only way window
/// mutations leave it.
pub struct AppEnv {
    /// Consumer half of the event queue.
    pub events: EventReader,

    /// Request-style window mutators.
    pub window: WindowApi,
}

//=== ShellBuilder ========================================================

/// Builder for configuring and constructing a [`Shell`].
///
/// # Default Values
///
/// - **Title**: `"casement"`
/// - **Size**: 1280×720 logical pixels
/// - **Channel capacity**: 128 events
/// - **Renderer**: [`Headless`]
///
/// # Examples
///
/// ```no_run
/// use casement::core::Event;
/// use casement::ShellBuilder;
///
/// let code = ShellBuilder::new()
///     .with_title("demo")
///     .with_size(800, 600)
///     .build()
///     .run(|mut env| loop {
///         while let Some(event) = env.events.poll() {
///             if event == Event::Exit {
///                 return 0;
///             }
///         }
///     })
///     .expect("shell failed to start");
///
/// std::process::exit(code);
/// ```
pub struct ShellBuilder {
    title: String,
    width: u32,
    height: u32,
    channel_capacity: usize,
    renderer: Option<Box<dyn Renderer>>,
}

impl ShellBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "casement".to_owned(),
            width: 1280,
            height: 720,
            channel_capacity: 128,
            renderer: None,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive");
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the event channel capacity.
    ///
    /// Larger values buffer more input during application stalls;
    /// overflow drops events rather than blocking the run loop.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Attaches a presentation backend; [`Headless`] when omitted.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Builds the shell instance.
    pub fn build(self) -> Shell {
        info!(
            target: "shell",
            "Building shell (\"{}\", {}x{}, channel: {})",
            self.title, self.width, self.height, self.channel_capacity
        );

        Shell {
            title: self.title,
            width: self.width,
            height: self.height,
            channel_capacity: self.channel_capacity,
            renderer: self.renderer,
        }
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Shell ===============================================================

/// Casement runtime.
///
/// Owns the native event loop and the window; runs the embedded
/// application on a second thread and blocks until it finishes.
///
/// # Architecture
///
/// ```text
/// Shell (Main Thread)
///   ├─► Controller (Winit event loop, gilrs, render tick)
///   │
///   └─► Application Thread (user closure)
///
/// Communication: bounded Event channel + WindowRequest proxy
/// ```
pub struct Shell {
    title: String,
    width: u32,
    height: u32,
    channel_capacity: usize,
    renderer: Option<Box<dyn Renderer>>,
}

impl Shell {
    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded event channel and the window-handle arena
    ///    (reserving slot 0, the default window)
    /// 2. Builds the native event loop and the request proxy
    /// 3. Enters the event loop; the window is created there and the
    ///    application thread spawned with its [`AppEnv`]
    /// 4. On close request: `Exit` is posted, the renderer drained, the
    ///    application joined, and its exit code returned
    ///
    /// # Errors
    ///
    /// [`ShellError::PlatformUnavailable`] if the native stack cannot
    /// start, [`ShellError::EventLoop`] if the loop fails while running,
    /// [`ShellError::AppPanicked`] if the application thread panicked.
    pub fn run<F>(mut self, app: F) -> Result<i32, ShellError>
    where
        F: FnOnce(AppEnv) -> i32 + Send + 'static,
    {
        info!(target: "shell", "Starting shell runtime");

        //--- 1. Event channel + window arena ------------------------------
        let (event_queue, events) = queue::channel(self.channel_capacity);

        let arena = Arc::new(Mutex::new(HandleArena::<MAX_WINDOWS>::new()));
        {
            // Reserve slot 0 for the default window before the
            // application can allocate.
            let idx = arena
                .lock()
                .expect("fresh arena")
                .alloc()
                .expect("fresh arena has capacity");
            debug_assert_eq!(idx, WindowHandle::DEFAULT.0);
        }

        //--- 2. Native event loop + request proxy -------------------------
        let event_loop = EventLoop::<WindowRequest>::with_user_event()
            .build()
            .map_err(|e| ShellError::PlatformUnavailable(e.to_string()))?;

        let window_api = WindowApi::new(event_loop.create_proxy(), Arc::clone(&arena));
        let env = AppEnv { events, window: window_api };

        //--- 3. Run the controller ----------------------------------------
        let renderer = self.renderer.take().unwrap_or_else(|| Box::new(Headless));
        let mut controller = Controller::new(
            self.title,
            self.width,
            self.height,
            event_queue,
            renderer,
            env,
            Box::new(app),
        );

        info!(target: "shell", "Entering event loop");
        event_loop.run_app(&mut controller)?;

        //--- 4. Propagate the application's exit code ---------------------
        let outcome = controller.into_outcome();
        info!(target: "shell", "Shell shutdown complete ({:?})", outcome);
        outcome
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // ShellBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = ShellBuilder::new();
        assert_eq!(builder.title, "casement");
        assert_eq!((builder.width, builder.height), (1280, 720));
        assert_eq!(builder.channel_capacity, 128);
        assert!(builder.renderer.is_none());
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let shell = ShellBuilder::new()
            .with_title("demo")
            .with_size(800, 600)
            .with_channel_capacity(256)
            .build();

        assert_eq!(shell.title, "demo");
        assert_eq!((shell.width, shell.height), (800, 600));
        assert_eq!(shell.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_rejects_zero_size() {
        ShellBuilder::new().with_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_rejects_zero_capacity() {
        ShellBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_accepts_custom_renderer() {
        let shell = ShellBuilder::new()
            .with_renderer(Box::new(Headless))
            .build();
        assert!(shell.renderer.is_some());
    }

    //=====================================================================
    // ShellError Tests
    //=====================================================================

    #[test]
    fn errors_display_their_cause() {
        let err = ShellError::PlatformUnavailable("no display".into());
        assert_eq!(err.to_string(), "platform unavailable: no display");

        let err = ShellError::AppPanicked;
        assert!(err.to_string().contains("panicked"));
    }

    #[test]
    fn shell_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShellError>();
    }
}
