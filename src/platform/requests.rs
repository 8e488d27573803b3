//=========================================================================
// Window Requests
//
// Request-style window mutators for the application thread. Requests
// travel to the controller thread as Winit user events via the event
// loop proxy; the controller applies them to the native window (or
// acknowledges and logs the ones this single-window core does not
// actuate).
//
// The window-handle arena is the one piece of state the application
// thread mutates directly: allocation happens here, under the coarse
// mutex, so `create_window` can report exhaustion synchronously.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Arc, Mutex};

//=== External Crates =====================================================

use log::warn;
use winit::event_loop::EventLoopProxy;

//=== Internal Imports ====================================================

use crate::core::handle::{HandleArena, WindowHandle, MAX_WINDOWS};

//=== WindowFlags =========================================================

/// Window style flags carried by create/flag requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFlags(pub u32);

impl WindowFlags {
    pub const NONE: Self = Self(0);
    /// Keep the aspect ratio on resize.
    pub const ASPECT_RATIO: Self = Self(0x0000_0001);
    /// Decorated (framed) window.
    pub const FRAME: Self = Self(0x0000_0002);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for WindowFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//=== WindowRequest =======================================================

/// Mutation request delivered to the controller thread.
#[derive(Debug, Clone)]
pub(crate) enum WindowRequest {
    Create {
        handle: WindowHandle,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        flags: WindowFlags,
        title: String,
    },
    Destroy {
        handle: WindowHandle,
    },
    SetPos {
        handle: WindowHandle,
        x: i32,
        y: i32,
    },
    SetSize {
        handle: WindowHandle,
        width: u32,
        height: u32,
    },
    SetTitle {
        handle: WindowHandle,
        title: String,
    },
    SetFlags {
        handle: WindowHandle,
        flags: WindowFlags,
        enabled: bool,
    },
    ToggleFullscreen {
        handle: WindowHandle,
    },
    SetMouseLock {
        handle: WindowHandle,
        lock: bool,
    },
}

//=== WindowApi ===========================================================

/// Application-thread handle to the window system.
///
/// All mutators are fire-and-forget requests; none of them block on the
/// controller. Only `create_window` has a synchronous result: the
/// allocated handle, or [`WindowHandle::INVALID`] when the arena is
/// exhausted (check it, this is not an `Err`).
#[derive(Clone)]
pub struct WindowApi {
    proxy: EventLoopProxy<WindowRequest>,
    arena: Arc<Mutex<HandleArena<MAX_WINDOWS>>>,
}

impl WindowApi {
    pub(crate) fn new(
        proxy: EventLoopProxy<WindowRequest>,
        arena: Arc<Mutex<HandleArena<MAX_WINDOWS>>>,
    ) -> Self {
        Self { proxy, arena }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Allocates a window slot and requests its creation.
    ///
    /// Returns [`WindowHandle::INVALID`] when all slots are taken; live
    /// handles are unaffected by the failed attempt.
    pub fn create_window(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        flags: WindowFlags,
        title: &str,
    ) -> WindowHandle {
        let idx = {
            let mut arena = self.arena.lock().expect("window arena poisoned");
            arena.alloc()
        };

        let Some(idx) = idx else {
            warn!(target: "platform", "Window arena exhausted, create_window denied");
            return WindowHandle::INVALID;
        };

        let handle = WindowHandle(idx);
        self.send(WindowRequest::Create {
            handle,
            x,
            y,
            width,
            height,
            flags,
            title: title.to_owned(),
        });
        handle
    }

    /// Frees the slot and requests destruction of the native window.
    pub fn destroy_window(&self, handle: WindowHandle) {
        if !handle.is_valid() {
            return;
        }
        {
            let mut arena = self.arena.lock().expect("window arena poisoned");
            arena.free(handle.0);
        }
        self.send(WindowRequest::Destroy { handle });
    }

    //--- Geometry & Appearance --------------------------------------------

    pub fn set_window_pos(&self, handle: WindowHandle, x: i32, y: i32) {
        self.send(WindowRequest::SetPos { handle, x, y });
    }

    pub fn set_window_size(&self, handle: WindowHandle, width: u32, height: u32) {
        self.send(WindowRequest::SetSize { handle, width, height });
    }

    pub fn set_window_title(&self, handle: WindowHandle, title: &str) {
        self.send(WindowRequest::SetTitle {
            handle,
            title: title.to_owned(),
        });
    }

    //--- Acknowledged Stubs -----------------------------------------------
    //
    // Accepted and delivered, but the single-window core performs no
    // native action for these (see DESIGN.md).
    //

    pub fn set_window_flags(&self, handle: WindowHandle, flags: WindowFlags, enabled: bool) {
        self.send(WindowRequest::SetFlags { handle, flags, enabled });
    }

    pub fn toggle_fullscreen(&self, handle: WindowHandle) {
        self.send(WindowRequest::ToggleFullscreen { handle });
    }

    pub fn set_mouse_lock(&self, handle: WindowHandle, lock: bool) {
        self.send(WindowRequest::SetMouseLock { handle, lock });
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, request: WindowRequest) {
        if self.proxy.send_event(request).is_err() {
            warn!(target: "platform", "Event loop gone, window request dropped");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
