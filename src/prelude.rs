//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use casement::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Shell entry point
pub use crate::shell::{AppEnv, Shell, ShellBuilder, ShellError};

// Event vocabulary
pub use crate::core::events::{Event, GamepadAxis, Key, Modifiers, MouseButton};

// Handles
pub use crate::core::handle::{GamepadHandle, WindowHandle};

// Queue consumer
pub use crate::core::queue::EventReader;

// Window requests
pub use crate::platform::{WindowApi, WindowFlags};

// Render seam
pub use crate::render::{FrameStatus, Headless, Renderer};
