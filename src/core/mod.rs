//=========================================================================
// Core
//=========================================================================
//
// Platform-independent half of the shell: the portable event vocabulary,
// the cross-thread event queue, the handle arenas, and the gamepad axis
// filter. Nothing in here touches Winit or gilrs types; the `platform`
// module translates into these shapes.
//
// Components:
// - `events`: Key/Modifiers/MouseButton/GamepadAxis enums and `Event`
// - `queue`: bounded producer/consumer pair (`EventQueue`/`EventReader`)
// - `handle`: window/gamepad handles and the free-list arena
// - `gamepad`: deadzone filter and directional key synthesis
//
//=========================================================================

//=== Module Declarations =================================================

pub mod events;
pub mod handle;
pub mod queue;

pub(crate) mod gamepad;

//=== Public API ==========================================================

pub use events::{Event, GamepadAxis, Key, Modifiers, MouseButton};
pub use handle::{GamepadHandle, WindowHandle, MAX_GAMEPADS, MAX_WINDOWS};
pub use queue::{EventQueue, EventReader};
