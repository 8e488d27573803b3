//=========================================================================
// Casement — Library Root
//
// This crate defines the public API surface of the Casement shell.
//
// Casement opens one OS window, pumps its native event loop, translates
// native keyboard/mouse/gamepad input into a portable event vocabulary,
// and forwards the result to an embedded application running on a
// second thread. Rendering is a seam, not a feature: implement
// `render::Renderer` to present into the window.
//
// Responsibilities:
// - Expose the shell entry point (`ShellBuilder` / `Shell`)
// - Expose the application-facing surface (`AppEnv`: event polling and
//   window requests)
// - Keep native integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use casement::core::Event;
// use casement::ShellBuilder;
//
// fn main() {
//     let code = ShellBuilder::new()
//         .with_title("hello")
//         .build()
//         .run(|mut env| loop {
//             while let Some(event) = env.events.poll() {
//                 if event == Event::Exit {
//                     return 0;
//                 }
//             }
//         })
//         .expect("platform unavailable");
//     std::process::exit(code);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the portable half: event types, the queue, handles.
// `render` holds the presentation seam implemented by embeddings.
//
pub mod core;
pub mod render;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the native integration (Winit window and event
// loop, gilrs gamepads, translation) and is kept private; only the
// application-facing types are re-exported.
//
// `shell` defines the entry point and configuration.
//
mod platform;
mod shell;

pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// The shell facade plus the window-request surface, so applications can
// simply `use casement::{ShellBuilder, WindowApi};` without knowing the
// internal module structure.
//
pub use platform::{WindowApi, WindowFlags};
pub use shell::{AppEnv, Shell, ShellBuilder, ShellError};
