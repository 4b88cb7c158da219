//! Window composition and snapping engine for a desktop-style home screen.
//!
//! The crate is organised leaves first:
//!
//! - [`window`] owns the authoritative window registry and its state machine.
//! - [`layout::snap`] is the stateless snap geometry engine.
//! - [`taskbar`] projects the registry into taskbar groups, thumbnails and
//!   context menus.
//! - [`keybindings`] and [`dispatcher`] map key chords onto the other three.
//!
//! Everything else (`drag`, `panel`, `view`, `ui`) is the terminal front-end
//! used by the `desk-wm` binary.

pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod drag;
pub mod keybindings;
pub mod layout;
pub mod log_buffer;
pub mod panel;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod view;
pub mod window;
