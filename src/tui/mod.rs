//! Terminal UI module.
//!
//! Renders the wizard screens and handles input.

mod app;
mod input;
mod ui;

pub use app::run_tui;
pub use input::handle_events;
pub use ui::draw;
