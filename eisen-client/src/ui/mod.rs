//! Terminal board
//!
//! [`App`] owns the terminal and the state. Key presses and completed
//! requests both arrive as messages and are fed through
//! [`crate::state::update`].

mod app;
pub mod clipboard;
mod event;
pub mod input;
pub mod render;
mod terminal;

pub use app::App;
