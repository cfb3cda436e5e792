//! eisen-client: board client for shared Eisenhower matrices
//!
//! The client keeps no source of truth. It fetches the whole matrix when a
//! matrix is opened, after every write and on a fixed interval, and renders
//! whatever the server last returned.
//!
//! - [`api`]: HTTP calls against the matrix service
//! - [`session`]: which matrix the user means, and share links for it
//! - [`state`]: board state and its pure transition function
//! - [`sync`]: the refresh ticker
//! - [`runtime`]: runs the effects the state machine asks for
//! - [`ui`]: the ratatui board
//! - [`oneshot`]: scriptable single commands

pub mod api;
pub mod cli;
pub mod config;
pub mod oneshot;
pub mod runtime;
pub mod session;
pub mod state;
pub mod sync;
pub mod text;
pub mod ui;
