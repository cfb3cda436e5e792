//! eisen-protocol: Shared wire definitions for the matrix API
//!
//! This crate defines the JSON payloads exchanged with the matrix service
//! and the REST routes they travel on. It performs no I/O.

pub mod routes;
pub mod types;

// Re-export main types at crate root
pub use routes::{Method, Route};
pub use types::{
    label_name_taken, normalize_label_name, Label, LabelCreate, LabelId, LabelUpdate,
    MatrixCreated, MatrixDetail, MatrixId, Quadrant, QuadrantParseError, Task, TaskCreate,
    TaskId, TaskUpdate,
};

/// Versioned path prefix every route hangs off
pub const API_PREFIX: &str = "/api/v1";
