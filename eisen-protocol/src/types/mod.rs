pub mod label;
pub mod matrix;
pub mod quadrant;
pub mod task;

pub use label::*;
pub use matrix::*;
pub use quadrant::*;
pub use task::*;
