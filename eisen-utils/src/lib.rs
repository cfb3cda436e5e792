//! eisen-utils: pieces shared by every eisen crate
//!
//! Error type, logging setup and XDG path resolution.

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{EisenError, Result};
pub use logging::{init_logging_with_config, LogConfig, LogOutput};
pub use paths::{config_dir, config_file, log_dir};
