//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eisen_protocol::{LabelId, Quadrant, TaskId};

/// Shared Eisenhower matrix board
#[derive(Parser, Debug)]
#[command(name = "eisen")]
#[command(about = "Terminal board and command line client for shared Eisenhower matrices")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Base URL of the matrix API
    ///
    /// Overrides `[api] base_url` from the config file.
    /// Example: http://localhost:8000/api/v1
    #[arg(long, env = "EISEN_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Origin of the web frontend, used to build share links
    #[arg(long, env = "EISEN_WEB_URL", global = true)]
    pub web_url: Option<String>,

    /// Config file (default: ~/.config/eisen/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Matrix to open: share link, /matrix/{id} path or bare id
    pub matrix: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The subcommand to run; a bare `eisen [MATRIX]` opens the board
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Open {
            matrix: self.matrix,
        })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the interactive board
    #[command(name = "open")]
    Open {
        /// Share link, /matrix/{id} path or bare id
        matrix: Option<String>,
    },

    /// Create a new shared matrix and print its share link
    #[command(name = "new")]
    New,

    /// Print a matrix grouped by quadrant
    #[command(name = "show")]
    Show {
        matrix: String,

        /// Print the raw matrix as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a task
    #[command(name = "add-task")]
    AddTask {
        matrix: String,

        title: String,

        /// Quadrant: wire key, display name, do/schedule/delegate/delete or 1-4
        #[arg(short = 'q', long, default_value_t = Quadrant::UrgentImportant)]
        quadrant: Quadrant,

        /// Label name to attach (repeatable)
        #[arg(short = 'l', long = "label")]
        labels: Vec<String>,
    },

    /// Move a task to another quadrant
    #[command(name = "move-task")]
    MoveTask {
        matrix: String,
        task_id: TaskId,
        quadrant: Quadrant,
    },

    /// Delete a task
    #[command(name = "delete-task")]
    DeleteTask { matrix: String, task_id: TaskId },

    /// Create a label
    #[command(name = "add-label")]
    AddLabel { matrix: String, name: String },

    /// Rename a label
    #[command(name = "rename-label")]
    RenameLabel {
        matrix: String,
        label_id: LabelId,
        name: String,
    },

    /// Delete a label and detach it from every task
    #[command(name = "delete-label")]
    DeleteLabel { matrix: String, label_id: LabelId },
}
