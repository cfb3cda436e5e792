//! Non-interactive commands
//!
//! Each command performs one request (plus a fetch where labels need
//! resolving) and returns a process exit code. Failures are reported on
//! stderr with the same wording the board uses.

use std::fmt::{self, Write as _};

use eisen_protocol::{
    label_name_taken, normalize_label_name, Label, LabelCreate, LabelId, LabelUpdate,
    MatrixDetail, MatrixId, Quadrant, TaskCreate, TaskUpdate,
};
use eisen_utils::{EisenError, Result};

use crate::api::ApiClient;
use crate::cli::Command;
use crate::config::ClientConfig;
use crate::session;
use crate::text::{self, Mutation};

fn fail(message: impl fmt::Display) -> i32 {
    eprintln!("error: {}", message);
    1
}

fn matrix_arg(raw: &str) -> std::result::Result<MatrixId, i32> {
    session::resolve(raw).ok_or_else(|| fail(text::INVALID_MATRIX_REFERENCE))
}

/// Map label names to ids, case-insensitively
///
/// Returns the first name that matches no label.
pub fn resolve_labels(labels: &[Label], names: &[String]) -> std::result::Result<Vec<LabelId>, String> {
    names
        .iter()
        .map(|name| {
            let wanted = normalize_label_name(name);
            labels
                .iter()
                .find(|label| normalize_label_name(&label.name) == wanted)
                .map(|label| label.id)
                .ok_or_else(|| name.clone())
        })
        .collect()
}

/// Plain-text rendering of a matrix, one section per quadrant
pub fn format_board(detail: &MatrixDetail) -> String {
    let mut out = String::new();

    for quadrant in Quadrant::ALL {
        let _ = writeln!(out, "== {} ({}) ==", quadrant.display_name(), quadrant.action());
        let mut empty = true;
        for task in detail.tasks_in(quadrant) {
            empty = false;
            let _ = write!(out, "  #{} {}", task.id, task.title);
            if !task.labels.is_empty() {
                let names: Vec<&str> = task.labels.iter().map(|l| l.name.as_str()).collect();
                let _ = write!(out, " [{}]", names.join(", "));
            }
            out.push('\n');
        }
        if empty {
            let _ = writeln!(out, "  {}", text::EMPTY_QUADRANT_MESSAGE);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", text::EXISTING_LABELS_TITLE);
    if detail.labels.is_empty() {
        let _ = writeln!(out, "  {}", text::NO_LABELS_CREATED_MODAL_MESSAGE);
    }
    for label in &detail.labels {
        let _ = writeln!(out, "  #{} {}", label.id, label.name);
    }

    out
}

/// Fetch a matrix, reporting failure the way the board does
async fn fetch(api: &ApiClient, id: &MatrixId) -> std::result::Result<MatrixDetail, i32> {
    api.fetch_matrix(id)
        .await
        .map_err(|e| fail(text::sync_failure(id, &e)))
}

fn report<T>(mutation: Mutation, result: std::result::Result<T, EisenError>) -> std::result::Result<T, i32> {
    result.map_err(|e| {
        tracing::debug!("{:?} failed: {:?}", mutation, e);
        fail(text::mutation_failure(mutation, &e))
    })
}

/// Run a non-interactive command
pub async fn execute(command: Command, config: &ClientConfig) -> Result<i32> {
    let api = ApiClient::new(&config.api)?;
    let code = match run(&api, command, config).await {
        Ok(()) => 0,
        Err(code) => code,
    };
    Ok(code)
}

async fn run(api: &ApiClient, command: Command, config: &ClientConfig) -> std::result::Result<(), i32> {
    match command {
        Command::Open { .. } => {
            return Err(fail("the board is not available in one-shot mode"));
        }

        Command::New => {
            let created = api.create_matrix().await.map_err(|e| {
                tracing::debug!("create matrix: {}", e);
                fail(text::CREATE_MATRIX_FAILED)
            })?;
            println!("Matrix: {}", created.id);
            println!("Share link: {}", session::share_link(&config.web.origin, &created.id));
        }

        Command::Show { matrix, json } => {
            let id = matrix_arg(&matrix)?;
            let detail = fetch(api, &id).await?;
            if json {
                let rendered = serde_json::to_string_pretty(&detail).map_err(fail)?;
                println!("{}", rendered);
            } else {
                print!("{}", format_board(&detail));
            }
        }

        Command::AddTask {
            matrix,
            title,
            quadrant,
            labels,
        } => {
            let id = matrix_arg(&matrix)?;
            let title = title.trim();
            if title.is_empty() {
                return Err(fail("task title cannot be empty"));
            }

            let label_ids = if labels.is_empty() {
                Vec::new()
            } else {
                let detail = fetch(api, &id).await?;
                resolve_labels(&detail.labels, &labels)
                    .map_err(|name| fail(format!("unknown label '{}'", name)))?
            };

            let body = TaskCreate::new(title, quadrant, label_ids);
            let task = report(Mutation::AddTask, api.create_task(&id, &body).await)?;
            println!("Added task #{} to {}", task.id, task.quadrant);
        }

        Command::MoveTask {
            matrix,
            task_id,
            quadrant,
        } => {
            let id = matrix_arg(&matrix)?;
            let body = TaskUpdate::move_to(quadrant);
            report(Mutation::UpdateTask, api.update_task(&id, task_id, &body).await)?;
            println!("Moved task #{} to {}", task_id, quadrant);
        }

        Command::DeleteTask { matrix, task_id } => {
            let id = matrix_arg(&matrix)?;
            report(Mutation::DeleteTask, api.delete_task(&id, task_id).await)?;
            println!("Deleted task #{}", task_id);
        }

        Command::AddLabel { matrix, name } => {
            let id = matrix_arg(&matrix)?;
            if name.trim().is_empty() {
                return Err(fail("label name cannot be empty"));
            }
            let detail = fetch(api, &id).await?;
            if label_name_taken(&detail.labels, &name, None) {
                return Err(fail(text::LABEL_ALREADY_EXISTS));
            }
            let label = report(Mutation::AddLabel, api.create_label(&id, &LabelCreate::named(&name)).await)?;
            println!("Added label #{} {}", label.id, label.name);
        }

        Command::RenameLabel {
            matrix,
            label_id,
            name,
        } => {
            let id = matrix_arg(&matrix)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(fail("label name cannot be empty"));
            }
            let detail = fetch(api, &id).await?;
            if label_name_taken(&detail.labels, name, Some(label_id)) {
                return Err(fail(text::LABEL_ALREADY_EXISTS));
            }
            let body = LabelUpdate {
                name: Some(name.to_string()),
                color: None,
            };
            let label = report(Mutation::UpdateLabel, api.update_label(&id, label_id, &body).await)?;
            println!("Renamed label #{} to {}", label.id, label.name);
        }

        Command::DeleteLabel { matrix, label_id } => {
            let id = matrix_arg(&matrix)?;
            report(Mutation::DeleteLabel, api.delete_label(&id, label_id).await)?;
            println!("Deleted label #{}", label_id);
        }
    }

    Ok(())
}
