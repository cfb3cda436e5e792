//! eisen: terminal board and command line client for shared Eisenhower matrices

use clap::Parser;

use eisen_client::cli::{Cli, Command};
use eisen_client::config::ClientConfig;
use eisen_client::ui::App;
use eisen_client::{oneshot, session, text};
use eisen_utils::{init_logging_with_config, LogConfig, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone();
    let api_url = cli.api_url.clone();
    let web_url = cli.web_url.clone();
    let command = cli.into_command();

    // The board owns the terminal, so it logs to a file instead of stderr
    let log_config = match command {
        Command::Open { .. } => LogConfig::tui(),
        _ => LogConfig::cli(),
    };
    if let Err(e) = init_logging_with_config(log_config) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::debug!("Command: {:?}", command);

    let exit_code = match run(command, config_path, api_url, web_url).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("eisen error: {}", e);
            eprintln!("error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(
    command: Command,
    config_path: Option<std::path::PathBuf>,
    api_url: Option<String>,
    web_url: Option<String>,
) -> Result<i32> {
    let config = ClientConfig::load(config_path.as_deref())?.with_overrides(api_url, web_url);

    match command {
        Command::Open { matrix } => {
            let initial = match matrix {
                Some(raw) => match session::resolve(&raw) {
                    Some(id) => Some(id),
                    None => {
                        eprintln!("error: {}", text::INVALID_MATRIX_REFERENCE);
                        return Ok(1);
                    }
                },
                None => None,
            };
            tracing::info!("eisen board starting against {}", config.api.base_url);
            App::new(&config, initial)?.run().await?;
            Ok(0)
        }
        other => oneshot::execute(other, &config).await,
    }
}
