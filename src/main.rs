//! depsync CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use depsync::cli::{Cli, CommandDispatcher};
use depsync::config::find_project_root;
use depsync::ui::{should_use_colors, Output, OutputMode, SyncTheme};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("depsync=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depsync=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("depsync starting with args: {:?}", cli);

    let mode = OutputMode::from_flags(cli.verbose, cli.quiet);
    let theme = SyncTheme::for_colors(!cli.no_color && should_use_colors());
    let output = Output::new(mode, theme);

    // Explicit --project wins; otherwise walk up to a .depsync directory.
    let cwd = std::env::current_dir().unwrap_or_default();
    let project_root = cli
        .project
        .clone()
        .or_else(|| find_project_root(&cwd))
        .unwrap_or(cwd);

    let dispatcher = CommandDispatcher::new(project_root);

    match dispatcher.dispatch(&cli, &output) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            output.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
