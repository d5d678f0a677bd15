//! TDS CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tds::app::Application;
use tds::cli::Cli;
use tds::config::ConfigPaths;
use tds::render::create_renderer;
use tds::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tds=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tds=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("TDS starting with args: {:?}", cli);

    let mut ui = create_ui(!cli.non_interactive, cli.output_mode());
    let renderer = create_renderer(cli.output);

    let paths = ConfigPaths::discover(cli.config_dir.as_deref());
    tracing::debug!("Reading configuration from {}", paths.dir().display());

    let mut app = Application::new(paths);
    match app.run(cli.to_params(), ui.as_mut(), renderer.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.kind().exit_code())
        }
    }
}
