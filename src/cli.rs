//! CLI domain: run context, script execution and error output shared by every
//! demo binary.

mod output;
mod route;

pub use output::map_error;
pub use route::RunContext;

use crate::args::TerminalPrompter;
use crate::commands::Script;
use crate::config::ConfigLoader;
use crate::error::DemoError;
use crate::http::ReqwestInvoker;
use crate::logging::init_logging;
use crate::process::ExternalCli;
use std::io::Write;
use tracing::{error, info};

/// Run `script` against the process command line and return the exit status.
pub fn run(script: &dyn Script) -> i32 {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => return report(&mut out, &e),
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        return 1;
    }

    info!(script = script.name(), "Blox demo CLI starting");

    let cloud = ExternalCli::from_config(&config.cloud);
    let http = match ReqwestInvoker::from_config(&config.http) {
        Ok(http) => http,
        Err(e) => return report(&mut out, &e),
    };
    let context = RunContext::new(&config, &cloud, &http);

    let raw_args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let mut prompter = TerminalPrompter;

    match context.execute(script, &raw_args, &mut prompter, &mut out) {
        Ok(()) => {
            info!(script = script.name(), "Command completed successfully");
            0
        }
        Err(e) => report(&mut out, &e),
    }
}

fn report(out: &mut dyn Write, e: &DemoError) -> i32 {
    if !matches!(e, DemoError::Help(_)) {
        error!("Command failed: {}", e);
    }
    // stdout may already be closed; the exit status still reports the failure
    let _ = writeln!(out, "{}", map_error(e));
    let _ = out.flush();
    e.exit_code()
}
