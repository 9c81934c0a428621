//! Start a deployment of a Blox environment.

use blox_demo::commands::CreateDeployment;

fn main() {
    std::process::exit(blox_demo::cli::run(&CreateDeployment));
}
