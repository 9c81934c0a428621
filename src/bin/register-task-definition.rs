//! Register an ECS task definition from a JSON file.

use blox_demo::commands::RegisterTaskDefinition;

fn main() {
    std::process::exit(blox_demo::cli::run(&RegisterTaskDefinition));
}
