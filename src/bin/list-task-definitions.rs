//! List registered ECS task definitions.

use blox_demo::commands::ListTaskDefinitions;

fn main() {
    std::process::exit(blox_demo::cli::run(&ListTaskDefinitions));
}
