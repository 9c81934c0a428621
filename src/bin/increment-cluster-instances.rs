//! Launch additional instances into an ECS cluster.

use blox_demo::commands::IncrementClusterInstances;

fn main() {
    std::process::exit(blox_demo::cli::run(&IncrementClusterInstances));
}
