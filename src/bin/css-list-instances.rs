//! List container instances from the cluster state service.

use blox_demo::commands::ListInstances;

fn main() {
    std::process::exit(blox_demo::cli::run(&ListInstances));
}
