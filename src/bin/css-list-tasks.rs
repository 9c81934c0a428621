//! List tasks from the cluster state service.

use blox_demo::commands::ListTasks;

fn main() {
    std::process::exit(blox_demo::cli::run(&ListTasks));
}
