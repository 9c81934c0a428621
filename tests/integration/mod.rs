//! Integration tests for the Blox demo command-line tools

mod increment_cluster_instances;
mod list_tasks;
mod test_utils;

pub use test_utils::*;
