//! Command Scripts
//!
//! One [`Script`] per demo binary. A script declares its options, then runs against
//! the resolved parameters through the invokers held by the [`RunContext`].

use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::http::HttpResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::{self, Write};

pub mod create_deployment;
pub mod increment_cluster_instances;
pub mod list_instances;
pub mod list_task_definitions;
pub mod list_tasks;
pub mod register_task_definition;

pub use create_deployment::CreateDeployment;
pub use increment_cluster_instances::IncrementClusterInstances;
pub use list_instances::ListInstances;
pub use list_task_definitions::ListTaskDefinitions;
pub use list_tasks::ListTasks;
pub use register_task_definition::RegisterTaskDefinition;

/// A single administrative action exposed as a binary.
pub trait Script {
    /// Binary name, used in logs.
    fn name(&self) -> &'static str;

    /// Human-readable description shown in the header and in `--help`.
    fn description(&self) -> &'static str;

    /// Options accepted by this script. `raw_args` is the unparsed command line
    /// (program name first) for scripts whose option set depends on a flag.
    fn options(&self, raw_args: &[String], config: &DemoConfig) -> Vec<OptionSpec>;

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError>;
}

/// Write `value` pretty-printed with 2-space indentation, followed by a newline.
pub fn write_json(out: &mut dyn Write, value: &Value) -> Result<(), DemoError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// Print `HTTP Response Code: <N>` and the decoded body.
pub fn write_http_response(out: &mut dyn Write, response: &HttpResponse) -> Result<(), DemoError> {
    writeln!(out, "HTTP Response Code: {}", response.status)?;
    let body = response.json()?;
    write_json(out, &body)
}

/// Decode a cloud CLI result into a typed structure; the pretty-printed result is
/// kept as diagnostic output on failure.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, DemoError> {
    T::deserialize(value).map_err(|source| DemoError::Decode {
        source,
        raw: serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    })
}
