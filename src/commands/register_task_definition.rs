//! `register-task-definition`: register an ECS task definition from a JSON file.

use super::{write_json, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::process::CliRequest;
use std::io::Write;
use std::path::Path;

pub struct RegisterTaskDefinition;

/// Build the register call; the file must exist before the CLI is involved.
pub fn register_request(params: &ParsedParameters) -> Result<CliRequest, DemoError> {
    let file = params.require("file")?;
    if !Path::new(file).exists() {
        return Err(DemoError::Usage(format!("File '{}' does not exist.", file)));
    }
    Ok(CliRequest::new([
        "ecs".to_string(),
        "register-task-definition".to_string(),
        "--cli-input-json".to_string(),
        format!("file://{}", file),
    ])
    .with_region(params.region()))
}

impl Script for RegisterTaskDefinition {
    fn name(&self) -> &'static str {
        "register-task-definition"
    }

    fn description(&self) -> &'static str {
        "Register Task Definition"
    }

    fn options(&self, _raw_args: &[String], _config: &DemoConfig) -> Vec<OptionSpec> {
        vec![OptionSpec::value("file", "file", "Task definition JSON file")]
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let request = register_request(params)?;
        let result = ctx.cloud.invoke(&request)?;
        write_json(out, &result)
    }
}
