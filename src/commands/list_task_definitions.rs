//! `list-task-definitions`: list registered ECS task definitions.

use super::{write_json, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::process::CliRequest;
use std::io::Write;

pub struct ListTaskDefinitions;

pub fn list_request(params: &ParsedParameters) -> CliRequest {
    let mut args = vec!["ecs".to_string(), "list-task-definitions".to_string()];
    if let Some(prefix) = params.get("family_prefix") {
        args.push("--family-prefix".to_string());
        args.push(prefix.to_string());
    }
    CliRequest::new(args).with_region(params.region())
}

impl Script for ListTaskDefinitions {
    fn name(&self) -> &'static str {
        "list-task-definitions"
    }

    fn description(&self) -> &'static str {
        "List Task Definitions"
    }

    fn options(&self, _raw_args: &[String], _config: &DemoConfig) -> Vec<OptionSpec> {
        vec![OptionSpec::value("family-prefix", "family_prefix", "Task definition family prefix")
            .optional()]
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let result = ctx.cloud.invoke(&list_request(params))?;
        write_json(out, &result)
    }
}
