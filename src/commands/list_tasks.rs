//! `css-list-tasks`: list tasks known to the cluster state service.

use super::{write_http_response, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::http::HttpRequest;
use std::io::Write;

pub struct ListTasks;

/// Query parameters forwarded to `/v1/tasks`, as (parameter key, wire name).
const TASK_FILTERS: [(&str, &str); 3] = [
    ("cluster", "cluster"),
    ("status", "status"),
    ("started_by", "startedBy"),
];

/// Build the state-service request: one task when both cluster and task ARN are
/// given, otherwise a filtered listing.
pub fn tasks_request(params: &ParsedParameters) -> Result<HttpRequest, DemoError> {
    let host = params.require("host")?;
    match (params.get("cluster"), params.get("task")) {
        (Some(cluster), Some(task)) => Ok(HttpRequest::get(
            host,
            format!("/v1/tasks/{}/{}", cluster, task),
        )),
        (None, Some(_)) => Err(DemoError::Usage(
            "task-arn must be accompanied with the cluster parameter.".to_string(),
        )),
        (_, None) => Ok(TASK_FILTERS.iter().fold(
            HttpRequest::get(host, "/v1/tasks"),
            |request, (key, name)| match params.get(key) {
                Some(value) => request.with_query(*name, value),
                None => request,
            },
        )),
    }
}

impl Script for ListTasks {
    fn name(&self) -> &'static str {
        "css-list-tasks"
    }

    fn description(&self) -> &'static str {
        "List Blox Tasks"
    }

    fn options(&self, _raw_args: &[String], config: &DemoConfig) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("host", "host", "Cluster State Service <Host>:<Port>")
                .with_default(config.hosts.state_service.clone()),
            OptionSpec::value("cluster", "cluster", "ECS cluster name").optional(),
            OptionSpec::value("status", "status", "Task status filter").optional(),
            OptionSpec::value("started-by", "started_by", "Started-by filter").optional(),
            OptionSpec::value("task-arn", "task", "Task ARN").optional(),
        ]
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let request = tasks_request(params)?;
        let response = ctx.http.call(&request)?;
        write_http_response(out, &response)
    }
}
