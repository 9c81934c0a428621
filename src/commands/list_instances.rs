//! `css-list-instances`: list container instances known to the cluster state service.

use super::{write_http_response, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::http::HttpRequest;
use std::io::Write;

pub struct ListInstances;

/// Build the state-service request for the resolved filters.
///
/// A cluster plus instance ARN addresses one instance; an instance ARN alone is
/// rejected; anything else lists instances filtered by the supplied query parameters.
pub fn instances_request(params: &ParsedParameters) -> Result<HttpRequest, DemoError> {
    let host = params.require("host")?;
    match (params.get("cluster"), params.get("instance")) {
        (Some(cluster), Some(instance)) => Ok(HttpRequest::get(
            host,
            format!("/v1/instances/{}/{}", cluster, instance),
        )),
        (None, Some(_)) => Err(DemoError::Usage(
            "instance-arn must be accompanied with the cluster parameter.".to_string(),
        )),
        (cluster, None) => {
            let mut request = HttpRequest::get(host, "/v1/instances");
            if let Some(cluster) = cluster {
                request = request.with_query("cluster", cluster);
            }
            if let Some(status) = params.get("status") {
                request = request.with_query("status", status);
            }
            Ok(request)
        }
    }
}

impl Script for ListInstances {
    fn name(&self) -> &'static str {
        "css-list-instances"
    }

    fn description(&self) -> &'static str {
        "List Blox Instances"
    }

    fn options(&self, _raw_args: &[String], config: &DemoConfig) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("host", "host", "Cluster State Service <Host>:<Port>")
                .with_default(config.hosts.state_service.clone()),
            OptionSpec::value("cluster", "cluster", "ECS cluster name").optional(),
            OptionSpec::value("status", "status", "Instance status filter").optional(),
            OptionSpec::value("instance-arn", "instance", "Container instance ARN").optional(),
        ]
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let request = instances_request(params)?;
        let response = ctx.http.call(&request)?;
        write_http_response(out, &response)
    }
}
