//! `blox-create-deployment`: start a deployment of a Blox environment, either
//! through the local scheduler or through the stack's API Gateway endpoint.

use super::{decode, write_http_response, write_json, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::http::HttpRequest;
use crate::process::CliRequest;
use serde::Deserialize;
use serde_json::Value;
use std::io::Write;
use tracing::debug;

const APIGATEWAY_FLAG: &str = "--apigateway";

pub struct CreateDeployment;

#[derive(Debug, Deserialize)]
struct StackResource {
    #[serde(rename = "StackResourceDetail")]
    detail: StackResourceDetail,
}

#[derive(Debug, Deserialize)]
struct StackResourceDetail {
    #[serde(rename = "PhysicalResourceId")]
    physical_resource_id: String,
}

#[derive(Debug, Deserialize)]
struct TestInvokeResult {
    status: u16,
    #[serde(default)]
    body: String,
}

pub fn deployments_uri(environment: &str) -> String {
    format!("/v1/environments/{}/deployments", environment)
}

fn describe_stack_resource(stack: &str, logical_id: &str) -> Vec<String> {
    [
        "cloudformation",
        "describe-stack-resource",
        "--stack-name",
        stack,
        "--logical-resource-id",
        logical_id,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl CreateDeployment {
    fn physical_id(
        &self,
        ctx: &RunContext<'_>,
        region: Option<&str>,
        stack: &str,
        logical_id: &str,
    ) -> Result<String, DemoError> {
        let request = CliRequest::new(describe_stack_resource(stack, logical_id)).with_region(region);
        let resource: StackResource = decode(&ctx.cloud.invoke(&request)?)?;
        debug!(logical_id, physical_id = %resource.detail.physical_resource_id, "Resolved stack resource");
        Ok(resource.detail.physical_resource_id)
    }

    fn run_apigateway(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let stack = params.require("stack")?;
        let environment = params.require("environment")?;
        let region = params.region();

        let rest_api = self.physical_id(ctx, region, stack, "RestApi")?;
        let resource = self.physical_id(ctx, region, stack, "ApiResource")?;
        let path = deployments_uri(environment);

        let request = CliRequest::new([
            "apigateway",
            "test-invoke-method",
            "--rest-api-id",
            rest_api.as_str(),
            "--resource-id",
            resource.as_str(),
            "--http-method",
            "POST",
            "--headers",
            "{}",
            "--path-with-query-string",
            path.as_str(),
            "--body",
            "",
        ])
        .with_region(region);
        let response: Value = ctx.cloud.invoke(&request)?;
        let result: TestInvokeResult = decode(&response)?;

        writeln!(out, "HTTP Response Code: {}", result.status)?;
        let body: Value = serde_json::from_str(&result.body).map_err(|source| DemoError::Decode {
            source,
            raw: serde_json::to_string_pretty(&response).unwrap_or_else(|_| response.to_string()),
        })?;
        write_json(out, &body)
    }

    fn run_local(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let host = params.require("host")?;
        let environment = params.require("environment")?;

        let request = HttpRequest::post(host, deployments_uri(environment), None);
        let response = ctx.http.call(&request)?;
        write_http_response(out, &response)
    }
}

impl Script for CreateDeployment {
    fn name(&self) -> &'static str {
        "blox-create-deployment"
    }

    fn description(&self) -> &'static str {
        "Create Blox Deployment"
    }

    fn options(&self, raw_args: &[String], config: &DemoConfig) -> Vec<OptionSpec> {
        let mut options = vec![OptionSpec::flag(
            "apigateway",
            "apigateway",
            "Call API Gateway endpoint",
        )];
        if raw_args.iter().skip(1).any(|arg| arg == APIGATEWAY_FLAG) {
            options.push(OptionSpec::value("stack", "stack", "CloudFormation stack name"));
        } else {
            options.push(
                OptionSpec::value("host", "host", "Blox Scheduler <Host>:<Port>")
                    .with_default(config.hosts.scheduler.clone()),
            );
        }
        options.push(OptionSpec::value(
            "environment",
            "environment",
            "Blox environment name",
        ));
        options
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        if params.flag("apigateway") {
            self.run_apigateway(params, ctx, out)
        } else {
            self.run_local(params, ctx, out)
        }
    }
}
