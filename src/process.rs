//! External Process Invoker
//!
//! Runs the cloud CLI (`aws` unless configured otherwise) as
//! `<program> --output json [--region R] <args...>` without a shell, and parses
//! its standard output as JSON.

use crate::config::CloudConfig;
use crate::error::DemoError;
use serde_json::Value;
use std::process::Command;
use tracing::{debug, warn};

/// Flags placed before every invocation so results are machine-parseable.
pub const OUTPUT_FORMAT_ARGS: [&str; 2] = ["--output", "json"];

/// One cloud CLI call: subcommand tokens plus an optional region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliRequest {
    pub region: Option<String>,
    pub args: Vec<String>,
}

impl CliRequest {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            region: None,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_region(mut self, region: Option<&str>) -> Self {
        self.region = region.map(str::to_string);
        self
    }
}

/// Cloud API calls made through an external command-line tool.
pub trait CloudCli {
    /// Run one CLI call and return its parsed JSON output.
    fn invoke(&self, request: &CliRequest) -> Result<Value, DemoError>;
}

/// Build the full argument vector, program first.
pub fn build_invocation(program: &str, region: Option<&str>, args: &[String]) -> Vec<String> {
    let mut invocation = Vec::with_capacity(args.len() + 5);
    invocation.push(program.to_string());
    invocation.extend(OUTPUT_FORMAT_ARGS.iter().map(|arg| arg.to_string()));
    if let Some(region) = region {
        invocation.push("--region".to_string());
        invocation.push(region.to_string());
    }
    invocation.extend(args.iter().cloned());
    invocation
}

/// Render an invocation for diagnostics, e.g. `["aws", "--output", "json"]`.
pub fn render_command(invocation: &[String]) -> String {
    format!("{:?}", invocation)
}

/// Parse raw output as JSON; on failure the raw text travels with the error.
pub fn parse_json(raw: &str) -> Result<Value, DemoError> {
    serde_json::from_str(raw).map_err(|source| DemoError::Decode {
        source,
        raw: raw.to_string(),
    })
}

/// [`CloudCli`] backed by a real executable.
#[derive(Debug, Clone)]
pub struct ExternalCli {
    program: String,
}

impl ExternalCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &CloudConfig) -> Self {
        Self::new(config.program.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CloudCli for ExternalCli {
    fn invoke(&self, request: &CliRequest) -> Result<Value, DemoError> {
        let invocation = build_invocation(&self.program, request.region.as_deref(), &request.args);
        let rendered = render_command(&invocation);
        debug!(command = %rendered, "Invoking cloud CLI");

        let output = Command::new(&invocation[0])
            .args(&invocation[1..])
            .output()
            .map_err(|source| DemoError::ProcessSpawn {
                command: rendered.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            warn!(command = %rendered, code, "Cloud CLI call failed");
            return Err(DemoError::ProcessFailed {
                command: rendered,
                code,
                output: combine_output(&stdout, &stderr),
            });
        }

        serde_json::from_str(&stdout).map_err(|source| {
            warn!(command = %rendered, error = %source, "Cloud CLI returned unparseable output");
            DemoError::Decode {
                source,
                raw: combine_output(&stdout, &stderr),
            }
        })
    }
}

fn combine_output(stdout: &str, stderr: &str) -> String {
    match (stdout.trim_end().is_empty(), stderr.trim_end().is_empty()) {
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
        (false, true) => stdout.trim_end().to_string(),
        (true, _) => stderr.trim_end().to_string(),
    }
}
