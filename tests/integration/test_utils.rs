//! Shared test utilities for integration tests
//!
//! Fakes for the prompt source and both invokers, so scripts can run end to end
//! without a terminal, a cloud CLI or a network.

use assert_cmd::Command;
use blox_demo::args::Prompter;
use blox_demo::cli::RunContext;
use blox_demo::commands::Script;
use blox_demo::config::DemoConfig;
use blox_demo::error::DemoError;
use blox_demo::http::{HttpInvoker, HttpRequest, HttpResponse};
use blox_demo::process::{CliRequest, CloudCli};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// Answers prompts from a fixed list and records every label asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, label: &str) -> Result<String, DemoError> {
        self.asked.push(label.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

/// Cloud CLI fake returning queued results in order and recording every request.
#[derive(Default)]
pub struct RecordingCloud {
    results: RefCell<VecDeque<Result<Value, DemoError>>>,
    pub calls: RefCell<Vec<CliRequest>>,
}

impl RecordingCloud {
    pub fn returning(values: Vec<Value>) -> Self {
        Self {
            results: RefCell::new(values.into_iter().map(Ok).collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn then_fail(self, err: DemoError) -> Self {
        self.results.borrow_mut().push_back(Err(err));
        self
    }

    /// Argument lists of all calls so far, region excluded.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|c| c.args.clone()).collect()
    }
}

impl CloudCli for RecordingCloud {
    fn invoke(&self, request: &CliRequest) -> Result<Value, DemoError> {
        self.calls.borrow_mut().push(request.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected cloud call: {:?}", request.args))
    }
}

/// HTTP fake returning queued responses and recording every request.
#[derive(Default)]
pub struct RecordingHttp {
    responses: RefCell<VecDeque<Result<HttpResponse, DemoError>>>,
    pub calls: RefCell<Vec<HttpRequest>>,
}

impl RecordingHttp {
    pub fn responding(status: u16, body: &str) -> Self {
        let http = Self::default();
        http.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        http
    }

    pub fn failing(err: DemoError) -> Self {
        let http = Self::default();
        http.responses.borrow_mut().push_back(Err(err));
        http
    }
}

impl HttpInvoker for RecordingHttp {
    fn call(&self, request: &HttpRequest) -> Result<HttpResponse, DemoError> {
        self.calls.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected HTTP call: {}", request.url()))
    }
}

/// Command-line vector with a program name in front.
pub fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("blox-demo-test")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

/// Run `script` through the same path as the binaries; returns the result and
/// everything written to stdout.
pub fn run_script(
    script: &dyn Script,
    args: &[&str],
    cloud: &RecordingCloud,
    http: &RecordingHttp,
    prompter: &mut ScriptedPrompter,
) -> (Result<(), DemoError>, String) {
    let config = DemoConfig::default();
    let context = RunContext::new(&config, cloud, http);
    let mut out = Vec::new();
    let result = context.execute(script, &argv(args), prompter, &mut out);
    (result, String::from_utf8(out).unwrap())
}

/// Proxy variables the HTTP client honors.
pub const PROXY_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "http_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Command for one of the crate's binaries with HOME and XDG pointed into
/// `home`, and with every `BLOX_DEMO` and proxy variable of the test process removed.
pub fn isolated_bin(name: &str, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(name).unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_STATE_HOME", home.path().join("state"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    for var in PROXY_VARS {
        cmd.env_remove(var);
    }
    for (key, _) in std::env::vars() {
        if key.starts_with("BLOX_DEMO") {
            cmd.env_remove(key);
        }
    }
    cmd
}
