//! Error types for the Blox demo command-line tools.
//!
//! Every failure is terminal for the current invocation. Internal functions return
//! a [`DemoError`] and the binary entry point prints it and exits.

use thiserror::Error;

/// Errors surfaced by the argument resolver, the invokers and the command scripts.
#[derive(Debug, Error)]
pub enum DemoError {
    /// `--help` was requested; the payload is the rendered help text.
    #[error("{0}")]
    Help(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0} is required.")]
    MissingOption(String),

    #[error("Failed to read input: {0}")]
    Prompt(String),

    #[error("Command [{command}] returned exit code {code}.")]
    ProcessFailed {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Could not run command [{command}] - {source}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The cloud CLI succeeded but the result does not describe what was asked for.
    #[error("{0}")]
    Cloud(String),

    #[error("Could not call '{method} {url}' - {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    #[error("Invalid response on '{method} {url}' - {message}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        message: String,
        body: Option<String>,
    },

    #[error("Could not parse response - {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// Captured output or response body to print after the message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            DemoError::ProcessFailed { output, .. } => Some(output.as_str()),
            DemoError::HttpStatus { body, .. } => body.as_deref(),
            DemoError::Decode { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DemoError::Help(_) => 0,
            _ => 1,
        }
    }
}

impl From<config::ConfigError> for DemoError {
    fn from(err: config::ConfigError) -> Self {
        DemoError::Config(err.to_string())
    }
}
