//! Blox Demo CLI
//!
//! Demonstration command-line tools for an ECS-based scheduling system. Each binary
//! resolves a few options (prompting for missing required values), then either calls
//! the AWS CLI or sends one HTTP request to the local scheduler or cluster state
//! service, and prints the JSON result.

pub mod args;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod process;
