//! Argument resolution: declarative option specs → parsed parameters.
//!
//! Command-line values win, then declared defaults, then an interactive prompt for
//! required options. Boolean flags are never prompted for. A required option that is
//! still empty after prompting is a usage error.

use crate::error::DemoError;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeMap;
use tracing::debug;

mod prompt;

pub use prompt::{Prompter, TerminalPrompter};

/// Key of the implicit `--region` option recognized by every command.
pub const REGION_KEY: &str = "region";

/// Whether an option takes a value or is a presence flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Value,
    Flag,
}

/// One declared command-line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long flag name without the leading dashes, e.g. `instance-arn`
    pub flag: &'static str,
    /// Key under which the resolved value is stored
    pub key: &'static str,
    pub default: Option<String>,
    pub kind: OptionKind,
    /// Required value options are prompted for when missing
    pub required: bool,
    /// Human-readable description, used for help, prompts and errors
    pub help: &'static str,
}

impl OptionSpec {
    /// A required value option with no default.
    pub fn value(flag: &'static str, key: &'static str, help: &'static str) -> Self {
        Self {
            flag,
            key,
            default: None,
            kind: OptionKind::Value,
            required: true,
            help,
        }
    }

    /// A boolean presence flag.
    pub fn flag(flag: &'static str, key: &'static str, help: &'static str) -> Self {
        Self {
            flag,
            key,
            default: None,
            kind: OptionKind::Flag,
            required: false,
            help,
        }
    }

    /// Mark a value option as optional: absent values are left unset, never prompted.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Flag(bool),
}

/// Resolved parameters for one command invocation. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParameters {
    region: Option<String>,
    values: BTreeMap<&'static str, ParamValue>,
}

impl ParsedParameters {
    /// Region passed with `--region`, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Text value for `key`; `None` for unset optional options and for flags.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParamValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Text value for a key the command declared as required.
    pub fn require(&self, key: &str) -> Result<&str, DemoError> {
        self.get(key)
            .ok_or_else(|| DemoError::MissingOption(key.to_string()))
    }

    /// Flag value for `key`; `false` when the key is not a flag.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ParamValue::Flag(true)))
    }

    /// Builder for tests and for callers assembling parameters directly.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_value(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, ParamValue::Text(value.into()));
        self
    }

    pub fn with_flag(mut self, key: &'static str, value: bool) -> Self {
        self.values.insert(key, ParamValue::Flag(value));
        self
    }
}

/// Resolve `specs` against `raw_args` (program name first), prompting through
/// `prompter` for required values missing from the command line.
pub fn resolve(
    description: &'static str,
    specs: &[OptionSpec],
    raw_args: &[String],
    prompter: &mut dyn Prompter,
) -> Result<ParsedParameters, DemoError> {
    let matches = build_command(description, specs)
        .try_get_matches_from(raw_args)
        .map_err(map_clap_error)?;

    let mut params = ParsedParameters {
        region: matches
            .get_one::<String>(REGION_KEY)
            .filter(|region| !region.trim().is_empty())
            .cloned(),
        values: BTreeMap::new(),
    };

    for spec in specs {
        match spec.kind {
            OptionKind::Flag => {
                params
                    .values
                    .insert(spec.key, ParamValue::Flag(matches.get_flag(spec.key)));
            }
            OptionKind::Value => {
                if let Some(value) = resolve_value(spec, &matches, prompter)? {
                    params.values.insert(spec.key, ParamValue::Text(value));
                }
            }
        }
    }

    debug!(region = ?params.region, options = params.values.len(), "Resolved parameters");
    Ok(params)
}

fn resolve_value(
    spec: &OptionSpec,
    matches: &ArgMatches,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>, DemoError> {
    let supplied = matches
        .get_one::<String>(spec.key)
        .cloned()
        .or_else(|| spec.default.clone());

    let value = match supplied {
        Some(value) => value,
        None if spec.required => prompter.prompt(&format!("Enter {}", spec.help))?,
        None => return Ok(None),
    };

    let value = value.trim().to_string();
    if value.is_empty() {
        if spec.required {
            return Err(DemoError::MissingOption(spec.help.to_string()));
        }
        return Ok(None);
    }
    Ok(Some(value))
}

fn build_command(description: &'static str, specs: &[OptionSpec]) -> Command {
    debug_assert!(
        specs.iter().all(|spec| spec.key != REGION_KEY),
        "region is an implicit option"
    );

    let mut command = Command::new("blox-demo")
        .about(description)
        .args_override_self(true)
        .arg(
            Arg::new(REGION_KEY)
                .long("region")
                .value_name("REGION")
                .help("AWS region")
                .action(ArgAction::Set),
        );

    for spec in specs {
        let arg = Arg::new(spec.key).long(spec.flag).help(spec.help);
        let arg = match spec.kind {
            OptionKind::Flag => arg.action(ArgAction::SetTrue),
            OptionKind::Value => arg.action(ArgAction::Set).value_name("VALUE"),
        };
        command = command.arg(arg);
    }
    command
}

fn map_clap_error(err: clap::Error) -> DemoError {
    let rendered = err.render().to_string();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => DemoError::Help(rendered),
        _ => DemoError::Usage(
            rendered
                .trim_start_matches("error: ")
                .trim_end()
                .to_string(),
        ),
    }
}
