//! Interactive value prompts.

use crate::error::DemoError;
use std::io::{BufRead, IsTerminal, Write};

/// Source of values for required options missing from the command line.
pub trait Prompter {
    /// Ask for one value. The answer is returned untrimmed.
    fn prompt(&mut self, label: &str) -> Result<String, DemoError>;
}

/// Prompts on the terminal; reads a plain line from stdin when it is not a terminal,
/// so answers can be piped in. Either way the prompt is written to stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, label: &str) -> Result<String, DemoError> {
        if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
            use dialoguer::console::Term;
            use dialoguer::Input;

            // the default theme appends ": "
            return Input::<String>::new()
                .with_prompt(prompt_prefix(label))
                .allow_empty(true)
                .interact_text_on(&Term::stdout())
                .map_err(|e| DemoError::Prompt(e.to_string()));
        }

        read_answer(label, &mut std::io::stdin().lock(), &mut std::io::stdout())
    }
}

fn prompt_prefix(label: &str) -> String {
    format!("- {}", label)
}

/// Write `- <label>: ` to `output` and read one line from `input`.
fn read_answer(
    label: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<String, DemoError> {
    write!(output, "{}: ", prompt_prefix(label))?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}
