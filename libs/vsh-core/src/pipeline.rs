use vsh_rpc::{build_params, ShellError};
use vsh_value::Record;

use crate::BUILTINS;

/// One `cmd arg arg...` segment of a pipeline (SPEC_FULL.md §3 "Pipeline
/// AST"): a command token plus its already-unquoted argv.
#[derive(Debug, Clone)]
pub struct Stage {
    pub command: String,
    pub argv: Vec<String>,
}

/// A non-empty list of stages connected by `|`.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// Whether the last stage is `print` — the non-interactive renderer
    /// override (§4.8, §6).
    pub fn ends_in_print(&self) -> bool {
        self.stages.last().is_some_and(|s| s.command == "print")
    }
}

/// Split a line into stages on unquoted `|`, then tokenise each stage's
/// words with `shell-words` (single/double quoting, backslash escapes
/// inside double quotes).
pub fn parse_pipeline(line: &str) -> Result<Pipeline, ShellError> {
    let segments = split_unquoted_pipe(line)?;
    let mut stages = Vec::with_capacity(segments.len());
    for segment in segments {
        let words = shell_words::split(&segment).map_err(|e| ShellError::InvalidParameter {
            parameter: format!("malformed quoting in '{}': {e}", segment.trim()),
        })?;
        let mut words = words.into_iter();
        let command = words.next().ok_or_else(|| ShellError::InvalidParameter {
            parameter: "empty pipeline stage".to_string(),
        })?;
        stages.push(Stage { command, argv: words.collect() });
    }
    if stages.is_empty() {
        return Err(ShellError::InvalidParameter { parameter: "empty pipeline".to_string() });
    }
    Ok(Pipeline { stages })
}

/// Split `line` on `|` characters that are not inside a quoted string.
/// `shell-words` tokenises a single stage's words but has no notion of
/// stage boundaries, so the `|` split happens first, by hand.
fn split_unquoted_pipe(line: &str) -> Result<Vec<String>, ShellError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                current.push(c);
                if q == '"' && c == '\\' {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    current.push(c);
                }
                '|' => segments.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
        }
    }
    if quote.is_some() {
        return Err(ShellError::InvalidParameter {
            parameter: format!("unterminated quote in '{line}'"),
        });
    }
    segments.push(current);
    Ok(segments)
}

/// Capitalise a command's first letter to get its method name
/// (`ls` -> `Ls`, `filter_map` -> `Filter_map`).
pub fn capitalize(command: &str) -> String {
    let mut chars = command.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The inverse of `capitalize`, used by `help` to print the command name
/// a method was dispatched from (`Filter_map` -> `filter_map`).
pub fn command_name(method: &str) -> String {
    let mut chars = method.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Run every stage left to right, synchronous and materialising
/// (SPEC_FULL.md §4.5, §5): stage `i+1` starts only once stage `i`'s
/// output vector is complete. An empty output is passed to the next
/// stage as an *absent* input parameter, not an empty list — mirroring
/// §4.5's "absent if the previous stage emitted zero records".
pub fn run_pipeline(pipeline: &Pipeline) -> Result<Vec<Record>, ShellError> {
    let mut input: Option<Vec<Record>> = None;
    for stage in &pipeline.stages {
        if vsh_rpc::cancel::is_requested() {
            tracing::debug!("pipeline aborted by interrupt before stage");
            return Ok(Vec::new());
        }
        let output = run_stage(stage, input.take())?;
        input = if output.is_empty() { None } else { Some(output) };
    }
    Ok(input.unwrap_or_default())
}

fn run_stage(stage: &Stage, input: Option<Vec<Record>>) -> Result<Vec<Record>, ShellError> {
    tracing::debug!(command = %stage.command, argv = ?stage.argv, "running stage");
    let method = capitalize(&stage.command);
    let params = build_params(&stage.argv, input);
    BUILTINS.dispatch(&method, &params, true)
}
