use vsh_rpc::{input_of, ShellError};
use vsh_value::Record;

/// `reverse` — SPEC_FULL.md §4.6.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let mut input = input_of(params);
    input.reverse();
    Ok(input)
}
