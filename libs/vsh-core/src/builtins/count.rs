use vsh_rpc::{input_of, ShellError};
use vsh_value::{Record, Value};

/// `count` — SPEC_FULL.md §4.6.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let input = input_of(params);
    Ok(vec![Record::new().with("count", Value::Int(input.len() as i64))])
}
