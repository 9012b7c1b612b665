use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_template::{Rendered, Template};
use vsh_value::{Record, Value};

/// `map templates...` — SPEC_FULL.md §4.6, §4.4.
pub fn run_map(params: &Record) -> Result<Vec<Record>, ShellError> {
    project(params, false)
}

/// `filter_map templates...` — identical to `map`, but a missing
/// reference drops the whole record instead of just its output key.
pub fn run_filter_map(params: &Record) -> Result<Vec<Record>, ShellError> {
    project(params, true)
}

fn project(params: &Record, drop_on_missing: bool) -> Result<Vec<Record>, ShellError> {
    let specs = parse_specs(&argv_of(params));
    let input = input_of(params);
    let mut out = Vec::with_capacity(input.len());

    'records: for record in &input {
        let mut projected = Record::new();
        for (key, template) in &specs {
            match template.render(record) {
                Rendered::Value(value) => projected.insert(key.clone(), value),
                Rendered::String(text) => projected.insert(key.clone(), Value::String(text)),
                Rendered::Missing if drop_on_missing => continue 'records,
                Rendered::Missing => {}
            }
        }
        out.push(projected);
    }
    Ok(out)
}

/// A bare identifier/dotted-path argument names both the output key and
/// the reference; `key=template` lets the two differ.
fn parse_specs(argv: &[String]) -> Vec<(String, Template)> {
    argv.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, template)) => (key.to_string(), Template::parse(template)),
            None => (arg.clone(), Template::parse(&format!("{{{arg}}}"))),
        })
        .collect()
}
