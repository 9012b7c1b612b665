use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_template::substitute_cmdline;
use vsh_value::Record;

use crate::pipeline::{parse_pipeline, run_pipeline};

/// `foreach cmdline` — SPEC_FULL.md §4.6. For each input record,
/// substitutes `{path}` tokens in `cmdline` and re-enters the same
/// executor on the result, which may itself contain `|` stages.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    if argv.is_empty() {
        return Err(ShellError::InvalidParameter {
            parameter: "foreach requires a command line".to_string(),
        });
    }
    let cmdline_template = argv.join(" ");

    let mut out = Vec::new();
    for record in input_of(params) {
        if vsh_rpc::cancel::is_requested() {
            break;
        }
        let cmdline = substitute_cmdline(&cmdline_template, &record);
        let inner = parse_pipeline(&cmdline)?;
        out.extend(run_pipeline(&inner)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;
    use vsh_value::Value;

    #[test]
    fn substitutes_and_runs_inner_pipeline_per_record() {
        let input =
            vec![Record::new().with("n", Value::String("a".to_string()))];
        let params = build_params(&["echo".to_string(), "x={n}".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![Record::new().with("x", Value::String("a".to_string()))]);
    }

    #[test]
    fn missing_reference_substitutes_empty_string() {
        let input = vec![Record::new()];
        let params =
            build_params(&["echo".to_string(), "x={missing}".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![Record::new().with("x", Value::String(String::new()))]);
    }

    #[test]
    fn no_command_line_is_invalid_parameter() {
        let params = build_params(&[], Some(vec![Record::new()]));
        assert!(matches!(run(&params), Err(ShellError::InvalidParameter { .. })));
    }
}
