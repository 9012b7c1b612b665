use vsh_rpc::{input_of, ShellError};
use vsh_value::Record;

/// `print` — SPEC_FULL.md §4.6. Passes records through unchanged; its
/// only effect is on the pipeline's render mode, decided by
/// `Pipeline::ends_in_print` at the call site, not here.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    Ok(input_of(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;
    use vsh_value::Value;

    #[test]
    fn passes_input_through_unchanged() {
        let input = vec![Record::new().with("x", Value::Int(1))];
        let params = build_params(&[], Some(input.clone()));
        assert_eq!(run(&params).unwrap(), input);
    }

    #[test]
    fn no_input_yields_no_output() {
        let params = build_params(&[], None);
        assert!(run(&params).unwrap().is_empty());
    }
}
