use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::Record;

use super::split_path;

/// `grep field=pattern...` — SPEC_FULL.md §4.6.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let mut clauses = Vec::with_capacity(argv.len());
    for arg in &argv {
        let (field, pattern) = arg
            .split_once('=')
            .ok_or_else(|| ShellError::InvalidParameter { parameter: arg.clone() })?;
        clauses.push((split_path(field), pattern.to_string()));
    }

    let input = input_of(params);
    Ok(input
        .into_iter()
        .filter(|record| {
            clauses.iter().all(|(path, pattern)| {
                record.resolve_path(path).is_some_and(|v| v.render().contains(pattern.as_str()))
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;
    use vsh_value::Value;

    fn rec(name: &str) -> Record {
        Record::new().with("name", Value::String(name.to_string()))
    }

    #[test]
    fn keeps_substring_matches() {
        let input = vec![rec("alpha"), rec("beta"), rec("alphabet")];
        let params = build_params(&["name=alpha".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![rec("alpha"), rec("alphabet")]);
    }

    #[test]
    fn missing_field_fails_clause() {
        let input = vec![Record::new()];
        let params = build_params(&["name=x".to_string()], Some(input));
        assert!(run(&params).unwrap().is_empty());
    }

    #[test]
    fn arg_without_equals_is_invalid_parameter() {
        let params = build_params(&["foo".to_string()], Some(vec![]));
        assert!(matches!(run(&params), Err(ShellError::InvalidParameter { .. })));
    }
}
