use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{Record, Value};

/// `echo args...` — SPEC_FULL.md §4.6. Pass-through when upstream input
/// is present; otherwise an originating command that builds one record
/// from its arguments.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    if params.contains_key("input") {
        return Ok(input_of(params));
    }
    let mut record = Record::new();
    for arg in argv_of(params) {
        match arg.split_once('=') {
            Some((key, value)) => record.insert(key, Value::String(value.to_string())),
            None => record.insert(arg, Value::Bool(true)),
        }
    }
    Ok(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    #[test]
    fn builds_record_from_kv_and_bare_args() {
        let params = build_params(&["a=1".to_string(), "flag".to_string()], None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get("a"), Some(&Value::String("1".to_string())));
        assert_eq!(out[0].get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn passes_through_when_input_present() {
        let upstream = vec![Record::new().with("x", Value::Int(1))];
        let params = build_params(&[], Some(upstream.clone()));
        let out = run(&params).unwrap();
        assert_eq!(out, upstream);
    }
}
