use std::collections::HashSet;

use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{record_to_json, Record, Value};

use super::split_path;

/// `uniq [fields...]` — SPEC_FULL.md §4.6. Keeps the first occurrence;
/// equality is measured on the named fields, or the whole record when
/// none are given.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let paths: Vec<Vec<String>> = argv_of(params).iter().map(|f| split_path(f)).collect();
    let input = input_of(params);

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for record in input {
        if seen.insert(fingerprint(&record, &paths)) {
            out.push(record);
        }
    }
    Ok(out)
}

fn fingerprint(record: &Record, paths: &[Vec<String>]) -> String {
    if paths.is_empty() {
        return record_to_json(record).to_string();
    }
    let values: Vec<Value> =
        paths.iter().map(|p| record.resolve_path(p).cloned().unwrap_or(Value::Null)).collect();
    Value::List(values).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    fn rec(name: &str, age: i64) -> Record {
        Record::new().with("name", Value::String(name.to_string())).with("age", Value::Int(age))
    }

    #[test]
    fn whole_record_equality_keeps_first() {
        let input = vec![rec("Jane", 30), rec("Jane", 30), rec("Bo", 4)];
        let params = build_params(&[], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![rec("Jane", 30), rec("Bo", 4)]);
    }

    #[test]
    fn field_scoped_equality() {
        let input = vec![rec("Jane", 30), rec("Jane", 99)];
        let params = build_params(&["name".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![rec("Jane", 30)]);
    }

    #[test]
    fn uniq_is_idempotent() {
        let input = vec![rec("Jane", 30), rec("Jane", 30)];
        let params = build_params(&[], Some(input));
        let once = run(&params).unwrap();
        let params = build_params(&[], Some(once.clone()));
        assert_eq!(run(&params).unwrap(), once);
    }
}
