use std::collections::HashMap;

use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{Record, Value};

use super::split_path;

/// `group field` — SPEC_FULL.md §4.6. One record per distinct value, in
/// first-appearance order, keyed by the field argument's own name (its
/// last dotted segment) and `count` (§8 scenario 5).
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let field = argv.first().ok_or_else(|| ShellError::InvalidParameter {
        parameter: "expected a field argument".to_string(),
    })?;
    let path = split_path(field);
    // Output key is named after the field argument itself (its last dotted
    // segment for `a.b`-style paths), not the literal word "field" —
    // SPEC_FULL.md §8 scenario 5: `group t` emits `{t: ..., count: ...}`.
    let key_name = path.last().cloned().unwrap_or_default();

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, i64> = HashMap::new();
    for record in input_of(params) {
        let key = record.resolve_path(&path).map(Value::render).unwrap_or_default();
        if !counts.contains_key(&key) {
            order.push(key.clone());
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            Record::new().with(key_name.as_str(), Value::String(key)).with("count", Value::Int(count))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    fn rec(t: &str) -> Record {
        Record::new().with("t", Value::String(t.to_string()))
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let input = vec![rec("a"), rec("b"), rec("a")];
        let params = build_params(&["t".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(
            out,
            vec![
                Record::new().with("t", Value::String("a".to_string())).with("count", Value::Int(2)),
                Record::new().with("t", Value::String("b".to_string())).with("count", Value::Int(1)),
            ]
        );
    }

    #[test]
    fn group_counts_are_exhaustive() {
        let input = vec![rec("a"), rec("b"), rec("a"), rec("c")];
        let total = input.len() as i64;
        let params = build_params(&["t".to_string()], Some(input));
        let out = run(&params).unwrap();
        let sum: i64 = out
            .iter()
            .map(|r| match r.get("count") {
                Some(Value::Int(i)) => *i,
                _ => 0,
            })
            .sum();
        assert_eq!(sum, total);
    }
}
