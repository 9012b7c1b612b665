use vsh_rpc::{input_of, ShellError};
use vsh_value::{Record, Value};

/// `enumerate` — SPEC_FULL.md §4.6. Prepends a 0-based `index` field to
/// each record; an existing `index` key is overwritten.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    Ok(input_of(params)
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let mut out = Record::new().with("index", Value::Int(i as i64));
            for (key, value) in record {
                if key != "index" {
                    out.insert(key, value);
                }
            }
            out
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    #[test]
    fn prepends_zero_based_index() {
        let input =
            vec![Record::new().with("name", Value::String("a".to_string())), Record::new()];
        let params = build_params(&[], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out[0].get("index"), Some(&Value::Int(0)));
        assert_eq!(out[0].get("name"), Some(&Value::String("a".to_string())));
        assert_eq!(out[1].get("index"), Some(&Value::Int(1)));
    }

    #[test]
    fn existing_index_field_is_overwritten() {
        let input = vec![Record::new().with("index", Value::String("stale".to_string()))];
        let params = build_params(&[], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out[0].get("index"), Some(&Value::Int(0)));
    }
}
