use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{Record, Value};

use super::split_path;

/// `sum field` — SPEC_FULL.md §4.6. Missing or non-numeric fields count
/// as 0; the result is `Int` only if every contribution was integral.
pub fn run_sum(params: &Record) -> Result<Vec<Record>, ShellError> {
    let path = field_arg(params)?;
    let input = input_of(params);

    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut all_integral = true;
    for record in &input {
        match record.resolve_path(&path) {
            Some(Value::Int(i)) => {
                int_total += i;
                float_total += *i as f64;
            }
            Some(value) => {
                if let Some(f) = value.as_f64() {
                    all_integral = false;
                    float_total += f;
                }
            }
            None => {}
        }
    }
    let sum = if all_integral { Value::Int(int_total) } else { Value::Float(float_total) };
    Ok(vec![Record::new().with("sum", sum)])
}

/// `min field` — SPEC_FULL.md §4.6. Ties broken by input order.
pub fn run_min(params: &Record) -> Result<Vec<Record>, ShellError> {
    extremum(params, false)
}

/// `max field` — SPEC_FULL.md §4.6.
pub fn run_max(params: &Record) -> Result<Vec<Record>, ShellError> {
    extremum(params, true)
}

fn extremum(params: &Record, want_max: bool) -> Result<Vec<Record>, ShellError> {
    let path = field_arg(params)?;
    let input = input_of(params);

    let mut best: Option<(f64, Record)> = None;
    for record in input {
        let Some(value) = record.resolve_path(&path).and_then(Value::as_f64) else { continue };
        let better = match &best {
            None => true,
            Some((current, _)) => {
                if want_max {
                    value > *current
                } else {
                    value < *current
                }
            }
        };
        if better {
            best = Some((value, record));
        }
    }
    Ok(best.map(|(_, record)| vec![record]).unwrap_or_default())
}

fn field_arg(params: &Record) -> Result<Vec<String>, ShellError> {
    let argv = argv_of(params);
    let field = argv.first().ok_or_else(|| ShellError::InvalidParameter {
        parameter: "expected a field argument".to_string(),
    })?;
    Ok(split_path(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    fn rec(x: i64) -> Record {
        Record::new().with("x", Value::Int(x))
    }

    #[test]
    fn sum_of_integers_is_int() {
        let input = vec![rec(42), rec(7)];
        let params = build_params(&["x".to_string()], Some(input));
        assert_eq!(run_sum(&params).unwrap(), vec![Record::new().with("sum", Value::Int(49))]);
    }

    #[test]
    fn sum_with_any_float_contribution_is_float() {
        let input = vec![rec(1), Record::new().with("x", Value::Float(0.5))];
        let params = build_params(&["x".to_string()], Some(input));
        assert_eq!(run_sum(&params).unwrap(), vec![Record::new().with("sum", Value::Float(1.5))]);
    }

    #[test]
    fn missing_field_counts_as_zero() {
        let input = vec![rec(1), Record::new()];
        let params = build_params(&["x".to_string()], Some(input));
        assert_eq!(run_sum(&params).unwrap(), vec![Record::new().with("sum", Value::Int(1))]);
    }

    #[test]
    fn min_and_max_pick_whole_record_breaking_ties_by_order() {
        let input = vec![rec(3), rec(1), rec(1)];
        let params = build_params(&["x".to_string()], Some(input.clone()));
        assert_eq!(run_min(&params).unwrap(), vec![input[1].clone()]);
        let params = build_params(&["x".to_string()], Some(input.clone()));
        assert_eq!(run_max(&params).unwrap(), vec![input[0].clone()]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let params = build_params(&["x".to_string()], Some(vec![]));
        assert!(run_min(&params).unwrap().is_empty());
    }
}
