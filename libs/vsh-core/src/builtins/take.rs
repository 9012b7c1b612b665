use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::Record;

/// `head [n]` — SPEC_FULL.md §4.6. `n = 0` is legal and yields an empty
/// stream (decided open question, see DESIGN.md).
pub fn run_head(params: &Record) -> Result<Vec<Record>, ShellError> {
    let n = count_arg(params)?;
    Ok(input_of(params).into_iter().take(n).collect())
}

/// `tail [n]` — SPEC_FULL.md §4.6.
pub fn run_tail(params: &Record) -> Result<Vec<Record>, ShellError> {
    let n = count_arg(params)?;
    let input = input_of(params);
    let skip = input.len().saturating_sub(n);
    Ok(input.into_iter().skip(skip).collect())
}

fn count_arg(params: &Record) -> Result<usize, ShellError> {
    match argv_of(params).first() {
        None => Ok(10),
        Some(s) => {
            s.parse::<usize>().map_err(|_| ShellError::InvalidParameter { parameter: s.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;
    use vsh_value::Value;

    fn recs(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new().with("i", Value::Int(i as i64))).collect()
    }

    #[test]
    fn head_defaults_to_ten() {
        let params = build_params(&[], Some(recs(20)));
        assert_eq!(run_head(&params).unwrap().len(), 10);
    }

    #[test]
    fn head_zero_is_empty_not_an_error() {
        let params = build_params(&["0".to_string()], Some(recs(5)));
        assert!(run_head(&params).unwrap().is_empty());
    }

    #[test]
    fn tail_takes_last_n() {
        let params = build_params(&["2".to_string()], Some(recs(5)));
        let out = run_tail(&params).unwrap();
        assert_eq!(out, vec![Record::new().with("i", Value::Int(3)), Record::new().with("i", Value::Int(4))]);
    }

    #[test]
    fn non_numeric_n_is_invalid_parameter() {
        let params = build_params(&["abc".to_string()], Some(vec![]));
        assert!(matches!(run_head(&params), Err(ShellError::InvalidParameter { .. })));
    }
}
