use std::cmp::Ordering;

use regex::Regex;
use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{Record, Value};

use super::split_path;

enum Op {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Match,
}

struct Cond {
    path: Vec<String>,
    op: Op,
    rhs: String,
    regex: Option<Regex>,
}

/// `where conds...` — SPEC_FULL.md §4.6. Conditions are ANDed; `~` uses
/// the portable POSIX-extended subset the `regex` crate implements
/// (no back-references, matching DESIGN.md's open-question decision).
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let conds: Vec<Cond> =
        argv_of(params).iter().map(|arg| parse_cond(arg)).collect::<Result<_, _>>()?;
    let input = input_of(params);
    Ok(input.into_iter().filter(|record| conds.iter().all(|c| matches(c, record))).collect())
}

fn parse_cond(raw: &str) -> Result<Cond, ShellError> {
    let (lhs, op, rhs) = split_operator(raw)
        .ok_or_else(|| ShellError::InvalidParameter { parameter: raw.to_string() })?;
    let regex = if matches!(op, Op::Match) {
        Some(
            Regex::new(rhs)
                .map_err(|e| ShellError::InvalidParameter { parameter: format!("{rhs}: {e}") })?,
        )
    } else {
        None
    };
    Ok(Cond { path: split_path(lhs), op, rhs: rhs.to_string(), regex })
}

/// Two-character operators are checked before their one-character
/// prefixes (`>=` before `>`) so `a>=1` is not mis-split as `a>` `=1`.
fn split_operator(raw: &str) -> Option<(&str, Op, &str)> {
    const TOKENS: [(&str, fn() -> Op); 7] = [
        ("!=", || Op::Ne),
        (">=", || Op::Ge),
        ("<=", || Op::Le),
        ("=", || Op::Eq),
        (">", || Op::Gt),
        ("<", || Op::Lt),
        ("~", || Op::Match),
    ];
    for (token, op) in TOKENS {
        if let Some(idx) = raw.find(token) {
            return Some((&raw[..idx], op(), &raw[idx + token.len()..]));
        }
    }
    None
}

fn matches(cond: &Cond, record: &Record) -> bool {
    let Some(value) = record.resolve_path(&cond.path) else { return false };
    match cond.op {
        Op::Eq => value.render() == cond.rhs,
        Op::Ne => value.render() != cond.rhs,
        Op::Match => cond.regex.as_ref().expect("compiled for ~").is_match(&value.render()),
        Op::Gt | Op::Lt | Op::Ge | Op::Le => {
            let ord = match (value.as_f64(), cond.rhs.parse::<f64>().ok()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => value.render().cmp(&cond.rhs),
            };
            match cond.op {
                Op::Gt => ord == Ordering::Greater,
                Op::Lt => ord == Ordering::Less,
                Op::Ge => ord != Ordering::Less,
                Op::Le => ord != Ordering::Greater,
                _ => unreachable!(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    fn rec(age: i64) -> Record {
        Record::new().with("age", Value::Int(age))
    }

    #[test]
    fn numeric_comparison() {
        let input = vec![rec(10), rec(20), rec(30)];
        let params = build_params(&["age>=20".to_string()], Some(input));
        let out = run(&params).unwrap();
        assert_eq!(out, vec![rec(20), rec(30)]);
    }

    #[test]
    fn equality_compares_rendered_strings() {
        let input = vec![Record::new().with("s", Value::String("hi".to_string()))];
        let params = build_params(&["s=hi".to_string()], Some(input.clone()));
        assert_eq!(run(&params).unwrap(), input);
    }

    #[test]
    fn regex_match() {
        let input = vec![
            Record::new().with("name", Value::String("alpha".to_string())),
            Record::new().with("name", Value::String("beta".to_string())),
        ];
        let params = build_params(&["name~^a".to_string()], Some(input.clone()));
        assert_eq!(run(&params).unwrap(), vec![input[0].clone()]);
    }

    #[test]
    fn missing_field_never_matches() {
        let params = build_params(&["age>5".to_string()], Some(vec![Record::new()]));
        assert!(run(&params).unwrap().is_empty());
    }

    #[test]
    fn multiple_conditions_are_anded() {
        let input = vec![rec(10), rec(20)];
        let params =
            build_params(&["age>5".to_string(), "age<15".to_string()], Some(input));
        assert_eq!(run(&params).unwrap(), vec![rec(10)]);
    }
}
