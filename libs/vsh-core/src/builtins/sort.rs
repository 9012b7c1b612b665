use std::cmp::Ordering;

use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::{Record, Value};

use super::split_path;

struct Key {
    path: Vec<String>,
    descending: bool,
}

/// `sort fields...` — SPEC_FULL.md §4.6. A stable multi-key sort; a
/// `-field` argument reverses that key. Missing values sort last
/// regardless of direction (DESIGN.md's open-question decision).
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let keys: Vec<Key> = argv_of(params)
        .iter()
        .map(|arg| match arg.strip_prefix('-') {
            Some(field) => Key { path: split_path(field), descending: true },
            None => Key { path: split_path(arg), descending: false },
        })
        .collect();

    let mut input = input_of(params);
    input.sort_by(|a, b| compare_by_keys(a, b, &keys));
    Ok(input)
}

fn compare_by_keys(a: &Record, b: &Record, keys: &[Key]) -> Ordering {
    for key in keys {
        let ord = match (a.resolve_path(&key.path), b.resolve_path(&key.path)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => {
                let cmp = compare_values(x, y);
                if key.descending { cmp.reverse() } else { cmp }
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Numeric comparison when both sides parse as numbers, else lexical
/// comparison of the string rendering.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.render().cmp(&b.render()),
    }
}
