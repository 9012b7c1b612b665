use std::fs;

use vsh_rpc::{argv_of, ShellError};
use vsh_value::{Record, Value};

/// `ls [path]` — SPEC_FULL.md §4.6.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let path = argv.first().map(String::as_str).unwrap_or(".");
    let dir = fs::read_dir(path)
        .map_err(|e| ShellError::InvalidParameter { parameter: format!("{path}: {e}") })?;

    let mut entries = Vec::new();
    for entry in dir.flatten() {
        let Ok(metadata) = entry.metadata() else { continue };
        let kind = if metadata.is_dir() {
            "dir"
        } else if metadata.is_symlink() {
            "link"
        } else {
            "file"
        };
        entries.push(
            Record::new()
                .with("name", Value::String(entry.file_name().to_string_lossy().into_owned()))
                .with("type", Value::String(kind.to_string()))
                .with("size", Value::Int(metadata.len() as i64)),
        );
    }
    entries.sort_by(|a, b| name_of(a).cmp(name_of(b)));
    Ok(entries)
}

fn name_of(record: &Record) -> &str {
    match record.get("name") {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    }
}
