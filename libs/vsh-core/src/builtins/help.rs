use vsh_rpc::{argv_of, ShellError};
use vsh_value::{Record, Value};

use crate::idl::builtin_interface;
use crate::pipeline::{capitalize, command_name};

/// `help [command]` — SPEC_FULL.md §4.6. Descriptions come straight from
/// the built-in interface's doc comments (§6 "Interface description").
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let iface = builtin_interface();

    match argv.first() {
        None => Ok(iface
            .methods()
            .map(|method| {
                let first_line = method.doc.as_deref().unwrap_or("").lines().next().unwrap_or("");
                Record::new()
                    .with("command", Value::String(command_name(&method.name)))
                    .with("description", Value::String(first_line.to_string()))
            })
            .collect()),
        Some(command) => {
            let method_name = capitalize(command);
            let method = iface.method(&method_name).ok_or_else(|| ShellError::InvalidParameter {
                parameter: command.clone(),
            })?;
            Ok(vec![Record::new()
                .with("command", Value::String(command_name(&method.name)))
                .with("description", Value::String(method.doc.clone().unwrap_or_default()))])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    #[test]
    fn no_argument_lists_one_row_per_command() {
        let params = build_params(&[], None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), builtin_interface().methods().count());
        assert!(out.iter().any(|r| r.get("command") == Some(&Value::String("count".to_string()))));
    }

    #[test]
    fn argument_returns_full_doc_string() {
        let params = build_params(&["filter_map".to_string()], None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get("command"), Some(&Value::String("filter_map".to_string())));
        match out[0].get("description") {
            Some(Value::String(s)) => assert!(s.contains("map")),
            other => panic!("expected a description string, got {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_invalid_parameter() {
        let params = build_params(&["nope".to_string()], None);
        assert!(matches!(run(&params), Err(ShellError::InvalidParameter { .. })));
    }
}
