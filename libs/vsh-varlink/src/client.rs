use vsh_idl::Kind;
use vsh_rpc::{Call, ShellError};
use vsh_value::{Record, Value};

use crate::address;
use crate::coerce::coerce;
use crate::connection::Connection;
use crate::introspect::{check_error, describe_interface, list_interfaces};

/// `varlink addr [method] [k=v...]` — SPEC_FULL.md §4.7, the sole entry
/// point this crate exposes to the shell's built-in registry.
pub fn call(argv: &[String], input: Option<Vec<Record>>) -> Result<Vec<Record>, ShellError> {
    let (addr_raw, rest) = argv.split_first().ok_or_else(|| ShellError::InvalidParameter {
        parameter: "varlink requires an address".to_string(),
    })?;
    let addr = address::parse(addr_raw)?;
    let mut conn = Connection::connect(&addr)?;

    let (method_arg, kv_args) = match rest.split_first() {
        Some((first, tail)) if !first.contains('=') => (Some(first.as_str()), tail),
        _ => (None, rest),
    };

    let Some(method_arg) = method_arg else {
        return list_methods(&mut conn);
    };

    let fqmethod = resolve_method(&mut conn, method_arg)?;
    let parameters = build_parameters(kv_args, input);
    call_method(&mut conn, &fqmethod, parameters)
}

/// Resolve a bare method name against every introspected interface;
/// already-qualified names (containing a `.`) pass through untouched.
fn resolve_method(conn: &mut Connection, method: &str) -> Result<String, ShellError> {
    if method.contains('.') {
        return Ok(method.to_string());
    }

    let mut matches = Vec::new();
    for interface in list_interfaces(conn)? {
        let description = describe_interface(conn, &interface)?;
        if description.method(method).is_some() {
            matches.push(format!("{interface}.{method}"));
        }
    }

    match matches.len() {
        1 => Ok(matches.into_iter().next().expect("checked len == 1")),
        _ => Err(ShellError::VarlinkMethodNotFound { method: method.to_string() }),
    }
}

/// Parameters come from `k=v` args (typed coercion) or, absent those,
/// from the single upstream record.
fn build_parameters(kv_args: &[String], input: Option<Vec<Record>>) -> serde_json::Value {
    if kv_args.is_empty() {
        let record = input.and_then(|records| records.into_iter().next()).unwrap_or_default();
        return Value::Record(record).to_json();
    }

    let mut record = Record::new();
    for arg in kv_args {
        if let Some((key, value)) = arg.split_once('=') {
            record.insert(key, coerce(value));
        }
    }
    Value::Record(record).to_json()
}

fn call_method(
    conn: &mut Connection,
    method: &str,
    parameters: serde_json::Value,
) -> Result<Vec<Record>, ShellError> {
    let call = Call {
        method: method.to_string(),
        parameters: Some(parameters),
        more: Some(true),
        ..Call::default()
    };
    let replies = conn.call(&call)?;
    let mut records = Vec::with_capacity(replies.len());
    for reply in &replies {
        check_error(method, reply)?;
        let record = match reply.parameters.clone() {
            Some(json) => match Value::from_json(json) {
                Value::Record(r) => r,
                _ => Record::new(),
            },
            None => Record::new(),
        };
        records.push(record);
    }
    Ok(records)
}

/// `varlink addr` with no method: list every introspected interface's
/// methods as `{interface, method, signature}` records.
fn list_methods(conn: &mut Connection) -> Result<Vec<Record>, ShellError> {
    let mut out = Vec::new();
    for interface in list_interfaces(conn)? {
        let description = describe_interface(conn, &interface)?;
        for method in description.methods() {
            out.push(
                Record::new()
                    .with("interface", Value::String(interface.clone()))
                    .with("method", Value::String(method.name.clone()))
                    .with("signature", Value::String(signature(method))),
            );
        }
    }
    Ok(out)
}

fn signature(method: &vsh_idl::MethodDef) -> String {
    format!("({}) -> ({})", fields_str(&method.input), fields_str(&method.output))
}

fn fields_str(fields: &vsh_idl::Fields) -> String {
    fields
        .0
        .iter()
        .map(|f| format!("{}: {}{}", f.name, kind_str(&f.kind), if f.optional { "?" } else { "" }))
        .collect::<Vec<_>>()
        .join(", ")
}

fn kind_str(kind: &Kind) -> String {
    match kind {
        Kind::Bool => "bool".to_string(),
        Kind::Int => "int".to_string(),
        Kind::Float => "float".to_string(),
        Kind::String => "string".to_string(),
        Kind::Object => "object".to_string(),
        Kind::Array(inner) => format!("[]{}", kind_str(inner)),
        Kind::Map(inner) => format!("[string]{}", kind_str(inner)),
        Kind::TypeRef(name) => name.clone(),
    }
}
