use vsh_idl::Interface;
use vsh_rpc::{Call, Reply, ShellError};

use crate::connection::Connection;

/// Call `org.varlink.service.GetInfo` and return the interface names it
/// advertises.
pub fn list_interfaces(conn: &mut Connection) -> Result<Vec<String>, ShellError> {
    let reply = call_one(conn, "org.varlink.service.GetInfo", None)?;
    let names = reply
        .parameters
        .as_ref()
        .and_then(|p| p.get("interfaces"))
        .and_then(|v| v.as_array())
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    Ok(names)
}

/// Call `org.varlink.service.GetInterfaceDescription` for one interface
/// and parse the IDL text it returns (SPEC_FULL.md §4.2).
pub fn describe_interface(conn: &mut Connection, name: &str) -> Result<Interface, ShellError> {
    let reply = call_one(
        conn,
        "org.varlink.service.GetInterfaceDescription",
        Some(serde_json::json!({ "interface": name })),
    )?;
    let description = reply
        .parameters
        .as_ref()
        .and_then(|p| p.get("description"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| ShellError::VarlinkCallFailed {
            error: format!("{name}: GetInterfaceDescription returned no description"),
            parameters: None,
        })?;
    vsh_idl::parse(description).map_err(|e| ShellError::VarlinkCallFailed {
        error: format!("{name}: malformed interface description: {e}"),
        parameters: None,
    })
}

fn call_one(
    conn: &mut Connection,
    method: &str,
    parameters: Option<serde_json::Value>,
) -> Result<Reply, ShellError> {
    let call = Call { method: method.to_string(), parameters, ..Call::default() };
    let mut replies = conn.call(&call)?;
    let reply = replies.pop().ok_or_else(|| ShellError::VarlinkConnectionFailed {
        message: format!("{method}: no reply"),
    })?;
    check_error(method, &reply)?;
    Ok(reply)
}

/// Surface a remote error reply as `VarlinkCallFailed` (SPEC_FULL.md §4.7).
pub fn check_error(method: &str, reply: &Reply) -> Result<(), ShellError> {
    if let Some(error) = &reply.error {
        return Err(ShellError::VarlinkCallFailed {
            error: format!("{method}: {error}"),
            parameters: reply
                .parameters
                .as_ref()
                .map(|p| vsh_value::Value::from_json(p.clone()))
                .and_then(|v| match v {
                    vsh_value::Value::Record(r) => Some(r),
                    _ => None,
                }),
        });
    }
    Ok(())
}
