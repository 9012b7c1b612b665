use vsh_value::record_to_json;
use vsh_value::Record;

/// The unified error taxonomy for every built-in and every pipeline stage
/// (SPEC_FULL.md §7). Carries a fully-qualified name and a parameter
/// record rather than a bare string, so the read loop can render
/// `error: <Name>: <json>` (§6) independently of `Display`'s human-readable
/// text, which `tracing` uses for the operator-facing log line.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShellError {
    #[error("invalid parameter: {parameter}")]
    InvalidParameter { parameter: String },

    #[error("method not found: {method}")]
    MethodNotFound { method: String },

    #[error("'{command}' exited with status {exitcode}: {message}")]
    ExecFailed { command: String, exitcode: i32, message: String },

    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("could not connect: {message}")]
    VarlinkConnectionFailed { message: String },

    #[error("remote call failed: {error}")]
    VarlinkCallFailed { error: String, parameters: Option<Record> },

    #[error("method not found on any introspected interface: {method}")]
    VarlinkMethodNotFound { method: String },

    #[error("streaming method called without 'more'")]
    ExpectedMore,
}

impl ShellError {
    /// The fully-qualified error name used in the `error: <Name>: <json>`
    /// stderr shape (§6) — distinct from the variant's `Display` text.
    pub fn name(&self) -> &'static str {
        match self {
            ShellError::InvalidParameter { .. } => "InvalidParameter",
            ShellError::MethodNotFound { .. } => "MethodNotFound",
            ShellError::ExecFailed { .. } => "ExecFailed",
            ShellError::InvalidJson { .. } => "InvalidJson",
            ShellError::VarlinkConnectionFailed { .. } => "VarlinkConnectionFailed",
            ShellError::VarlinkCallFailed { .. } => "VarlinkCallFailed",
            ShellError::VarlinkMethodNotFound { .. } => "VarlinkMethodNotFound",
            ShellError::ExpectedMore => "ExpectedMore",
        }
    }

    /// The error's parameter record, rendered as JSON, for the stderr shape.
    pub fn params_json(&self) -> serde_json::Value {
        match self {
            ShellError::InvalidParameter { parameter } => {
                serde_json::json!({ "parameter": parameter })
            }
            ShellError::MethodNotFound { method } => serde_json::json!({ "method": method }),
            ShellError::ExecFailed { command, exitcode, message } => {
                serde_json::json!({ "command": command, "exitcode": exitcode, "message": message })
            }
            ShellError::InvalidJson { message } => serde_json::json!({ "message": message }),
            ShellError::VarlinkConnectionFailed { message } => {
                serde_json::json!({ "message": message })
            }
            ShellError::VarlinkCallFailed { error, parameters } => serde_json::json!({
                "error": error,
                "parameters": parameters.as_ref().map(record_to_json),
            }),
            ShellError::VarlinkMethodNotFound { method } => serde_json::json!({ "method": method }),
            ShellError::ExpectedMore => serde_json::json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_shape_round_trips_through_json() {
        let err = ShellError::InvalidParameter { parameter: "foo".into() };
        assert_eq!(err.name(), "InvalidParameter");
        assert_eq!(err.params_json(), serde_json::json!({"parameter": "foo"}));
    }
}
