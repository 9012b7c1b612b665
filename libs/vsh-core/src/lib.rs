use std::sync::LazyLock;

mod builtins;
mod idl;
mod pipeline;

pub use idl::{builtin_interface, BUILTIN_IDL};
pub use pipeline::{capitalize, command_name, parse_pipeline, run_pipeline, Pipeline, Stage};
pub use vsh_rpc::ShellError;
pub use vsh_value::{Record, Value};

/// Record an interrupt request (§5 "Cancellation"). Safe to call from a
/// signal handler: it only stores to an atomic flag.
pub fn request_cancel() {
    vsh_rpc::cancel::request();
}

/// Whether the line just run was aborted by an interrupt rather than
/// running to completion — the read loop uses this to return to the
/// prompt silently instead of rendering output or an error.
pub fn was_cancelled() -> bool {
    vsh_rpc::cancel::is_requested()
}

/// Clear the interrupt flag before starting a new line.
pub fn reset_cancel() {
    vsh_rpc::cancel::reset();
}

/// The process-wide registry of built-in methods, built once (SPEC_FULL.md
/// §9 "Global state") and shared by every pipeline stage dispatch.
pub static BUILTINS: LazyLock<vsh_rpc::Registry> = LazyLock::new(builtins::registry);

/// Parse and run one input line, returning the records it produced and
/// whether the renderer should force table output (the line ended in
/// `print`, per §4.8/§6).
pub fn execute_line(line: &str) -> Result<(Vec<Record>, bool), ShellError> {
    let pipeline = parse_pipeline(line)?;
    let force_table = pipeline.ends_in_print();
    let records = run_pipeline(&pipeline)?;
    Ok((records, force_table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_line_runs_a_pipeline() {
        let (records, force_table) = execute_line("echo a | count").unwrap();
        assert_eq!(records.len(), 1);
        assert!(!force_table);
    }

    #[test]
    fn execute_line_detects_trailing_print() {
        let (_, force_table) = execute_line("echo a | print").unwrap();
        assert!(force_table);
    }

    #[test]
    fn every_builtin_method_is_dispatchable() {
        for method in builtin_interface().methods() {
            let params = vsh_rpc::build_params(&[], None);
            let result = BUILTINS.dispatch(&method.name, &params, true);
            assert!(!matches!(result, Err(ShellError::MethodNotFound { .. })));
        }
    }
}
