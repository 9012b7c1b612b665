use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;

use vsh_rpc::{argv_of, ShellError};
use vsh_value::{Record, Value};

/// `jsexec cmd args...` — SPEC_FULL.md §4.6. Blocks until the subprocess
/// exits (§5): stdout is read in full, then parsed as one JSON document.
/// Spawned rather than run to completion with `Command::output` so a
/// Ctrl-C (§5 "Cancellation") can reach in and terminate it instead of
/// blocking the whole process; stdout/stderr are drained on background
/// threads the whole time so a chatty child can't deadlock on a full
/// pipe while the main thread is just polling for exit or interrupt.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let (command, args) = argv.split_first().ok_or_else(|| ShellError::InvalidParameter {
        parameter: "jsexec requires a command".to_string(),
    })?;

    let mut child = Command::new(command)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ShellError::ExecFailed {
            command: command.clone(),
            exitcode: -1,
            message: e.to_string(),
        })?;

    let stdout = child.stdout.take().expect("stdout piped above");
    let stderr = child.stderr.take().expect("stderr piped above");
    let stdout_reader = std::thread::spawn(move || read_all(stdout));
    let stderr_reader = std::thread::spawn(move || read_all(stderr));

    let interrupted = loop {
        if vsh_rpc::cancel::is_requested() {
            let _ = child.kill();
            break true;
        }
        match child.try_wait() {
            Ok(Some(_)) => break false,
            Ok(None) => std::thread::sleep(Duration::from_millis(20)),
            Err(e) => {
                return Err(ShellError::ExecFailed {
                    command: command.clone(),
                    exitcode: -1,
                    message: e.to_string(),
                })
            }
        }
    };

    let status = child.wait().map_err(|e| ShellError::ExecFailed {
        command: command.clone(),
        exitcode: -1,
        message: e.to_string(),
    })?;
    let stdout_buf = stdout_reader.join().unwrap_or_default();
    let stderr_buf = stderr_reader.join().unwrap_or_default();

    if interrupted {
        return Err(ShellError::ExecFailed {
            command: command.clone(),
            exitcode: -1,
            message: "interrupted".to_string(),
        });
    }

    if !status.success() {
        return Err(ShellError::ExecFailed {
            command: command.clone(),
            exitcode: status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&stderr_buf).into_owned(),
        });
    }

    let json: serde_json::Value = serde_json::from_slice(&stdout_buf)
        .map_err(|e| ShellError::InvalidJson { message: e.to_string() })?;
    Ok(decode(json))
}

fn read_all(mut pipe: impl Read) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    buf
}

/// Apply §4.6's auto-unwrap rules: a single-key object whose value is a
/// list, or a bare list, becomes one record per element; any other
/// object is the single output record.
fn decode(json: serde_json::Value) -> Vec<Record> {
    match json {
        serde_json::Value::Object(mut map)
            if map.len() == 1 && map.values().next().is_some_and(serde_json::Value::is_array) =>
        {
            let (_, value) = map.drain().next().expect("checked len == 1 above");
            let serde_json::Value::Array(items) = value else {
                unreachable!("guarded by is_array above")
            };
            items.into_iter().map(wrap).collect()
        }
        serde_json::Value::Object(_) => vec![record_from_object(json)],
        serde_json::Value::Array(items) => items.into_iter().map(wrap).collect(),
        other => vec![wrap(other)],
    }
}

fn wrap(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(_) => record_from_object(value),
        other => Record::new().with("value", Value::from_json(other)),
    }
}

fn record_from_object(value: serde_json::Value) -> Record {
    match Value::from_json(value) {
        Value::Record(record) => record,
        _ => Record::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_rpc::build_params;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unwraps_bare_json_list() {
        let params = build_params(&argv(&["printf", "[{\"x\":1},{\"x\":2}]"]), None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn unwraps_single_key_object_of_a_list() {
        let params =
            build_params(&argv(&["printf", "{\"items\":[{\"n\":1},{\"n\":2}]}"]), None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].get("n"), Some(&Value::Int(2)));
    }

    #[test]
    fn plain_object_becomes_one_record() {
        let params = build_params(&argv(&["printf", "{\"a\":1,\"b\":2}"]), None);
        let out = run(&params).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn non_zero_exit_is_exec_failed() {
        let params = build_params(&argv(&["sh", "-c", "exit 3"]), None);
        match run(&params) {
            Err(ShellError::ExecFailed { exitcode, .. }) => assert_eq!(exitcode, 3),
            other => panic!("expected ExecFailed, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_stdout_is_invalid_json() {
        let params = build_params(&argv(&["printf", "not json"]), None);
        assert!(matches!(run(&params), Err(ShellError::InvalidJson { .. })));
    }

    #[test]
    fn no_args_is_invalid_parameter() {
        let params = build_params(&[], None);
        assert!(matches!(run(&params), Err(ShellError::InvalidParameter { .. })));
    }
}
