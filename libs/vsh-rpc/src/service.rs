use std::collections::HashMap;

use vsh_idl::Interface;
use vsh_value::{Record, Value};

use crate::error::ShellError;

/// A registered built-in's behaviour. Receives the call's parameter
/// record (always `{argv, input}` for this shell's built-in interface,
/// see `params::argv_of`/`params::records_of`) and produces the records it
/// emits, or the error it raised.
pub type Handler = Box<dyn Fn(&Record) -> Result<Vec<Record>, ShellError> + Send + Sync>;

struct Entry {
    handler: Handler,
    /// Whether this method is streaming-only: calling it with `more: false`
    /// raises `ExpectedMore` (§4.3). Only `Varlink` is, in practice, since
    /// it is the one built-in whose backing call can legitimately produce
    /// more than one reply.
    streaming: bool,
}

/// The process-wide, immutable-after-construction registry of built-in
/// methods, dispatched the way the embedded RPC service describes
/// (SPEC_FULL.md §4.3): by fully-qualified method name, against a
/// declared `Interface` used both for dispatch validation and for `help`.
pub struct Registry {
    interface: Interface,
    entries: HashMap<String, Entry>,
}

pub struct RegistryBuilder {
    interface: Interface,
    entries: HashMap<String, Entry>,
}

impl RegistryBuilder {
    pub fn new(interface: Interface) -> Self {
        Self { interface, entries: HashMap::new() }
    }

    pub fn register(
        mut self,
        method: &str,
        streaming: bool,
        handler: impl Fn(&Record) -> Result<Vec<Record>, ShellError> + Send + Sync + 'static,
    ) -> Self {
        self.entries.insert(method.to_string(), Entry { handler: Box::new(handler), streaming });
        self
    }

    pub fn build(self) -> Registry {
        Registry { interface: self.interface, entries: self.entries }
    }
}

impl Registry {
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Dispatch one call. Enforces the three contracts §4.3 lists:
    /// `MethodNotFound`, `InvalidParameter` for an undeclared parameter
    /// key, and `ExpectedMore` for a streaming method called without
    /// `more`.
    pub fn dispatch(
        &self,
        method: &str,
        params: &Record,
        more: bool,
    ) -> Result<Vec<Record>, ShellError> {
        let method_def = self
            .interface
            .method(method)
            .ok_or_else(|| ShellError::MethodNotFound { method: method.to_string() })?;

        for key in params.keys() {
            if !method_def.input.contains(key) {
                return Err(ShellError::InvalidParameter { parameter: key.clone() });
            }
        }

        let entry = self
            .entries
            .get(method)
            .ok_or_else(|| ShellError::MethodNotFound { method: method.to_string() })?;

        if entry.streaming && !more {
            return Err(ShellError::ExpectedMore);
        }

        (entry.handler)(params)
    }
}

/// Build the `{argv, input}` parameter record the pipeline executor passes
/// to every built-in call.
pub fn build_params(argv: &[String], input: Option<Vec<Record>>) -> Record {
    let mut params = Record::new();
    params.insert(
        "argv",
        Value::List(argv.iter().cloned().map(Value::String).collect()),
    );
    if let Some(records) = input {
        params.insert("input", Value::List(records.into_iter().map(Value::Record).collect()));
    }
    params
}

pub fn argv_of(params: &Record) -> Vec<String> {
    match params.get("argv") {
        Some(Value::List(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn input_of(params: &Record) -> Vec<Record> {
    match params.get("input") {
        Some(Value::List(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::Record(r) => Some(r.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
