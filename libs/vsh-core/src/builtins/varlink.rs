use vsh_rpc::{argv_of, input_of, ShellError};
use vsh_value::Record;

/// `varlink address [method] [k=v...]` — SPEC_FULL.md §4.7. Delegates to
/// the varlink client; kept as an ordinary registry entry so `help` and
/// command dispatch treat it uniformly with every other built-in.
pub fn run(params: &Record) -> Result<Vec<Record>, ShellError> {
    let argv = argv_of(params);
    let input = input_of(params);
    let input = if input.is_empty() { None } else { Some(input) };
    vsh_varlink::call(&argv, input)
}
