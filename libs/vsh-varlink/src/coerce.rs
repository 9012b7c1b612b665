use vsh_value::Value;

/// Typed coercion of one `k=v` argument's raw value string (SPEC_FULL.md
/// §4.7): `true`/`false` → Bool, integer grammar → Int, float grammar →
/// Float, a leading `{`/`[` that parses as JSON → that value, else String.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if is_int_grammar(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Int(i);
        }
    }
    if is_float_grammar(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    }
    if raw.starts_with('{') || raw.starts_with('[') {
        if let Ok(json) = serde_json::from_str(raw) {
            return Value::from_json(json);
        }
    }
    Value::String(raw.to_string())
}

/// SPEC_FULL.md §4.7's integer grammar is exactly `-?[0-9]+` — no leading
/// `+`, unlike what `i64::parse` itself accepts (`"+5"` parses fine via
/// `FromStr`). Guard for that before trying the parse.
fn is_int_grammar(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    i < bytes.len() && bytes[i..].iter().all(u8::is_ascii_digit)
}

/// Guards `f64::parse` against the looser strings it otherwise accepts
/// (`inf`, `NaN`, leading `+`) so those fall through to the String case —
/// the float grammar is held to the same no-leading-`+` rule as the
/// integer grammar above.
fn is_float_grammar(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let had_int_digits = i > start;
    let mut had_frac_digits = false;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        had_frac_digits = i > frac_start;
    }
    (had_int_digits || had_frac_digits) && i == bytes.len()
}
