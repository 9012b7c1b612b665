use vsh_value::{record_to_json, Record};

/// Render a completed pipeline output (SPEC_FULL.md §4.8, §6).
///
/// `non_interactive` mirrors stdin's terminal-ness; `ends_in_print` is
/// whether the final stage of the pipeline was `print`, which forces
/// table rendering even in non-interactive mode. An empty stream always
/// renders as the empty string.
pub fn render(stream: &[Record], non_interactive: bool, ends_in_print: bool) -> String {
    if stream.is_empty() {
        return String::new();
    }
    if non_interactive && !ends_in_print {
        return json_lines(stream);
    }
    match homogeneous_keys(stream) {
        Some(keys) => table(stream, &keys),
        None => json_lines(stream),
    }
}

/// `Some(keys)` when every record shares the same ordered key list (and
/// the stream is non-empty); that is the table-eligibility condition.
fn homogeneous_keys(stream: &[Record]) -> Option<Vec<String>> {
    let first: Vec<String> = stream[0].key_order().into_iter().map(str::to_string).collect();
    if first.is_empty() {
        return None;
    }
    for record in &stream[1..] {
        let keys: Vec<&str> = record.key_order();
        if keys != first.iter().map(String::as_str).collect::<Vec<_>>() {
            return None;
        }
    }
    Some(first)
}

fn json_lines(stream: &[Record]) -> String {
    let mut out = String::new();
    for record in stream {
        out.push_str(&record_to_json(record).to_string());
        out.push('\n');
    }
    out
}

fn table(stream: &[Record], keys: &[String]) -> String {
    let headers: Vec<String> = keys.iter().map(|k| k.to_uppercase()).collect();
    let rows: Vec<Vec<String>> = stream
        .iter()
        .map(|record| {
            keys.iter()
                .map(|k| record.get(k).map(|v| v.render()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter().map(|r| r[i].len()).chain(std::iter::once(h.len())).max().unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
