use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;

/// A typed-record streaming shell (SPEC_FULL.md §6). Takes no positional
/// configuration beyond what `clap`'s derive grants for free.
#[derive(Parser)]
#[command(name = "vsh", about = "A typed-record object shell")]
struct Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    Cli::parse();

    // §5 "Cancellation": an interrupt aborts the current pipeline and
    // returns to the prompt without exiting the process, so SIGINT is
    // recorded rather than left at its default (process-terminating)
    // disposition.
    if let Err(e) = ctrlc::set_handler(vsh_core::request_cancel) {
        tracing::warn!(error = %e, "failed to install interrupt handler");
    }

    let interactive = io::stdin().is_terminal();
    let mut had_error = false;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if interactive {
            print!("vsh> ");
            let _ = stdout.flush();
        }

        let mut line = String::new();
        let n = stdin.lock().read_line(&mut line).unwrap_or(0);
        if n == 0 {
            if interactive {
                println!();
            }
            break;
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        run_line(line, interactive, &mut had_error);
    }

    if had_error {
        std::process::exit(1);
    }
}

fn run_line(line: &str, interactive: bool, had_error: &mut bool) {
    tracing::debug!(line = %line, "read pipeline");
    vsh_core::reset_cancel();

    match vsh_core::execute_line(line) {
        Ok((records, ends_in_print)) => {
            // An interrupt mid-pipeline (§5 "Cancellation") returns here
            // with whatever partial work the aborted stage discarded —
            // render nothing and go straight back to the prompt.
            if vsh_core::was_cancelled() {
                tracing::debug!("pipeline interrupted");
                return;
            }
            let rendered = vsh_render::render(&records, !interactive, ends_in_print);
            if !rendered.is_empty() {
                print!("{rendered}");
            }
        }
        Err(err) => {
            if vsh_core::was_cancelled() {
                tracing::debug!("pipeline interrupted");
                return;
            }
            tracing::warn!(error = %err, "pipeline raised");
            eprintln!("error: {}: {}", err.name(), err.params_json());
            *had_error = true;
        }
    }
}
