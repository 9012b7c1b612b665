use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide interactive-interrupt flag (SPEC_FULL.md §5
/// "Cancellation"). The read loop installs a SIGINT handler that sets
/// this; every blocking wait a pipeline can get stuck in — a subprocess
/// in `jsexec`/`foreach`, a socket read in the `varlink` client — polls
/// it instead of blocking unboundedly, so a Ctrl-C aborts the current
/// pipeline rather than the whole process.
static REQUESTED: AtomicBool = AtomicBool::new(false);

pub fn request() {
    REQUESTED.store(true, Ordering::SeqCst);
}

pub fn is_requested() -> bool {
    REQUESTED.load(Ordering::SeqCst)
}

/// Clear the flag before starting a new line, so a cancellation during
/// one pipeline does not leak into the next.
pub fn reset() {
    REQUESTED.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_reset_round_trip() {
        reset();
        assert!(!is_requested());
        request();
        assert!(is_requested());
        reset();
        assert!(!is_requested());
    }
}
