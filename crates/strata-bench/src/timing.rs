//! Wall-clock timing for benchmark phases.

use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the elapsed wall-clock
/// time.
pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
