use std::time::{Duration, Instant};

/// Runs `f`, logging and returning how long it took.
pub fn timed<T>(task: &str, f: impl FnOnce() -> T) -> (T, Duration) {
    let start_time = Instant::now();
    let result = f();
    let duration = Instant::now() - start_time;
    log::info!("[timing] (task,{task}) (duration,{:.2?})", duration);
    (result, duration)
}
