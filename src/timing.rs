use std::time::{Duration, Instant};

/// Result of a unit of work together with how long it took.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Run `work` between two reads of a monotonic clock.
pub fn time<T, F>(work: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = work();
    let elapsed = start.elapsed();
    Timed { value, elapsed }
}

/// Like [`time`], for fallible work. Errors are returned untimed.
pub fn try_time<T, E, F>(work: F) -> Result<Timed<T>, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    let value = work()?;
    let elapsed = start.elapsed();
    Ok(Timed { value, elapsed })
}
