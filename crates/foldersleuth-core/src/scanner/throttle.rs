/// Progress throttling — forwards at most one "now visiting" path per
/// interval, no matter how many workers are reporting.
///
/// The last-accepted timestamp sits behind a single `parking_lot::Mutex`.
/// The clock is read while the lock is held, so the check and the update
/// can never interleave with another worker's, and two accepted
/// notifications are always at least one interval apart.
use parking_lot::Mutex;
use std::path::Path;
use std::time::{Duration, Instant};

/// Minimum gap between forwarded notifications.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(50);

pub struct ProgressThrottle<S> {
    interval: Duration,
    last_accepted: Mutex<Option<Instant>>,
    sink: S,
}

impl<S> ProgressThrottle<S>
where
    S: Fn(&Path),
{
    pub fn new(interval: Duration, sink: S) -> Self {
        Self {
            interval,
            last_accepted: Mutex::new(None),
            sink,
        }
    }

    /// Offer a path. Returns `true` if it was forwarded to the sink.
    ///
    /// The sink runs after the lock is released, so a slow display never
    /// holds up workers that are only going to be dropped anyway.
    pub fn report(&self, path: &Path) -> bool {
        {
            let mut last = self.last_accepted.lock();
            let now = Instant::now();
            match *last {
                Some(prev) if now.duration_since(prev) < self.interval => return false,
                _ => *last = Some(now),
            }
        }
        (self.sink)(path);
        true
    }
}
