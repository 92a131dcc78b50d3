use super::*;

pub const DEFAULT_MAX_RETRIES: u32 = 10;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Jittered exponential backoff applied to rate-limit failures only.
///
/// The delay starts at `initial_delay`. Every rate-limit failure multiplies
/// it by `2 * (1 + r)` with a fresh `r` drawn from `[0, 1)` before sleeping,
/// so the i-th wait falls in `[2^i, 4^i)` multiples of `initial_delay`.
/// Once more than `max_retries` rate-limit failures have been seen the call
/// fails with [`GenerationError::RetriesExhausted`]. Any other error is
/// returned immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn next_delay(&self, previous: Duration, jitter: f64) -> Duration {
        saturating_scale(previous, 2.0 * (1.0 + jitter))
    }

    /// Inclusive lower and exclusive upper bound on the total time slept
    /// across `retries` consecutive rate-limit retries. Bounds saturate at
    /// [`Duration::MAX`].
    pub fn total_delay_bounds(&self, retries: u32) -> (Duration, Duration) {
        let mut low = 0.0_f64;
        let mut high = 0.0_f64;
        for attempt in 1..=retries as i32 {
            low += 2.0_f64.powi(attempt);
            high += 4.0_f64.powi(attempt);
        }
        (
            saturating_scale(self.initial_delay, low),
            saturating_scale(self.initial_delay, high),
        )
    }

    pub fn execute<T, R, F>(
        &self,
        rng: &mut R,
        sleeper: &dyn Sleeper,
        mut call: F,
    ) -> Result<T, GenerationError>
    where
        R: Rng + ?Sized,
        F: FnMut() -> Result<T, GenerationError>,
    {
        let mut retries = 0_u32;
        let mut delay = self.initial_delay;

        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => {
                    retries += 1;
                    if retries > self.max_retries {
                        return Err(GenerationError::RetriesExhausted {
                            max_retries: self.max_retries,
                            last_error: err.to_string(),
                        });
                    }

                    delay = self.next_delay(delay, rng.gen_range(0.0..1.0));
                    warn!(
                        attempt = retries,
                        max = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying after rate limit error"
                    );
                    sleeper.sleep(delay);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn saturating_scale(duration: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}
