use std::time::Duration;

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(5);

/// Bounded retry with linear backoff: the wait after attempt `n` is
/// `base_delay * n`, so the default schedule is 5s, 10s, 15s, 20s.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn run<T>(&self, label: &str, op: impl FnMut() -> Result<T>) -> Result<T> {
        self.run_with_sleep(label, std::thread::sleep, op)
    }

    /// Same as `run`, but with the sleep function supplied by the caller.
    /// Tests pass a recording closure instead of actually sleeping.
    pub fn run_with_sleep<T>(
        &self,
        label: &str,
        mut sleep: impl FnMut(Duration),
        mut op: impl FnMut() -> Result<T>,
    ) -> Result<T> {
        let attempts = self.attempts.max(1);
        let mut last_err: Option<anyhow::Error> = None;
        for attempt in 1..=attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    last_err = Some(err);
                    if attempt < attempts {
                        sleep(self.base_delay * attempt);
                    }
                }
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow!("operation never ran")))
            .with_context(|| format!("{label} failed after {attempts} attempts"))
    }
}
