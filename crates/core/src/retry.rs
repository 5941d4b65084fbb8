// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry with multiplicative backoff.
//!
//! Used around mutations whose inputs can be transiently stale, such as
//! assignment under contention. The last error surfaces once the attempt
//! cap is reached; no sleep happens after the final attempt.

use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::Result;

/// Runs an operation up to `max_attempts` times, sleeping between
/// attempts with the delay growing by the backoff multiplier.
///
/// A `max_attempts` of zero is treated as one attempt; the operation
/// always runs at least once.
pub fn retry<T, F>(config: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = Duration::from_millis(config.initial_delay_ms);
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "operation failed, retrying"
                );
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                delay *= config.backoff;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
