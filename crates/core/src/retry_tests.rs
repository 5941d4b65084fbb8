// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::error::Error;

fn fast(max_attempts: u32) -> RetryConfig {
    RetryConfig { max_attempts, initial_delay_ms: 0, backoff: 2 }
}

#[test]
fn first_success_needs_one_attempt() {
    let mut calls = 0;
    let result = retry(&fast(3), || {
        calls += 1;
        Ok(42)
    });
    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls, 1);
}

#[test]
fn transient_failure_is_retried() {
    let mut calls = 0;
    let result = retry(&fast(3), || {
        calls += 1;
        if calls < 3 {
            Err(Error::SaveFailed("transient".into()))
        } else {
            Ok("done")
        }
    });
    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls, 3);
}

#[test]
fn persistent_failure_surfaces_the_last_error() {
    let mut calls = 0;
    let result: crate::error::Result<()> = retry(&fast(3), || {
        calls += 1;
        Err(Error::SaveFailed(format!("attempt {calls}")))
    });
    assert_eq!(calls, 3);
    match result {
        Err(Error::SaveFailed(msg)) => assert_eq!(msg, "attempt 3"),
        other => panic!("expected SaveFailed, got {other:?}"),
    }
}

#[test]
fn zero_attempts_is_clamped_to_one() {
    let mut calls = 0;
    let result: crate::error::Result<()> = retry(&fast(0), || {
        calls += 1;
        Err(Error::SaveFailed("nope".into()))
    });
    assert!(result.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn single_attempt_config_never_retries() {
    let mut calls = 0;
    let result: crate::error::Result<()> = retry(&fast(1), || {
        calls += 1;
        Err(Error::SaveFailed("nope".into()))
    });
    assert!(result.is_err());
    assert_eq!(calls, 1);
}
