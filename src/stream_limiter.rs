// SPDX-License-Identifier: MIT
// Copyright (c) 2026 cc-hooks contributors

//! A byte-capped passthrough over a child's stdout/stderr.
//!
//! Bytes are forwarded to an in-memory buffer until the cap is reached; once
//! exceeded, an overflow callback fires exactly once and further bytes are
//! dropped on the floor rather than buffered, so a runaway hook can never
//! inflate memory past the cap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads all of `source` into a buffer capped at `max_bytes`, invoking
/// `on_overflow` the first time the cap is exceeded.
pub async fn drain_capped<R, F>(mut source: R, max_bytes: usize, on_overflow: F) -> (Vec<u8>, bool)
where
    R: AsyncRead + Unpin,
    F: FnOnce(),
{
    let overflowed = Arc::new(AtomicBool::new(false));
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 8192];
    let mut fired = Some(on_overflow);

    loop {
        let n = match source.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(_) => break,
        };

        if buf.len() < max_bytes {
            let remaining = max_bytes - buf.len();
            let take = remaining.min(n);
            buf.extend_from_slice(&chunk[..take]);
        }

        if buf.len() >= max_bytes && !overflowed.swap(true, Ordering::SeqCst) {
            if let Some(cb) = fired.take() {
                cb();
            }
        }
    }

    (buf, overflowed.load(Ordering::SeqCst))
}

#[cfg(test)]
#[path = "stream_limiter_tests.rs"]
mod tests;
