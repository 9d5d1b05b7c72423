// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Host architecture detection
//!
//! Generic (non-booted) destinations can restrict a build to the host's
//! native architecture for speed. The host cannot change mid-process, so the
//! first successful probe is cached for the process lifetime. A failed probe
//! yields `None` and the caller builds all architectures instead of guessing.

use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;

static NATIVE_ARCH: OnceLock<Option<String>> = OnceLock::new();

/// Detect the host CPU architecture (e.g. "arm64", "x86_64").
///
/// Returns `None` when detection fails; concurrent first callers may race to
/// probe, which is harmless since the answer is identical.
pub async fn native_arch() -> Option<String> {
    if let Some(cached) = NATIVE_ARCH.get() {
        return cached.clone();
    }

    let detected = probe_uname().await;
    NATIVE_ARCH.get_or_init(|| detected).clone()
}

async fn probe_uname() -> Option<String> {
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        Command::new("uname").arg("-m").output(),
    )
    .await;

    match result {
        Ok(Ok(output)) if output.status.success() => {
            let arch = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if arch.is_empty() {
                tracing::warn!("uname -m produced empty output, building all architectures");
                None
            } else {
                tracing::debug!("detected native architecture: {}", arch);
                Some(arch)
            }
        }
        Ok(Ok(output)) => {
            tracing::warn!(
                "uname -m exited with {:?}, building all architectures",
                output.status.code()
            );
            None
        }
        Ok(Err(e)) => {
            tracing::warn!("failed to run uname: {}, building all architectures", e);
            None
        }
        Err(_) => {
            tracing::warn!("uname -m timed out, building all architectures");
            None
        }
    }
}
