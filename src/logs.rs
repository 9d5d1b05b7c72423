// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Log and debug-snapshot persistence
//!
//! Fire-and-forget from the orchestration layer's perspective: a failed write
//! is logged and reported as `None`, never as a tool-call failure.

use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Persist raw tool output under the log directory.
///
/// Files are named `<kind>-<label>-<timestamp>-<short id>.log` so repeated
/// runs of the same scheme never collide.
pub async fn save_log(log_dir: &Path, kind: &str, label: &str, content: &str) -> Option<PathBuf> {
    let path = log_dir.join(file_name(kind, label, "log"));
    write(&path, content).await
}

/// Persist a debug snapshot (e.g. the exact command line used for a run).
pub async fn save_debug_data(
    log_dir: &Path,
    kind: &str,
    label: &str,
    payload: &str,
) -> Option<PathBuf> {
    let path = log_dir.join(file_name(kind, label, "txt"));
    write(&path, payload).await
}

fn file_name(kind: &str, label: &str, ext: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S");
    let short_id = Uuid::new_v4().simple().to_string();
    let label = sanitize(label);
    format!("{}-{}-{}-{}.{}", kind, label, timestamp, &short_id[..8], ext)
}

/// Labels come from user-supplied scheme names; keep file names tame.
fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "run".to_string()
    } else {
        cleaned
    }
}

async fn write(path: &Path, content: &str) -> Option<PathBuf> {
    if let Some(parent) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!("could not create log directory {}: {}", parent.display(), e);
            return None;
        }
    }
    match tokio::fs::write(path, content).await {
        Ok(()) => Some(path.to_path_buf()),
        Err(e) => {
            tracing::warn!("could not persist log {}: {}", path.display(), e);
            None
        }
    }
}
