// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! xcserve - stdio tool-dispatch server for Xcode operations
//!
//! Exposes Apple platform build, test and simulator operations as callable
//! tools over newline-delimited JSON on stdin/stdout. The server translates
//! logical targets into xcodebuild/swift invocations, runs them with bounded
//! capture, and parses the textual output into structured results.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logs;
pub mod models;
pub mod server;
pub mod state;
pub mod xcode;
