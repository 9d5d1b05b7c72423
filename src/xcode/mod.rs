// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Xcode toolchain integration

pub mod arch;
pub mod artifacts;
pub mod command;
pub mod destination;
pub mod executor;
pub mod parser;
pub mod platform;
pub mod simctl;
pub mod xcodebuild;
