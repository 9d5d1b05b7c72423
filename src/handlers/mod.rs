// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Tool-call handlers

pub mod build;
pub mod listing;
pub mod simulator;
pub mod status;
pub mod swift;
pub mod test;
