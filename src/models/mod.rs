// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Request and response models for the tool-call surface

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
