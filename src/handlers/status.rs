// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Status handler

use crate::error::Result;
use crate::state::SharedState;
use crate::xcode::simctl;

/// Handle a `status` tool call: toolchain version plus the booted simulator.
pub async fn status(state: &SharedState) -> Result<String> {
    let mut out = format!("xcserve healthy\n{}\n", state.xcode_version);

    match simctl::get_booted_simulator().await {
        Ok(Some(sim)) => {
            out.push_str(&format!("Booted simulator: {} ({})\n", sim.name, sim.udid));
        }
        Ok(None) => out.push_str("No booted simulator\n"),
        // Status stays useful even when simctl is unavailable.
        Err(e) => out.push_str(&format!("Simulator query failed: {}\n", e)),
    }

    Ok(out)
}
