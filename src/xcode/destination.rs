// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Build-destination resolution
//!
//! Maps a logical target (platform + optional device identifier) to the
//! destination descriptor that drives xcodebuild's `-destination` argument.

use crate::xcode::platform::PlatformInfo;
use regex_lite::Regex;
use std::sync::OnceLock;

/// How a build is targeted. Resolved once per request, then rendered into the
/// destination string by the command builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// No device given; a generic simulator destination.
    Generic(&'static PlatformInfo),
    /// Identifier matched the simulator UUID shape.
    DeviceById(&'static PlatformInfo, String),
    /// Identifier treated as a human-readable device name.
    DeviceByName(&'static PlatformInfo, String),
    /// Desktop-class platform; no simulator, restricted to the host
    /// architecture when it is known.
    NativePlatform(&'static PlatformInfo),
    /// Desktop-class platform building every registered architecture.
    Universal(&'static PlatformInfo),
}

fn uuid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        )
        .expect("uuid pattern is valid")
    })
}

/// Whether an identifier has the 8-4-4-4-12 hex shape simctl uses for UDIDs.
pub fn looks_like_udid(identifier: &str) -> bool {
    uuid_pattern().is_match(identifier)
}

/// Resolve a platform + optional device identifier into a destination.
///
/// macOS ignores any identifier (there is nothing to address); `universal`
/// only matters there and requests an all-architectures build. Simulator
/// platforms classify the identifier by UUID shape.
pub fn resolve(
    platform: &'static PlatformInfo,
    device_identifier: Option<&str>,
    universal: bool,
) -> Destination {
    if !platform.requires_simulator {
        if universal {
            return Destination::Universal(platform);
        }
        return Destination::NativePlatform(platform);
    }

    match device_identifier {
        None => Destination::Generic(platform),
        Some(id) if looks_like_udid(id) => Destination::DeviceById(platform, id.to_string()),
        Some(name) => Destination::DeviceByName(platform, name.to_string()),
    }
}

impl Destination {
    pub fn platform(&self) -> &'static PlatformInfo {
        match self {
            Destination::Generic(p)
            | Destination::DeviceById(p, _)
            | Destination::DeviceByName(p, _)
            | Destination::NativePlatform(p)
            | Destination::Universal(p) => p,
        }
    }

    /// Render the xcodebuild `-destination` value.
    ///
    /// The platform's internal token appears only here; caller-facing fields
    /// always carry the public name. `native_arch` comes from the
    /// architecture detector and is consulted only for the native-platform
    /// case; `None` means build all architectures.
    pub fn destination_arg(&self, native_arch: Option<&str>) -> String {
        match self {
            Destination::Generic(p) => {
                format!("generic/platform={} Simulator", p.internal_name)
            }
            Destination::DeviceById(p, udid) => {
                format!("platform={} Simulator,id={}", p.internal_name, udid)
            }
            Destination::DeviceByName(p, name) => {
                format!("platform={} Simulator,name={}", p.internal_name, name)
            }
            Destination::NativePlatform(p) => match native_arch {
                Some(arch) => format!("platform={},arch={}", p.internal_name, arch),
                None => format!("platform={}", p.internal_name),
            },
            Destination::Universal(p) => format!("platform={}", p.internal_name),
        }
    }

    /// Whether the destination addresses a concrete simulator device.
    pub fn is_device_specific(&self) -> bool {
        matches!(
            self,
            Destination::DeviceById(_, _) | Destination::DeviceByName(_, _)
        )
    }
}
