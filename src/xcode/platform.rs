// Copyright 2026 xcserve contributors
// SPDX-License-Identifier: Apache-2.0

//! Platform registry
//!
//! One canonical `PlatformInfo` per supported Apple platform. Every alias a
//! request may use (canonical name, lowercase shorthand, internal xcodebuild
//! token) resolves to the same `&'static` instance, so callers compare
//! platforms by identity instead of string matching.

use crate::error::{Result, XcserveError};

/// Immutable description of one Apple platform.
#[derive(Debug, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Public display name, as shown to callers.
    pub name: &'static str,
    /// Token xcodebuild expects in destination strings. Differs from `name`
    /// only for visionOS, which xcodebuild still calls xrOS.
    pub internal_name: &'static str,
    /// Whether builds for this platform target a simulator.
    pub requires_simulator: bool,
    /// Device used when a request names no device. Empty for macOS.
    pub default_device: &'static str,
}

pub static IOS: PlatformInfo = PlatformInfo {
    name: "iOS",
    internal_name: "iOS",
    requires_simulator: true,
    default_device: "iPhone 16",
};

pub static WATCHOS: PlatformInfo = PlatformInfo {
    name: "watchOS",
    internal_name: "watchOS",
    requires_simulator: true,
    default_device: "Apple Watch Series 10 (46mm)",
};

pub static TVOS: PlatformInfo = PlatformInfo {
    name: "tvOS",
    internal_name: "tvOS",
    requires_simulator: true,
    default_device: "Apple TV",
};

pub static VISIONOS: PlatformInfo = PlatformInfo {
    name: "visionOS",
    internal_name: "xrOS",
    requires_simulator: true,
    default_device: "Apple Vision Pro",
};

pub static MACOS: PlatformInfo = PlatformInfo {
    name: "macOS",
    internal_name: "macOS",
    requires_simulator: false,
    default_device: "",
};

/// Recognized aliases. Matching is case-insensitive; each row maps to exactly
/// one of the statics above.
const ALIASES: &[(&str, &PlatformInfo)] = &[
    ("ios", &IOS),
    ("iphoneos", &IOS),
    ("iphonesimulator", &IOS),
    ("watchos", &WATCHOS),
    ("watchsimulator", &WATCHOS),
    ("tvos", &TVOS),
    ("appletvos", &TVOS),
    ("appletvsimulator", &TVOS),
    ("visionos", &VISIONOS),
    ("xros", &VISIONOS),
    ("xrsimulator", &VISIONOS),
    ("macos", &MACOS),
    ("macosx", &MACOS),
    ("osx", &MACOS),
];

impl PlatformInfo {
    /// Resolve a platform alias to its canonical instance.
    pub fn parse(alias: &str) -> Result<&'static PlatformInfo> {
        let needle = alias.trim().to_ascii_lowercase();
        ALIASES
            .iter()
            .find(|(a, _)| *a == needle)
            .map(|(_, p)| *p)
            .ok_or_else(|| XcserveError::Validation(format!("unknown platform: '{}'", alias)))
    }

    /// All registered platforms, for listing and tests.
    pub fn all() -> [&'static PlatformInfo; 5] {
        [&IOS, &WATCHOS, &TVOS, &VISIONOS, &MACOS]
    }

    /// Identity comparison; the registry guarantees one instance per platform.
    pub fn is(&'static self, other: &'static PlatformInfo) -> bool {
        std::ptr::eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_aliases_resolve_to_the_same_instance() {
        for (alias, expected) in ALIASES {
            let parsed = PlatformInfo::parse(alias).unwrap();
            assert!(
                std::ptr::eq(parsed, *expected),
                "alias '{}' did not resolve to its canonical instance",
                alias
            );
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let a = PlatformInfo::parse("iOS").unwrap();
        let b = PlatformInfo::parse("IOS").unwrap();
        let c = PlatformInfo::parse("iphonesimulator").unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(b, c));
    }

    #[test]
    fn test_unknown_alias_fails() {
        assert!(PlatformInfo::parse("androidos").is_err());
        assert!(PlatformInfo::parse("").is_err());
    }

    #[test]
    fn test_visionos_internal_name_differs() {
        let p = PlatformInfo::parse("visionos").unwrap();
        assert_eq!(p.name, "visionOS");
        assert_eq!(p.internal_name, "xrOS");

        // Every other platform keeps its public name internally.
        for platform in PlatformInfo::all() {
            if !platform.is(&VISIONOS) {
                assert_eq!(platform.name, platform.internal_name);
            }
        }
    }

    #[test]
    fn test_only_macos_skips_the_simulator() {
        for platform in PlatformInfo::all() {
            assert_eq!(platform.requires_simulator, !platform.is(&MACOS));
        }
    }
}
