//! Release target detection.
//!
//! Sift ships binaries for three targets. Anything else is a fatal
//! pre-flight error: the installer aborts before touching any state.

use std::env;

use crate::error::{Result, SetupError};

/// A supported release target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    LinuxX86_64,
    MacosArm64,
    MacosX86_64,
}

impl Platform {
    /// Detect the platform the installer is running on.
    pub fn detect() -> Result<Self> {
        Self::from_os_arch(env::consts::OS, env::consts::ARCH)
    }

    /// Map an OS/arch pair to a release target.
    pub fn from_os_arch(os: &str, arch: &str) -> Result<Self> {
        match (os, arch) {
            ("linux", "x86_64") => Ok(Self::LinuxX86_64),
            ("macos", "aarch64") => Ok(Self::MacosArm64),
            ("macos", "x86_64") => Ok(Self::MacosX86_64),
            _ => Err(SetupError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    /// The release asset name for this target.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::LinuxX86_64 => "sift-linux-x86_64",
            Self::MacosArm64 => "sift-darwin-arm64",
            Self::MacosX86_64 => "sift-darwin-x86_64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_targets() {
        assert_eq!(
            Platform::from_os_arch("linux", "x86_64").unwrap(),
            Platform::LinuxX86_64
        );
        assert_eq!(
            Platform::from_os_arch("macos", "aarch64").unwrap(),
            Platform::MacosArm64
        );
        assert_eq!(
            Platform::from_os_arch("macos", "x86_64").unwrap(),
            Platform::MacosX86_64
        );
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(Platform::LinuxX86_64.asset_name(), "sift-linux-x86_64");
        assert_eq!(Platform::MacosArm64.asset_name(), "sift-darwin-arm64");
        assert_eq!(Platform::MacosX86_64.asset_name(), "sift-darwin-x86_64");
    }

    #[test]
    fn test_unsupported_is_fatal() {
        let err = Platform::from_os_arch("windows", "x86_64").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("windows"));

        let err = Platform::from_os_arch("linux", "aarch64").unwrap_err();
        assert!(matches!(err, SetupError::UnsupportedPlatform { .. }));
    }
}
