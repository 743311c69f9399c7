// Platform Oracle
// Capability queries injected into the settings store

/// Platforms the application ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Windows,
    Macos,
    Linux,
}

/// Small fixed set of boolean capability predicates, injected rather than
/// queried inline so tests can substitute fakes.
pub trait PlatformOracle: Send + Sync {
    /// True when the host matches any of the given platforms.
    fn is_platform(&self, platforms: &[Platform]) -> bool;

    /// True when the desktop session can reliably report and restore window
    /// geometry. Wayland sessions cannot, so placement persistence is gated
    /// on this predicate.
    fn is_not_wayland_desktop(&self) -> bool;
}

/// Oracle answering for the compiled target and the live desktop session.
pub struct HostPlatform;

impl HostPlatform {
    pub fn current() -> Platform {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else {
            Platform::Linux
        }
    }

    fn is_wayland_session() -> bool {
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            return true;
        }
        std::env::var("XDG_SESSION_TYPE")
            .map(|session| session.eq_ignore_ascii_case("wayland"))
            .unwrap_or(false)
    }
}

impl PlatformOracle for HostPlatform {
    fn is_platform(&self, platforms: &[Platform]) -> bool {
        platforms.contains(&Self::current())
    }

    fn is_not_wayland_desktop(&self) -> bool {
        if Self::current() != Platform::Linux {
            return true;
        }
        !Self::is_wayland_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_matches_its_own_platform() {
        let oracle = HostPlatform;
        assert!(oracle.is_platform(&[HostPlatform::current()]));
        assert!(!oracle.is_platform(&[]));
    }

    #[test]
    fn test_non_linux_hosts_are_never_wayland() {
        if HostPlatform::current() != Platform::Linux {
            assert!(HostPlatform.is_not_wayland_desktop());
        }
    }
}
