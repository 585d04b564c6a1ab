//! Package-level constants.

/// Current version of the tabsess client (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Well-known topic for cross-context session messages.
///
/// Every browsing context of the same origin publishes and watches this
/// single key; the value is overwritten on each publish.
pub const MESSAGE_TOPIC: &str = "nextauth.message";

/// Path of the sign-out endpoint, relative to the configured base URL.
pub const SIGNOUT_PATH: &str = "/api/auth/signout";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION must be semver (MAJOR.MINOR.PATCH)");
        for part in parts {
            let _: u32 = part.parse().expect("each semver segment must be a number");
        }
    }

    #[test]
    fn message_topic_is_stable() {
        // The topic name is part of the wire contract with existing deployments.
        assert_eq!(MESSAGE_TOPIC, "nextauth.message");
    }

    #[test]
    fn signout_path_is_absolute() {
        assert!(SIGNOUT_PATH.starts_with('/'));
    }
}
