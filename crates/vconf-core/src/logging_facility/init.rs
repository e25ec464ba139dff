//! Subscriber installation.

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Output profile selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Human-readable lines at debug level
    #[default]
    Development,
    /// JSON lines at info level
    Production,
    /// Nothing installed; tests use `init_test_capture`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "vconf_core=debug",
            Profile::Production => "vconf_core=info",
            Profile::Test => "off",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile `{}`", other)),
        }
    }
}

static INSTALL: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call in a process has an effect. Thread names are included
/// so pool workers (`vconf-worker-<pool>-<n>`) are identifiable.
///
/// ```
/// use vconf_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INSTALL.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .with_thread_names(true)
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .with_thread_names(true)
                .try_init(),
            Profile::Test => Ok(()),
        };
        // A subscriber set elsewhere in the process keeps precedence
        if let Err(err) = installed {
            tracing::debug!(error = %err, "global subscriber already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_repeatable() {
        init(Profile::Test);
        init(Profile::Production);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("prod".parse::<Profile>(), Ok(Profile::Production));
        assert_eq!(" Development ".parse::<Profile>(), Ok(Profile::Development));
        assert_eq!("TEST".parse::<Profile>(), Ok(Profile::Test));
        assert!("verbose".parse::<Profile>().is_err());
    }

    #[test]
    fn test_profile_serde_names() {
        assert_eq!(
            serde_json::to_string(&Profile::Production).unwrap(),
            "\"production\""
        );
        assert_eq!(Profile::default(), Profile::Development);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Profile::Development.default_directive(), "vconf_core=debug");
        assert_eq!(Profile::Production.default_directive(), "vconf_core=info");
    }
}
