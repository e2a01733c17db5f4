//! REST runtime configuration.
//!
//! Resolved once at process startup from raw environment values; handlers never read the
//! environment.

use admin_forms_core::{FormError, FormResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "admin_forms.yaml";
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestConfig {
    config_path: PathBuf,
    rest_addr: SocketAddr,
}

impl RestConfig {
    /// Build the configuration from optional raw values (typically environment variables).
    ///
    /// Missing or blank values fall back to [`DEFAULT_CONFIG_PATH`] and [`DEFAULT_REST_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidInput`] if the address cannot be parsed.
    pub fn from_env_values(
        config_path: Option<String>,
        rest_addr: Option<String>,
    ) -> FormResult<Self> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let config_path = non_blank(config_path).unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
        let rest_addr = non_blank(rest_addr).unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let rest_addr = rest_addr.parse::<SocketAddr>().map_err(|e| {
            FormError::InvalidInput(format!("invalid REST address '{rest_addr}': {e}"))
        })?;

        Ok(Self {
            config_path: PathBuf::from(config_path),
            rest_addr,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let config = RestConfig::from_env_values(None, Some("   ".into())).expect("defaults");
        assert_eq!(config.config_path(), Path::new(DEFAULT_CONFIG_PATH));
        assert_eq!(config.rest_addr().to_string(), DEFAULT_REST_ADDR);
    }

    #[test]
    fn uses_supplied_values() {
        let config = RestConfig::from_env_values(
            Some(" /etc/admin/forms.yaml ".into()),
            Some("127.0.0.1:8080".into()),
        )
        .expect("explicit values");
        assert_eq!(config.config_path(), Path::new("/etc/admin/forms.yaml"));
        assert_eq!(config.rest_addr().port(), 8080);
    }

    #[test]
    fn rejects_malformed_address() {
        let err = RestConfig::from_env_values(None, Some("localhost".into()))
            .expect_err("should reject address without port");
        assert!(matches!(err, FormError::InvalidInput(msg) if msg.contains("localhost")));
    }
}
