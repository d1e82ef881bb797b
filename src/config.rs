//! Base API URL configuration.
//!
//! The base URL is fixed at client-construction time. Deployments override it
//! at compile time through the `BAMBOO_API_BASE_URL` environment variable;
//! the default matches the prefix the backend mounts its blueprints under.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default API prefix when no build-time override is present.
pub const DEFAULT_API_BASE: &str = "/api";

/// Client configuration consumed at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
}

impl ClientConfig {
    /// Create a configuration with an explicit base URL.
    ///
    /// A trailing slash is dropped so endpoint joining stays uniform.
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self { api_base }
    }

    /// Read the base URL from the build environment, falling back to
    /// [`DEFAULT_API_BASE`].
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("BAMBOO_API_BASE_URL").unwrap_or(DEFAULT_API_BASE))
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
