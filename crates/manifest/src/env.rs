//! Environment access for secret indirection.
//!
//! Secrets are never read through a global lookup. Every resolution pass is
//! handed an [`EnvSource`], so that tests can substitute a fixed map for the
//! process environment.

use alloy::primitives::Address;
use std::{
    collections::{BTreeMap, HashMap},
    env,
    hash::BuildHasher,
};

/// Error type for environment loading helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing an address from an environment variable
    #[error("environment variable {0} does not hold a 20-byte address")]
    Address(String),
    /// Error parsing a URL from an environment variable
    #[error("environment variable {key} does not hold a valid url: {source}")]
    Url {
        /// The variable name.
        key: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}

/// A source of environment variables.
///
/// Empty or whitespace-only values are treated as unset, matching the way
/// `.env` files leave placeholders like `DEPLOYER_ADDRESS=`.
pub trait EnvSource {
    /// Read the raw value of a variable, if set.
    fn raw_var(&self, key: &str) -> Option<String>;

    /// Read a variable, treating blank values as unset.
    fn var(&self, key: &str) -> Option<String> {
        self.raw_var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Load a variable from the environment
    fn load_string(&self, key: &str) -> Result<String, ConfigError> {
        self.var(key).ok_or_else(|| ConfigError::missing(key))
    }

    /// Load an address from the environment
    fn load_address(&self, key: &str) -> Result<Address, ConfigError> {
        let val = self.load_string(key)?;
        crate::parse_address(&val).ok_or_else(|| ConfigError::Address(key.to_string()))
    }

    /// Load a URL from the environment
    fn load_url(&self, key: &str) -> Result<url::Url, ConfigError> {
        let val = self.load_string(key)?;
        url::Url::parse(&val).map_err(|source| ConfigError::Url { key: key.to_string(), source })
    }
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn raw_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn raw_var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn raw_var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn raw_var(&self, key: &str) -> Option<String> {
        (**self).raw_var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn blank_values_are_unset() {
        let env = env(&[("EMPTY", ""), ("SPACES", "   "), ("SET", " value ")]);
        assert_eq!(env.var("EMPTY"), None);
        assert_eq!(env.var("SPACES"), None);
        assert_eq!(env.var("SET").as_deref(), Some("value"));
        assert_eq!(env.var("UNSET"), None);
    }

    #[test]
    fn load_address() {
        let env = env(&[
            ("GOOD", "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            ("BAD", "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922"),
        ]);
        assert_eq!(
            env.load_address("GOOD").unwrap(),
            crate::chains::local::LOCAL_SIGNERS[0]
        );
        assert_eq!(env.load_address("BAD"), Err(ConfigError::Address("BAD".to_string())));
        assert_eq!(env.load_address("NONE"), Err(ConfigError::missing("NONE")));
    }

    #[test]
    fn load_url() {
        let env = env(&[("RPC", "https://eth.example.org/v3/key"), ("JUNK", "not a url")]);
        assert_eq!(env.load_url("RPC").unwrap().host_str(), Some("eth.example.org"));
        assert!(matches!(env.load_url("JUNK"), Err(ConfigError::Url { .. })));
    }
}
