use crate::{ConfigError, EnvSource};
use alloy::primitives::Address;
use std::str::FromStr;

/// Parse a `0x`-prefixed, 40-digit hex address in any letter case.
///
/// Checksums are not enforced: the manifest mixes lowercase and checksummed
/// literals, and equality is defined on the decoded bytes.
pub fn parse_address(s: &str) -> Option<Address> {
    let s = s.trim();
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    if hex.len() != 40 {
        return None;
    }
    Address::from_str(hex).ok()
}

/// A value indirected through an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecretRef {
    /// Name of the environment variable.
    env: String,
}

impl SecretRef {
    /// Create a new secret reference.
    pub fn new(env: impl Into<String>) -> Self {
        Self { env: env.into() }
    }

    /// The environment variable name.
    pub fn var(&self) -> &str {
        &self.env
    }

    /// Read the secret from the environment.
    pub fn load(&self, env: &impl EnvSource) -> Result<String, ConfigError> {
        env.load_string(&self.env)
    }
}

/// A manifest parameter: either written inline, or read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Param {
    /// Read from an environment variable at resolution time.
    Secret(SecretRef),
    /// Written inline in the manifest.
    Literal(String),
}

impl Param {
    /// Shortcut for a secret parameter.
    pub fn secret(var: impl Into<String>) -> Self {
        Self::Secret(SecretRef::new(var))
    }

    /// The backing variable name, if this is a secret.
    pub fn var(&self) -> Option<&str> {
        match self {
            Self::Secret(s) => Some(s.var()),
            Self::Literal(_) => None,
        }
    }

    /// Load the parameter value.
    pub fn load(&self, env: &impl EnvSource) -> Result<String, ConfigError> {
        match self {
            Self::Secret(s) => s.load(env),
            Self::Literal(v) => Ok(v.clone()),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

/// The value a role is bound to on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A literal address.
    Address(Address),
    /// An address read from the environment.
    Secret(SecretRef),
    /// An index into the active network's signer list.
    Signer(usize),
}

impl From<Address> for Binding {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<SecretRef> for Binding {
    fn from(value: SecretRef) -> Self {
        Self::Secret(value)
    }
}

impl core::fmt::Display for Binding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Address(a) => write!(f, "{a}"),
            Self::Secret(s) => write!(f, "${}", s.var()),
            Self::Signer(i) => write!(f, "signer[{i}]"),
        }
    }
}
