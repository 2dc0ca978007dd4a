use crate::{
    chains::BUILTIN_MANIFEST,
    entries::{Entries, Object},
    EnvSource, EtherscanConfig, ManifestError, MochaConfig, NetworkProfile, NetworkSpec, Networks,
    PathsConfig, Registry, Resolution, Role, SolidityConfig, VyperConfig,
};
use serde_json::Value;
use std::{path::Path, str::FromStr};
use tracing::debug;

/// The manifest document as written, before validation.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    #[serde(default)]
    default_network: Option<String>,
    #[serde(default)]
    networks: Entries<NetworkSpec>,
    #[serde(default)]
    etherscan: EtherscanConfig,
    #[serde(default)]
    named_accounts: Entries<Entries<Value>>,
    #[serde(default)]
    solidity: SolidityConfig,
    #[serde(default)]
    vyper: Option<VyperConfig>,
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    mocha: MochaConfig,
}

/// A loaded, validated deployment manifest.
///
/// Loading fails fast on structural problems: duplicate roles or networks,
/// malformed address literals, bad signer indices. Once loaded the manifest
/// is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    networks: Networks,
    registry: Registry,
    etherscan: EtherscanConfig,
    solidity: SolidityConfig,
    vyper: Option<VyperConfig>,
    paths: PathsConfig,
    mocha: MochaConfig,
}

impl Manifest {
    /// The yAxis manifest shipped with this crate.
    pub fn yaxis() -> Self {
        BUILTIN_MANIFEST.parse().expect("built-in manifest is valid")
    }

    /// A small manifest for tests, see [`test_utils`].
    ///
    /// [`test_utils`]: crate::test_utils
    #[cfg(any(test, feature = "test-utils"))]
    pub fn test() -> Self {
        crate::chains::test_utils::TEST_MANIFEST.parse().expect("test manifest is valid")
    }

    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let Object(raw) = serde_json::from_str::<Object<RawManifest>>(json)?;

        let networks = Networks::from_entries(raw.default_network, raw.networks)?;

        if let Some(name) = raw.named_accounts.first_duplicate_by(str::to_string) {
            return Err(ManifestError::DuplicateRole(name.to_string()));
        }
        let roles = raw
            .named_accounts
            .into_iter()
            .map(|(name, entries)| Role::from_entries(name, entries))
            .collect::<Result<Vec<_>, _>>()?;
        let registry = Registry::new(roles)?;

        debug!(
            networks = networks.names().count(),
            roles = registry.len(),
            "loaded manifest"
        );

        Ok(Self {
            networks,
            registry,
            etherscan: raw.etherscan,
            solidity: raw.solidity,
            vyper: raw.vyper,
            paths: raw.paths,
            mocha: raw.mocha,
        })
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The declared networks.
    pub const fn networks(&self) -> &Networks {
        &self.networks
    }

    /// The role registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Block explorer settings.
    pub const fn etherscan(&self) -> &EtherscanConfig {
        &self.etherscan
    }

    /// Solidity compiler settings.
    pub const fn solidity(&self) -> &SolidityConfig {
        &self.solidity
    }

    /// Vyper compiler settings.
    pub const fn vyper(&self) -> Option<&VyperConfig> {
        self.vyper.as_ref()
    }

    /// Project layout.
    pub const fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Test runner settings.
    pub const fn mocha(&self) -> &MochaConfig {
        &self.mocha
    }

    /// Select a network by name, or the default network if `name` is `None`.
    pub fn select(
        &self,
        name: Option<&str>,
        env: &impl EnvSource,
    ) -> Result<NetworkProfile, ManifestError> {
        match name {
            Some(name) => self.networks.select(name, env),
            None => self.networks.select_default(env),
        }
    }

    /// Resolve every role for a selected network.
    pub fn resolve(&self, profile: &NetworkProfile, env: &impl EnvSource) -> Resolution {
        self.registry.resolve_profile(profile, env)
    }
}

impl FromStr for Manifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}
