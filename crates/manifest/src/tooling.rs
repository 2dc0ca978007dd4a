//! Parameters handed to the external compilers and test runner.
//!
//! Nothing here is interpreted by this crate. The values are validated for
//! shape, exposed read-only, and passed through.

use crate::{EnvSource, Param};
use std::{path::PathBuf, time::Duration};

/// Solidity compiler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SolidityConfig {
    /// Compiler versions to build with, in priority order.
    #[serde(default)]
    pub compilers: Vec<CompilerConfig>,
}

/// One Solidity compiler version and its settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CompilerConfig {
    /// Compiler version, e.g. `0.8.14`.
    pub version: String,
    /// Compiler settings.
    #[serde(default)]
    pub settings: CompilerSettings,
}

/// Settings for a Solidity compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CompilerSettings {
    /// Optimizer settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// Solidity optimizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct OptimizerConfig {
    /// Whether the optimizer runs.
    #[serde(default)]
    pub enabled: bool,
    /// Expected number of executions of each opcode.
    #[serde(default = "OptimizerConfig::default_runs")]
    pub runs: u32,
}

impl OptimizerConfig {
    const fn default_runs() -> u32 {
        200
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { enabled: false, runs: Self::default_runs() }
    }
}

/// Vyper compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct VyperConfig {
    /// Compiler version, e.g. `0.2.8`.
    pub version: String,
}

/// Project layout.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Contract sources.
    pub sources: PathBuf,
    /// Test sources.
    pub tests: PathBuf,
    /// Compiler cache.
    pub cache: PathBuf,
    /// Build artifacts.
    pub artifacts: PathBuf,
    /// Deployment records, one directory per network.
    pub deployments: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: "./contracts".into(),
            tests: "./test".into(),
            cache: "./cache".into(),
            artifacts: "./artifacts".into(),
            deployments: "./deployments".into(),
        }
    }
}

/// Test runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct MochaConfig {
    /// Per-test timeout in milliseconds, 40 seconds when omitted. Zero
    /// disables the timeout.
    #[serde(default = "MochaConfig::default_timeout")]
    pub timeout: u64,
}

impl MochaConfig {
    const fn default_timeout() -> u64 {
        40_000
    }

    /// The per-test timeout, or `None` when disabled.
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for MochaConfig {
    fn default() -> Self {
        Self { timeout: Self::default_timeout() }
    }
}

/// Block explorer verification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtherscanConfig {
    /// API key, usually read from the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Param>,
}

impl EtherscanConfig {
    /// Resolve the API key. `None` if unconfigured or the secret is unset.
    pub fn api_key(&self, env: &impl EnvSource) -> Option<String> {
        self.api_key.as_ref()?.load(env).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn defaults_fill_in() {
        let solidity: SolidityConfig =
            serde_json::from_str(r#"{ "compilers": [{ "version": "0.8.14" }] }"#).unwrap();
        assert_eq!(solidity.compilers[0].settings.optimizer, OptimizerConfig::default());

        let paths: PathsConfig = serde_json::from_str(r#"{ "sources": "./src" }"#).unwrap();
        assert_eq!(paths.sources, PathBuf::from("./src"));
        assert_eq!(paths.deployments, PathBuf::from("./deployments"));
    }

    #[test]
    fn zero_timeout_disables() {
        assert_eq!(MochaConfig { timeout: 0 }.timeout(), None);
        assert_eq!(MochaConfig::default().timeout(), Some(Duration::from_secs(40)));
        let omitted: MochaConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(omitted, MochaConfig::default());
    }

    #[test]
    fn etherscan_key_from_env() {
        let config = EtherscanConfig { api_key: Some(Param::secret("ETHERSCAN_API_KEY")) };
        assert_eq!(config.api_key(&BTreeMap::<String, String>::new()), None);

        let env: BTreeMap<_, _> = [("ETHERSCAN_API_KEY".to_string(), "ABC123".to_string())].into();
        assert_eq!(config.api_key(&env).as_deref(), Some("ABC123"));
    }
}
