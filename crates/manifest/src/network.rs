use crate::{
    chains::local::{
        LOCALHOST_NETWORK, LOCALHOST_URL, LOCAL_CHAIN_ID, LOCAL_MINING_INTERVAL, LOCAL_NETWORK,
        LOCAL_SIGNERS,
    },
    entries::Entries,
    parse_address, EnvSource, ManifestError, Param,
};
use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use indexmap::IndexMap;
use std::{str::FromStr, time::Duration};
use tracing::{debug, warn};
use url::Url;

/// Automine settings of an in-process chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Mining {
    /// Mine a block for every transaction.
    #[serde(default)]
    pub auto: bool,
    /// Interval between blocks, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
}

/// A network as declared in the manifest, before any secret is read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// Network name, taken from the manifest key.
    #[serde(skip)]
    name: String,
    /// Chain ID.
    chain_id: u64,
    /// JSON-RPC endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<Param>,
    /// Credential slots. Each holds a private key, or a bare address for
    /// accounts managed by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accounts: Option<Vec<Param>>,
    /// Mining parameters for in-process chains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mining: Option<Mining>,
    /// RPC timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl NetworkSpec {
    /// Create a network with no endpoint and default accounts.
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self { name: name.into(), chain_id, url: None, accounts: None, mining: None, timeout: None }
    }

    /// The in-process local network.
    pub fn local() -> Self {
        Self::new(LOCAL_NETWORK, LOCAL_CHAIN_ID)
            .with_mining(Mining { auto: true, interval: Some(LOCAL_MINING_INTERVAL) })
    }

    /// Set the endpoint.
    pub fn with_url(mut self, url: impl Into<Param>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the credential slots.
    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Param>) -> Self {
        self.accounts = Some(accounts.into_iter().collect());
        self
    }

    /// Set the mining parameters.
    pub fn with_mining(mut self, mining: Mining) -> Self {
        self.mining = Some(mining);
        self
    }

    /// Set the RPC timeout in milliseconds.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The network name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The declared endpoint, if any.
    pub const fn url(&self) -> Option<&Param> {
        self.url.as_ref()
    }

    /// True for the local development chain.
    pub const fn is_local_chain(&self) -> bool {
        self.chain_id == LOCAL_CHAIN_ID
    }

    /// Check literal endpoints at load time. The local network must stay
    /// in-process: chain 31337, no endpoint and no secret credentials.
    fn validate(&self) -> Result<(), ManifestError> {
        if normalize(&self.name) == LOCAL_NETWORK {
            let reason = if !self.is_local_chain() {
                Some(format!("chain id must be {LOCAL_CHAIN_ID}, not {}", self.chain_id))
            } else if self.url.is_some() {
                Some("an endpoint is not allowed".to_string())
            } else if self.accounts.iter().flatten().any(|param| param.var().is_some()) {
                Some("secret accounts are not allowed".to_string())
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ManifestError::InvalidLocalNetwork(reason));
            }
        }
        if let Some(Param::Literal(url)) = &self.url {
            Url::parse(url).map_err(|source| ManifestError::InvalidUrl {
                context: format!("network {}", self.name),
                source,
            })?;
        }
        Ok(())
    }

    /// Resolve the network into a usable profile, reading secrets from `env`.
    ///
    /// Missing or malformed secrets leave the endpoint unset or the signer
    /// slot unusable. Only a literal endpoint that is not a URL is an error.
    pub fn profile(&self, env: &impl EnvSource) -> Result<NetworkProfile, ManifestError> {
        let endpoint = self.endpoint(env)?;
        let signers = self.signers(env);

        let profile = NetworkProfile {
            name: self.name.clone(),
            chain_id: self.chain_id,
            endpoint,
            mining: self.mining,
            timeout: self.timeout.map(Duration::from_millis),
            signers,
        };
        debug!(
            network = %profile.name,
            chain_id = profile.chain_id,
            endpoint = ?profile.endpoint.as_ref().map(Url::as_str),
            signers = profile.available_signers().count(),
            "resolved network profile"
        );
        Ok(profile)
    }

    fn endpoint(&self, env: &impl EnvSource) -> Result<Option<Url>, ManifestError> {
        let context = || format!("network {}", self.name);
        match &self.url {
            None if self.name.eq_ignore_ascii_case(LOCALHOST_NETWORK) => Url::parse(LOCALHOST_URL)
                .map(Some)
                .map_err(|source| ManifestError::InvalidUrl { context: context(), source }),
            None => Ok(None),
            Some(Param::Literal(url)) => Url::parse(url)
                .map(Some)
                .map_err(|source| ManifestError::InvalidUrl { context: context(), source }),
            Some(Param::Secret(secret)) => match env.load_url(secret.var()) {
                Ok(url) => Ok(Some(url)),
                Err(error) => {
                    warn!(network = %self.name, %error, "endpoint unavailable");
                    Ok(None)
                }
            },
        }
    }

    fn signers(&self, env: &impl EnvSource) -> Vec<SignerSlot> {
        let Some(accounts) = &self.accounts else {
            return if self.is_local_chain() {
                LOCAL_SIGNERS.iter().copied().map(SignerSlot::Available).collect()
            } else {
                Vec::new()
            };
        };

        accounts
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let var = param.var().map(ToString::to_string);
                let Ok(raw) = param.load(env) else {
                    warn!(network = %self.name, index, var = ?var, "signer credential not set");
                    return SignerSlot::Missing { var: var.unwrap_or_default() };
                };
                match credential_address(&raw) {
                    Some(address) => SignerSlot::Available(address),
                    None => {
                        warn!(network = %self.name, index, var = ?var, "signer credential invalid");
                        SignerSlot::Invalid { var }
                    }
                }
            })
            .collect()
    }
}

/// Address of a credential: a 32-byte private key, or a bare 20-byte address.
fn credential_address(raw: &str) -> Option<Address> {
    PrivateKeySigner::from_str(raw).map(|signer| signer.address()).ok().or_else(|| parse_address(raw))
}

/// One entry of a network's signer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerSlot {
    /// A usable signer identity.
    Available(Address),
    /// The credential's environment variable is not set.
    Missing {
        /// The variable name.
        var: String,
    },
    /// The credential is set but is neither a private key nor an address.
    Invalid {
        /// The variable name, if the credential was read from the
        /// environment.
        var: Option<String>,
    },
}

impl SignerSlot {
    /// The signer address, if usable.
    pub const fn address(&self) -> Option<Address> {
        match self {
            Self::Available(address) => Some(*address),
            _ => None,
        }
    }
}

/// A network resolved for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    name: String,
    chain_id: u64,
    endpoint: Option<Url>,
    mining: Option<Mining>,
    timeout: Option<Duration>,
    signers: Vec<SignerSlot>,
}

impl NetworkProfile {
    /// The network name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The JSON-RPC endpoint. `None` for the in-process chain, or when the
    /// endpoint secret is not set.
    pub const fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Mining parameters.
    pub const fn mining(&self) -> Option<Mining> {
        self.mining
    }

    /// RPC timeout. Passed through to the RPC client, never enforced here.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The signer list, including unusable slots.
    pub fn signers(&self) -> &[SignerSlot] {
        &self.signers
    }

    /// Addresses of the usable signers, in order.
    pub fn available_signers(&self) -> impl Iterator<Item = Address> + '_ {
        self.signers.iter().filter_map(SignerSlot::address)
    }

    /// True for the in-process chain, which needs no endpoint or secrets.
    pub const fn is_in_process(&self) -> bool {
        self.endpoint.is_none() && self.chain_id == LOCAL_CHAIN_ID
    }
}

impl core::fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (chain {})", self.name, self.chain_id)?;
        match &self.endpoint {
            Some(url) => write!(f, " at {url}"),
            None if self.is_in_process() => f.write_str(" in-process"),
            None => f.write_str(" without endpoint"),
        }
    }
}

/// The networks declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Networks {
    /// Network used when no selector is given.
    default_network: String,
    /// Declared networks, keyed by normalized name.
    specs: IndexMap<String, NetworkSpec>,
}

/// Network names match after trimming and lowercasing.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Networks {
    /// Build the network set. The local network is added if absent.
    pub fn new(
        default_network: Option<String>,
        specs: impl IntoIterator<Item = NetworkSpec>,
    ) -> Result<Self, ManifestError> {
        let mut map = IndexMap::new();
        for spec in specs {
            spec.validate()?;
            if map.insert(normalize(&spec.name), spec.clone()).is_some() {
                return Err(ManifestError::DuplicateNetwork(spec.name));
            }
        }
        map.entry(LOCAL_NETWORK.to_string()).or_insert_with(NetworkSpec::local);

        let default_network = normalize(default_network.as_deref().unwrap_or(LOCAL_NETWORK));
        let networks = Self { default_network, specs: map };
        if networks.get(&networks.default_network).is_none() {
            return Err(ManifestError::unknown_network(&networks.default_network, networks.names()));
        }
        Ok(networks)
    }

    pub(crate) fn from_entries(
        default_network: Option<String>,
        entries: Entries<NetworkSpec>,
    ) -> Result<Self, ManifestError> {
        if let Some(name) = entries.first_duplicate_by(normalize) {
            return Err(ManifestError::DuplicateNetwork(name.to_string()));
        }
        let specs = entries.into_iter().map(|(name, spec)| NetworkSpec { name, ..spec });
        Self::new(default_network, specs)
    }

    /// Declared network names, in manifest order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.specs.values().map(NetworkSpec::name)
    }

    /// Look up a declared network.
    pub fn get(&self, name: &str) -> Option<&NetworkSpec> {
        self.specs.get(&normalize(name))
    }

    /// The name of the default network.
    pub fn default_network(&self) -> &str {
        self.get(&self.default_network).map(NetworkSpec::name).unwrap_or(LOCAL_NETWORK)
    }

    /// Networks declared with the given chain ID.
    pub fn by_chain_id(&self, chain_id: u64) -> impl Iterator<Item = &NetworkSpec> + '_ {
        self.specs.values().filter(move |spec| spec.chain_id == chain_id)
    }

    /// Select a network by name and resolve its profile.
    pub fn select(&self, name: &str, env: &impl EnvSource) -> Result<NetworkProfile, ManifestError> {
        let spec = self.get(name).ok_or_else(|| ManifestError::unknown_network(name, self.names()))?;
        debug!(network = spec.name(), "selected network");
        spec.profile(env)
    }

    /// Select the default network.
    pub fn select_default(&self, env: &impl EnvSource) -> Result<NetworkProfile, ManifestError> {
        self.select(&self.default_network, env)
    }
}
